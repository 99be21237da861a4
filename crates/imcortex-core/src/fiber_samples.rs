//! Lazily loaded fiber orientation samples
//!
//! Sample volumes are read on first use from the directory of the loaded
//! fiber orientation files and dropped on reset.

use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct FiberOrientationSamplesLoader {
    attempted: bool,
    sample_files: Vec<String>,
}

impl FiberOrientationSamplesLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find sample volumes next to `orientation_file_name` once; later
    /// calls return the first result
    pub fn load_samples(&mut self, orientation_file_name: &str) -> &[String] {
        if !self.attempted {
            self.attempted = true;
            if let Some(dir) = Path::new(orientation_file_name).parent() {
                if let Ok(entries) = std::fs::read_dir(dir) {
                    let mut found: Vec<String> = entries
                        .filter_map(|e| e.ok())
                        .map(|e| e.path())
                        .filter(|p| {
                            p.file_name()
                                .and_then(|n| n.to_str())
                                .is_some_and(|n| n.starts_with("merged_") && n.ends_with(".nii.gz"))
                        })
                        .map(|p| p.to_string_lossy().into_owned())
                        .collect();
                    found.sort();
                    self.sample_files = found;
                }
            }
        }
        &self.sample_files
    }

    pub fn is_loaded(&self) -> bool {
        self.attempted
    }

    pub fn reset(&mut self) {
        self.attempted = false;
        self.sample_files.clear();
    }
}
