//! User preferences for imcortex-core
//!
//! Preferences are read from `<config dir>/imcortex/preferences.toml`:
//!
//! ```toml
//! dynamic_connectivity_default_on = false
//! reuse_unmodified_files_for_scenes = true
//! max_recent_spec_files = 10
//! recent_spec_files = ["/data/study/study.spec"]
//! default_scene_type = "Full"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use imcortex_scene::SceneType;

use crate::error::{BrainError, BrainResult};

/// Preferences the brain consults while loading files and scenes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CortexPreferences {
    /// Dynamic connectivity companions start enabled as layers
    pub dynamic_connectivity_default_on: bool,
    /// Keep unmodified files in memory when a scene or spec file is loaded
    pub reuse_unmodified_files_for_scenes: bool,
    /// Length of the recent spec file list
    pub max_recent_spec_files: usize,
    /// Most recent first
    pub recent_spec_files: Vec<String>,
    /// Scene type used when none is given
    pub default_scene_type: SceneType,
}

impl Default for CortexPreferences {
    fn default() -> Self {
        Self {
            dynamic_connectivity_default_on: false,
            reuse_unmodified_files_for_scenes: true,
            max_recent_spec_files: 10,
            recent_spec_files: Vec::new(),
            default_scene_type: SceneType::Full,
        }
    }
}

impl CortexPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// `<config dir>/imcortex/preferences.toml`, if the platform has a
    /// config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("imcortex").join("preferences.toml"))
    }

    /// Load from the default location; a missing file yields defaults
    pub fn load_default() -> BrainResult<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load and validate preferences from a TOML file
    pub fn load(path: &Path) -> BrainResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| BrainError::Config(format!("{}: {e}", path.display())))?;
        let prefs = Self::from_toml(&content)?;
        prefs.validate()?;
        Ok(prefs)
    }

    /// Write preferences as TOML, creating the parent directory
    pub fn save(&self, path: &Path) -> BrainResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| BrainError::Config(format!("{}: {e}", parent.display())))?;
        }
        let content = self.to_toml()?;
        std::fs::write(path, content)
            .map_err(|e| BrainError::Config(format!("{}: {e}", path.display())))
    }

    pub fn from_toml(toml_str: &str) -> BrainResult<Self> {
        toml::from_str(toml_str).map_err(|e| BrainError::Config(e.to_string()))
    }

    pub fn to_toml(&self) -> BrainResult<String> {
        toml::to_string_pretty(self).map_err(|e| BrainError::Config(e.to_string()))
    }

    pub fn from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Validate preference values
    pub fn validate(&self) -> BrainResult<()> {
        if self.max_recent_spec_files == 0 {
            return Err(BrainError::Config(
                "max_recent_spec_files must be positive".to_string(),
            ));
        }
        if self.recent_spec_files.iter().any(|f| f.trim().is_empty()) {
            return Err(BrainError::Config(
                "recent_spec_files contains an empty entry".to_string(),
            ));
        }
        Ok(())
    }

    /// Move `spec_file_name` to the front of the recent list
    pub fn add_to_recent_spec_files(&mut self, spec_file_name: &str) {
        self.recent_spec_files.retain(|f| f != spec_file_name);
        self.recent_spec_files.insert(0, spec_file_name.to_string());
        self.recent_spec_files.truncate(self.max_recent_spec_files);
    }
}
