//! What the brain holds, for printing

use serde::Serialize;

use imcortex_core::Brain;
use imcortex_io::{DataFile, DataFileType, Structure};

#[derive(Debug, Serialize)]
pub struct FileSummary {
    pub file_type: DataFileType,
    pub file_name: String,
    pub structure: Structure,
    pub maps: usize,
    pub modified: bool,
    pub in_spec_file: bool,
}

#[derive(Debug, Serialize)]
pub struct StructureSummary {
    pub structure: Structure,
    pub number_of_nodes: usize,
    pub number_of_files: usize,
}

#[derive(Debug, Serialize)]
pub struct Inventory {
    pub spec_file: String,
    pub files: Vec<FileSummary>,
    pub structures: Vec<StructureSummary>,
    pub models: Vec<String>,
    pub problems: Vec<String>,
}

impl Inventory {
    pub fn of(brain: &Brain, problems: Vec<String>) -> Self {
        let files = brain
            .all_file_ids()
            .into_iter()
            .filter(|id| *id != brain.scene_annotation_file())
            .filter_map(|id| {
                let file = brain.file(id)?;
                Some(FileSummary {
                    file_type: file.data_file_type(),
                    file_name: file.file_name().to_string(),
                    structure: file.structure(),
                    maps: file.number_of_maps(),
                    modified: file.is_modified(),
                    in_spec_file: brain.spec_file().contains_file(id),
                })
            })
            .collect();
        let structures = brain
            .brain_structures()
            .iter()
            .map(|bs| StructureSummary {
                structure: bs.structure(),
                number_of_nodes: bs.number_of_nodes(),
                number_of_files: bs.number_of_files(),
            })
            .collect();
        let models = brain
            .models()
            .models()
            .iter()
            .map(|m| format!("{} [{}]", m.kind(), m.selected_file_names().join(", ")))
            .collect();
        Self {
            spec_file: brain.spec_file().file_name().to_string(),
            files,
            structures,
            models,
            problems,
        }
    }

    pub fn print(&self) {
        if !self.spec_file.is_empty() {
            println!("Spec file: {}", self.spec_file);
        }
        println!("Files ({}):", self.files.len());
        for f in &self.files {
            let modified = if f.modified { " *" } else { "" };
            println!(
                "  {:<28} {:<18} {:>3} maps  {}{}",
                f.file_type.to_string(),
                f.structure.to_string(),
                f.maps,
                f.file_name,
                modified
            );
        }
        println!("Brain structures ({}):", self.structures.len());
        for s in &self.structures {
            println!(
                "  {:<18} {:>7} vertices {:>3} files",
                s.structure.to_string(),
                s.number_of_nodes,
                s.number_of_files
            );
        }
        println!("Models ({}):", self.models.len());
        for m in &self.models {
            println!("  {m}");
        }
        if !self.problems.is_empty() {
            println!("Problems ({}):", self.problems.len());
            for p in &self.problems {
                println!("  {p}");
            }
        }
    }
}
