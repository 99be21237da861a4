//! Per-vertex data files: labels, metrics and RGBA

use serde::{Deserialize, Serialize};

use imcortex_scene::{SceneAttributes, SceneClass};

use super::coloring::PaletteColoring;
use crate::codec::{read_document, write_document};
use crate::context::ReadContext;
use crate::data_file::{DataFile, FileBase};
use crate::error::IoResult;
use crate::file_type::DataFileType;
use crate::structure::Structure;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeDataContent {
    pub structure: Structure,
    pub number_of_nodes: usize,
    #[serde(default)]
    pub map_names: Vec<String>,
}

/// A file holding one or more maps of per-vertex values for one structure
#[derive(Debug, Clone)]
pub struct NodeDataFile {
    file_type: DataFileType,
    base: FileBase,
    content: NodeDataContent,
    coloring: PaletteColoring,
}

impl NodeDataFile {
    /// `file_type` must be Label, Metric or RGBA
    pub fn new(file_type: DataFileType) -> Self {
        debug_assert!(matches!(
            file_type,
            DataFileType::Label | DataFileType::Metric | DataFileType::Rgba
        ));
        Self {
            file_type,
            base: FileBase::default(),
            content: NodeDataContent::default(),
            coloring: PaletteColoring::default(),
        }
    }

    /// Build an in-memory file
    pub fn with_content(file_type: DataFileType, file_name: &str, content: NodeDataContent) -> Self {
        let mut file = Self::new(file_type);
        file.base = FileBase::new(file_name);
        file.content = content;
        file
    }

    pub fn coloring(&self) -> &PaletteColoring {
        &self.coloring
    }

    pub fn coloring_mut(&mut self) -> &mut PaletteColoring {
        &mut self.coloring
    }

    fn uses_palette(&self) -> bool {
        self.file_type == DataFileType::Metric
    }
}

impl DataFile for NodeDataFile {
    crate::impl_file_base!();

    fn data_file_type(&self) -> DataFileType {
        self.file_type
    }

    fn structure(&self) -> Structure {
        self.content.structure
    }

    fn set_structure(&mut self, structure: Structure) {
        self.content.structure = structure;
    }

    fn clear_modified(&mut self) {
        self.base.modified = false;
        self.coloring.clear_modified();
    }

    fn is_modified_palette_coloring(&self) -> bool {
        self.uses_palette() && self.coloring.is_modified()
    }

    fn palette_coloring_mut(&mut self) -> Option<&mut PaletteColoring> {
        Some(&mut self.coloring)
    }

    fn is_empty(&self) -> bool {
        self.content.number_of_nodes == 0 || self.content.map_names.is_empty()
    }

    fn number_of_maps(&self) -> usize {
        self.content.map_names.len()
    }

    fn number_of_nodes(&self) -> usize {
        self.content.number_of_nodes
    }

    fn supports_chart_one(&self) -> bool {
        self.file_type == DataFileType::Metric && !self.is_empty()
    }

    fn supports_chart_two(&self) -> bool {
        self.file_type != DataFileType::Rgba && !self.is_empty()
    }

    fn read_file(&mut self, path: &str, ctx: &ReadContext) -> IoResult<()> {
        self.content = read_document(path, self.file_type, ctx)?;
        self.base.file_name = path.to_string();
        self.coloring = PaletteColoring::default();
        Ok(())
    }

    fn write_file(&mut self, path: &str) -> IoResult<()> {
        write_document(path, self.file_type, &self.content)
    }

    fn clear(&mut self) {
        self.content = NodeDataContent::default();
        self.coloring = PaletteColoring::default();
    }

    fn dynamic_companion_type(&self) -> Option<DataFileType> {
        (self.file_type == DataFileType::Metric && self.number_of_maps() > 1)
            .then_some(DataFileType::MetricDynamic)
    }

    fn update_coloring(&mut self) {
        self.coloring.recompute();
    }

    fn save_to_scene(&self, _attributes: &SceneAttributes, instance_name: &str) -> Option<SceneClass> {
        let mut class = self.base.scene_class(self.file_type, instance_name);
        self.coloring.save_to_scene(&mut class);
        Some(class)
    }

    fn restore_from_scene(&mut self, _attributes: &mut SceneAttributes, class: &SceneClass) {
        let maps = self.number_of_maps();
        if self.uses_palette() {
            self.coloring.restore_from_scene(class, maps);
        } else {
            let index = class.get_integer_value("selectedMapIndex", 0);
            if let Ok(index) = usize::try_from(index) {
                if index < maps {
                    self.coloring.select_map(index);
                }
            }
        }
    }
}
