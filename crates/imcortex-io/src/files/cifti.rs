//! CIFTI brainordinate-mapped files

use std::collections::BTreeMap;

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
pub struct CiftiContent {
    /// Vertices mapped per surface structure
    #[serde(default)]
    pub surface_brainordinates: BTreeMap<Structure, usize>,
    /// Voxels mapped in volume structures
    #[serde(default)]
    pub volume_brainordinates: usize,
    #[serde(default)]
    pub map_names: Vec<String>,
}

/// Any CIFTI file whose rows or columns are brainordinates
#[derive(Debug, Clone)]
pub struct CiftiMappableFile {
    file_type: DataFileType,
    base: FileBase,
    content: CiftiContent,
    coloring: PaletteColoring,
}

impl CiftiMappableFile {
    pub fn new(file_type: DataFileType) -> Self {
        debug_assert!(file_type.is_cifti_brainordinate_mapped());
        Self {
            file_type,
            base: FileBase::default(),
            content: CiftiContent::default(),
            coloring: PaletteColoring::default(),
        }
    }

    pub fn with_content(file_type: DataFileType, file_name: &str, content: CiftiContent) -> Self {
        let mut file = Self::new(file_type);
        file.base = FileBase::new(file_name);
        file.content = content;
        file
    }

    pub fn content(&self) -> &CiftiContent {
        &self.content
    }

    pub fn coloring(&self) -> &PaletteColoring {
        &self.coloring
    }

    pub fn coloring_mut(&mut self) -> &mut PaletteColoring {
        &mut self.coloring
    }

    fn is_label_type(&self) -> bool {
        matches!(
            self.file_type,
            DataFileType::ConnectivityDenseLabel | DataFileType::ConnectivityParcelLabel
        )
    }
}

impl DataFile for CiftiMappableFile {
    crate::impl_file_base!();

    fn data_file_type(&self) -> DataFileType {
        self.file_type
    }

    fn clear_modified(&mut self) {
        self.base.modified = false;
        self.coloring.clear_modified();
    }

    fn is_modified_palette_coloring(&self) -> bool {
        !self.is_label_type() && self.coloring.is_modified()
    }

    fn palette_coloring_mut(&mut self) -> Option<&mut PaletteColoring> {
        Some(&mut self.coloring)
    }

    fn is_empty(&self) -> bool {
        self.content.surface_brainordinates.values().all(|n| *n == 0)
            && self.content.volume_brainordinates == 0
    }

    fn number_of_maps(&self) -> usize {
        self.content.map_names.len()
    }

    fn brainordinate_counts(&self) -> Vec<(Structure, usize)> {
        self.content
            .surface_brainordinates
            .iter()
            .map(|(s, n)| (*s, *n))
            .collect()
    }

    fn is_volume_mappable(&self) -> bool {
        self.content.volume_brainordinates > 0
    }

    fn supports_chart_one(&self) -> bool {
        !self.is_label_type() && !self.is_empty()
    }

    fn supports_chart_two(&self) -> bool {
        !self.is_empty()
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
        self.content = CiftiContent::default();
        self.coloring = PaletteColoring::default();
    }

    fn dynamic_companion_type(&self) -> Option<DataFileType> {
        (self.file_type == DataFileType::ConnectivityDenseTimeSeries)
            .then_some(DataFileType::ConnectivityDenseDynamic)
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
        self.coloring.restore_from_scene(class, maps);
    }
}
