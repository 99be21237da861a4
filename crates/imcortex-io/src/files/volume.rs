//! Volume files

use serde::{Deserialize, Serialize};

use imcortex_scene::{SceneAttributes, SceneClass};

use super::coloring::PaletteColoring;
use crate::codec::{read_document, write_document};
use crate::context::ReadContext;
use crate::data_file::{DataFile, FileBase};
use crate::error::IoResult;
use crate::file_type::DataFileType;
use crate::hierarchy::GroupAndNameHierarchy;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VolumeContent {
    pub dimensions: [usize; 3],
    #[serde(default)]
    pub map_names: Vec<String>,
    /// Label names for label volumes (empty for scalar volumes)
    #[serde(default)]
    pub label_names: Vec<String>,
}

/// A volume of one or more maps
#[derive(Debug, Clone, Default)]
pub struct VolumeFile {
    base: FileBase,
    content: VolumeContent,
    coloring: PaletteColoring,
    hierarchy: GroupAndNameHierarchy,
}

impl VolumeFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(file_name: &str, content: VolumeContent) -> Self {
        let mut file = Self {
            base: FileBase::new(file_name),
            content,
            ..Self::default()
        };
        file.update_hierarchy();
        file
    }

    pub fn content(&self) -> &VolumeContent {
        &self.content
    }

    pub fn coloring(&self) -> &PaletteColoring {
        &self.coloring
    }

    pub fn coloring_mut(&mut self) -> &mut PaletteColoring {
        &mut self.coloring
    }

    pub fn is_label_volume(&self) -> bool {
        !self.content.label_names.is_empty()
    }

    fn update_hierarchy(&mut self) {
        let content = &self.content;
        let items = content.map_names.iter().flat_map(|map| {
            content
                .label_names
                .iter()
                .map(move |label| (map.as_str(), label.as_str()))
        });
        self.hierarchy.update(items);
    }
}

impl DataFile for VolumeFile {
    crate::impl_file_base!();

    fn data_file_type(&self) -> DataFileType {
        DataFileType::Volume
    }

    fn clear_modified(&mut self) {
        self.base.modified = false;
        self.coloring.clear_modified();
    }

    fn is_modified_palette_coloring(&self) -> bool {
        !self.is_label_volume() && self.coloring.is_modified()
    }

    fn palette_coloring_mut(&mut self) -> Option<&mut PaletteColoring> {
        Some(&mut self.coloring)
    }

    fn is_empty(&self) -> bool {
        self.content.dimensions.iter().any(|d| *d == 0)
    }

    fn number_of_maps(&self) -> usize {
        self.content.map_names.len()
    }

    fn is_volume_mappable(&self) -> bool {
        true
    }

    fn supports_chart_one(&self) -> bool {
        self.number_of_maps() > 1
    }

    fn supports_chart_two(&self) -> bool {
        !self.is_empty()
    }

    fn read_file(&mut self, path: &str, ctx: &ReadContext) -> IoResult<()> {
        self.content = read_document(path, DataFileType::Volume, ctx)?;
        self.base.file_name = path.to_string();
        self.coloring = PaletteColoring::default();
        self.hierarchy = GroupAndNameHierarchy::default();
        self.update_hierarchy();
        Ok(())
    }

    fn write_file(&mut self, path: &str) -> IoResult<()> {
        write_document(path, DataFileType::Volume, &self.content)
    }

    fn clear(&mut self) {
        self.content = VolumeContent::default();
        self.coloring = PaletteColoring::default();
        self.hierarchy = GroupAndNameHierarchy::default();
    }

    fn name_hierarchy(&self) -> Option<&GroupAndNameHierarchy> {
        self.is_label_volume().then_some(&self.hierarchy)
    }

    fn name_hierarchy_mut(&mut self) -> Option<&mut GroupAndNameHierarchy> {
        if self.is_label_volume() {
            Some(&mut self.hierarchy)
        } else {
            None
        }
    }

    fn dynamic_companion_type(&self) -> Option<DataFileType> {
        (self.number_of_maps() > 1).then_some(DataFileType::VolumeDynamic)
    }

    fn update_coloring(&mut self) {
        self.coloring.recompute();
    }

    fn save_to_scene(&self, _attributes: &SceneAttributes, instance_name: &str) -> Option<SceneClass> {
        let mut class = self.base.scene_class(DataFileType::Volume, instance_name);
        self.coloring.save_to_scene(&mut class);
        Some(class)
    }

    fn restore_from_scene(&mut self, _attributes: &mut SceneAttributes, class: &SceneClass) {
        let maps = self.number_of_maps();
        self.coloring.restore_from_scene(class, maps);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_volume_hierarchy() {
        let file = VolumeFile::with_content(
            "/d/atlas.nii.gz",
            VolumeContent {
                dimensions: [91, 109, 91],
                map_names: vec!["parcels".to_string()],
                label_names: vec!["Thalamus".to_string(), "Putamen".to_string()],
            },
        );
        let hierarchy = file.name_hierarchy().unwrap();
        assert!(hierarchy.is_selected("parcels", "Putamen"));
        assert_eq!(file.dynamic_companion_type(), None);
        assert!(file.is_volume_mappable());
    }

    #[test]
    fn test_scalar_volume_has_no_hierarchy() {
        let file = VolumeFile::with_content(
            "/d/bold.nii.gz",
            VolumeContent {
                dimensions: [2, 2, 2],
                map_names: vec!["t0".to_string(), "t1".to_string()],
                label_names: Vec::new(),
            },
        );
        assert!(file.name_hierarchy().is_none());
        assert_eq!(file.dynamic_companion_type(), Some(DataFileType::VolumeDynamic));
        assert!(VolumeFile::new().is_empty());
    }
}
