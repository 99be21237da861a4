//! Fiber orientation and fiber trajectory files

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use imcortex_scene::{SceneAttributes, SceneClass};

use crate::codec::{read_document, write_document};
use crate::context::ReadContext;
use crate::data_file::{DataFile, FileBase};
use crate::error::IoResult;
use crate::file_type::DataFileType;
use crate::structure::Structure;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FiberOrientationContent {
    #[serde(default)]
    pub surface_brainordinates: BTreeMap<Structure, usize>,
    #[serde(default)]
    pub number_of_fibers: usize,
}

/// Fiber orientations at brainordinates
#[derive(Debug, Clone, Default)]
pub struct FiberOrientationFile {
    base: FileBase,
    content: FiberOrientationContent,
}

impl FiberOrientationFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(file_name: &str, content: FiberOrientationContent) -> Self {
        Self {
            base: FileBase::new(file_name),
            content,
        }
    }
}

impl DataFile for FiberOrientationFile {
    crate::impl_file_base!();

    fn data_file_type(&self) -> DataFileType {
        DataFileType::ConnectivityFiberOrientationsTemporary
    }

    fn clear_modified(&mut self) {
        self.base.modified = false;
    }

    fn is_empty(&self) -> bool {
        self.content.number_of_fibers == 0
    }

    fn brainordinate_counts(&self) -> Vec<(Structure, usize)> {
        self.content
            .surface_brainordinates
            .iter()
            .map(|(s, n)| (*s, *n))
            .collect()
    }

    fn read_file(&mut self, path: &str, ctx: &ReadContext) -> IoResult<()> {
        self.content =
            read_document(path, DataFileType::ConnectivityFiberOrientationsTemporary, ctx)?;
        self.base.file_name = path.to_string();
        Ok(())
    }

    fn write_file(&mut self, path: &str) -> IoResult<()> {
        write_document(
            path,
            DataFileType::ConnectivityFiberOrientationsTemporary,
            &self.content,
        )
    }

    fn clear(&mut self) {
        self.content = FiberOrientationContent::default();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FiberTrajectoryContent {
    /// Name of the orientation file the trajectories were computed from
    pub fiber_orientation_file_name: String,
    #[serde(default)]
    pub number_of_rows: usize,
}

/// Probabilistic trajectories that refer to a fiber orientation file
#[derive(Debug, Clone, Default)]
pub struct FiberTrajectoryFile {
    base: FileBase,
    content: FiberTrajectoryContent,
    matched_orientation: Option<String>,
}

impl FiberTrajectoryFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(file_name: &str, content: FiberTrajectoryContent) -> Self {
        Self {
            base: FileBase::new(file_name),
            content,
            matched_orientation: None,
        }
    }
}

impl DataFile for FiberTrajectoryFile {
    crate::impl_file_base!();

    fn data_file_type(&self) -> DataFileType {
        DataFileType::ConnectivityFiberTrajectoryTemporary
    }

    fn clear_modified(&mut self) {
        self.base.modified = false;
    }

    fn is_empty(&self) -> bool {
        self.content.number_of_rows == 0
    }

    fn supports_chart_two(&self) -> bool {
        false
    }

    fn read_file(&mut self, path: &str, ctx: &ReadContext) -> IoResult<()> {
        self.content =
            read_document(path, DataFileType::ConnectivityFiberTrajectoryTemporary, ctx)?;
        self.base.file_name = path.to_string();
        self.matched_orientation = None;
        Ok(())
    }

    fn write_file(&mut self, path: &str) -> IoResult<()> {
        write_document(
            path,
            DataFileType::ConnectivityFiberTrajectoryTemporary,
            &self.content,
        )
    }

    fn clear(&mut self) {
        self.content = FiberTrajectoryContent::default();
        self.matched_orientation = None;
    }

    fn fiber_orientation_file_name(&self) -> Option<&str> {
        let name = self.content.fiber_orientation_file_name.as_str();
        (!name.is_empty()).then_some(name)
    }

    fn set_matched_fiber_orientation(&mut self, file_name: Option<String>) {
        self.matched_orientation = file_name;
    }

    fn matched_fiber_orientation(&self) -> Option<&str> {
        self.matched_orientation.as_deref()
    }

    fn save_to_scene(&self, _attributes: &SceneAttributes, instance_name: &str) -> Option<SceneClass> {
        let mut class = self
            .base
            .scene_class(DataFileType::ConnectivityFiberTrajectoryTemporary, instance_name);
        if let Some(name) = &self.matched_orientation {
            class.add_path_name("matchedFiberOrientationFileName", name.as_str());
        }
        Some(class)
    }

    fn restore_from_scene(&mut self, _attributes: &mut SceneAttributes, class: &SceneClass) {
        let name = class.get_path_name_value("matchedFiberOrientationFileName", "");
        if !name.is_empty() {
            self.matched_orientation = Some(name);
        }
    }
}
