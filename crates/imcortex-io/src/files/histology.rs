//! Histology slice stacks

use serde::{Deserialize, Serialize};

use imcortex_scene::{SceneAttributes, SceneClass};

use crate::codec::{read_document, write_document};
use crate::context::ReadContext;
use crate::data_file::{DataFile, FileBase};
use crate::error::IoResult;
use crate::file_type::DataFileType;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistologyContent {
    /// Image file name of each slice, in stack order
    #[serde(default)]
    pub slices: Vec<String>,
}

/// An ordered stack of histology slice images
#[derive(Debug, Clone, Default)]
pub struct HistologySlicesFile {
    base: FileBase,
    content: HistologyContent,
    selected_slice: usize,
}

impl HistologySlicesFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(file_name: &str, content: HistologyContent) -> Self {
        Self {
            base: FileBase::new(file_name),
            content,
            selected_slice: 0,
        }
    }

    pub fn number_of_slices(&self) -> usize {
        self.content.slices.len()
    }

    pub fn selected_slice(&self) -> usize {
        self.selected_slice
    }
}

impl DataFile for HistologySlicesFile {
    crate::impl_file_base!();

    fn data_file_type(&self) -> DataFileType {
        DataFileType::HistologySlices
    }

    fn clear_modified(&mut self) {
        self.base.modified = false;
    }

    fn is_empty(&self) -> bool {
        self.content.slices.is_empty()
    }

    fn read_file(&mut self, path: &str, ctx: &ReadContext) -> IoResult<()> {
        self.content = read_document(path, DataFileType::HistologySlices, ctx)?;
        self.base.file_name = path.to_string();
        self.selected_slice = 0;
        Ok(())
    }

    fn write_file(&mut self, path: &str) -> IoResult<()> {
        write_document(path, DataFileType::HistologySlices, &self.content)
    }

    fn clear(&mut self) {
        self.content = HistologyContent::default();
        self.selected_slice = 0;
    }

    fn save_to_scene(&self, _attributes: &SceneAttributes, instance_name: &str) -> Option<SceneClass> {
        let mut class = self
            .base
            .scene_class(DataFileType::HistologySlices, instance_name);
        class.add_integer("selectedSlice", self.selected_slice as i64);
        Some(class)
    }

    fn restore_from_scene(&mut self, attributes: &mut SceneAttributes, class: &SceneClass) {
        let saved = class.get_integer_value("selectedSlice", 0);
        match usize::try_from(saved) {
            Ok(slice) if slice < self.number_of_slices() => self.selected_slice = slice,
            _ => attributes.add_to_error_message(format!(
                "{}: saved slice {saved} is not in the stack",
                self.base.file_name
            )),
        }
    }
}
