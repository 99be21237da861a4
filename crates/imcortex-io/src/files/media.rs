//! Image, CZI and OME-Zarr media files

use serde::{Deserialize, Serialize};

use imcortex_scene::{SceneAttributes, SceneClass};

use crate::codec::{read_document, write_document};
use crate::context::ReadContext;
use crate::data_file::{DataFile, FileBase};
use crate::error::IoResult;
use crate::file_type::DataFileType;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaContent {
    pub width: usize,
    pub height: usize,
    /// Resolution levels for pyramidal formats, 1 for plain images
    #[serde(default = "default_levels")]
    pub resolution_levels: usize,
}

fn default_levels() -> usize {
    1
}

/// A 2D image shown by the media model
#[derive(Debug, Clone)]
pub struct MediaFile {
    file_type: DataFileType,
    base: FileBase,
    content: MediaContent,
    selected_level: usize,
}

impl MediaFile {
    pub fn new(file_type: DataFileType) -> Self {
        debug_assert!(file_type.is_media());
        Self {
            file_type,
            base: FileBase::default(),
            content: MediaContent::default(),
            selected_level: 0,
        }
    }

    pub fn with_content(file_type: DataFileType, file_name: &str, content: MediaContent) -> Self {
        let mut file = Self::new(file_type);
        file.base = FileBase::new(file_name);
        file.content = content;
        file
    }

    pub fn content(&self) -> &MediaContent {
        &self.content
    }
}

impl DataFile for MediaFile {
    crate::impl_file_base!();

    fn data_file_type(&self) -> DataFileType {
        self.file_type
    }

    fn clear_modified(&mut self) {
        self.base.modified = false;
    }

    fn is_empty(&self) -> bool {
        self.content.width == 0 || self.content.height == 0
    }

    fn read_file(&mut self, path: &str, ctx: &ReadContext) -> IoResult<()> {
        self.content = read_document(path, self.file_type, ctx)?;
        self.base.file_name = path.to_string();
        self.selected_level = 0;
        Ok(())
    }

    fn write_file(&mut self, path: &str) -> IoResult<()> {
        write_document(path, self.file_type, &self.content)
    }

    fn clear(&mut self) {
        self.content = MediaContent::default();
        self.selected_level = 0;
    }

    fn save_to_scene(&self, _attributes: &SceneAttributes, instance_name: &str) -> Option<SceneClass> {
        if self.content.resolution_levels <= 1 {
            return None;
        }
        let mut class = self.base.scene_class(self.file_type, instance_name);
        class.add_integer("resolutionLevel", self.selected_level as i64);
        Some(class)
    }

    fn restore_from_scene(&mut self, _attributes: &mut SceneAttributes, class: &SceneClass) {
        if let Ok(level) = usize::try_from(class.get_integer_value("resolutionLevel", 0)) {
            if level < self.content.resolution_levels {
                self.selected_level = level;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_image_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slide.czi");
        let path = path.to_str().unwrap();
        std::fs::write(
            path,
            r#"{"file_type":"CZI_IMAGE_FILE","version":1,"content":{"width":100,"height":50}}"#,
        )
        .unwrap();

        let mut file = MediaFile::new(DataFileType::CziImage);
        file.read_file(path, &ReadContext::default()).unwrap();
        assert_eq!(file.content().resolution_levels, 1);
        assert!(!file.is_empty());
        assert!(file
            .save_to_scene(&SceneAttributes::default(), "slide.czi")
            .is_none());
    }
}
