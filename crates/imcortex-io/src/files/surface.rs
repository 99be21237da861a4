//! Surface files

use serde::{Deserialize, Serialize};

use crate::codec::{read_document, write_document};
use crate::context::ReadContext;
use crate::data_file::{DataFile, FileBase};
use crate::error::IoResult;
use crate::file_type::DataFileType;
use crate::structure::Structure;

/// Primary surface type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SurfaceType {
    #[default]
    Unknown,
    Anatomical,
    Reconstruction,
    Inflated,
    VeryInflated,
    Spherical,
    Flat,
}

/// Refinement of anatomical surfaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SecondarySurfaceType {
    #[default]
    Invalid,
    Midthickness,
    GrayWhite,
    Pial,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurfaceContent {
    pub structure: Structure,
    pub number_of_nodes: usize,
    #[serde(default)]
    pub surface_type: SurfaceType,
    #[serde(default)]
    pub secondary_type: SecondarySurfaceType,
}

/// A triangulated surface of one structure
#[derive(Debug, Clone, Default)]
pub struct SurfaceFile {
    base: FileBase,
    content: SurfaceContent,
}

impl SurfaceFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an in-memory surface
    pub fn with_content(file_name: &str, content: SurfaceContent) -> Self {
        Self {
            base: FileBase::new(file_name),
            content,
        }
    }

    pub fn content(&self) -> &SurfaceContent {
        &self.content
    }

    pub fn surface_type(&self) -> SurfaceType {
        self.content.surface_type
    }

    pub fn secondary_type(&self) -> SecondarySurfaceType {
        self.content.secondary_type
    }
}

impl DataFile for SurfaceFile {
    crate::impl_file_base!();

    fn data_file_type(&self) -> DataFileType {
        DataFileType::Surface
    }

    fn structure(&self) -> Structure {
        self.content.structure
    }

    fn set_structure(&mut self, structure: Structure) {
        self.content.structure = structure;
    }

    fn clear_modified(&mut self) {
        self.base.modified = false;
    }

    fn is_empty(&self) -> bool {
        self.content.number_of_nodes == 0
    }

    fn number_of_nodes(&self) -> usize {
        self.content.number_of_nodes
    }

    fn read_file(&mut self, path: &str, ctx: &ReadContext) -> IoResult<()> {
        self.content = read_document(path, DataFileType::Surface, ctx)?;
        self.base.file_name = path.to_string();
        Ok(())
    }

    fn write_file(&mut self, path: &str) -> IoResult<()> {
        write_document(path, DataFileType::Surface, &self.content)
    }

    fn clear(&mut self) {
        self.content = SurfaceContent::default();
    }
}
