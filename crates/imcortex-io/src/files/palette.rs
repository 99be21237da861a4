//! Palette file

use serde::{Deserialize, Serialize};

use super::coloring::DEFAULT_PALETTE;
use crate::codec::{read_document, write_document};
use crate::context::ReadContext;
use crate::data_file::{DataFile, FileBase};
use crate::error::IoResult;
use crate::file_type::DataFileType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteContent {
    pub palettes: Vec<String>,
}

impl Default for PaletteContent {
    fn default() -> Self {
        Self {
            palettes: [DEFAULT_PALETTE, "videen_style", "gray_interp", "PSYCH", "fsl_red"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// The palettes available for coloring mapped files
#[derive(Debug, Clone)]
pub struct PaletteFile {
    base: FileBase,
    content: PaletteContent,
}

impl Default for PaletteFile {
    fn default() -> Self {
        Self {
            base: FileBase::new("Palettes"),
            content: PaletteContent::default(),
        }
    }
}

impl PaletteFile {
    /// Palette file holding the standard palettes
    pub fn new() -> Self {
        Self::default()
    }

    pub fn palettes(&self) -> &[String] {
        &self.content.palettes
    }

    pub fn add_palette(&mut self, name: impl Into<String>) {
        self.content.palettes.push(name.into());
        self.base.modified = true;
    }
}

impl DataFile for PaletteFile {
    crate::impl_file_base!();

    fn data_file_type(&self) -> DataFileType {
        DataFileType::Palette
    }

    fn clear_modified(&mut self) {
        self.base.modified = false;
    }

    fn is_empty(&self) -> bool {
        self.content.palettes.is_empty()
    }

    fn read_file(&mut self, path: &str, ctx: &ReadContext) -> IoResult<()> {
        self.content = read_document(path, DataFileType::Palette, ctx)?;
        self.base.file_name = path.to_string();
        Ok(())
    }

    fn write_file(&mut self, path: &str) -> IoResult<()> {
        write_document(path, DataFileType::Palette, &self.content)
    }

    fn clear(&mut self) {
        self.content = PaletteContent::default();
    }
}
