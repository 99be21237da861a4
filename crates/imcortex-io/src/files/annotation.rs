//! Annotation, samples and text substitution files

use serde::{Deserialize, Serialize};

use imcortex_scene::{SceneAttributes, SceneClass};

use crate::codec::{read_document, write_document};
use crate::context::ReadContext;
use crate::data_file::{DataFile, FileBase};
use crate::error::{IoError, IoResult};
use crate::file_type::DataFileType;

/// Name given to the annotations that live only in scenes
pub const SCENE_ANNOTATION_FILE_NAME: &str = "Scene Annotations";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotationContent {
    #[serde(default)]
    pub annotations: Vec<String>,
}

/// Annotations (text, shapes) or samples drawn on the display
#[derive(Debug, Clone)]
pub struct AnnotationFile {
    file_type: DataFileType,
    base: FileBase,
    content: AnnotationContent,
    scene_annotations: bool,
}

impl AnnotationFile {
    /// `file_type` must be Annotation or Samples
    pub fn new(file_type: DataFileType) -> Self {
        debug_assert!(matches!(
            file_type,
            DataFileType::Annotation | DataFileType::Samples
        ));
        Self {
            file_type,
            base: FileBase::default(),
            content: AnnotationContent::default(),
            scene_annotations: false,
        }
    }

    /// The annotation file whose content is saved inside scenes
    pub fn new_scene_annotations() -> Self {
        let mut file = Self::new(DataFileType::Annotation);
        file.base = FileBase::new(SCENE_ANNOTATION_FILE_NAME);
        file.scene_annotations = true;
        file
    }

    pub fn is_scene_annotations(&self) -> bool {
        self.scene_annotations
    }

    pub fn annotations(&self) -> &[String] {
        &self.content.annotations
    }

    pub fn add_annotation(&mut self, annotation: impl Into<String>) {
        self.content.annotations.push(annotation.into());
        self.base.modified = true;
    }
}

impl DataFile for AnnotationFile {
    crate::impl_file_base!();

    fn data_file_type(&self) -> DataFileType {
        self.file_type
    }

    fn clear_modified(&mut self) {
        self.base.modified = false;
    }

    fn is_empty(&self) -> bool {
        self.content.annotations.is_empty()
    }

    fn read_file(&mut self, path: &str, ctx: &ReadContext) -> IoResult<()> {
        if self.scene_annotations {
            return Err(IoError::NotImplemented {
                file_type: self.file_type,
                operation: "Reading scene annotations".to_string(),
            });
        }
        self.content = read_document(path, self.file_type, ctx)?;
        self.base.file_name = path.to_string();
        Ok(())
    }

    fn write_file(&mut self, path: &str) -> IoResult<()> {
        write_document(path, self.file_type, &self.content)
    }

    fn clear(&mut self) {
        self.content = AnnotationContent::default();
        self.base.modified = false;
    }

    fn save_to_scene(&self, _attributes: &SceneAttributes, instance_name: &str) -> Option<SceneClass> {
        if !self.scene_annotations {
            return None;
        }
        let mut class = self.base.scene_class(self.file_type, instance_name);
        class.add_string_array("annotations", &self.content.annotations);
        Some(class)
    }

    fn restore_from_scene(&mut self, _attributes: &mut SceneAttributes, class: &SceneClass) {
        if self.scene_annotations {
            self.content.annotations = class.get_string_array_value("annotations");
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextSubstitutionContent {
    /// Column names, each a substitution name
    #[serde(default)]
    pub names: Vec<String>,
    /// Rows of values; the selected row supplies the substitutions
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
}

/// Table of values substituted into annotation text
#[derive(Debug, Clone, Default)]
pub struct TextSubstitutionFile {
    base: FileBase,
    content: TextSubstitutionContent,
    selected_row: usize,
}

impl TextSubstitutionFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(file_name: &str, content: TextSubstitutionContent) -> Self {
        Self {
            base: FileBase::new(file_name),
            content,
            selected_row: 0,
        }
    }

    pub fn select_row(&mut self, row: usize) {
        if row < self.content.rows.len() {
            self.selected_row = row;
        }
    }

    pub fn selected_row(&self) -> usize {
        self.selected_row
    }
}

impl DataFile for TextSubstitutionFile {
    crate::impl_file_base!();

    fn data_file_type(&self) -> DataFileType {
        DataFileType::AnnotationTextSubstitution
    }

    fn clear_modified(&mut self) {
        self.base.modified = false;
    }

    fn is_empty(&self) -> bool {
        self.content.names.is_empty()
    }

    fn read_file(&mut self, path: &str, ctx: &ReadContext) -> IoResult<()> {
        self.content = read_document(path, DataFileType::AnnotationTextSubstitution, ctx)?;
        self.base.file_name = path.to_string();
        self.selected_row = 0;
        Ok(())
    }

    fn write_file(&mut self, path: &str) -> IoResult<()> {
        write_document(path, DataFileType::AnnotationTextSubstitution, &self.content)
    }

    fn clear(&mut self) {
        self.content = TextSubstitutionContent::default();
        self.selected_row = 0;
    }

    fn text_substitutions(&self) -> Vec<(String, String)> {
        let row = self.content.rows.get(self.selected_row);
        self.content
            .names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let value = row.and_then(|r| r.get(i)).cloned().unwrap_or_default();
                (name.clone(), value)
            })
            .collect()
    }

    fn save_to_scene(&self, _attributes: &SceneAttributes, instance_name: &str) -> Option<SceneClass> {
        let mut class = self
            .base
            .scene_class(DataFileType::AnnotationTextSubstitution, instance_name);
        class.add_integer("selectedRow", self.selected_row as i64);
        Some(class)
    }

    fn restore_from_scene(&mut self, _attributes: &mut SceneAttributes, class: &SceneClass) {
        if let Ok(row) = usize::try_from(class.get_integer_value("selectedRow", 0)) {
            self.select_row(row);
        }
    }
}
