//! Border and foci files
//!
//! Both are lists of named items grouped into classes; display selection
//! lives in a [`GroupAndNameHierarchy`] built from the items.

use serde::{Deserialize, Serialize};

use crate::codec::{read_document, write_document};
use crate::context::ReadContext;
use crate::data_file::{DataFile, FileBase};
use crate::error::IoResult;
use crate::file_type::DataFileType;
use crate::hierarchy::GroupAndNameHierarchy;
use crate::structure::Structure;

/// One border or focus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassNameItem {
    pub class_name: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassNameContent {
    #[serde(default)]
    pub structure: Structure,
    #[serde(default)]
    pub items: Vec<ClassNameItem>,
}

/// A border or foci file
#[derive(Debug, Clone)]
pub struct ClassNameFile {
    file_type: DataFileType,
    base: FileBase,
    content: ClassNameContent,
    hierarchy: GroupAndNameHierarchy,
}

impl ClassNameFile {
    /// `file_type` must be Border or Foci
    pub fn new(file_type: DataFileType) -> Self {
        debug_assert!(matches!(file_type, DataFileType::Border | DataFileType::Foci));
        Self {
            file_type,
            base: FileBase::default(),
            content: ClassNameContent::default(),
            hierarchy: GroupAndNameHierarchy::default(),
        }
    }

    pub fn with_content(file_type: DataFileType, file_name: &str, content: ClassNameContent) -> Self {
        let mut file = Self::new(file_type);
        file.base = FileBase::new(file_name);
        file.content = content;
        file.update_hierarchy();
        file
    }

    pub fn items(&self) -> &[ClassNameItem] {
        &self.content.items
    }

    /// Append an item; the file becomes modified
    pub fn add_item(&mut self, class_name: &str, name: &str) {
        self.content.items.push(ClassNameItem {
            class_name: class_name.to_string(),
            name: name.to_string(),
        });
        self.update_hierarchy();
        self.base.modified = true;
    }

    fn update_hierarchy(&mut self) {
        let items = self
            .content
            .items
            .iter()
            .map(|i| (i.class_name.as_str(), i.name.as_str()));
        self.hierarchy.update(items);
    }
}

impl DataFile for ClassNameFile {
    crate::impl_file_base!();

    fn data_file_type(&self) -> DataFileType {
        self.file_type
    }

    fn structure(&self) -> Structure {
        self.content.structure
    }

    fn clear_modified(&mut self) {
        self.base.modified = false;
    }

    fn is_empty(&self) -> bool {
        self.content.items.is_empty()
    }

    fn read_file(&mut self, path: &str, ctx: &ReadContext) -> IoResult<()> {
        self.content = read_document(path, self.file_type, ctx)?;
        self.base.file_name = path.to_string();
        self.hierarchy = GroupAndNameHierarchy::default();
        self.update_hierarchy();
        Ok(())
    }

    fn write_file(&mut self, path: &str) -> IoResult<()> {
        write_document(path, self.file_type, &self.content)
    }

    fn clear(&mut self) {
        self.content = ClassNameContent::default();
        self.hierarchy = GroupAndNameHierarchy::default();
    }

    fn name_hierarchy(&self) -> Option<&GroupAndNameHierarchy> {
        Some(&self.hierarchy)
    }

    fn name_hierarchy_mut(&mut self) -> Option<&mut GroupAndNameHierarchy> {
        Some(&mut self.hierarchy)
    }
}
