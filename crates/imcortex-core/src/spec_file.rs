//! Spec file: the manifest of a study's data files
//!
//! Entries are grouped by file type. Each entry remembers whether it is
//! selected for loading and saving, whether it was listed in the spec file
//! on disk, and which loaded file (if any) it currently refers to.

use serde::{Deserialize, Serialize};

use imcortex_io::codec::{read_document, write_document};
use imcortex_io::{
    is_remote_path, resolve_path, DataFile, DataFileType, FileBase, IoResult, ReadContext,
    Structure,
};
use imcortex_scene::{directory_of, relative_path_to_directory, SceneAttributes, SceneClass};

use crate::arena::FileId;

/// One file listed in a spec file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecFileEntry {
    pub file_name: String,
    #[serde(default)]
    pub structure: Structure,
    #[serde(default = "default_true")]
    pub loading_selected: bool,
    #[serde(default = "default_true")]
    pub saving_selected: bool,
    /// Listed in the spec file on disk (as opposed to only loaded)
    #[serde(default = "default_true")]
    pub spec_file_member: bool,
    #[serde(skip)]
    pub file_id: Option<FileId>,
}

fn default_true() -> bool {
    true
}

/// Entries of one file type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecFileGroup {
    pub data_file_type: DataFileType,
    pub entries: Vec<SpecFileEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SpecFileContent {
    groups: Vec<SpecFileGroup>,
}

/// The manifest of data files
#[derive(Debug, Clone, Default)]
pub struct SpecFile {
    base: FileBase,
    groups: Vec<SpecFileGroup>,
}

impl SpecFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file_name(file_name: &str) -> Self {
        Self {
            base: FileBase::new(file_name),
            groups: Vec::new(),
        }
    }

    pub fn groups(&self) -> &[SpecFileGroup] {
        &self.groups
    }

    pub fn entries(&self) -> impl Iterator<Item = (DataFileType, &SpecFileEntry)> {
        self.groups
            .iter()
            .flat_map(|g| g.entries.iter().map(move |e| (g.data_file_type, e)))
    }

    pub fn number_of_entries(&self) -> usize {
        self.groups.iter().map(|g| g.entries.len()).sum()
    }

    fn group_mut(&mut self, data_file_type: DataFileType) -> &mut SpecFileGroup {
        let pos = match self
            .groups
            .iter()
            .position(|g| g.data_file_type == data_file_type)
        {
            Some(pos) => pos,
            None => {
                self.groups.push(SpecFileGroup {
                    data_file_type,
                    entries: Vec::new(),
                });
                self.groups.len() - 1
            }
        };
        &mut self.groups[pos]
    }

    /// Entry for a file name of a type
    pub fn entry(&self, data_file_type: DataFileType, file_name: &str) -> Option<&SpecFileEntry> {
        self.groups
            .iter()
            .find(|g| g.data_file_type == data_file_type)
            .and_then(|g| g.entries.iter().find(|e| e.file_name == file_name))
    }

    /// Entry that refers to a loaded file
    pub fn entry_for_file(&self, id: FileId) -> Option<(DataFileType, &SpecFileEntry)> {
        self.entries().find(|(_, e)| e.file_id == Some(id))
    }

    /// List a file, or update the flags of an existing entry.
    ///
    /// Returns false for types that may not appear in spec files.
    pub fn add_data_file(
        &mut self,
        data_file_type: DataFileType,
        structure: Structure,
        file_name: &str,
        loading_selected: bool,
        saving_selected: bool,
        spec_file_member: bool,
    ) -> bool {
        if !data_file_type.is_allowed_in_spec_file() {
            return false;
        }
        let group = self.group_mut(data_file_type);
        match group.entries.iter_mut().find(|e| e.file_name == file_name) {
            Some(entry) => {
                entry.structure = structure;
                entry.loading_selected = loading_selected;
                entry.saving_selected = saving_selected;
                entry.spec_file_member = spec_file_member;
            }
            None => group.entries.push(SpecFileEntry {
                file_name: file_name.to_string(),
                structure,
                loading_selected,
                saving_selected,
                spec_file_member,
                file_id: None,
            }),
        }
        self.base.modified = true;
        true
    }

    /// Register a loaded file, linking it to its entry.
    ///
    /// A new entry is selected for loading and saving and marked as a
    /// spec file member. Any other entry that referred to the same file
    /// (for example under a former name) is unlinked.
    pub fn add_loaded_file(
        &mut self,
        id: FileId,
        data_file_type: DataFileType,
        structure: Structure,
        file_name: &str,
    ) -> bool {
        if !data_file_type.is_allowed_in_spec_file() {
            return false;
        }
        self.remove_loaded_file(id);
        let group = self.group_mut(data_file_type);
        match group.entries.iter_mut().find(|e| e.file_name == file_name) {
            Some(entry) => {
                entry.file_id = Some(id);
                entry.structure = structure;
                entry.loading_selected = true;
            }
            None => group.entries.push(SpecFileEntry {
                file_name: file_name.to_string(),
                structure,
                loading_selected: true,
                saving_selected: true,
                spec_file_member: true,
                file_id: Some(id),
            }),
        }
        true
    }

    /// Detach a loaded file. Entries listed on disk stay (unselected for
    /// loading); entries that only existed for the loaded file are removed.
    pub fn remove_loaded_file(&mut self, id: FileId) {
        for group in &mut self.groups {
            group.entries.retain_mut(|e| {
                if e.file_id != Some(id) {
                    return true;
                }
                e.file_id = None;
                e.loading_selected = false;
                e.spec_file_member
            });
        }
        self.groups.retain(|g| !g.entries.is_empty());
    }

    /// True if any entry refers to the file
    pub fn contains_file(&self, id: FileId) -> bool {
        self.entry_for_file(id).is_some()
    }

    /// Drop every link to loaded files
    pub fn clear_file_links(&mut self) {
        for group in &mut self.groups {
            for entry in &mut group.entries {
                entry.file_id = None;
            }
        }
    }

    /// Files selected for loading, in loading order (surfaces first)
    pub fn files_selected_for_loading(&self) -> Vec<(DataFileType, Structure, String)> {
        DataFileType::LOADING_ORDER
            .iter()
            .filter_map(|t| self.groups.iter().find(|g| g.data_file_type == *t))
            .flat_map(|g| {
                g.entries
                    .iter()
                    .filter(|e| e.loading_selected)
                    .map(move |e| (g.data_file_type, e.structure, e.file_name.clone()))
            })
            .collect()
    }

    /// Copy the "spec file member" flags from another copy of the same
    /// spec file. Nothing happens when the copies have different names.
    pub fn transfer_data_files_in_spec_status(&mut self, other: &SpecFile) {
        if self.base.file_name != other.base.file_name {
            return;
        }
        for group in &mut self.groups {
            for entry in &mut group.entries {
                if let Some(saved) = other.entry(group.data_file_type, &entry.file_name) {
                    entry.spec_file_member = saved.spec_file_member;
                }
            }
        }
    }

    /// Spec file members that are not loaded
    pub fn unloaded_members(&self) -> Vec<(DataFileType, String)> {
        self.entries()
            .filter(|(_, e)| e.spec_file_member && e.file_id.is_none())
            .map(|(t, e)| (t, e.file_name.clone()))
            .collect()
    }

    fn spec_directory(&self) -> String {
        directory_of(&self.base.file_name)
    }
}

impl DataFile for SpecFile {
    fn data_file_type(&self) -> DataFileType {
        DataFileType::Specification
    }

    fn file_name(&self) -> &str {
        &self.base.file_name
    }

    fn set_file_name(&mut self, file_name: &str) {
        self.base.file_name = file_name.to_string();
    }

    fn is_modified(&self) -> bool {
        self.base.modified
    }

    fn set_modified(&mut self) {
        self.base.modified = true;
    }

    fn clear_modified(&mut self) {
        self.base.modified = false;
    }

    fn is_empty(&self) -> bool {
        self.number_of_entries() == 0
    }

    /// Names in the file are relative to the spec file's directory
    fn read_file(&mut self, path: &str, ctx: &ReadContext) -> IoResult<()> {
        let content: SpecFileContent = read_document(path, DataFileType::Specification, ctx)?;
        self.base.file_name = path.to_string();
        let dir = self.spec_directory();
        self.groups = content
            .groups
            .into_iter()
            .filter(|g| g.data_file_type.is_allowed_in_spec_file())
            .map(|mut g| {
                for entry in &mut g.entries {
                    entry.file_name = resolve_path(&entry.file_name, &dir);
                    entry.spec_file_member = true;
                }
                g
            })
            .collect();
        self.base.modified = false;
        Ok(())
    }

    /// Writes the entries selected for saving that are spec file members
    fn write_file(&mut self, path: &str) -> IoResult<()> {
        let dir = directory_of(path);
        let groups = self
            .groups
            .iter()
            .map(|g| SpecFileGroup {
                data_file_type: g.data_file_type,
                entries: g
                    .entries
                    .iter()
                    .filter(|e| e.saving_selected && e.spec_file_member)
                    .map(|e| {
                        let mut entry = e.clone();
                        if !is_remote_path(&e.file_name) {
                            if let Some(relative) = relative_path_to_directory(&e.file_name, &dir)
                            {
                                entry.file_name = relative;
                            }
                        }
                        entry
                    })
                    .collect(),
            })
            .filter(|g| !g.entries.is_empty())
            .collect();
        write_document(path, DataFileType::Specification, &SpecFileContent { groups })
    }

    fn clear(&mut self) {
        self.groups.clear();
        self.base.modified = false;
    }

    fn save_to_scene(&self, attributes: &SceneAttributes, instance_name: &str) -> Option<SceneClass> {
        let mut class = SceneClass::new(instance_name, "SpecFile", 1);
        if attributes.is_spec_file_name_saved_to_scene() {
            class.add_path_name("specFileName", self.base.file_name.as_str());
        }
        let groups = self
            .groups
            .iter()
            .map(|g| {
                let mut group_class = SceneClass::new(g.data_file_type.name(), "SpecFileDataFileTypeGroup", 1);
                group_class.add_enumerated_type("dataFileType", g.data_file_type.name());
                let files = g
                    .entries
                    .iter()
                    .map(|e| {
                        let mut file_class = SceneClass::new("specFileDataFile", "SpecFileDataFile", 1);
                        file_class.add_path_name("fileName", e.file_name.as_str());
                        file_class.add_enumerated_type("structure", e.structure.name());
                        file_class.add_boolean("selected", e.loading_selected);
                        file_class.add_boolean("savingSelected", e.saving_selected);
                        file_class.add_boolean("specFileMember", e.spec_file_member);
                        file_class
                    })
                    .collect();
                group_class.add_class_array("files", files);
                group_class
            })
            .collect();
        class.add_class_array("dataFileTypeGroups", groups);
        Some(class)
    }

    fn restore_from_scene(&mut self, attributes: &mut SceneAttributes, class: &SceneClass) {
        self.groups.clear();
        let spec_name = class.get_path_name_value("specFileName", "");
        self.base.file_name = spec_name;

        let Some(groups) = class.get_class_array("dataFileTypeGroups") else {
            return;
        };
        for group_class in groups {
            let type_name = group_class.get_enumerated_type_name("dataFileType").unwrap_or("");
            let Some(data_file_type) = DataFileType::from_name(type_name) else {
                attributes.add_to_error_message(format!(
                    "Spec file in scene has unknown data file type \"{type_name}\""
                ));
                continue;
            };
            let Some(files) = group_class.get_class_array("files") else {
                continue;
            };
            for file_class in files {
                let file_name = file_class.get_path_name_value("fileName", "");
                if file_name.is_empty() {
                    continue;
                }
                let structure = file_class
                    .get_enumerated_type_name("structure")
                    .and_then(Structure::from_name)
                    .unwrap_or(Structure::Invalid);
                self.add_data_file(
                    data_file_type,
                    structure,
                    &file_name,
                    file_class.get_boolean_value("selected", true),
                    file_class.get_boolean_value("savingSelected", true),
                    file_class.get_boolean_value("specFileMember", true),
                );
            }
        }
        self.base.modified = false;
    }
}
