//! The brain: owner of every loaded data file
//!
//! All files live in a [`FileArena`]. Surfaces, labels, metrics and RGBA
//! files are listed by their [`BrainStructure`]; every other category is a
//! flat ordered list. The spec file manifest tracks which loaded file each
//! entry refers to.
//!
//! Every mutation goes through one add/read/reload routine driven by the
//! [`CategoryPolicy`] of the file's type, and ends with
//! [`Brain::update_after_files_added_or_removed`].

mod scene_bridge;

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use imcortex_io::files::{AnnotationFile, DynamicConnectivityFile, PaletteFile, SCENE_ANNOTATION_FILE_NAME};
use imcortex_io::{
    file_name_no_path, is_remote_path, resolve_path, DataFile, DataFileType, ReadContext,
    Structure,
};
use imcortex_scene::directory_of;

use crate::annotations::AnnotationManager;
use crate::arena::{FileArena, FileId};
use crate::brain_structure::BrainStructure;
use crate::category::{CategoryPolicy, Support};
use crate::display_properties::DisplayProperties;
use crate::error::{BatchErrors, BrainError, BrainResult};
use crate::events::{BrainEvent, EventBus, InMemoryEventBus};
use crate::fiber_samples::FiberOrientationSamplesLoader;
use crate::models::{DerivedModelManager, ModelInputs};
use crate::preferences::CortexPreferences;
use crate::progress::ProgressMonitor;
use crate::spec_file::SpecFile;
use crate::validator::validate_cifti_mappable_data_file;

/// Identifier of a brain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BrainId(Uuid);

impl BrainId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BrainId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BrainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How the add/read/reload routine obtains the file
#[derive(Debug)]
pub enum LoadMode {
    /// Register a file that is already in memory
    Add(Box<dyn DataFile>),
    /// Read a new file from a path
    Read,
    /// Read a registered file again, replacing its content in place
    Reload(FileId),
}

impl LoadMode {
    fn operation(&self) -> &'static str {
        match self {
            LoadMode::Add(_) => "Adding",
            LoadMode::Read => "Reading",
            LoadMode::Reload(_) => "Reloading",
        }
    }
}

/// What [`Brain::reload_all_files`] does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReloadAllMode {
    /// Only list the files that can be reloaded
    Enumerate,
    Reload,
}

/// A file held across a reset, keyed by the path it was read from
struct StashedFile {
    source: String,
    file: Box<dyn DataFile>,
}

/// The loaded data files of one session and everything derived from them
pub struct Brain {
    id: BrainId,
    preferences: CortexPreferences,
    arena: FileArena,
    structures: Vec<BrainStructure>,
    /// Flat collections of the categories not owned by brain structures
    collections: BTreeMap<DataFileType, Vec<FileId>>,
    spec_file: SpecFile,
    palette_file: PaletteFile,
    /// Annotations saved inside scenes; cleared, never removed
    scene_annotation_file: FileId,
    duplicate_counters: BTreeMap<DataFileType, u32>,
    /// Unmodified files kept by a reset for the next load
    reuse_stash: Vec<StashedFile>,
    current_directory: String,
    events: Box<dyn EventBus>,
    models: DerivedModelManager,
    display_properties: DisplayProperties,
    annotation_manager: AnnotationManager,
    fiber_samples: FiberOrientationSamplesLoader,
}

impl fmt::Debug for Brain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Brain")
            .field("id", &self.id)
            .field("structures", &self.structures)
            .field("collections", &self.collections)
            .field("spec_file", &self.spec_file.file_name())
            .field("current_directory", &self.current_directory)
            .finish_non_exhaustive()
    }
}

impl Brain {
    /// Create an empty brain publishing to an in-memory event bus
    pub fn new(preferences: CortexPreferences) -> Self {
        Self::with_event_bus(preferences, Box::new(InMemoryEventBus::new()))
    }

    pub fn with_event_bus(preferences: CortexPreferences, events: Box<dyn EventBus>) -> Self {
        let mut arena = FileArena::new();
        let scene_annotation_file = arena.insert(Box::new(AnnotationFile::new_scene_annotations()));
        let current_directory = std::env::current_dir()
            .map(|d| d.to_string_lossy().into_owned())
            .unwrap_or_default();
        let id = BrainId::new();
        tracing::debug!("Created brain {}", id);
        Self {
            id,
            preferences,
            arena,
            structures: Vec::new(),
            collections: BTreeMap::new(),
            spec_file: SpecFile::new(),
            palette_file: PaletteFile::new(),
            scene_annotation_file,
            duplicate_counters: BTreeMap::new(),
            reuse_stash: Vec::new(),
            current_directory,
            events,
            models: DerivedModelManager::new(),
            display_properties: DisplayProperties::new(),
            annotation_manager: AnnotationManager::new(),
            fiber_samples: FiberOrientationSamplesLoader::new(),
        }
    }

    pub fn id(&self) -> BrainId {
        self.id
    }

    pub fn preferences(&self) -> &CortexPreferences {
        &self.preferences
    }

    pub fn preferences_mut(&mut self) -> &mut CortexPreferences {
        &mut self.preferences
    }

    pub fn events(&self) -> &dyn EventBus {
        self.events.as_ref()
    }

    /// Directory relative file names are resolved against
    pub fn current_directory(&self) -> &str {
        &self.current_directory
    }

    pub fn set_current_directory(&mut self, directory: impl Into<String>) {
        self.current_directory = directory.into();
    }

    pub fn file(&self, id: FileId) -> Option<&dyn DataFile> {
        self.arena.get(id)
    }

    pub fn file_mut(&mut self, id: FileId) -> Option<&mut (dyn DataFile + 'static)> {
        self.arena.get_mut(id)
    }

    pub fn brain_structures(&self) -> &[BrainStructure] {
        &self.structures
    }

    pub fn brain_structure(&self, structure: Structure) -> Option<&BrainStructure> {
        self.structures.iter().find(|bs| bs.structure() == structure)
    }

    pub fn spec_file(&self) -> &SpecFile {
        &self.spec_file
    }

    pub fn spec_file_mut(&mut self) -> &mut SpecFile {
        &mut self.spec_file
    }

    pub fn palette_file(&self) -> &PaletteFile {
        &self.palette_file
    }

    pub fn palette_file_mut(&mut self) -> &mut PaletteFile {
        &mut self.palette_file
    }

    pub fn scene_annotation_file(&self) -> FileId {
        self.scene_annotation_file
    }

    pub fn models(&self) -> &DerivedModelManager {
        &self.models
    }

    pub fn models_mut(&mut self) -> &mut DerivedModelManager {
        &mut self.models
    }

    pub fn display_properties(&self) -> &DisplayProperties {
        &self.display_properties
    }

    pub fn display_properties_mut(&mut self) -> &mut DisplayProperties {
        &mut self.display_properties
    }

    pub fn annotation_manager(&self) -> &AnnotationManager {
        &self.annotation_manager
    }

    /// Every file in save order: the scene annotations, the brain
    /// structures' files, then the flat collections by type. Dynamic
    /// companions follow their parent.
    pub fn all_file_ids(&self) -> Vec<FileId> {
        let mut ids = vec![self.scene_annotation_file];
        let structure_files = self.structures.iter().flat_map(|bs| bs.all_files());
        let flat_files = self.collections.values().flatten().copied();
        for id in structure_files.chain(flat_files) {
            ids.push(id);
            if let Some(companion) = self.arena.companion_of(id) {
                ids.push(companion);
            }
        }
        ids
    }

    /// Loaded files of a type, in collection order
    pub fn files_of_type(&self, file_type: DataFileType) -> Vec<FileId> {
        self.all_file_ids()
            .into_iter()
            .filter(|id| *id != self.scene_annotation_file)
            .filter(|id| self.arena.get(*id).is_some_and(|f| f.data_file_type() == file_type))
            .collect()
    }

    /// Loaded file of a type with the given full name or read from the
    /// given path
    pub fn find_file(&self, file_type: DataFileType, file_name: &str) -> Option<FileId> {
        self.files_of_type(file_type).into_iter().find(|id| {
            self.arena.get(*id).is_some_and(|f| f.file_name() == file_name)
                || self.arena.source_of(*id) == Some(file_name)
        })
    }

    /// Path a file was read from and is reloaded from and written to. It
    /// differs from the file name when a duplicate name was given a
    /// counter suffix.
    pub fn source_path(&self, id: FileId) -> Option<&str> {
        self.arena.source_of(id)
    }

    /// Number of loaded files, not counting the scene annotations
    pub fn number_of_files(&self) -> usize {
        self.all_file_ids().len() - 1
    }

    /// Names of the loaded files of a type
    pub fn file_names_of_type(&self, file_type: DataFileType) -> Vec<String> {
        self.files_of_type(file_type)
            .into_iter()
            .filter_map(|id| self.arena.get(id))
            .map(|f| f.file_name().to_string())
            .collect()
    }

    /// Read a data file from disk or from the network
    pub fn read_data_file(
        &mut self,
        file_type: DataFileType,
        structure: Structure,
        path: &str,
        mark_modified: bool,
        ctx: &ReadContext,
    ) -> BrainResult<FileId> {
        if file_type == DataFileType::Specification {
            return Err(BrainError::program(
                "Spec files are loaded with load_spec_file, not read as data files",
            ));
        }
        let resolved = resolve_path(path, &self.current_directory);
        if !is_remote_path(&resolved) && !Path::new(&resolved).exists() {
            return Err(BrainError::FileNotFound(resolved));
        }
        self.add_read_or_reload_data_file(
            LoadMode::Read,
            file_type,
            structure,
            &resolved,
            mark_modified,
            ctx,
        )
    }

    /// Register a file created in memory
    pub fn add_data_file(&mut self, file: Box<dyn DataFile>) -> BrainResult<FileId> {
        let file_type = file.data_file_type();
        let structure = file.structure();
        let name = file.file_name().to_string();
        if file_type == DataFileType::Annotation && name == SCENE_ANNOTATION_FILE_NAME {
            return Err(BrainError::Unsupported {
                file_type,
                operation: "Adding scene annotations".to_string(),
            });
        }
        self.add_read_or_reload_data_file(
            LoadMode::Add(file),
            file_type,
            structure,
            &name,
            false,
            &ReadContext::default(),
        )
    }

    /// Read a registered file again from the path it was read from. On
    /// failure the registered file is left untouched.
    pub fn reload_data_file(&mut self, id: FileId, ctx: &ReadContext) -> BrainResult<FileId> {
        let (Some(file), Some(source)) = (self.arena.get(id), self.arena.source_of(id)) else {
            return Err(BrainError::UnknownFile(id.to_string()));
        };
        let file_type = file.data_file_type();
        let structure = file.structure();
        let source = source.to_string();
        self.add_read_or_reload_data_file(LoadMode::Reload(id), file_type, structure, &source, false, ctx)
    }

    /// Add, read or reload a file, then bring the derived models up to
    /// date whether or not the load succeeded
    pub fn add_read_or_reload_data_file(
        &mut self,
        mode: LoadMode,
        file_type: DataFileType,
        structure: Structure,
        path: &str,
        mark_modified: bool,
        ctx: &ReadContext,
    ) -> BrainResult<FileId> {
        let start = Instant::now();
        let path = match mode {
            LoadMode::Read => resolve_path(path, &self.current_directory),
            LoadMode::Add(_) | LoadMode::Reload(_) => path.to_string(),
        };
        let operation = mode.operation();

        let result = self.add_read_or_reload(mode, file_type, structure, &path, mark_modified, ctx);
        match &result {
            Ok(id) => {
                let name = self.arena.get(*id).map(|f| f.file_name().to_string()).unwrap_or_default();
                tracing::info!(
                    "{} {} file {} took {} ms",
                    operation,
                    file_type,
                    name,
                    start.elapsed().as_millis()
                );
            }
            Err(e) => tracing::warn!("{} {} failed, file set unchanged: {}", operation, path, e),
        }

        self.update_after_files_added_or_removed();
        let inputs = self.model_inputs();
        self.models.apply_matrix_chart_defaults(&inputs);
        result
    }

    fn add_read_or_reload(
        &mut self,
        mode: LoadMode,
        file_type: DataFileType,
        structure: Structure,
        path: &str,
        mark_modified: bool,
        ctx: &ReadContext,
    ) -> BrainResult<FileId> {
        let policy = CategoryPolicy::for_type(file_type);
        match policy.support {
            Support::Supported => {}
            Support::NotImplemented => {
                return Err(BrainError::Unsupported {
                    file_type,
                    operation: mode.operation().to_string(),
                })
            }
            Support::ProgramError => {
                return Err(BrainError::program(format!(
                    "{} {} files is not possible through the data file routine",
                    mode.operation(),
                    file_type
                )))
            }
        }

        let reload_target = match &mode {
            LoadMode::Reload(id) => Some(*id),
            LoadMode::Add(_) | LoadMode::Read => None,
        };
        if let Some(id) = reload_target {
            if !self.arena.contains(id) {
                return Err(BrainError::UnknownFile(id.to_string()));
            }
            if id == self.scene_annotation_file {
                return Err(BrainError::Unsupported {
                    file_type,
                    operation: "Reloading scene annotations".to_string(),
                });
            }
            if self.arena.parent_of(id).is_some() {
                return Err(BrainError::program(format!(
                    "Dynamic companion {id} cannot be reloaded"
                )));
            }
        }

        let from_disk = !matches!(mode, LoadMode::Add(_));
        let source = from_disk.then(|| path.to_string());
        let mut file = match mode {
            LoadMode::Add(file) => {
                if file.data_file_type() != file_type {
                    return Err(BrainError::program(format!(
                        "Adding a {} file as {}",
                        file.data_file_type(),
                        file_type
                    )));
                }
                file
            }
            LoadMode::Read => match self.take_stashed(file_type, path) {
                Some(file) => {
                    tracing::debug!("Reusing unmodified file {}", path);
                    file
                }
                None => Self::read_new_instance(&policy, path, ctx)?,
            },
            LoadMode::Reload(_) => Self::read_new_instance(&policy, path, ctx)?,
        };

        if from_disk {
            file.clear_modified();
        }

        if policy.structure_scoped {
            if structure.is_valid() && file.structure() != structure {
                file.set_structure(structure);
                if mark_modified {
                    file.set_modified();
                }
            }
            if !file.structure().is_valid() {
                return Err(BrainError::InvalidStructure {
                    path: path.to_string(),
                    file_type,
                });
            }
            let owner = match reload_target {
                Some(id) => self.structures.iter().find(|bs| bs.contains(id)),
                None => self.structures.iter().find(|bs| bs.structure() == file.structure()),
            };
            match owner {
                Some(bs) => bs.validate_file(file.as_ref())?,
                None if file_type == DataFileType::Surface => {}
                None => {
                    return Err(BrainError::SurfaceRequired {
                        path: path.to_string(),
                        file_type,
                        structure: file.structure(),
                    })
                }
            }
        }

        if policy.consistency_check {
            validate_cifti_mappable_data_file(file.as_ref(), &self.structures)?;
        }

        let id = match reload_target {
            Some(id) => {
                self.replace_file(id, file);
                id
            }
            None => self.insert_file(file, source)?,
        };
        self.register_in_spec_file(id);
        Ok(id)
    }

    fn read_new_instance(
        policy: &CategoryPolicy,
        path: &str,
        ctx: &ReadContext,
    ) -> BrainResult<Box<dyn DataFile>> {
        let Some(mut file) = policy.construct() else {
            return Err(BrainError::program(format!(
                "No constructor for {} files",
                policy.file_type
            )));
        };
        file.read_file(path, ctx)
            .map_err(|e| BrainError::load(path, policy.file_type, e))?;
        Ok(file)
    }

    fn take_stashed(&mut self, file_type: DataFileType, path: &str) -> Option<Box<dyn DataFile>> {
        let pos = self
            .reuse_stash
            .iter()
            .position(|s| s.file.data_file_type() == file_type && s.source == path)?;
        Some(self.reuse_stash.swap_remove(pos).file)
    }

    /// Give a new file a unique name within its type and store it.
    /// `source` is the path the file was read from, kept when the name no
    /// longer matches it.
    fn insert_file(
        &mut self,
        mut file: Box<dyn DataFile>,
        source: Option<String>,
    ) -> BrainResult<FileId> {
        self.resolve_duplicate_name(file.as_mut());
        let file_type = file.data_file_type();
        let structure = file.structure();
        let source = source.filter(|s| s != file.file_name());
        let id = self.arena.insert(file);
        self.arena.set_source(id, source);

        if file_type.is_structure_scoped() {
            let pos = match self.structures.iter().position(|bs| bs.structure() == structure) {
                Some(pos) => pos,
                None => {
                    self.structures.push(BrainStructure::new(structure));
                    self.structures.len() - 1
                }
            };
            let added = match self.arena.get(id) {
                Some(file) => self.structures[pos].add_file(id, file),
                None => Err(BrainError::program(format!("{id} vanished while being added"))),
            };
            if let Err(e) = added {
                self.arena.remove(id);
                return Err(e);
            }
        } else {
            self.collections.entry(file_type).or_default().push(id);
        }
        self.sync_dynamic_companion(id);
        Ok(id)
    }

    /// Swap reloaded content into a registered file, keeping its name
    fn replace_file(&mut self, id: FileId, mut file: Box<dyn DataFile>) {
        if let Some(old) = self.arena.get(id) {
            file.set_file_name(old.file_name());
        }
        self.arena.replace(id, file);
        self.sync_dynamic_companion(id);
    }

    /// Append `_<N>` before the type extension while the base name is taken
    fn resolve_duplicate_name(&mut self, file: &mut dyn DataFile) {
        let original = file.file_name().to_string();
        if original.is_empty() {
            return;
        }
        let file_type = file.data_file_type();
        let taken: Vec<String> = self
            .files_of_type(file_type)
            .into_iter()
            .filter_map(|id| self.arena.get(id))
            .map(|f| f.file_name_no_path())
            .collect();
        let base = file_name_no_path(&original);
        if !taken.contains(&base) {
            return;
        }

        let directory = directory_of(&original);
        let (stem, extension) = file_type.split_extension(&base);
        loop {
            let counter = self.duplicate_counters.entry(file_type).or_insert(0);
            *counter += 1;
            let candidate = match extension {
                Some(ext) => format!("{stem}_{counter}.{ext}"),
                None => format!("{stem}_{counter}"),
            };
            if taken.contains(&candidate) {
                continue;
            }
            let new_name = if directory.is_empty() {
                candidate
            } else {
                Path::new(&directory).join(&candidate).to_string_lossy().into_owned()
            };
            tracing::debug!("Renamed duplicate {} file {} to {}", file_type, original, new_name);
            file.set_file_name(&new_name);
            return;
        }
    }

    /// Create, keep or drop the dynamic companion a file asks for
    fn sync_dynamic_companion(&mut self, parent: FileId) {
        let Some(file) = self.arena.get(parent) else {
            return;
        };
        let wanted = file.dynamic_companion_type();
        let parent_name = file.file_name().to_string();

        if let Some(existing) = self.arena.companion_of(parent) {
            let current = self.arena.get(existing).map(|f| f.data_file_type());
            if current.is_some() && current == wanted {
                return;
            }
            self.arena.remove(existing);
        }
        if let Some(companion_type) = wanted {
            let companion = DynamicConnectivityFile::new(
                companion_type,
                &parent_name,
                self.preferences.dynamic_connectivity_default_on,
            );
            let id = self.arena.insert_companion(Box::new(companion), parent);
            tracing::debug!("Created {} companion {} for {}", companion_type, id, parent_name);
        }
    }

    /// List a file in the manifest under the path it is read from
    fn register_in_spec_file(&mut self, id: FileId) {
        if let (Some(file), Some(source)) = (self.arena.get(id), self.arena.source_of(id)) {
            self.spec_file
                .add_loaded_file(id, file.data_file_type(), file.structure(), source);
        }
    }

    /// Files that [`Brain::reload_all_files`] would reload
    pub fn reloadable_file_ids(&self) -> Vec<FileId> {
        self.all_file_ids()
            .into_iter()
            .filter(|id| *id != self.scene_annotation_file && self.arena.parent_of(*id).is_none())
            .filter(|id| {
                let (Some(f), Some(source)) = (self.arena.get(*id), self.arena.source_of(*id)) else {
                    return false;
                };
                !source.is_empty()
                    && CategoryPolicy::for_type(f.data_file_type()).reloadable
                    && (is_remote_path(source) || Path::new(source).exists())
            })
            .collect()
    }

    /// List or reload every reloadable file. Reloading keeps going after a
    /// failure and reports every failed file.
    pub fn reload_all_files(
        &mut self,
        mode: ReloadAllMode,
        ctx: &ReadContext,
    ) -> Result<Vec<String>, BatchErrors> {
        let ids = self.reloadable_file_ids();
        let names: Vec<String> = ids
            .iter()
            .filter_map(|id| self.arena.get(*id))
            .map(|f| f.file_name().to_string())
            .collect();
        if mode == ReloadAllMode::Enumerate {
            return Ok(names);
        }

        let mut errors = BatchErrors::new();
        for id in ids {
            if let Err(e) = self.reload_data_file(id, ctx) {
                errors.push(e);
            }
        }
        errors.into_result().map(|_| names)
    }

    /// Take a file out of the brain and hand it to the caller.
    ///
    /// Dynamic companions cannot be removed on their own and the scene
    /// annotations are only cleared; both return `None`.
    pub fn remove_without_delete_data_file(&mut self, id: FileId) -> Option<Box<dyn DataFile>> {
        if !self.arena.contains(id) {
            tracing::warn!("Cannot remove {}: not loaded", id);
            return None;
        }
        if self.arena.parent_of(id).is_some() {
            tracing::warn!("Dynamic companion {} is removed with its parent only", id);
            return None;
        }
        if id == self.scene_annotation_file {
            self.clear_scene_annotations();
            return None;
        }

        for bs in &mut self.structures {
            bs.remove_file(id);
        }
        for list in self.collections.values_mut() {
            list.retain(|f| *f != id);
        }
        self.collections.retain(|_, list| !list.is_empty());
        self.spec_file.remove_loaded_file(id);
        if let Some(companion) = self.arena.companion_of(id) {
            self.arena.remove(companion);
        }
        let file = self.arena.remove(id);
        if let Some(f) = &file {
            tracing::info!("Removed {} file {}", f.data_file_type(), f.file_name());
        }
        self.update_after_files_added_or_removed();
        file
    }

    /// Remove and drop a file; returns true if something was removed or
    /// cleared
    pub fn remove_and_delete_data_file(&mut self, id: FileId) -> bool {
        if id == self.scene_annotation_file {
            self.clear_scene_annotations();
            return true;
        }
        self.remove_without_delete_data_file(id).is_some()
    }

    fn clear_scene_annotations(&mut self) {
        if let Some(file) = self.arena.get_mut(self.scene_annotation_file) {
            file.clear();
        }
    }

    /// Write a file to its file name and list it in the spec file
    pub fn write_data_file(&mut self, id: FileId) -> BrainResult<()> {
        if id == self.scene_annotation_file {
            return Err(BrainError::Unsupported {
                file_type: DataFileType::Annotation,
                operation: "Writing scene annotations".to_string(),
            });
        }
        let Some(name) = self.arena.source_of(id).map(str::to_string) else {
            return Err(BrainError::UnknownFile(id.to_string()));
        };
        let Some(file) = self.arena.get_mut(id) else {
            return Err(BrainError::UnknownFile(id.to_string()));
        };
        let file_type = file.data_file_type();
        file.write_file(&name).map_err(|e| BrainError::Write {
            path: name.clone(),
            file_type,
            message: e.to_string(),
        })?;
        file.clear_modified();
        if self.arena.parent_of(id).is_none() {
            self.register_in_spec_file(id);
        }
        tracing::info!("Wrote {} file {}", file_type, name);
        Ok(())
    }

    /// Drop every file, keeping scene files and the spec file name when
    /// asked to
    pub fn reset_brain(&mut self, keep_scene_files: bool, keep_spec_file: bool) {
        let kept_scene_files: Vec<FileId> = if keep_scene_files {
            self.collections
                .get(&DataFileType::Scene)
                .cloned()
                .unwrap_or_default()
        } else {
            Vec::new()
        };
        let dropped: Vec<FileId> = self
            .arena
            .ids()
            .filter(|id| *id != self.scene_annotation_file && !kept_scene_files.contains(id))
            .collect();
        for id in dropped {
            self.arena.remove(id);
        }

        self.structures.clear();
        self.collections.clear();
        if !kept_scene_files.is_empty() {
            self.collections.insert(DataFileType::Scene, kept_scene_files.clone());
        }
        self.palette_file = PaletteFile::new();
        self.fiber_samples.reset();
        self.reuse_stash.clear();

        if keep_spec_file {
            self.spec_file.clear();
        } else {
            self.spec_file = SpecFile::new();
        }
        for id in &kept_scene_files {
            self.register_in_spec_file(*id);
        }

        let scene_counter = self.duplicate_counters.get(&DataFileType::Scene).copied();
        self.duplicate_counters.clear();
        if keep_scene_files {
            if let Some(counter) = scene_counter {
                self.duplicate_counters.insert(DataFileType::Scene, counter);
            }
        }

        self.clear_scene_annotations();
        self.display_properties.reset();
        self.annotation_manager.reset();
        self.update_after_files_added_or_removed();
        self.events.publish(BrainEvent::BrainReset);
        tracing::info!(
            "Reset brain {} (kept {} scene files, spec file kept: {})",
            self.id,
            kept_scene_files.len(),
            keep_spec_file
        );
    }

    /// Reset, holding on to unmodified files so the next spec file or
    /// scene load can reuse them instead of reading them again
    pub fn reset_brain_keep_scene_files(&mut self) {
        let mut stash = Vec::new();
        if self.preferences.reuse_unmodified_files_for_scenes {
            for id in self.all_file_ids() {
                if id == self.scene_annotation_file || self.arena.parent_of(id).is_some() {
                    continue;
                }
                let reusable = self.arena.get(id).is_some_and(|f| {
                    CategoryPolicy::for_type(f.data_file_type()).reusable_across_scenes()
                        && !f.is_modified()
                        && !f.is_modified_palette_coloring()
                        && !f.file_name().is_empty()
                });
                if !reusable {
                    continue;
                }
                let source = self.arena.source_of(id).map(str::to_string);
                if let (Some(source), Some(file)) = (source, self.arena.remove(id)) {
                    stash.push(StashedFile { source, file });
                }
            }
        }
        self.reset_brain(true, false);
        tracing::debug!("Holding {} unmodified files for reuse", stash.len());
        self.reuse_stash = stash;
    }

    /// Number of files held for reuse
    pub fn reusable_file_count(&self) -> usize {
        self.reuse_stash.len()
    }

    /// Read a spec file and load the files selected in it
    pub fn load_spec_file(
        &mut self,
        path: &str,
        ctx: &ReadContext,
        progress: &mut dyn ProgressMonitor,
    ) -> Result<(), BatchErrors> {
        let resolved = resolve_path(path, &self.current_directory);
        let mut spec = SpecFile::new();
        if let Err(e) = spec.read_file(&resolved, ctx) {
            let mut errors = BatchErrors::new();
            errors.push(BrainError::load(&resolved, DataFileType::Specification, e));
            return Err(errors);
        }
        self.load_files_selected_in_spec_file(spec, ctx, progress)
    }

    /// Replace the loaded files with those selected in `spec`.
    ///
    /// Failed files are reported together once every file was tried.
    /// Cancelling through `progress` stops the batch and empties the brain.
    pub fn load_files_selected_in_spec_file(
        &mut self,
        mut spec: SpecFile,
        ctx: &ReadContext,
        progress: &mut dyn ProgressMonitor,
    ) -> Result<(), BatchErrors> {
        self.reset_brain_keep_scene_files();

        spec.clear_file_links();
        let spec_name = spec.file_name().to_string();
        self.spec_file = spec;
        for id in self.files_of_type(DataFileType::Scene) {
            self.register_in_spec_file(id);
        }
        let directory = directory_of(&spec_name);
        if !directory.is_empty() {
            self.current_directory = directory;
        }

        let selected = self.spec_file.files_selected_for_loading();
        let total = selected.len();
        let mut errors = BatchErrors::new();
        for (done, (file_type, structure, name)) in selected.into_iter().enumerate() {
            if progress.is_cancelled() {
                tracing::warn!("Loading of spec file {} cancelled", spec_name);
                self.reset_brain(false, false);
                errors.push(BrainError::Cancelled);
                return Err(errors);
            }
            progress.progress(done, total, &name);
            if self.find_file(file_type, &name).is_some() {
                continue;
            }
            if let Err(e) = self.read_data_file(file_type, structure, &name, false, ctx) {
                errors.push(e);
            }
        }
        progress.progress(total, total, "");

        if Path::new(&spec_name).is_absolute() {
            self.preferences.add_to_recent_spec_files(&spec_name);
        }
        self.reuse_stash.clear();
        tracing::info!(
            "Loaded {} files from spec file {} ({} errors)",
            self.number_of_files(),
            spec_name,
            errors.len()
        );
        errors.into_result()
    }

    /// Bring everything derived from the file set up to date: prune empty
    /// brain structures, create or destroy models, match fiber
    /// trajectories to orientations, recompute text substitutions
    pub fn update_after_files_added_or_removed(&mut self) {
        self.structures.retain(|bs| !bs.is_empty());
        let inputs = self.model_inputs();
        self.models.update(&inputs, self.events.as_mut());
        self.match_fiber_trajectories();
        self.update_text_substitution_layers();
    }

    pub(crate) fn model_inputs(&self) -> ModelInputs {
        let mut inputs = ModelInputs {
            number_of_structures: self.structures.len(),
            ..Default::default()
        };
        for id in self.all_file_ids() {
            let Some(file) = self.arena.get(id) else {
                continue;
            };
            let name = file.file_name().to_string();
            let file_type = file.data_file_type();
            match file_type {
                DataFileType::Surface => inputs.surface_files.push(name.clone()),
                DataFileType::Volume => inputs.volume_files.push(name.clone()),
                DataFileType::HistologySlices => inputs.histology_files.push(name.clone()),
                _ => {}
            }
            if file_type.is_media() {
                inputs.media_files.push(name.clone());
            }
            if file_type.is_connectivity_matrix() {
                inputs.matrix_files.push(name.clone());
            }
            if file.is_volume_mappable() && !file.is_empty() {
                inputs.volume_mappable_files.push(name.clone());
            }
            if file.supports_chart_one() {
                inputs.chart_one_files.push(name.clone());
            }
            if file.supports_chart_two() {
                inputs.chart_two_files.push(name);
            }
        }
        inputs
    }

    /// Link each trajectory to the orientation file it names, by full
    /// name first, then by name without path
    fn match_fiber_trajectories(&mut self) {
        let orientations = self.file_names_of_type(DataFileType::ConnectivityFiberOrientationsTemporary);
        for id in self.files_of_type(DataFileType::ConnectivityFiberTrajectoryTemporary) {
            let Some(file) = self.arena.get_mut(id) else {
                continue;
            };
            let matched = file.fiber_orientation_file_name().and_then(|wanted| {
                let wanted_no_path = file_name_no_path(wanted);
                orientations
                    .iter()
                    .find(|name| name.as_str() == wanted)
                    .or_else(|| orientations.iter().find(|name| file_name_no_path(name) == wanted_no_path))
                    .cloned()
            });
            if matched.as_deref() != file.matched_fiber_orientation() {
                file.set_matched_fiber_orientation(matched);
            }
        }
    }

    fn update_text_substitution_layers(&mut self) {
        let substitutions: Vec<(String, String)> = self
            .files_of_type(DataFileType::AnnotationTextSubstitution)
            .into_iter()
            .filter_map(|id| self.arena.get(id))
            .flat_map(|f| f.text_substitutions())
            .collect();
        if self
            .annotation_manager
            .text_substitution_layers_mut()
            .recompute(substitutions)
        {
            self.events.publish(BrainEvent::TextSubstitutionLayersInvalid);
        }
    }

    /// Sample volumes next to the first fiber orientation file, found on
    /// first use
    pub fn fiber_orientation_sample_files(&mut self) -> Vec<String> {
        let orientations = self.file_names_of_type(DataFileType::ConnectivityFiberOrientationsTemporary);
        match orientations.first() {
            Some(first) => self.fiber_samples.load_samples(first).to_vec(),
            None => Vec::new(),
        }
    }
}
