//! Saving the brain into scenes and restoring it from them

use imcortex_io::{DataFile, DataFileType, ReadContext};
use imcortex_scene::{relative_path_to_directory, Scene, SceneAttributes, SceneClass, SceneType};

use super::Brain;
use crate::arena::FileId;
use crate::error::{BrainError, BrainResult};
use crate::events::BrainEvent;
use crate::progress::NoProgress;
use crate::spec_file::SpecFile;

const BRAIN_INSTANCE_NAME: &str = "brain";
const FILES_V2: &str = "allCaretDataFiles_V2";
const FILE_NAME_V2: &str = "dataFileName_V2";
const FILES_LEGACY: &str = "allCaretDataFiles";
const FILE_NAME_LEGACY: &str = "dataFileName";
const SPEC_FILE: &str = "specFile";
const SCENE_TYPE: &str = "sceneType";
const MODELS: &str = "models";
const BRAIN_STRUCTURES: &str = "brainStructures";
const DISPLAY_PROPERTIES: &str = "displayProperties";

const HIERARCHIES: [(DataFileType, &str); 3] = [
    (DataFileType::Border, "borderHierarchies"),
    (DataFileType::Foci, "fociHierarchies"),
    (DataFileType::Volume, "volumeHierarchies"),
];

/// Number of trailing characters two names have in common
pub(crate) fn matching_suffix_length(a: &str, b: &str) -> usize {
    a.chars()
        .rev()
        .zip(b.chars().rev())
        .take_while(|(x, y)| x == y)
        .count()
}

/// Legacy entry whose saved file name ends with the longest run of
/// `full_name`'s trailing characters; the first of equal runs wins
fn best_legacy_match<'a>(
    candidates: impl Iterator<Item = &'a SceneClass>,
    full_name: &str,
) -> Option<&'a SceneClass> {
    let mut best: Option<(&SceneClass, usize)> = None;
    for candidate in candidates {
        let saved = candidate.get_path_name_value(FILE_NAME_LEGACY, "");
        let length = matching_suffix_length(&saved, full_name);
        if best.map_or(true, |(_, longest)| length > longest) {
            best = Some((candidate, length));
        }
    }
    best.map(|(class, _)| class)
}

impl Brain {
    /// Save every loaded file's view state, the manifest (full scenes
    /// only), display properties, models, brain structures and selection
    /// hierarchies
    pub fn save_to_scene(&self, attributes: &SceneAttributes, instance_name: &str) -> SceneClass {
        let mut class = SceneClass::new(instance_name, "Brain", 1);
        class.add_enumerated_type(SCENE_TYPE, attributes.scene_type().name());

        if attributes.scene_type() == SceneType::Full {
            if let Some(spec) = self.spec_file.save_to_scene(attributes, SPEC_FILE) {
                class.add_class(spec);
            }
        }

        let files = self
            .all_file_ids()
            .into_iter()
            .filter_map(|id| self.arena.get(id))
            .filter_map(|file| {
                let mut file_class = file.save_to_scene(attributes, &file.file_name_no_path())?;
                file_class.add_path_name(FILE_NAME_V2, file.file_name());
                Some(file_class)
            })
            .collect();
        class.add_class_array(FILES_V2, files);

        class.add_class(self.display_properties.save_to_scene(attributes, DISPLAY_PROPERTIES));
        class.add_class_array(MODELS, self.models.save_to_scene(attributes));

        let structures = self
            .structures
            .iter()
            .map(|bs| bs.save_to_scene(&self.arena, attributes, bs.structure().name()))
            .collect();
        class.add_class_array(BRAIN_STRUCTURES, structures);

        let scene_directory = attributes.scene_file_directory();
        for (file_type, key) in HIERARCHIES {
            let mut hierarchies = SceneClass::new(key, "GroupAndNameHierarchies", 1);
            for id in self.files_of_type(file_type) {
                let Some(file) = self.arena.get(id) else {
                    continue;
                };
                let Some(hierarchy) = file.name_hierarchy() else {
                    continue;
                };
                let name = relative_path_to_directory(file.file_name(), &scene_directory)
                    .unwrap_or_else(|| file.file_name_no_path());
                hierarchies.add_class(hierarchy.save_to_scene(&name));
            }
            class.add_class(hierarchies);
        }
        class
    }

    /// Restore a class written by [`Brain::save_to_scene`].
    ///
    /// Full scenes first replace the loaded files with the scene's
    /// manifest, reusing unmodified files. Problems are added to
    /// `attributes` and the restore carries on.
    pub fn restore_from_scene(
        &mut self,
        attributes: &mut SceneAttributes,
        class: &SceneClass,
        ctx: &ReadContext,
    ) {
        if attributes.scene_type() == SceneType::Full {
            self.restore_files_from_scene(attributes, class, ctx);
        }

        self.restore_file_states(attributes, class);
        self.match_fiber_trajectories();

        for id in self.all_file_ids() {
            if let Some(file) = self.arena.get_mut(id) {
                let file_type = file.data_file_type();
                if file_type.is_connectivity_matrix() || file_type == DataFileType::Volume {
                    file.update_coloring();
                }
            }
        }
        self.events.publish(BrainEvent::VolumeColoringInvalid);

        if let Some(saved) = class.get_class(DISPLAY_PROPERTIES) {
            self.display_properties.restore_from_scene(attributes, saved);
        }
        if let Some(saved) = class.get_class_array(MODELS) {
            self.models.restore_from_scene(attributes, saved);
        }
        if let Some(saved) = class.get_class_array(BRAIN_STRUCTURES) {
            for bs in &mut self.structures {
                if let Some(c) = saved.iter().find(|c| bs.matches_scene_class(c)) {
                    bs.restore_from_scene(&self.arena, attributes, c);
                }
            }
        }
        self.restore_hierarchies(attributes, class);

        tracing::info!(
            "Restored scene into brain {} with {} files ({} problems)",
            self.id,
            self.number_of_files(),
            attributes.error_messages().len()
        );
    }

    fn restore_files_from_scene(
        &mut self,
        attributes: &mut SceneAttributes,
        class: &SceneClass,
        ctx: &ReadContext,
    ) {
        let Some(spec_class) = class.get_class(SPEC_FILE) else {
            tracing::warn!("Full scene without a spec file, loaded files are kept");
            attributes.add_to_error_message("Scene does not contain a spec file");
            return;
        };
        let previous_spec = self.spec_file.clone();
        let mut spec = SpecFile::new();
        spec.restore_from_scene(attributes, spec_class);

        if let Err(errors) = self.load_files_selected_in_spec_file(spec, ctx, &mut NoProgress) {
            for line in errors.lines() {
                attributes.add_to_error_message(line);
            }
        }
        self.spec_file.transfer_data_files_in_spec_status(&previous_spec);
    }

    /// Hand each loaded file the sub-tree saved for it
    fn restore_file_states(&mut self, attributes: &mut SceneAttributes, class: &SceneClass) {
        let current = class.get_class_array(FILES_V2);
        let legacy = class.get_class_array(FILES_LEGACY);

        for id in self.all_file_ids() {
            let Some(file) = self.arena.get(id) else {
                continue;
            };
            let full_name = file.file_name().to_string();
            let no_path = file.file_name_no_path();
            let saved = match (current, legacy) {
                (Some(entries), _) => entries.iter().find(|c| {
                    c.name() == no_path && c.get_path_name_value(FILE_NAME_V2, "") == full_name
                }),
                (None, Some(entries)) => {
                    best_legacy_match(entries.iter().filter(|c| c.name() == no_path), &full_name)
                }
                (None, None) => None,
            };
            let Some(saved) = saved else {
                continue;
            };
            if let Some(file) = self.arena.get_mut(id) {
                file.restore_from_scene(attributes, saved);
            }
        }
    }

    fn restore_hierarchies(&mut self, attributes: &SceneAttributes, class: &SceneClass) {
        let scene_file_name = attributes.scene_file_name().to_string();
        for (file_type, key) in HIERARCHIES {
            let Some(saved) = class.get_class(key) else {
                continue;
            };
            for id in self.files_of_type(file_type) {
                let Some(file) = self.arena.get_mut(id) else {
                    continue;
                };
                let full_name = file.file_name().to_string();
                let no_path = file.file_name_no_path();
                let Some(hierarchy) = file.name_hierarchy_mut() else {
                    continue;
                };
                // Borders added after the scene was made stay hidden
                if file_type == DataFileType::Border {
                    hierarchy.set_all_selected(false);
                }
                if let Some(c) = saved.class_named_with_file_name(&full_name, &no_path, &scene_file_name) {
                    hierarchy.restore_from_scene(c);
                }
            }
        }
    }

    /// Save the brain as a named scene in a loaded scene file
    pub fn save_scene(
        &mut self,
        scene_file: FileId,
        scene_name: &str,
        scene_type: SceneType,
    ) -> BrainResult<()> {
        let Some(file) = self.arena.get(scene_file) else {
            return Err(BrainError::UnknownFile(scene_file.to_string()));
        };
        if file.data_file_type() != DataFileType::Scene {
            return Err(BrainError::program(format!(
                "Saving a scene into {} file {}",
                file.data_file_type(),
                file.file_name()
            )));
        }
        let attributes = SceneAttributes::new(scene_type).with_scene_file_name(file.file_name());
        let mut scene = Scene::new(scene_name);
        scene.add_class(self.save_to_scene(&attributes, BRAIN_INSTANCE_NAME));

        if let Some(file) = self.arena.get_mut(scene_file) {
            file.replace_scene(scene);
        }
        tracing::info!("Saved scene {} to {}", scene_name, attributes.scene_file_name());
        Ok(())
    }

    /// Restore a named scene from a loaded scene file. The returned
    /// attributes carry the problems met along the way.
    pub fn restore_scene(
        &mut self,
        scene_file: FileId,
        scene_name: &str,
        ctx: &ReadContext,
    ) -> BrainResult<SceneAttributes> {
        let Some(file) = self.arena.get(scene_file) else {
            return Err(BrainError::UnknownFile(scene_file.to_string()));
        };
        let scene_file_name = file.file_name().to_string();
        let class = file
            .scenes()
            .iter()
            .find(|s| s.name == scene_name)
            .and_then(|s| s.get_class(BRAIN_INSTANCE_NAME))
            .cloned()
            .ok_or_else(|| BrainError::SceneNotFound {
                scene: scene_name.to_string(),
                scene_file: scene_file_name.clone(),
            })?;

        let scene_type = match class.get_enumerated_type_name(SCENE_TYPE) {
            Some(name) if name == SceneType::Generic.name() => SceneType::Generic,
            _ => SceneType::Full,
        };
        let mut attributes = SceneAttributes::new(scene_type).with_scene_file_name(scene_file_name);
        self.restore_from_scene(&mut attributes, &class, ctx);
        Ok(attributes)
    }
}
