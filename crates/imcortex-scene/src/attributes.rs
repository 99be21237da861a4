//! Options that apply to one scene save or restore

use serde::{Deserialize, Serialize};

use crate::path::directory_of;

/// Kind of scene being saved or restored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SceneType {
    /// The scene carries the full file set and reloads it on restore
    #[default]
    Full,

    /// The scene only carries view state for the files already loaded
    Generic,
}

impl SceneType {
    pub fn name(&self) -> &'static str {
        match self {
            SceneType::Full => "SCENE_TYPE_FULL",
            SceneType::Generic => "SCENE_TYPE_GENERIC",
        }
    }
}

/// Attributes for a single scene operation.
///
/// Restoring never aborts on a bad entry; problems are collected here and
/// reported to the caller once the restore is complete.
#[derive(Debug, Clone, Default)]
pub struct SceneAttributes {
    scene_type: SceneType,
    scene_file_name: String,
    spec_file_name_saved_to_scene: bool,
    error_messages: Vec<String>,
}

impl SceneAttributes {
    /// Create attributes for a scene of the given type
    pub fn new(scene_type: SceneType) -> Self {
        Self {
            scene_type,
            scene_file_name: String::new(),
            spec_file_name_saved_to_scene: true,
            error_messages: Vec::new(),
        }
    }

    /// Set the scene file the scene is saved into or restored from
    pub fn with_scene_file_name(mut self, scene_file_name: impl Into<String>) -> Self {
        self.scene_file_name = scene_file_name.into();
        self
    }

    /// Control whether the spec file's own name is written to the scene
    pub fn with_spec_file_name_saved(mut self, saved: bool) -> Self {
        self.spec_file_name_saved_to_scene = saved;
        self
    }

    pub fn scene_type(&self) -> SceneType {
        self.scene_type
    }

    pub fn scene_file_name(&self) -> &str {
        &self.scene_file_name
    }

    /// Directory containing the scene file
    pub fn scene_file_directory(&self) -> String {
        directory_of(&self.scene_file_name)
    }

    pub fn is_spec_file_name_saved_to_scene(&self) -> bool {
        self.spec_file_name_saved_to_scene
    }

    /// Record a problem found while restoring
    pub fn add_to_error_message(&mut self, message: impl Into<String>) {
        self.error_messages.push(message.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.error_messages.is_empty()
    }

    pub fn error_messages(&self) -> &[String] {
        &self.error_messages
    }

    /// All recorded problems, one per line
    pub fn error_message(&self) -> String {
        self.error_messages.join("\n")
    }
}
