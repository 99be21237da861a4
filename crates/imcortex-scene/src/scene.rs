//! A named scene and its JSON persistence

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::class::SceneClass;
use crate::error::{SceneError, SceneResult};

/// A named snapshot of application state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Scene name shown to the user
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// Creation timestamp (RFC 3339)
    pub created_at: String,

    /// Top-level classes written by each participant
    pub classes: Vec<SceneClass>,
}

impl Scene {
    /// Create an empty scene
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            created_at: chrono::Utc::now().to_rfc3339(),
            classes: Vec::new(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a top-level class, replacing any class with the same name
    pub fn add_class(&mut self, class: SceneClass) {
        if let Some(existing) = self.classes.iter_mut().find(|c| c.name() == class.name()) {
            *existing = class;
        } else {
            self.classes.push(class);
        }
    }

    /// Top-level class with the given name
    pub fn get_class(&self, name: &str) -> Option<&SceneClass> {
        self.classes.iter().find(|c| c.name() == name)
    }

    pub fn to_json(&self) -> SceneResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the scene as JSON
    pub fn write_to_path(&self, path: &Path) -> SceneResult<()> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|e| SceneError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Read a scene written by [`Scene::write_to_path`]
    pub fn read_from_path(path: &Path) -> SceneResult<Self> {
        let json = fs::read_to_string(path).map_err(|e| SceneError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_json(&json)
    }
}
