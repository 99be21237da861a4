//! Scene class: a named node in a scene tree

use serde::{Deserialize, Serialize};

use crate::object::{SceneEntry, SceneObject, ScenePrimitive};
use crate::path::relative_path_to_directory;

/// A named, typed node of a scene tree.
///
/// `name` identifies the instance (for data files it is the file name
/// without path), `class_name` identifies the kind of object that wrote it
/// and `version` allows readers to handle older layouts.
///
/// Adding a value under a name that already exists replaces the old value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneClass {
    name: String,
    class_name: String,
    version: i32,
    entries: Vec<SceneEntry>,
}

impl SceneClass {
    /// Create an empty scene class
    pub fn new(name: impl Into<String>, class_name: impl Into<String>, version: i32) -> Self {
        Self {
            name: name.into(),
            class_name: class_name.into(),
            version,
            entries: Vec::new(),
        }
    }

    /// Instance name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the instance
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Name of the kind of object that wrote this class
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Layout version
    pub fn version(&self) -> i32 {
        self.version
    }

    /// All entries in insertion order
    pub fn entries(&self) -> &[SceneEntry] {
        &self.entries
    }

    /// Number of stored objects
    pub fn number_of_objects(&self) -> usize {
        self.entries.len()
    }

    /// True if an object is stored under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    /// Store an object, replacing any object with the same name
    pub fn add_child(&mut self, name: impl Into<String>, object: SceneObject) {
        let name = name.into();
        if let Some(existing) = self.entries.iter_mut().find(|e| e.name == name) {
            existing.object = object;
        } else {
            self.entries.push(SceneEntry::new(name, object));
        }
    }

    /// Remove and return the object stored under `name`
    pub fn remove(&mut self, name: &str) -> Option<SceneObject> {
        let pos = self.entries.iter().position(|e| e.name == name)?;
        Some(self.entries.remove(pos).object)
    }

    pub fn add_boolean(&mut self, name: impl Into<String>, value: bool) {
        self.add_child(name, SceneObject::Primitive(ScenePrimitive::Boolean(value)));
    }

    pub fn add_integer(&mut self, name: impl Into<String>, value: i64) {
        self.add_child(name, SceneObject::Primitive(ScenePrimitive::Integer(value)));
    }

    pub fn add_float(&mut self, name: impl Into<String>, value: f64) {
        self.add_child(name, SceneObject::Primitive(ScenePrimitive::Float(value)));
    }

    pub fn add_string(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.add_child(
            name,
            SceneObject::Primitive(ScenePrimitive::String(value.into())),
        );
    }

    /// Store the name of an enumerated value
    pub fn add_enumerated_type(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.add_child(
            name,
            SceneObject::Primitive(ScenePrimitive::EnumeratedType(value.into())),
        );
    }

    /// Store a file path
    pub fn add_path_name(&mut self, name: impl Into<String>, path: impl Into<String>) {
        self.add_child(name, SceneObject::PathName(path.into()));
    }

    pub fn add_string_array(&mut self, name: impl Into<String>, values: &[String]) {
        let values = values
            .iter()
            .map(|v| ScenePrimitive::String(v.clone()))
            .collect();
        self.add_child(name, SceneObject::PrimitiveArray(values));
    }

    pub fn add_boolean_array(&mut self, name: impl Into<String>, values: &[bool]) {
        let values = values.iter().map(|v| ScenePrimitive::Boolean(*v)).collect();
        self.add_child(name, SceneObject::PrimitiveArray(values));
    }

    /// Store a child class under its own name
    pub fn add_class(&mut self, class: SceneClass) {
        let name = class.name.clone();
        self.add_child(name, SceneObject::Class(class));
    }

    /// Store an array of classes
    pub fn add_class_array(&mut self, name: impl Into<String>, classes: Vec<SceneClass>) {
        self.add_child(name, SceneObject::ClassArray(classes));
    }

    /// Object stored under `name`
    pub fn get_object(&self, name: &str) -> Option<&SceneObject> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| &e.object)
    }

    /// Primitive stored under `name`
    pub fn get_primitive(&self, name: &str) -> Option<&ScenePrimitive> {
        match self.get_object(name)? {
            SceneObject::Primitive(p) => Some(p),
            _ => None,
        }
    }

    pub fn get_boolean_value(&self, name: &str, default: bool) -> bool {
        self.get_primitive(name)
            .and_then(ScenePrimitive::as_bool)
            .unwrap_or(default)
    }

    pub fn get_integer_value(&self, name: &str, default: i64) -> i64 {
        self.get_primitive(name)
            .and_then(ScenePrimitive::as_i64)
            .unwrap_or(default)
    }

    pub fn get_float_value(&self, name: &str, default: f64) -> f64 {
        self.get_primitive(name)
            .and_then(ScenePrimitive::as_f64)
            .unwrap_or(default)
    }

    pub fn get_string_value(&self, name: &str, default: &str) -> String {
        self.get_primitive(name)
            .map(ScenePrimitive::as_string)
            .unwrap_or_else(|| default.to_string())
    }

    /// Name of the enumerated value stored under `name`
    pub fn get_enumerated_type_name(&self, name: &str) -> Option<&str> {
        match self.get_primitive(name)? {
            ScenePrimitive::EnumeratedType(s) | ScenePrimitive::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Path stored under `name`; plain strings are accepted for older layouts
    pub fn get_path_name_value(&self, name: &str, default: &str) -> String {
        match self.get_object(name) {
            Some(SceneObject::PathName(p)) => p.clone(),
            Some(SceneObject::Primitive(ScenePrimitive::String(s))) => s.clone(),
            _ => default.to_string(),
        }
    }

    /// True if a path (not a plain string) is stored under `name`
    pub fn has_path_name(&self, name: &str) -> bool {
        matches!(self.get_object(name), Some(SceneObject::PathName(_)))
    }

    pub fn get_string_array_value(&self, name: &str) -> Vec<String> {
        match self.get_object(name) {
            Some(SceneObject::PrimitiveArray(values)) => {
                values.iter().map(ScenePrimitive::as_string).collect()
            }
            _ => Vec::new(),
        }
    }

    pub fn get_boolean_array_value(&self, name: &str) -> Vec<bool> {
        match self.get_object(name) {
            Some(SceneObject::PrimitiveArray(values)) => values
                .iter()
                .map(|v| v.as_bool().unwrap_or(false))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Child class stored under `name`
    pub fn get_class(&self, name: &str) -> Option<&SceneClass> {
        match self.get_object(name)? {
            SceneObject::Class(c) => Some(c),
            _ => None,
        }
    }

    /// Class array stored under `name`
    pub fn get_class_array(&self, name: &str) -> Option<&[SceneClass]> {
        match self.get_object(name)? {
            SceneObject::ClassArray(classes) => Some(classes.as_slice()),
            _ => None,
        }
    }

    /// All child classes (not class arrays)
    pub fn child_classes(&self) -> impl Iterator<Item = &SceneClass> {
        self.entries.iter().filter_map(|e| match &e.object {
            SceneObject::Class(c) => Some(c),
            _ => None,
        })
    }

    /// Find a child class saved under a file's name.
    ///
    /// Children keyed by file are named by the file's path relative to the
    /// scene file's directory, so the lookup survives moving the scene and
    /// its data together. Older scenes used the file name without path.
    pub fn class_named_with_file_name(
        &self,
        file_name_full_path: &str,
        file_name_no_path: &str,
        scene_file_name: &str,
    ) -> Option<&SceneClass> {
        let scene_dir = crate::path::directory_of(scene_file_name);
        if let Some(relative) = relative_path_to_directory(file_name_full_path, &scene_dir) {
            if let Some(class) = self.get_class(&relative) {
                return Some(class);
            }
        }
        self.get_class(file_name_no_path)
    }
}
