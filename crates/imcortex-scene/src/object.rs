//! Values that can be stored in a scene class

use serde::{Deserialize, Serialize};

use crate::class::SceneClass;

/// A single primitive scene value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ScenePrimitive {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    /// Name of an enumerated value (e.g. `CORTEX_LEFT`)
    EnumeratedType(String),
}

impl ScenePrimitive {
    /// Interpret as a boolean; strings "true"/"false" are accepted
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ScenePrimitive::Boolean(b) => Some(*b),
            ScenePrimitive::Integer(i) => Some(*i != 0),
            ScenePrimitive::String(s) => match s.as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// Interpret as an integer
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ScenePrimitive::Integer(i) => Some(*i),
            ScenePrimitive::Boolean(b) => Some(i64::from(*b)),
            ScenePrimitive::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Interpret as a float
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ScenePrimitive::Float(f) => Some(*f),
            ScenePrimitive::Integer(i) => Some(*i as f64),
            ScenePrimitive::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Interpret as a string; every primitive has a string form
    pub fn as_string(&self) -> String {
        match self {
            ScenePrimitive::Boolean(b) => b.to_string(),
            ScenePrimitive::Integer(i) => i.to_string(),
            ScenePrimitive::Float(f) => f.to_string(),
            ScenePrimitive::String(s) | ScenePrimitive::EnumeratedType(s) => s.clone(),
        }
    }
}

/// Any object stored under a name in a [`SceneClass`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum SceneObject {
    Primitive(ScenePrimitive),
    /// A file path; kept apart from plain strings so it can be relativized
    PathName(String),
    PrimitiveArray(Vec<ScenePrimitive>),
    Class(SceneClass),
    ClassArray(Vec<SceneClass>),
}

/// A named object inside a scene class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneEntry {
    /// Name the object is stored under
    pub name: String,

    /// The stored object
    pub object: SceneObject,
}

impl SceneEntry {
    /// Create a new entry
    pub fn new(name: impl Into<String>, object: SceneObject) -> Self {
        Self {
            name: name.into(),
            object,
        }
    }
}
