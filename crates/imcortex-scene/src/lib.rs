//! imcortex-scene - Scene persistence for imcortex
//!
//! A scene is a named snapshot of application state stored as a tree of
//! named values. Every participant (the brain, each data file, each view
//! model) writes its own [`SceneClass`] sub-tree and later reads it back.
//!
//! # Key Components
//!
//! - **SceneClass**: a named, typed node holding primitives, path names,
//!   child classes and class arrays
//! - **SceneAttributes**: per save/restore options (full or generic scene,
//!   location of the scene file) plus accumulated restore errors
//! - **Scene**: a top-level named tree as stored in a scene file
//!
//! Scene trees persist as JSON through `serde_json`.

pub mod attributes;
pub mod class;
pub mod error;
pub mod object;
pub mod path;
pub mod scene;

pub use attributes::{SceneAttributes, SceneType};
pub use class::SceneClass;
pub use error::{SceneError, SceneResult};
pub use object::{SceneEntry, SceneObject, ScenePrimitive};
pub use path::{directory_of, relative_path_to_directory};
pub use scene::Scene;
