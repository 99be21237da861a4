//! Error types for imcortex-scene

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while persisting or loading scene trees
#[derive(Error, Debug)]
pub enum SceneError {
    /// Scene JSON could not be parsed or produced
    #[error("Scene serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Scene file could not be read or written
    #[error("Scene file I/O failed for {path}: {message}")]
    Io { path: PathBuf, message: String },

    /// A scene with the requested name does not exist
    #[error("Scene not found: {name}")]
    SceneNotFound { name: String },
}

/// Result type alias for scene operations
pub type SceneResult<T> = Result<T, SceneError>;
