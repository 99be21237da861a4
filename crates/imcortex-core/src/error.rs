//! Error types for imcortex-core

use std::fmt;

use thiserror::Error;

use imcortex_io::{DataFileType, IoError, Structure};
use imcortex_scene::SceneError;

/// Result type alias for brain operations
pub type BrainResult<T> = std::result::Result<T, BrainError>;

/// Main error type for brain operations
#[derive(Error, Debug)]
pub enum BrainError {
    /// Reading or parsing failed, including running out of memory while
    /// reading
    #[error("Error reading {file_type} file {path}: {message}")]
    Load {
        path: String,
        file_type: DataFileType,
        message: String,
    },

    #[error("Error writing {file_type} file {path}: {message}")]
    Write {
        path: String,
        file_type: DataFileType,
        message: String,
    },

    /// A file's vertex count differs from its brain structure
    #[error("{file_type} file {path} contains {file_nodes} vertices but the {structure} contains {structure_nodes} vertices.")]
    NodeCountMismatch {
        path: String,
        file_type: DataFileType,
        structure: Structure,
        file_nodes: usize,
        structure_nodes: usize,
    },

    /// A file was handed to a brain structure of another structure
    #[error("{path} is for structure {file_structure} but was added to {structure}")]
    StructureMismatch {
        path: String,
        file_structure: Structure,
        structure: Structure,
    },

    /// Label, metric and RGBA files need a surface of their structure
    #[error("Must read a surface with structure {structure} before reading its {file_type} files: {path}")]
    SurfaceRequired {
        path: String,
        file_type: DataFileType,
        structure: Structure,
    },

    #[error("Structure for {file_type} file {path} is invalid")]
    InvalidStructure { path: String, file_type: DataFileType },

    #[error("{operation} of {file_type} files is not supported")]
    Unsupported {
        file_type: DataFileType,
        operation: String,
    },

    /// A caller broke the contract of an operation
    #[error("Program error: {0}")]
    ProgramError(String),

    #[error("File does not exist: {0}")]
    FileNotFound(String),

    #[error("File is not loaded: {0}")]
    UnknownFile(String),

    #[error("Scene \"{scene}\" not found in {scene_file}")]
    SceneNotFound { scene: String, scene_file: String },

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl BrainError {
    /// Wrap an I/O error from reading `path` as a load failure
    pub fn load(path: &str, file_type: DataFileType, error: IoError) -> Self {
        BrainError::Load {
            path: path.to_string(),
            file_type,
            message: error.to_string(),
        }
    }

    /// Build a program error and log it
    pub fn program(message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::error!("Program error: {}", message);
        BrainError::ProgramError(message)
    }
}

/// Errors collected by batch operations that keep going after a failure
#[derive(Debug, Default)]
pub struct BatchErrors {
    errors: Vec<BrainError>,
}

impl BatchErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: BrainError) {
        self.errors.push(error);
    }

    pub fn extend(&mut self, other: BatchErrors) {
        self.errors.extend(other.errors);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[BrainError] {
        &self.errors
    }

    /// One message per failed item
    pub fn lines(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.to_string()).collect()
    }

    /// `Ok` when nothing failed
    pub fn into_result(self) -> Result<(), BatchErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for BatchErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}

impl std::error::Error for BatchErrors {}
