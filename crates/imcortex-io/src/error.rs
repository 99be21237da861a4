//! Errors that can occur while reading or writing data files

use thiserror::Error;

use crate::file_type::DataFileType;

/// Errors that can occur during file I/O
#[derive(Debug, Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to open file: {path}: {message}")]
    OpenFailed { path: String, message: String },

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("{path} contains a {actual} file but a {expected} file was expected")]
    WrongFileType {
        path: String,
        expected: String,
        actual: String,
    },

    /// Memory for the file contents could not be reserved
    #[error("Insufficient memory to read {path} ({bytes} bytes)")]
    OutOfMemory { path: String, bytes: u64 },

    #[error("Remote file {url} could not be fetched: {message}")]
    Remote { url: String, message: String },

    #[error("Cannot write to {0}")]
    Unwritable(String),

    #[error("{operation} is not implemented for {file_type} files")]
    NotImplemented {
        file_type: DataFileType,
        operation: String,
    },

    #[error("I/O error: {0}")]
    Io(String),
}

/// Result type for I/O operations
pub type IoResult<T> = Result<T, IoError>;
