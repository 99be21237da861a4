//! JSON document encoding shared by every file kind
//!
//! A file on disk is an envelope naming its type around a type-specific
//! `content` object:
//!
//! ```json
//! { "file_type": "METRIC", "version": 1, "content": { ... } }
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::context::{is_remote_path, ReadContext};
use crate::error::{IoError, IoResult};
use crate::file_type::DataFileType;

/// Current envelope version
pub const DOCUMENT_VERSION: u32 = 1;

/// On-disk envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document<C> {
    pub file_type: String,
    pub version: u32,
    pub content: C,
}

/// Read a document of the expected type from a local or remote path
pub fn read_document<C: DeserializeOwned>(
    path: &str,
    expected: DataFileType,
    ctx: &ReadContext,
) -> IoResult<C> {
    let bytes = if is_remote_path(path) {
        fetch_remote(path, ctx)?
    } else {
        read_local(path)?
    };
    tracing::trace!("Read {} bytes from {}", bytes.len(), path);
    decode_document(path, &bytes, expected)
}

/// Decode document bytes and check the declared type
pub fn decode_document<C: DeserializeOwned>(
    path: &str,
    bytes: &[u8],
    expected: DataFileType,
) -> IoResult<C> {
    let document: Document<serde_json::Value> = serde_json::from_slice(bytes)
        .map_err(|e| IoError::InvalidFormat(format!("{path}: {e}")))?;

    if document.version > DOCUMENT_VERSION {
        return Err(IoError::InvalidFormat(format!(
            "{path}: document version {} is newer than supported version {DOCUMENT_VERSION}",
            document.version
        )));
    }
    if document.file_type != expected.name() {
        return Err(IoError::WrongFileType {
            path: path.to_string(),
            expected: expected.name().to_string(),
            actual: document.file_type,
        });
    }

    serde_json::from_value(document.content)
        .map_err(|e| IoError::InvalidFormat(format!("{path}: {e}")))
}

/// Write a document to a local path
pub fn write_document<C: Serialize>(
    path: &str,
    file_type: DataFileType,
    content: &C,
) -> IoResult<()> {
    if is_remote_path(path) {
        return Err(IoError::Unwritable(path.to_string()));
    }
    let document = Document {
        file_type: file_type.name().to_string(),
        version: DOCUMENT_VERSION,
        content,
    };
    let json = serde_json::to_string_pretty(&document)
        .map_err(|e| IoError::InvalidFormat(format!("{path}: {e}")))?;
    std::fs::write(path, json).map_err(|e| IoError::OpenFailed {
        path: path.to_string(),
        message: e.to_string(),
    })?;
    tracing::debug!("Wrote {} document {}", file_type, path);
    Ok(())
}

fn read_local(path: &str) -> IoResult<Vec<u8>> {
    let file_path = Path::new(path);
    if !file_path.exists() {
        return Err(IoError::FileNotFound(path.to_string()));
    }
    let mut file = File::open(file_path).map_err(|e| IoError::OpenFailed {
        path: path.to_string(),
        message: e.to_string(),
    })?;
    let size = file
        .metadata()
        .map_err(|e| IoError::Io(e.to_string()))?
        .len();

    let mut bytes = Vec::new();
    let capacity = usize::try_from(size).map_err(|_| IoError::OutOfMemory {
        path: path.to_string(),
        bytes: size,
    })?;
    bytes
        .try_reserve_exact(capacity)
        .map_err(|_| IoError::OutOfMemory {
            path: path.to_string(),
            bytes: size,
        })?;
    file.read_to_end(&mut bytes)
        .map_err(|e| IoError::Io(format!("{path}: {e}")))?;
    Ok(bytes)
}

fn fetch_remote(url: &str, ctx: &ReadContext) -> IoResult<Vec<u8>> {
    let fetcher = ctx.fetcher().ok_or_else(|| IoError::Remote {
        url: url.to_string(),
        message: "no remote fetcher configured".to_string(),
    })?;
    fetcher.fetch(url, ctx.credentials())
}
