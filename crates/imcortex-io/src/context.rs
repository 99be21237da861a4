//! Path resolution and the per-request read context

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::IoResult;

const REMOTE_PREFIXES: [&str; 3] = ["http://", "https://", "ftp://"];

/// True if `path` names a file on a server rather than on disk
pub fn is_remote_path(path: &str) -> bool {
    REMOTE_PREFIXES.iter().any(|p| path.starts_with(p))
}

/// Make `path` absolute against `current_dir`.
///
/// Remote paths, absolute paths and paths resolved without a current
/// directory are returned unchanged.
pub fn resolve_path(path: &str, current_dir: &str) -> String {
    if is_remote_path(path) || current_dir.is_empty() || Path::new(path).is_absolute() {
        return path.to_string();
    }
    Path::new(current_dir)
        .join(path)
        .to_string_lossy()
        .into_owned()
}

/// File name without any directory (works for remote paths too)
pub fn file_name_no_path(path: &str) -> String {
    if is_remote_path(path) {
        return path.rsplit('/').next().unwrap_or(path).to_string();
    }
    Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

/// Username and password for a remote file server
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Fetches the bytes of a remote file.
///
/// Transport is supplied by the embedding application.
pub trait RemoteFetcher: Send + Sync {
    fn fetch(&self, url: &str, credentials: Option<&Credentials>) -> IoResult<Vec<u8>>;
}

/// Everything a single read request carries besides the path.
///
/// Credentials belong to the request that needs them and are never stored
/// anywhere else.
#[derive(Clone, Default)]
pub struct ReadContext {
    credentials: Option<Credentials>,
    fetcher: Option<Arc<dyn RemoteFetcher>>,
}

impl ReadContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn with_fetcher(mut self, fetcher: Arc<dyn RemoteFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn fetcher(&self) -> Option<&dyn RemoteFetcher> {
        self.fetcher.as_deref()
    }
}

impl fmt::Debug for ReadContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadContext")
            .field("credentials", &self.credentials)
            .field("has_fetcher", &self.fetcher.is_some())
            .finish()
    }
}
