//! imcortex-io - Data file collaborators for imcortex
//!
//! Everything the brain core needs to know about individual files lives
//! here, behind the [`DataFile`] trait:
//!
//! - **DataFileType**: the closed set of file categories and their extensions
//! - **Structure**: anatomical structure tags
//! - **DataFile**: read/write, modification status, structure, map and node
//!   counts, scene save/restore
//! - **files**: the concrete file kinds (surface, metric, CIFTI, volume,
//!   border, foci, annotation, media, histology, palette, scene, ...)
//! - **codec**: the JSON document encoding every file kind reads and writes
//! - **context**: path resolution, remote paths and per-request credentials
//!
//! # Design
//!
//! Binary neuroimaging codecs are outside the scope of this workspace. Each
//! file kind stores the facts the core inspects in a JSON envelope so that
//! loading, validation and rollback can be exercised end to end.

pub mod codec;
pub mod context;
pub mod data_file;
pub mod error;
pub mod file_type;
pub mod files;
pub mod hierarchy;
pub mod structure;

pub use context::{
    file_name_no_path, is_remote_path, resolve_path, Credentials, ReadContext, RemoteFetcher,
};
pub use data_file::{DataFile, FileBase};
pub use error::{IoError, IoResult};
pub use file_type::DataFileType;
pub use files::new_data_file;
pub use hierarchy::{GroupAndNameHierarchy, HierarchyGroup, HierarchyName};
pub use structure::Structure;
