//! imcortex-core - The brain data-file lifecycle
//!
//! This crate owns the loaded neuroimaging data files of a session and keeps
//! them consistent with one another:
//!
//! - **Brain**: the aggregate root; add, read, reload and remove files with
//!   rollback, reset, spec file loading, request processing
//! - **BrainStructure**: surfaces and surface-mapped files of one anatomical
//!   structure, all with the same vertex count
//! - **SpecFile**: the manifest of a study's files
//! - **CategoryPolicy**: how each file category is loaded
//! - **Validator**: CIFTI brainordinate counts against loaded structures
//! - **DerivedModelManager**: chart, volume, whole-brain, montage, histology
//!   and media models rebuilt after every change
//! - **Scene bridge**: save and restore the whole file graph in scenes,
//!   reusing unmodified files
//! - **Events**: notifications published on an [`EventBus`]
//! - **Preferences**: user settings loaded from TOML
//!
//! # Architecture
//!
//! ```text
//! request ──▶ Brain ──▶ CategoryPolicy ──▶ DataFile::read_file
//!               │            │
//!               │            ├──▶ BrainStructure (surfaces, labels, metrics, RGBA)
//!               │            └──▶ validate_cifti_mappable_data_file
//!               ├──▶ FileArena (owns every file) ◀── SpecFile (FileId links)
//!               └──▶ DerivedModelManager ──▶ EventBus
//! ```

pub mod annotations;
pub mod arena;
pub mod brain;
pub mod brain_structure;
pub mod category;
pub mod display_properties;
pub mod error;
pub mod events;
pub mod fiber_samples;
pub mod models;
pub mod preferences;
pub mod progress;
pub mod requests;
pub mod spec_file;
pub mod validator;

pub use annotations::{AnnotationManager, TextSubstitutionLayers};
pub use arena::{FileArena, FileId};
pub use brain::{Brain, BrainId, LoadMode, ReloadAllMode};
pub use brain_structure::BrainStructure;
pub use category::{CategoryPolicy, Support};
pub use display_properties::DisplayProperties;
pub use error::{BatchErrors, BrainError, BrainResult};
pub use events::{BrainEvent, EventBus, InMemoryEventBus, PublishedEvent};
pub use models::{DerivedModel, DerivedModelManager, ModelInputs, ModelKind};
pub use preferences::CortexPreferences;
pub use progress::{NoProgress, ProgressMonitor};
pub use requests::{BrainRequest, BrainRequestKind, RequestResult};
pub use spec_file::{SpecFile, SpecFileEntry, SpecFileGroup};
pub use validator::validate_cifti_mappable_data_file;
