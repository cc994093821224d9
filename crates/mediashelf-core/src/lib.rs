//! Mediashelf Core Library
//!
//! This crate provides the domain models, error types, configuration, upload
//! validation and media-rendering dispatch shared by every mediashelf component.
//! It also defines the seams to the outside world: the remote file service,
//! the notification channel and the download capability.

pub mod config;
pub mod error;
pub mod models;
pub mod notify;
pub mod remote;
pub mod render;
pub mod validation;

// Re-export commonly used types
pub use config::ClientConfig;
pub use error::{AppError, AppResult, ErrorMetadata, LogLevel};
pub use models::{CandidateFile, CandidateId, FileId, FileSource, StoredFile};
pub use notify::{Notifier, TracingNotifier};
pub use remote::{DownloadCapability, RemoteFileService};
pub use render::{select_strategy, MediaView, RenderStrategy};
pub use validation::{
    BatchRejection, RejectionReason, UploadPolicy, ValidationError, ValidationVerdict, Validator,
};
