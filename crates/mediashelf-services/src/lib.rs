//! Session services for the mediashelf client
//!
//! `UploadOrchestrator` owns the staged selection and the gallery mirror
//! and drives every remote call through the core traits.

pub mod download;
pub mod gallery;
pub mod orchestrator;
pub mod staging;

pub use download::DiskDownloader;
pub use gallery::GalleryState;
pub use orchestrator::UploadOrchestrator;
pub use staging::StagingState;
