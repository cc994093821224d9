//! Data models for the client
//!
//! `candidate` holds the local, not-yet-uploaded side; `stored_file` mirrors
//! the records owned by the remote service.

mod candidate;
mod stored_file;

pub use candidate::{content_type_for_extension, CandidateFile, CandidateId, FileSource};
pub use stored_file::{FileId, StoredFile};

/// Rounded kilobyte figure shown next to file names.
pub fn size_kb(bytes: u64) -> u64 {
    bytes / 1024 + u64::from(bytes % 1024 >= 512)
}
