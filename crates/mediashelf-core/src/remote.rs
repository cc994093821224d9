//! Seams to the remote file service and to the download machinery
//!
//! The session only talks to these traits, so it can run against the HTTP
//! client in production and in-memory fakes in tests.

use async_trait::async_trait;
use bytes::Bytes;
use std::path::PathBuf;

use crate::error::AppResult;
use crate::models::{CandidateFile, FileId, StoredFile};

/// Remote file service abstraction
///
/// Every method is a single awaited request; failures (transport or
/// non-success status) come back as `AppError`. The service is the
/// authority on what exists.
#[async_trait]
pub trait RemoteFileService: Send + Sync {
    /// Full listing of stored files
    async fn list(&self) -> AppResult<Vec<StoredFile>>;

    /// Upload a batch in one multipart request, every file under the same field
    async fn create(&self, files: &[CandidateFile]) -> AppResult<()>;

    /// Delete one stored file
    async fn delete(&self, id: &FileId) -> AppResult<()>;
}

/// Forced-download capability: fetch the bytes, then save them under a
/// caller-chosen name regardless of the URL structure.
#[async_trait]
pub trait DownloadCapability: Send + Sync {
    async fn fetch_bytes(&self, url: &str) -> AppResult<Bytes>;

    /// Persist `data` as `file_name`. Returns where it was written.
    async fn save_as(&self, data: Bytes, file_name: &str) -> AppResult<PathBuf>;
}
