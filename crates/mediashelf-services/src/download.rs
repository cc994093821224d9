//! Forced download to a local directory
//!
//! Bytes are fetched over HTTP and written under the stored file name,
//! whatever the URL looks like. Writes go through a temporary file in the
//! target directory which is renamed into place on success and removed on
//! every other path, so an abandoned download never leaves partial data.

use async_trait::async_trait;
use bytes::Bytes;
use mediashelf_api_client::ApiClient;
use mediashelf_core::{AppError, AppResult, DownloadCapability};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Download capability backed by the API client and a local directory
#[derive(Clone, Debug)]
pub struct DiskDownloader {
    client: ApiClient,
    dir: PathBuf,
}

impl DiskDownloader {
    pub fn new(client: ApiClient, dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            dir: dir.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl DownloadCapability for DiskDownloader {
    async fn fetch_bytes(&self, url: &str) -> AppResult<Bytes> {
        self.client.fetch_bytes(url).await
    }

    async fn save_as(&self, data: Bytes, file_name: &str) -> AppResult<PathBuf> {
        let dir = self.dir.clone();
        let file_name = file_name.to_string();

        tokio::task::spawn_blocking(move || save_into_dir(&dir, &data, &file_name))
            .await
            .map_err(|e| AppError::Io(io::Error::other(e)))?
    }
}

/// Only the final path component of `file_name` is used
pub fn safe_file_name(file_name: &str) -> AppResult<String> {
    Path::new(file_name)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .ok_or_else(|| AppError::InvalidInput(format!("Invalid file name: {}", file_name)))
}

/// Write `data` to `dir/file_name` via a scoped temporary file
pub fn save_into_dir(dir: &Path, data: &[u8], file_name: &str) -> AppResult<PathBuf> {
    let name = safe_file_name(file_name)?;
    std::fs::create_dir_all(dir)?;

    // Dropped (and deleted) on any early return below
    let mut temp = tempfile::NamedTempFile::new_in(dir)?;
    temp.write_all(data)?;
    temp.flush()?;

    let target = dir.join(name);
    temp.persist(&target).map_err(|e| AppError::Io(e.error))?;

    tracing::debug!(path = %target.display(), bytes = data.len(), "Saved download");
    Ok(target)
}
