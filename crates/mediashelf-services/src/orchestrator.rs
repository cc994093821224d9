//! Upload orchestration
//!
//! Drives select → validate → stage → transmit → reconcile. Remote calls are
//! not serialized against each other: an upload and a delete may be in
//! flight together, and each successful one triggers a full gallery refresh.
//! Whichever refresh lands last wins. Locks are never held across a remote
//! call.

use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

use mediashelf_core::{
    AppError, AppResult, BatchRejection, CandidateFile, CandidateId, ClientConfig,
    DownloadCapability, ErrorMetadata, FileId, LogLevel, MediaView, Notifier, RemoteFileService,
    StoredFile, Validator,
};

use crate::gallery::GalleryState;
use crate::staging::StagingState;

const UPLOAD_SUCCESS: &str = "Files uploaded successfully!";
const UPLOAD_FAILED: &str = "Error uploading files!";
const DELETE_SUCCESS: &str = "File removed successfully!";
const DELETE_FAILED: &str = "Error removing file!";
const DOWNLOAD_FAILED: &str = "Download failed";

/// One interactive session against one backend
pub struct UploadOrchestrator {
    remote: Arc<dyn RemoteFileService>,
    downloads: Arc<dyn DownloadCapability>,
    notifier: Arc<dyn Notifier>,
    validator: Validator,
    config: ClientConfig,
    staging: RwLock<StagingState>,
    gallery: RwLock<GalleryState>,
}

impl UploadOrchestrator {
    pub fn new(
        config: ClientConfig,
        remote: Arc<dyn RemoteFileService>,
        downloads: Arc<dyn DownloadCapability>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            remote,
            downloads,
            notifier,
            validator: Validator::default(),
            config,
            staging: RwLock::new(StagingState::new()),
            gallery: RwLock::new(GalleryState::new()),
        }
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// Initial gallery fetch
    pub async fn mount(&self) -> AppResult<usize> {
        self.refresh_gallery().await
    }

    /// Validate a fresh selection. On success it replaces whatever was
    /// staged; on failure staging is untouched and one notification is sent
    /// per problem found.
    pub async fn select(&self, files: Vec<CandidateFile>) -> Result<usize, BatchRejection> {
        match self.validator.validate_batch(files) {
            Ok(batch) => {
                let count = batch.len();
                self.staging.write().await.replace(batch);
                tracing::debug!(count, "Selection staged");
                Ok(count)
            }
            Err(rejection) => {
                for error in &rejection.errors {
                    self.notifier.notify_error(&error.to_string());
                }
                Err(rejection)
            }
        }
    }

    /// Drop one staged file. Unknown ids are ignored.
    pub async fn remove_staged(&self, id: CandidateId) -> bool {
        self.staging.write().await.remove(id)
    }

    /// Upload everything currently staged.
    ///
    /// On success the uploaded files leave staging and the gallery is
    /// refetched. On failure staging is kept so the user can retry.
    pub async fn upload(&self) -> AppResult<usize> {
        let (batch, total_bytes) = {
            let staging = self.staging.read().await;
            (staging.files().to_vec(), staging.total_bytes())
        };
        if batch.is_empty() {
            let err = AppError::NoFilesSelected;
            self.notifier.notify_error(&err.client_message());
            return Err(err);
        }

        tracing::debug!(count = batch.len(), total_bytes, "Uploading staged files");
        if let Err(e) = self.remote.create(&batch).await {
            log_error("upload", &e);
            self.notifier.notify_error(UPLOAD_FAILED);
            return Err(e);
        }

        tracing::info!(count = batch.len(), "Upload completed");
        self.notifier.notify_success(UPLOAD_SUCCESS);

        let ids: Vec<CandidateId> = batch.iter().map(|f| f.id()).collect();
        self.staging.write().await.discard(&ids);

        self.refresh_after_mutation().await;
        Ok(batch.len())
    }

    /// Delete a stored file. The gallery is refetched only on success.
    pub async fn delete_remote(&self, id: &FileId) -> AppResult<()> {
        if let Err(e) = self.remote.delete(id).await {
            log_error("delete", &e);
            self.notifier.notify_error(DELETE_FAILED);
            return Err(e);
        }

        tracing::info!(id = %id, "File deleted");
        self.notifier.notify_success(DELETE_SUCCESS);
        self.refresh_after_mutation().await;
        Ok(())
    }

    /// Fetch the bytes and save them under the stored file name. No retry.
    pub async fn download(&self, file: &StoredFile) -> AppResult<PathBuf> {
        let url = self.config.resolve_media_url(&file.url);

        let result = async {
            let data = self.downloads.fetch_bytes(&url).await?;
            self.downloads.save_as(data, &file.file_name).await
        }
        .await;

        match result {
            Ok(path) => {
                tracing::info!(id = %file.id, path = %path.display(), "Download saved");
                Ok(path)
            }
            Err(e) => {
                log_error("download", &e);
                self.notifier.notify_error(DOWNLOAD_FAILED);
                Err(e)
            }
        }
    }

    /// Replace the gallery with a fresh listing. On failure the current
    /// snapshot stays as it is.
    pub async fn refresh_gallery(&self) -> AppResult<usize> {
        let files = self.remote.list().await.inspect_err(|e| {
            log_error("list", e);
        })?;

        let count = files.len();
        self.gallery.write().await.replace(files);
        Ok(count)
    }

    async fn refresh_after_mutation(&self) {
        // The mutation already succeeded; a failed refresh only leaves the
        // gallery stale until the next one.
        let _ = self.refresh_gallery().await;
    }

    pub async fn staged(&self) -> Vec<CandidateFile> {
        self.staging.read().await.files().to_vec()
    }

    pub async fn gallery(&self) -> Vec<StoredFile> {
        self.gallery.read().await.files().to_vec()
    }

    /// Number of gallery snapshots applied so far
    pub async fn gallery_version(&self) -> u64 {
        self.gallery.read().await.version()
    }

    pub async fn find_stored(&self, id: &FileId) -> Option<StoredFile> {
        self.gallery.read().await.get(id).cloned()
    }

    /// Gallery entries paired with how each should be presented
    pub async fn gallery_views(&self) -> Vec<(StoredFile, MediaView)> {
        self.gallery
            .read()
            .await
            .files()
            .iter()
            .map(|f| (f.clone(), MediaView::for_file(f, &self.config)))
            .collect()
    }
}

fn log_error(operation: &str, err: &AppError) {
    let code = err.error_code();
    let recoverable = err.is_recoverable();
    match err.log_level() {
        LogLevel::Debug => tracing::debug!(operation, code, recoverable, error = %err, "Operation failed"),
        LogLevel::Warn => tracing::warn!(operation, code, recoverable, error = %err, "Operation failed"),
        LogLevel::Error => tracing::error!(operation, code, recoverable, error = %err, "Operation failed"),
    }
}
