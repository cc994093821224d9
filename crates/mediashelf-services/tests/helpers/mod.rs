//! In-memory fakes for orchestrator tests
//!
//! No HTTP server or filesystem is needed: the remote service, the
//! notifier and the download capability are all recorded in memory.

#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use mediashelf_core::{
    AppError, AppResult, CandidateFile, ClientConfig, DownloadCapability, FileId, FileSource,
    Notifier, RemoteFileService, StoredFile,
};
use mediashelf_services::UploadOrchestrator;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Fake file service backed by a vector
#[derive(Default)]
pub struct MockRemote {
    files: Mutex<Vec<StoredFile>>,
    next_id: AtomicUsize,
    pub fail_list: AtomicBool,
    pub fail_create: AtomicBool,
    pub fail_delete: AtomicBool,
    pub list_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
    /// File names of each uploaded batch, in call order
    pub batches: Mutex<Vec<Vec<String>>>,
}

impl MockRemote {
    pub fn new() -> Self {
        Self {
            next_id: AtomicUsize::new(1),
            ..Self::default()
        }
    }

    pub fn with_files(files: Vec<StoredFile>) -> Self {
        let remote = Self::new();
        remote.next_id.store(files.len() + 1, Ordering::SeqCst);
        *remote.files.lock().unwrap() = files;
        remote
    }

    pub fn stored_count(&self) -> usize {
        self.files.lock().unwrap().len()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteFileService for MockRemote {
    async fn list(&self) -> AppResult<Vec<StoredFile>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(AppError::Transport("connection refused".to_string()));
        }
        Ok(self.files.lock().unwrap().clone())
    }

    async fn create(&self, files: &[CandidateFile]) -> AppResult<()> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(AppError::Status {
                status: 400,
                body: "Invalid file type or MIME type".to_string(),
            });
        }

        let mut stored = self.files.lock().unwrap();
        for file in files {
            let id = self.next_id.fetch_add(1, Ordering::SeqCst);
            stored.push(stored_file(
                &id.to_string(),
                file.name(),
                file.extension().as_deref(),
            ));
        }
        self.batches
            .lock()
            .unwrap()
            .push(files.iter().map(|f| f.name().to_string()).collect());
        Ok(())
    }

    async fn delete(&self, id: &FileId) -> AppResult<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(AppError::Transport("connection reset".to_string()));
        }

        let mut stored = self.files.lock().unwrap();
        let before = stored.len();
        stored.retain(|f| &f.id != id);
        if stored.len() == before {
            return Err(AppError::Status {
                status: 404,
                body: r#"{"error": "File not found"}"#.to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Error(String),
}

/// Notifier that remembers everything it was told
#[derive(Default)]
pub struct RecordingNotifier {
    pub events: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn events(&self) -> Vec<Notification> {
        self.events.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|n| match n {
                Notification::Error(m) => Some(m),
                Notification::Success(_) => None,
            })
            .collect()
    }

    pub fn successes(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|n| match n {
                Notification::Success(m) => Some(m),
                Notification::Error(_) => None,
            })
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify_success(&self, message: &str) {
        self.events
            .lock()
            .unwrap()
            .push(Notification::Success(message.to_string()));
    }

    fn notify_error(&self, message: &str) {
        self.events
            .lock()
            .unwrap()
            .push(Notification::Error(message.to_string()));
    }
}

/// Download capability that serves fixed bytes and records saves
#[derive(Default)]
pub struct MockDownloads {
    pub fail_fetch: AtomicBool,
    pub fetched_urls: Mutex<Vec<String>>,
    pub saved: Mutex<Vec<(String, Bytes)>>,
}

#[async_trait]
impl DownloadCapability for MockDownloads {
    async fn fetch_bytes(&self, url: &str) -> AppResult<Bytes> {
        self.fetched_urls.lock().unwrap().push(url.to_string());
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(AppError::Transport("timed out".to_string()));
        }
        Ok(Bytes::from_static(b"media-bytes"))
    }

    async fn save_as(&self, data: Bytes, file_name: &str) -> AppResult<PathBuf> {
        self.saved
            .lock()
            .unwrap()
            .push((file_name.to_string(), data));
        Ok(PathBuf::from("/downloads").join(file_name))
    }
}

/// Everything a test needs to poke at
pub struct Harness {
    pub orchestrator: Arc<UploadOrchestrator>,
    pub remote: Arc<MockRemote>,
    pub notifier: Arc<RecordingNotifier>,
    pub downloads: Arc<MockDownloads>,
}

pub fn harness_with(remote: MockRemote) -> Harness {
    let remote = Arc::new(remote);
    let notifier = Arc::new(RecordingNotifier::default());
    let downloads = Arc::new(MockDownloads::default());
    let config = ClientConfig::new("http://localhost:8000").with_media_base_url("http://127.0.0.1:8000");

    let orchestrator = Arc::new(UploadOrchestrator::new(
        config,
        remote.clone(),
        downloads.clone(),
        notifier.clone(),
    ));

    Harness {
        orchestrator,
        remote,
        notifier,
        downloads,
    }
}

pub fn harness() -> Harness {
    harness_with(MockRemote::new())
}

pub fn candidate(name: &str, size: u64, mime: &str) -> CandidateFile {
    CandidateFile::new(name, size, mime, FileSource::Bytes(Bytes::new()))
}

pub fn stored_file(id: &str, name: &str, file_type: Option<&str>) -> StoredFile {
    StoredFile {
        id: FileId::new(id),
        url: format!("/media/uploads/{}", name),
        file_name: name.to_string(),
        file_type: file_type.map(str::to_string),
        file_size_bytes: 200_000,
        category: "image".to_string(),
        uploaded_at: Utc::now(),
    }
}
