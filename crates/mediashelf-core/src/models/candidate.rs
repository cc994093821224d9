use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Identity of a candidate within a session. Two clones of the same
/// candidate share an id; two selections of the same path do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateId(Uuid);

impl CandidateId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CandidateId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Where the bytes of a candidate come from when it is finally uploaded
#[derive(Debug, Clone)]
pub enum FileSource {
    /// Read lazily at upload time
    Path(PathBuf),
    Bytes(Bytes),
}

/// A locally selected file that has not been uploaded yet.
///
/// Never mutated after creation; staging adds and removes whole values.
#[derive(Debug, Clone)]
pub struct CandidateFile {
    id: CandidateId,
    name: String,
    size_bytes: u64,
    mime_type: String,
    source: FileSource,
}

impl CandidateFile {
    pub fn new(
        name: impl Into<String>,
        size_bytes: u64,
        mime_type: impl Into<String>,
        source: FileSource,
    ) -> Self {
        Self {
            id: CandidateId::new(),
            name: name.into(),
            size_bytes,
            mime_type: mime_type.into(),
            source,
        }
    }

    /// Candidate backed by in-memory bytes; size is the buffer length.
    pub fn from_bytes(name: impl Into<String>, mime_type: impl Into<String>, data: Bytes) -> Self {
        let size = data.len() as u64;
        Self::new(name, size, mime_type, FileSource::Bytes(data))
    }

    /// Candidate backed by a file on disk. The reported MIME type is derived
    /// from the extension, the way a browser file picker would report it.
    pub fn from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(AppError::InvalidInput(format!(
                "{} is not a regular file",
                path.display()
            )));
        }

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| AppError::InvalidInput(format!("Invalid file name: {}", path.display())))?
            .to_string();

        let mime_type = extension_of(&name)
            .map(|ext| content_type_for_extension(&ext))
            .unwrap_or(DEFAULT_CONTENT_TYPE);

        Ok(Self::new(
            name,
            metadata.len(),
            mime_type,
            FileSource::Path(path.to_path_buf()),
        ))
    }

    pub fn id(&self) -> CandidateId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn source(&self) -> &FileSource {
        &self.source
    }

    /// Lowercased substring after the final `.` of the name, if any
    pub fn extension(&self) -> Option<String> {
        extension_of(&self.name)
    }
}

impl PartialEq for CandidateFile {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CandidateFile {}

pub(crate) fn extension_of(name: &str) -> Option<String> {
    name.rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .filter(|ext| !ext.is_empty())
}

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Content type the backend registers for each media extension
pub fn content_type_for_extension(extension: &str) -> &'static str {
    match extension.to_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mp3" => "audio/mpeg",
        "m4a" => "audio/x-m4a",
        "wav" => "audio/wav",
        _ => DEFAULT_CONTENT_TYPE,
    }
}
