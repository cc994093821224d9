//! Client-side upload validation
//!
//! A selection is accepted all-or-nothing. The batch-size check runs first
//! and short-circuits everything else; otherwise every file is checked
//! (extension, then size, then MIME type, stopping at the first failure for
//! that file) and the batch is accepted only if no file failed.
//!
//! Upload validation deliberately accepts a narrower set of extensions than
//! the renderer can display (`jpg`, `webm`, `wav` render but do not upload).

use serde::Serialize;

use crate::models::CandidateFile;

const MAX_FILES_PER_BATCH: usize = 10;
const MIN_FILE_SIZE_BYTES: u64 = 100_000;
const MAX_FILE_SIZE_BYTES: u64 = 10_000_000;

/// Limits applied to a selection before anything is staged
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub max_files: usize,
    /// Lowercase extensions without the dot
    pub allowed_extensions: Vec<String>,
    /// Inclusive lower bound
    pub min_size_bytes: u64,
    /// Inclusive upper bound
    pub max_size_bytes: u64,
    /// Exact types allowed when the reported type starts with `audio/`
    pub audio_mime_types: Vec<String>,
    /// Exact types allowed when the reported type starts with `video/`
    pub video_mime_types: Vec<String>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_files: MAX_FILES_PER_BATCH,
            allowed_extensions: to_strings(&["mp4", "mp3", "jpeg", "png", "gif"]),
            min_size_bytes: MIN_FILE_SIZE_BYTES,
            max_size_bytes: MAX_FILE_SIZE_BYTES,
            audio_mime_types: to_strings(&["audio/mpeg"]),
            video_mime_types: to_strings(&["video/mp4", "video/webm"]),
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Why a candidate was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RejectionReason {
    TooManyFiles,
    InvalidExtension,
    SizeOutOfRange,
    InvalidMimeType,
}

/// Validation failures, one per offending file (or one per batch for the count check)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Up to {max} files can be uploaded at a time ({count} selected)")]
    TooManyFiles { count: usize, max: usize },

    #[error("Invalid file type: {file_name}")]
    InvalidExtension {
        file_name: String,
        extension: Option<String>,
    },

    #[error("File must be between {min} and {max} bytes ({size} bytes): {file_name}")]
    SizeOutOfRange {
        file_name: String,
        size: u64,
        min: u64,
        max: u64,
    },

    #[error("Invalid MIME type: {file_name} ({mime_type})")]
    InvalidMimeType { file_name: String, mime_type: String },
}

impl ValidationError {
    pub fn reason(&self) -> RejectionReason {
        match self {
            ValidationError::TooManyFiles { .. } => RejectionReason::TooManyFiles,
            ValidationError::InvalidExtension { .. } => RejectionReason::InvalidExtension,
            ValidationError::SizeOutOfRange { .. } => RejectionReason::SizeOutOfRange,
            ValidationError::InvalidMimeType { .. } => RejectionReason::InvalidMimeType,
        }
    }

    /// The offending file, when the failure is about a single file
    pub fn file_name(&self) -> Option<&str> {
        match self {
            ValidationError::TooManyFiles { .. } => None,
            ValidationError::InvalidExtension { file_name, .. }
            | ValidationError::SizeOutOfRange { file_name, .. }
            | ValidationError::InvalidMimeType { file_name, .. } => Some(file_name),
        }
    }
}

/// Per-candidate result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationVerdict {
    pub file_name: String,
    pub accepted: bool,
    pub reason: Option<RejectionReason>,
}

/// A rejected selection. Nothing from it is staged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Selection rejected: {} problem(s) found", errors.len())]
pub struct BatchRejection {
    /// One entry per failing file, or a single `TooManyFiles`
    pub errors: Vec<ValidationError>,
}

/// Upload validator
///
/// Stateless apart from its policy; safe to share.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    policy: UploadPolicy,
}

impl Validator {
    pub fn new(policy: UploadPolicy) -> Self {
        Self { policy }
    }

    /// Validate batch size
    pub fn validate_count(&self, count: usize) -> Result<(), ValidationError> {
        if count > self.policy.max_files {
            return Err(ValidationError::TooManyFiles {
                count,
                max: self.policy.max_files,
            });
        }
        Ok(())
    }

    /// Validate file extension
    pub fn validate_extension(&self, file: &CandidateFile) -> Result<(), ValidationError> {
        let extension = file.extension();
        let allowed = extension
            .as_ref()
            .is_some_and(|ext| self.policy.allowed_extensions.contains(ext));

        if !allowed {
            return Err(ValidationError::InvalidExtension {
                file_name: file.name().to_string(),
                extension,
            });
        }
        Ok(())
    }

    /// Validate file size against the inclusive range
    pub fn validate_size(&self, file: &CandidateFile) -> Result<(), ValidationError> {
        let size = file.size_bytes();
        if size < self.policy.min_size_bytes || size > self.policy.max_size_bytes {
            return Err(ValidationError::SizeOutOfRange {
                file_name: file.name().to_string(),
                size,
                min: self.policy.min_size_bytes,
                max: self.policy.max_size_bytes,
            });
        }
        Ok(())
    }

    /// Validate the reported MIME type. Only audio and video types are
    /// constrained; anything else passes.
    pub fn validate_mime_type(&self, file: &CandidateFile) -> Result<(), ValidationError> {
        let mime_type = file.mime_type().to_lowercase();

        let allowed = if mime_type.starts_with("audio/") {
            self.policy.audio_mime_types.contains(&mime_type)
        } else if mime_type.starts_with("video/") {
            self.policy.video_mime_types.contains(&mime_type)
        } else {
            true
        };

        if !allowed {
            return Err(ValidationError::InvalidMimeType {
                file_name: file.name().to_string(),
                mime_type: file.mime_type().to_string(),
            });
        }
        Ok(())
    }

    /// Run the per-file checks in order, stopping at the first failure
    pub fn validate_file(&self, file: &CandidateFile) -> Result<(), ValidationError> {
        self.validate_extension(file)?;
        self.validate_size(file)?;
        self.validate_mime_type(file)?;
        Ok(())
    }

    /// Per-candidate verdicts, in input order.
    ///
    /// When the batch is too large every candidate is reported as
    /// `TooManyFiles` and no per-file checks run.
    pub fn verdicts(&self, files: &[CandidateFile]) -> Vec<ValidationVerdict> {
        if self.validate_count(files.len()).is_err() {
            return files
                .iter()
                .map(|f| ValidationVerdict {
                    file_name: f.name().to_string(),
                    accepted: false,
                    reason: Some(RejectionReason::TooManyFiles),
                })
                .collect();
        }

        files
            .iter()
            .map(|f| {
                let reason = self.validate_file(f).err().map(|e| e.reason());
                ValidationVerdict {
                    file_name: f.name().to_string(),
                    accepted: reason.is_none(),
                    reason,
                }
            })
            .collect()
    }

    /// Accept the whole selection or reject it. On success the files are
    /// returned unchanged and in order.
    pub fn validate_batch(
        &self,
        files: Vec<CandidateFile>,
    ) -> Result<Vec<CandidateFile>, BatchRejection> {
        if let Err(e) = self.validate_count(files.len()) {
            tracing::debug!(count = files.len(), max = self.policy.max_files, "Selection too large");
            return Err(BatchRejection { errors: vec![e] });
        }

        let errors: Vec<ValidationError> = files
            .iter()
            .filter_map(|f| self.validate_file(f).err())
            .collect();

        if !errors.is_empty() {
            for error in &errors {
                tracing::debug!(
                    file_name = error.file_name().unwrap_or_default(),
                    reason = ?error.reason(),
                    "Candidate rejected"
                );
            }
            return Err(BatchRejection { errors });
        }

        Ok(files)
    }
}
