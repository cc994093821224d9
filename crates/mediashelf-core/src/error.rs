//! Error types module
//!
//! `AppError` unifies everything that can go wrong outside of validation:
//! transport failures, non-success responses, undecodable payloads and local
//! I/O. Validation has its own error type in [`crate::validation`] because
//! it never reaches the network.
//!
//! Transport failures and non-success statuses are distinct variants so logs
//! can tell them apart, but they share the same client-facing message.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like an empty selection
    Debug,
    /// Warning level - for recoverable remote failures
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata describing how an error should be presented to the user
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "TRANSPORT_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether the operation can be retried without changing the input
    fn is_recoverable(&self) -> bool;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("No files selected")]
    NoFilesSelected,

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("API request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// True for failures that came from talking to the remote service,
    /// whether it was unreachable or answered with a non-success status.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            AppError::Transport(_) | AppError::Status { .. } | AppError::Decode(_)
        )
    }
}

impl ErrorMetadata for AppError {
    fn error_code(&self) -> &'static str {
        match self {
            AppError::NoFilesSelected => "NO_FILES_SELECTED",
            AppError::Transport(_) => "TRANSPORT_ERROR",
            AppError::Status { .. } => "REMOTE_STATUS_ERROR",
            AppError::Decode(_) => "DECODE_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::Io(_) => "IO_ERROR",
        }
    }

    fn is_recoverable(&self) -> bool {
        !matches!(self, AppError::InvalidInput(_))
    }

    fn client_message(&self) -> String {
        match self {
            AppError::NoFilesSelected => "No files selected.".to_string(),
            // Unreachable server and rejected request read the same to the user
            AppError::Transport(_) | AppError::Status { .. } | AppError::Decode(_) => {
                "The server could not complete the request.".to_string()
            }
            AppError::NotFound(what) => format!("Not found: {}", what),
            AppError::InvalidInput(msg) => format!("Invalid input: {}", msg),
            AppError::Io(_) => "A local file operation failed.".to_string(),
        }
    }

    fn log_level(&self) -> LogLevel {
        match self {
            AppError::NoFilesSelected | AppError::InvalidInput(_) => LogLevel::Debug,
            AppError::NotFound(_) | AppError::Status { .. } => LogLevel::Warn,
            AppError::Transport(_) | AppError::Decode(_) | AppError::Io(_) => LogLevel::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_and_status_share_client_message() {
        let transport = AppError::Transport("connection refused".to_string());
        let status = AppError::Status {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(transport.client_message(), status.client_message());
        assert_ne!(transport.error_code(), status.error_code());
        assert!(transport.is_remote());
        assert!(status.is_remote());
    }

    #[test]
    fn empty_selection_is_a_debug_level_user_error() {
        let err = AppError::NoFilesSelected;
        assert_eq!(err.log_level(), LogLevel::Debug);
        assert_eq!(err.client_message(), "No files selected.");
        assert!(!err.is_remote());
    }

    #[test]
    fn remote_failures_are_recoverable_but_bad_input_is_not() {
        assert!(AppError::Transport("reset".to_string()).is_recoverable());
        assert!(AppError::Status {
            status: 503,
            body: String::new(),
        }
        .is_recoverable());
        assert!(!AppError::InvalidInput("bad content type".to_string()).is_recoverable());
    }

    #[test]
    fn io_error_converts() {
        let err: AppError = io::Error::new(io::ErrorKind::NotFound, "missing").into();
        assert!(matches!(err, AppError::Io(_)));
        assert_eq!(err.error_code(), "IO_ERROR");
    }
}
