//! Upload error types
//!
//! Every variant carries the context a caller needs to distinguish failures
//! (limits, offending filename and size) and implements `ErrorMetadata` so
//! hosting services can map kinds to response codes without matching on the
//! enum themselves.

use stowkit_core::{ErrorMetadata, LogLevel};
use stowkit_storage::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("No files provided")]
    NoFiles,

    #[error("Too many files: {provided} provided, maximum is {max}")]
    TooManyFiles { provided: usize, max: usize },

    #[error("File '{filename}' is too large: {size} bytes exceeds maximum of {max} bytes")]
    FileTooLarge {
        filename: String,
        size: usize,
        max: usize,
    },

    #[error("File '{filename}' is empty")]
    EmptyFile { filename: String },

    #[error("Failed to upload '{filename}' to storage")]
    StorageFailed {
        filename: String,
        #[source]
        source: StorageError,
    },
}

/// Static metadata for each variant: (http_status, error_code, recoverable, suggested_action, sensitive, log_level).
/// Reduces duplication in ErrorMetadata impl; client_message stays per-variant for dynamic content.
fn upload_error_static_metadata(
    err: &UploadError,
) -> (
    u16,
    &'static str,
    bool,
    Option<&'static str>,
    bool,
    LogLevel,
) {
    match err {
        UploadError::NoFiles => (
            400,
            "NO_FILES_PROVIDED",
            false,
            Some("Provide at least one file"),
            false,
            LogLevel::Debug,
        ),
        UploadError::TooManyFiles { .. } => (
            400,
            "TOO_MANY_FILES",
            false,
            Some("Reduce the number of files per batch"),
            false,
            LogLevel::Debug,
        ),
        UploadError::FileTooLarge { .. } => (
            413,
            "PAYLOAD_TOO_LARGE",
            false,
            Some("Reduce file size"),
            false,
            LogLevel::Debug,
        ),
        UploadError::EmptyFile { .. } => (
            400,
            "EMPTY_FILE",
            false,
            Some("Provide a non-empty file"),
            false,
            LogLevel::Debug,
        ),
        UploadError::StorageFailed { .. } => (
            500,
            "STORAGE_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
    }
}

impl ErrorMetadata for UploadError {
    fn http_status_code(&self) -> u16 {
        upload_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        upload_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        upload_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        upload_error_static_metadata(self).3
    }

    fn is_sensitive(&self) -> bool {
        upload_error_static_metadata(self).4
    }

    fn log_level(&self) -> LogLevel {
        upload_error_static_metadata(self).5
    }

    fn client_message(&self) -> String {
        match self {
            UploadError::NoFiles
            | UploadError::TooManyFiles { .. }
            | UploadError::FileTooLarge { .. }
            | UploadError::EmptyFile { .. } => self.to_string(),
            // Backend details stay out of client responses
            UploadError::StorageFailed { filename, .. } => {
                format!("Failed to upload '{}'", filename)
            }
        }
    }
}
