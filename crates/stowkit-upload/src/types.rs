//! Types used by the upload gateway

use chrono::DateTime;
use chrono::Utc;
use stowkit_core::{Config, ContentFingerprint, MediaFolder};

/// Default maximum file size in bytes (20 MiB)
pub const DEFAULT_MAX_FILE_SIZE: usize = 20 * 1024 * 1024;

/// Default maximum number of files per batch
pub const DEFAULT_MAX_FILES: usize = 20;

/// A file payload to upload
///
/// Transient, one per call; the byte length is derived from `data`.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub data: Vec<u8>,
    pub filename: String,
    pub content_type: String,
}

impl UploadFile {
    pub fn new(
        data: Vec<u8>,
        filename: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            data,
            filename: filename.into(),
            content_type: content_type.into(),
        }
    }
}

/// Per-call upload limits and optional caller hints
#[derive(Debug, Clone)]
pub struct UploadOptions {
    /// Maximum accepted payload size in bytes
    pub max_file_size: usize,
    /// Maximum number of files accepted per batch
    pub max_files: usize,
    /// Preferred over the raw filename in the returned receipt
    pub display_name: Option<String>,
    /// Caller-precomputed fingerprint; skips hashing when present
    pub content_hash: Option<ContentFingerprint>,
    /// Opaque caller data echoed back on the receipt
    pub metadata: Option<serde_json::Value>,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            max_files: DEFAULT_MAX_FILES,
            display_name: None,
            content_hash: None,
            metadata: None,
        }
    }
}

impl UploadOptions {
    /// Limits from application configuration; per-call fields stay unset.
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_file_size: config.max_file_size_bytes,
            max_files: config.max_files_per_batch,
            ..Self::default()
        }
    }
}

/// Result of a completed upload, also the unit stored in the cache
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct UploadReceipt {
    /// Public URL of the stored object
    pub url: String,
    pub bucket: String,
    pub region: String,
    /// Display name when provided, sanitized original filename otherwise
    pub filename: String,
    /// Payload size in bytes
    pub size: u64,
    pub content_type: String,
    /// Lowercased extension of the sanitized filename, empty when absent
    pub extension: String,
    pub folder: MediaFolder,
    /// Present whenever a fingerprint was computed or supplied
    pub hash: Option<ContentFingerprint>,
    /// True when this receipt was served from the cache instead of a new put
    pub cached: bool,
    pub cache_key: Option<String>,
    pub uploaded_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}
