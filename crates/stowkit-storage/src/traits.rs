//! Storage abstraction trait
//!
//! This module defines the ObjectStorage trait that all storage backends must
//! implement, and the record types they return.

use std::time::Duration;

use async_trait::async_trait;
use stowkit_core::StorageBackend;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Identity of the storage target a backend writes into.
///
/// For S3 this is the bucket and region; the local backend reports its base
/// directory as the bucket and `local` as the region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLocation {
    pub bucket: String,
    pub region: String,
}

/// Record returned by a successful put: where the object landed.
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub key: String,
    pub url: String,
    pub bucket: String,
    pub region: String,
}

/// Storage abstraction trait
///
/// All storage backends (S3, local filesystem) must implement this trait.
/// This allows the upload gateway to work with any storage backend without
/// coupling to specific implementation details.
///
/// **Key format:** Keys are caller-derived, slash-separated paths such as
/// `images/{uuid}.png`. Keys must not contain `..` or a leading `/`.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store an object under the given key and return where it landed.
    ///
    /// The returned URL is the publicly accessible location of the object.
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str)
        -> StorageResult<StoredObject>;

    /// Download an object by its storage key
    async fn download(&self, key: &str) -> StorageResult<Vec<u8>>;

    /// Delete an object by its storage key
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Check if an object exists
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Generate a presigned/temporary URL for direct access (GET)
    ///
    /// This is useful for giving clients temporary access to objects
    /// without going through the application server
    async fn presigned_url(&self, key: &str, expires_in: Duration) -> StorageResult<String>;

    /// The bucket/region identity this backend writes into
    fn location(&self) -> &StorageLocation;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
