//! Deduplicating upload gateway
//!
//! The gateway validates payloads, classifies them into media folders by
//! declared MIME type, and forwards them to object storage. When caching
//! is enabled it fingerprints the payload bytes (SHA-256) first and serves
//! repeated uploads of identical content from the cache instead of putting
//! them again: validate → fingerprint → cache lookup → (hit: cached
//! receipt) | (miss: storage put → receipt → cache write) → return.
//!
//! Calls are independent; the gateway holds no per-call lock. Two
//! concurrent uploads of the same bytes racing a cold cache may both put —
//! unless `GatewaySettings::single_flight` coalesces them (off by default).

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use stowkit_core::{Config, ContentFingerprint, MediaFolder};
use stowkit_storage::{create_storage, ObjectStorage, StorageError, StorageResult};
use uuid::Uuid;

use crate::cache::{MemoryCache, UploadCache};
use crate::error::UploadError;
use crate::filename::{file_extension, sanitize_filename};
use crate::single_flight::{Flight, InflightTable};
use crate::types::{UploadFile, UploadOptions, UploadReceipt};

/// Gateway tuning knobs
#[derive(Debug, Clone)]
pub struct GatewaySettings {
    /// How long cached receipts stay valid
    pub cache_ttl: Duration,
    /// Coalesce concurrent same-fingerprint uploads behind one put
    pub single_flight: bool,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(86_400),
            single_flight: false,
        }
    }
}

/// Deduplicating upload gateway over object storage
pub struct UploadGateway {
    storage: Arc<dyn ObjectStorage>,
    cache: Option<Arc<dyn UploadCache>>,
    settings: GatewaySettings,
    inflight: InflightTable,
}

impl UploadGateway {
    /// Create a gateway from explicit parts. `cache = None` disables
    /// deduplication entirely; every call puts to storage.
    pub fn new(
        storage: Arc<dyn ObjectStorage>,
        cache: Option<Arc<dyn UploadCache>>,
        settings: GatewaySettings,
    ) -> Self {
        Self {
            storage,
            cache,
            settings,
            inflight: InflightTable::new(),
        }
    }

    /// Build a gateway from configuration: the storage backend via the
    /// factory, and an in-process cache with its sweeper when caching is
    /// enabled.
    pub async fn from_config(config: &Config) -> StorageResult<Self> {
        let storage = create_storage(config).await?;

        let cache: Option<Arc<dyn UploadCache>> = if config.upload_cache_enabled {
            let cache = Arc::new(MemoryCache::new());
            // Sweeper runs for the life of the process; dropping the
            // handle detaches the task.
            cache.clone().start_sweeper(Duration::from_secs(
                config.upload_cache_check_interval_secs,
            ));
            Some(cache)
        } else {
            None
        };

        let settings = GatewaySettings {
            cache_ttl: Duration::from_secs(config.upload_cache_ttl_secs),
            single_flight: config.upload_single_flight,
        };

        Ok(Self::new(storage, cache, settings))
    }

    /// Upload a single file, deduplicating against the cache when enabled.
    ///
    /// Identical payload bytes (or an identical caller-supplied hash)
    /// within the cache TTL yield the stored receipt with `cached = true`
    /// and no storage put.
    pub async fn upload_one(
        &self,
        file: UploadFile,
        options: &UploadOptions,
    ) -> Result<UploadReceipt, UploadError> {
        if file.data.is_empty() {
            return Err(UploadError::EmptyFile {
                filename: file.filename,
            });
        }

        if file.data.len() > options.max_file_size {
            return Err(UploadError::FileTooLarge {
                filename: file.filename,
                size: file.data.len(),
                max: options.max_file_size,
            });
        }

        let folder = MediaFolder::from_content_type(&file.content_type);

        let Some(cache) = self.cache.as_ref() else {
            // Caching disabled: no lookup, no cache key, straight to storage
            return self
                .perform_upload(file, options, folder, options.content_hash.clone(), None)
                .await;
        };

        let fingerprint = match options.content_hash.clone() {
            Some(hash) => hash,
            None => ContentFingerprint::digest(&file.data),
        };
        let cache_key = self.cache_key(&fingerprint);

        if let Some(receipt) = cache.get(&cache_key).await {
            tracing::debug!(
                cache_key = %cache_key,
                filename = %file.filename,
                "Upload cache hit, skipping storage put"
            );
            return Ok(Self::cached_receipt(receipt, &cache_key, &fingerprint));
        }

        if self.settings.single_flight {
            return self
                .upload_coalesced(file, options, folder, fingerprint, cache_key)
                .await;
        }

        self.upload_and_cache(file, options, folder, fingerprint, cache_key)
            .await
    }

    /// Upload a batch of files sequentially, receipt order matching input
    /// order.
    ///
    /// Fail-fast without rollback: the first failing item aborts the batch,
    /// and items uploaded before it stay committed to storage. Cleaning
    /// those up is the caller's responsibility.
    pub async fn upload_many(
        &self,
        files: Vec<UploadFile>,
        options: &UploadOptions,
    ) -> Result<Vec<UploadReceipt>, UploadError> {
        if files.is_empty() {
            return Err(UploadError::NoFiles);
        }

        if files.len() > options.max_files {
            return Err(UploadError::TooManyFiles {
                provided: files.len(),
                max: options.max_files,
            });
        }

        let mut receipts = Vec::with_capacity(files.len());
        for file in files {
            receipts.push(self.upload_one(file, options).await?);
        }

        Ok(receipts)
    }

    /// Cache key for a fingerprint, namespaced by the storage location so
    /// the same bytes bound for different buckets or regions never collide.
    fn cache_key(&self, fingerprint: &ContentFingerprint) -> String {
        let location = self.storage.location();
        format!("{}:{}:{}", location.bucket, location.region, fingerprint)
    }

    /// Rewrite a stored receipt for a cache hit. Only the dedup bookkeeping
    /// changes; url, timestamps and payload metadata stay as first uploaded.
    fn cached_receipt(
        mut receipt: UploadReceipt,
        cache_key: &str,
        fingerprint: &ContentFingerprint,
    ) -> UploadReceipt {
        receipt.cached = true;
        receipt.cache_key = Some(cache_key.to_string());
        receipt.hash = Some(fingerprint.clone());
        receipt
    }

    /// Miss path with caching enabled: put, then store the receipt.
    async fn upload_and_cache(
        &self,
        file: UploadFile,
        options: &UploadOptions,
        folder: MediaFolder,
        fingerprint: ContentFingerprint,
        cache_key: String,
    ) -> Result<UploadReceipt, UploadError> {
        let receipt = self
            .perform_upload(
                file,
                options,
                folder,
                Some(fingerprint),
                Some(cache_key.clone()),
            )
            .await?;

        if let Some(cache) = self.cache.as_ref() {
            cache
                .set(cache_key, receipt.clone(), self.settings.cache_ttl)
                .await;
        }

        Ok(receipt)
    }

    /// Miss path with single-flight enabled: the first caller for a cache
    /// key uploads, concurrent callers wait for its result and receive the
    /// leader's receipt marked `cached = true`.
    async fn upload_coalesced(
        &self,
        file: UploadFile,
        options: &UploadOptions,
        folder: MediaFolder,
        fingerprint: ContentFingerprint,
        cache_key: String,
    ) -> Result<UploadReceipt, UploadError> {
        match self.inflight.join(&cache_key).await {
            Flight::Leader(tx) => {
                let result = self
                    .upload_and_cache(file, options, folder, fingerprint, cache_key.clone())
                    .await;

                let fanout = match &result {
                    Ok(receipt) => Ok(receipt.clone()),
                    Err(e) => Err(e.to_string()),
                };
                self.inflight.complete(&cache_key, tx, fanout).await;

                result
            }
            Flight::Waiter(mut rx) => {
                let published = match rx.wait_for(|result| result.is_some()).await {
                    Ok(value) => (*value).clone(),
                    // Leader dropped without publishing
                    Err(_) => None,
                };

                match published {
                    Some(Ok(receipt)) => {
                        tracing::debug!(
                            cache_key = %cache_key,
                            filename = %file.filename,
                            "Upload coalesced onto in-flight put"
                        );
                        Ok(Self::cached_receipt(receipt, &cache_key, &fingerprint))
                    }
                    Some(Err(message)) => Err(UploadError::StorageFailed {
                        filename: file.filename,
                        source: StorageError::UploadFailed(message),
                    }),
                    None => Err(UploadError::StorageFailed {
                        filename: file.filename,
                        source: StorageError::UploadFailed(
                            "coalesced upload aborted before completing".to_string(),
                        ),
                    }),
                }
            }
        }
    }

    /// Storage put and receipt assembly. The caller has already validated
    /// the payload and decided the caching story.
    async fn perform_upload(
        &self,
        file: UploadFile,
        options: &UploadOptions,
        folder: MediaFolder,
        hash: Option<ContentFingerprint>,
        cache_key: Option<String>,
    ) -> Result<UploadReceipt, UploadError> {
        let UploadFile {
            data,
            filename,
            content_type,
        } = file;

        let size = data.len() as u64;
        let safe_filename = sanitize_filename(&filename);
        let extension = file_extension(&safe_filename);

        let object_id = Uuid::new_v4();
        let key = if extension.is_empty() {
            format!("{}/{}", folder, object_id)
        } else {
            format!("{}/{}.{}", folder, object_id, extension)
        };

        tracing::info!(
            key = %key,
            filename = %safe_filename,
            content_type = %content_type,
            size_bytes = size,
            "Uploading file to storage"
        );

        let stored = self
            .storage
            .put(&key, data, &content_type)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, key = %key, "Failed to upload file to storage");
                UploadError::StorageFailed {
                    filename: filename.clone(),
                    source: e,
                }
            })?;

        Ok(UploadReceipt {
            url: stored.url,
            bucket: stored.bucket,
            region: stored.region,
            filename: options.display_name.clone().unwrap_or(safe_filename),
            size,
            content_type,
            extension,
            folder,
            hash,
            cached: false,
            cache_key,
            uploaded_at: Utc::now(),
            metadata: options.metadata.clone(),
        })
    }
}
