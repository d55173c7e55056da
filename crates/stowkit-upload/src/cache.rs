//! Upload result cache
//!
//! TTL cache for upload receipts keyed by content fingerprint (namespaced
//! by bucket and region). Entries expire lazily on read; a background
//! sweeper reclaims memory for entries nobody asks for again.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::interval;

use crate::types::UploadReceipt;

/// Time source for cache expiry. Swapped for a manual clock in tests so
/// TTL behavior is observable without real-time waits.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Production clock backed by `Instant::now`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Cache for upload receipts
#[async_trait]
pub trait UploadCache: Send + Sync {
    /// Look up a receipt; expired entries are absent.
    async fn get(&self, key: &str) -> Option<UploadReceipt>;

    /// Store a receipt; the entry expires `ttl` after insertion.
    async fn set(&self, key: String, receipt: UploadReceipt, ttl: Duration);
}

struct CacheEntry {
    receipt: UploadReceipt,
    expires_at: Instant,
}

/// In-process TTL cache
pub struct MemoryCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    clock: Arc<dyn Clock>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
        }
    }

    /// Number of entries, including expired ones not yet purged.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Drop expired entries, returning how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        before - entries.len()
    }

    /// Start the background sweeper that purges expired entries.
    /// Returns a JoinHandle for graceful shutdown.
    pub fn start_sweeper(self: Arc<Self>, every: Duration) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut sweep_interval = interval(every);

            loop {
                sweep_interval.tick().await;

                let purged = self.purge_expired().await;
                if purged > 0 {
                    tracing::debug!(purged, "Purged expired upload cache entries");
                }
            }
        })
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UploadCache for MemoryCache {
    async fn get(&self, key: &str) -> Option<UploadReceipt> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;

        if entry.expires_at <= self.clock.now() {
            return None;
        }

        Some(entry.receipt.clone())
    }

    async fn set(&self, key: String, receipt: UploadReceipt, ttl: Duration) {
        let expires_at = self.clock.now() + ttl;
        let mut entries = self.entries.write().await;
        entries.insert(key, CacheEntry { receipt, expires_at });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::Mutex;
    use stowkit_core::MediaFolder;

    struct ManualClock {
        now: Mutex<Instant>,
    }

    impl ManualClock {
        fn new() -> Self {
            Self {
                now: Mutex::new(Instant::now()),
            }
        }

        fn advance(&self, by: Duration) {
            *self.now.lock().unwrap() += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            *self.now.lock().unwrap()
        }
    }

    fn receipt(url: &str) -> UploadReceipt {
        UploadReceipt {
            url: url.to_string(),
            bucket: "test-bucket".to_string(),
            region: "us-east-1".to_string(),
            filename: "photo.png".to_string(),
            size: 4,
            content_type: "image/png".to_string(),
            extension: "png".to_string(),
            folder: MediaFolder::Images,
            hash: None,
            cached: false,
            cache_key: None,
            uploaded_at: Utc::now(),
            metadata: None,
        }
    }

    #[tokio::test]
    async fn get_returns_stored_receipt_before_ttl() {
        let clock = Arc::new(ManualClock::new());
        let cache = MemoryCache::with_clock(clock.clone());

        cache
            .set("k1".to_string(), receipt("https://a"), Duration::from_secs(60))
            .await;

        clock.advance(Duration::from_secs(59));
        let hit = cache.get("k1").await.expect("entry should still be live");
        assert_eq!(hit.url, "https://a");
    }

    #[tokio::test]
    async fn get_hides_expired_entries() {
        let clock = Arc::new(ManualClock::new());
        let cache = MemoryCache::with_clock(clock.clone());

        cache
            .set("k1".to_string(), receipt("https://a"), Duration::from_secs(60))
            .await;

        clock.advance(Duration::from_secs(60));
        assert!(cache.get("k1").await.is_none());
    }

    #[tokio::test]
    async fn get_misses_unknown_keys() {
        let cache = MemoryCache::new();
        assert!(cache.is_empty().await);
        assert!(cache.get("missing").await.is_none());
    }

    #[tokio::test]
    async fn purge_expired_drops_only_dead_entries() {
        let clock = Arc::new(ManualClock::new());
        let cache = MemoryCache::with_clock(clock.clone());

        cache
            .set("short".to_string(), receipt("https://a"), Duration::from_secs(10))
            .await;
        cache
            .set("long".to_string(), receipt("https://b"), Duration::from_secs(120))
            .await;
        assert_eq!(cache.len().await, 2);

        clock.advance(Duration::from_secs(30));
        let purged = cache.purge_expired().await;

        assert_eq!(purged, 1);
        assert_eq!(cache.len().await, 1);
        assert!(cache.get("long").await.is_some());
    }

    #[tokio::test]
    async fn set_overwrites_existing_entry() {
        let cache = MemoryCache::new();

        cache
            .set("k1".to_string(), receipt("https://a"), Duration::from_secs(60))
            .await;
        cache
            .set("k1".to_string(), receipt("https://b"), Duration::from_secs(60))
            .await;

        assert_eq!(cache.len().await, 1);
        assert_eq!(cache.get("k1").await.unwrap().url, "https://b");
    }
}
