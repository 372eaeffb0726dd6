//! In-memory TTL cache implementation using moka

use async_trait::async_trait;
use moka::future::Cache;
use std::time::Duration;

use super::ContentCache;
use crate::config::CacheConfig;

/// In-memory cache with a fixed time-to-live.
///
/// Entries expire `ttl` after insertion regardless of reads. When
/// `max_entries` is reached moka evicts by TinyLFU admission.
#[derive(Clone)]
pub struct MemoryContentCache {
    cache: Cache<String, Vec<u8>>,
}

impl MemoryContentCache {
    pub fn new(max_entries: u64, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(ttl)
            .build();
        Self { cache }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.max_entries, Duration::from_secs(config.ttl_seconds))
    }
}

#[async_trait]
impl ContentCache for MemoryContentCache {
    async fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.cache.get(key).await
    }

    async fn set(&self, key: &str, value: Vec<u8>) {
        self.cache.insert(key.to_string(), value).await;
    }

    async fn invalidate(&self, key: &str) {
        self.cache.invalidate(key).await;
    }
}
