//! Caching implementations
//!
//! Only the file-browsing endpoints read through the cache; the analysis
//! pipeline always fetches fresh data.

pub mod memory_cache;

pub use memory_cache::MemoryContentCache;

use async_trait::async_trait;

/// Key/value store with per-entry expiry.
///
/// Implementations must be safe for concurrent use; last writer wins.
#[async_trait]
pub trait ContentCache: Send + Sync {
    async fn get(&self, key: &str) -> Option<Vec<u8>>;

    async fn set(&self, key: &str, value: Vec<u8>);

    async fn invalidate(&self, key: &str);
}
