//! CacheStore — sequence cache with a networked backend and a local fallback
//!
//! Callers hold an `Arc<dyn CacheStore>` and never branch on which backend
//! is active. Backend failures are logged and absorbed here; nothing in this
//! module returns an error to the acquisition path.

mod memory;
mod remote;

pub use memory::MemoryCache;
pub use remote::RedisCache;

use crate::config::Settings;
use async_trait::async_trait;
use log::{info, warn};
use std::sync::Arc;
use std::time::Duration;

/// Upper bound on establishing the Redis connection at startup
const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

/// Key/value store for sequence text
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Option<String>;

    /// Insert or replace `key`. The memory backend ignores `ttl`.
    async fn set(&self, key: &str, value: &str, ttl: Duration);

    async fn exists(&self, key: &str) -> bool;

    async fn delete(&self, key: &str);

    /// Whether the backing store answers; the memory backend always does
    async fn ping(&self) -> bool {
        true
    }

    fn backend_name(&self) -> &'static str;
}

/// Normalized cache key for a species' sequence
pub fn sequence_key(species: &str) -> String {
    format!("dna_seq:{}", species.to_lowercase().replace(' ', "_"))
}

/// Pick the cache backend for these settings.
///
/// Redis is used only when enabled and reachable; otherwise the process runs
/// on the in-memory map.
pub async fn connect(settings: &Settings) -> Arc<dyn CacheStore> {
    if !settings.redis_enabled {
        info!("Cache: using in-memory store");
        return Arc::new(MemoryCache::new());
    }
    match tokio::time::timeout(CONNECT_TIMEOUT, RedisCache::connect(&settings.redis_url)).await {
        Ok(Ok(cache)) => {
            info!("Cache: connected to Redis at {}", settings.redis_url);
            Arc::new(cache)
        }
        Ok(Err(e)) => {
            warn!("Failed to connect to Redis: {}; falling back to in-memory store", e);
            Arc::new(MemoryCache::new())
        }
        Err(_) => {
            warn!(
                "Redis connection timed out after {:?}; falling back to in-memory store",
                CONNECT_TIMEOUT
            );
            Arc::new(MemoryCache::new())
        }
    }
}
