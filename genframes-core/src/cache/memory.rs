//! In-process cache map, also the fallback behind Redis

use super::CacheStore;
use async_trait::async_trait;
use dashmap::DashMap;
use std::time::Duration;

/// Concurrent in-memory store. Entries never expire.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: DashMap<String, String>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn get_local(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|v| v.value().clone())
    }

    pub(crate) fn set_local(&self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    pub(crate) fn exists_local(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub(crate) fn delete_local(&self, key: &str) {
        self.entries.remove(key);
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> Option<String> {
        self.get_local(key)
    }

    async fn set(&self, key: &str, value: &str, _ttl: Duration) {
        self.set_local(key, value);
    }

    async fn exists(&self, key: &str) -> bool {
        self.exists_local(key)
    }

    async fn delete(&self, key: &str) {
        self.delete_local(key);
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    const TTL: Duration = Duration::from_secs(3600);

    #[tokio::test]
    async fn test_round_trip() {
        let cache = MemoryCache::new();
        assert!(cache.get("k").await.is_none());
        cache.set("k", "GATTACA", TTL).await;
        assert_eq!(cache.get("k").await.as_deref(), Some("GATTACA"));
        assert!(cache.exists("k").await);
    }

    #[tokio::test]
    async fn test_set_replaces_and_delete_removes() {
        let cache = MemoryCache::new();
        cache.set("k", "AAAA", TTL).await;
        cache.set("k", "CCCC", TTL).await;
        assert_eq!(cache.get("k").await.as_deref(), Some("CCCC"));
        assert_eq!(cache.len(), 1);

        cache.delete("k").await;
        assert!(!cache.exists("k").await);
        assert!(cache.is_empty());
        // deleting a missing key is a no-op
        cache.delete("k").await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_writers() {
        let cache = Arc::new(MemoryCache::new());
        let tasks: Vec<_> = (0..64)
            .map(|i| {
                let cache = cache.clone();
                tokio::spawn(async move {
                    let key = format!("dna_seq:species_{}", i % 8);
                    cache.set(&key, "ACGT", TTL).await;
                    cache.get(&key).await
                })
            })
            .collect();
        for result in futures::future::join_all(tasks).await {
            assert_eq!(result.unwrap().as_deref(), Some("ACGT"));
        }
        assert_eq!(cache.len(), 8);
    }
}
