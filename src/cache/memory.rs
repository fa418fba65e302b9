use async_trait::async_trait;
use dashmap::DashMap;
use moka::future::Cache;
use std::time::Duration;
use tracing::debug;

use crate::cache::LookupCache;

/// In-process cache backend for development and tests.
///
/// URL entries live in a moka cache with the standard TTL; click counters
/// live in a DashMap and, like their redis counterparts, never expire.
pub struct MemoryLookupCache {
    urls: Cache<String, String>,
    clicks: DashMap<String, i64>,
}

impl MemoryLookupCache {
    pub fn new(ttl_secs: u64) -> Self {
        let urls = Cache::builder()
            .max_capacity(10_000)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        debug!("MemoryLookupCache ready, TTL: {}s", ttl_secs);

        Self {
            urls,
            clicks: DashMap::new(),
        }
    }

    /// Drop a URL entry immediately, simulating TTL expiry. Test hook.
    pub async fn evict_url(&self, code: &str) {
        self.urls.invalidate(code).await;
    }
}

#[async_trait]
impl LookupCache for MemoryLookupCache {
    async fn get_url(&self, code: &str) -> Option<String> {
        self.urls.get(code).await
    }

    async fn set_url(&self, code: &str, url: &str) {
        self.urls.insert(code.to_string(), url.to_string()).await;
    }

    async fn remove_url(&self, code: &str) {
        self.urls.invalidate(code).await;
    }

    async fn incr_clicks(&self, code: &str) {
        *self.clicks.entry(code.to_string()).or_insert(0) += 1;
    }

    async fn get_clicks(&self, code: &str) -> Option<i64> {
        self.clicks.get(code).map(|entry| *entry)
    }

    async fn remove_clicks(&self, code: &str) {
        self.clicks.remove(code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn url_entries_round_trip() {
        let cache = MemoryLookupCache::new(3600);
        cache.set_url("abc123", "https://example.com").await;
        assert_eq!(
            cache.get_url("abc123").await.as_deref(),
            Some("https://example.com")
        );

        cache.remove_url("abc123").await;
        assert_eq!(cache.get_url("abc123").await, None);
    }

    #[tokio::test]
    async fn counters_start_absent_and_accumulate() {
        let cache = MemoryLookupCache::new(3600);
        assert_eq!(cache.get_clicks("abc123").await, None);

        for _ in 0..3 {
            cache.incr_clicks("abc123").await;
        }
        assert_eq!(cache.get_clicks("abc123").await, Some(3));

        cache.remove_clicks("abc123").await;
        assert_eq!(cache.get_clicks("abc123").await, None);
    }

    #[tokio::test]
    async fn removing_absent_keys_is_idempotent() {
        let cache = MemoryLookupCache::new(3600);
        cache.remove_url("missing").await;
        cache.remove_clicks("missing").await;
    }
}
