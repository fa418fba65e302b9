//! Lookup cache for the redirect hot path.
//!
//! Two key families, matching what the redirect path needs:
//! - `url:{code}` → original URL, expires after the configured TTL;
//! - `clicks:{code}` → approximate click counter, no explicit expiry.
//!
//! Everything here is a performance layer. A miss never means "does not
//! exist" — the record store stays the source of truth — and a failed cache
//! call is logged and swallowed rather than surfaced to the request.

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::Result;

pub mod memory;
pub mod redis;

pub use memory::MemoryLookupCache;
pub use redis::RedisLookupCache;

#[async_trait]
pub trait LookupCache: Send + Sync {
    /// Cached original URL for a code, if present and not expired.
    async fn get_url(&self, code: &str) -> Option<String>;

    /// Cache the original URL for a code with the standard TTL. Best effort.
    async fn set_url(&self, code: &str, url: &str);

    /// Drop the cached URL for a code. Removing an absent key is fine.
    async fn remove_url(&self, code: &str);

    /// Bump the approximate click counter for a code.
    async fn incr_clicks(&self, code: &str);

    /// Approximate click count, if the counter was ever initialized.
    async fn get_clicks(&self, code: &str) -> Option<i64>;

    /// Drop the click counter for a code. Removing an absent key is fine.
    async fn remove_clicks(&self, code: &str);
}

pub struct CacheFactory;

impl CacheFactory {
    pub async fn create() -> Result<Arc<dyn LookupCache>> {
        let config = crate::config::get_config();

        let boxed: Box<dyn LookupCache> = match config.cache.backend.as_str() {
            "memory" => Box::new(MemoryLookupCache::new(config.cache.default_ttl)),
            _ => Box::new(RedisLookupCache::new(
                &config.cache.redis_url,
                &config.cache.key_prefix,
                config.cache.default_ttl,
            )?),
        };

        Ok(Arc::from(boxed))
    }
}
