use async_trait::async_trait;
use redis::{aio::MultiplexedConnection, AsyncCommands};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, trace};

use crate::cache::LookupCache;
use crate::errors::{Result, SnaplinkError};

pub struct RedisLookupCache {
    client: redis::Client,
    /// Shared multiplexed connection, rebuilt after errors.
    connection: Arc<RwLock<Option<MultiplexedConnection>>>,
    key_prefix: String,
    ttl: u64,
}

impl RedisLookupCache {
    pub fn new(url: &str, key_prefix: &str, ttl: u64) -> Result<Self> {
        let client = redis::Client::open(url).map_err(|e| {
            SnaplinkError::cache_connection(format!("Failed to create Redis client: {}", e))
        })?;

        // Fail fast at startup: a dead cache server should surface here,
        // not on the first redirect.
        let mut conn = client.get_connection().map_err(|e| {
            SnaplinkError::cache_connection(format!("Redis connection failed ({}): {}", url, e))
        })?;
        redis::cmd("PING").query::<String>(&mut conn).map_err(|e| {
            SnaplinkError::cache_connection(format!("Redis ping failed ({}): {}", url, e))
        })?;

        debug!(
            "RedisLookupCache ready, prefix: '{}', TTL: {}s",
            key_prefix, ttl
        );

        Ok(Self {
            client,
            connection: Arc::new(RwLock::new(None)),
            key_prefix: key_prefix.to_string(),
            ttl,
        })
    }

    async fn get_connection(&self) -> std::result::Result<MultiplexedConnection, redis::RedisError> {
        {
            let conn_guard = self.connection.read().await;
            if let Some(ref conn) = *conn_guard {
                return Ok(conn.clone());
            }
        }

        let mut conn_guard = self.connection.write().await;

        // Another task may have connected while we waited for the lock
        if let Some(ref conn) = *conn_guard {
            return Ok(conn.clone());
        }

        let new_conn = self.client.get_multiplexed_async_connection().await?;
        *conn_guard = Some(new_conn.clone());
        debug!("Redis connection established");

        Ok(new_conn)
    }

    async fn reset_connection(&self) {
        let mut conn_guard = self.connection.write().await;
        *conn_guard = None;
        debug!("Redis connection reset after error");
    }

    fn url_key(&self, code: &str) -> String {
        format!("{}url:{}", self.key_prefix, code)
    }

    fn clicks_key(&self, code: &str) -> String {
        format!("{}clicks:{}", self.key_prefix, code)
    }

    async fn delete_key(&self, key: String) {
        let mut conn = match self.get_connection().await {
            Ok(c) => c,
            Err(e) => {
                error!("Failed to get Redis connection: {}", e);
                self.reset_connection().await;
                return;
            }
        };

        match conn.del::<_, i64>(&key).await {
            Ok(removed) => {
                trace!("Removed cache key {} ({} entries)", key, removed);
            }
            Err(e) => {
                error!("Failed to remove cache key '{}': {}", key, e);
                self.reset_connection().await;
            }
        }
    }
}

#[async_trait]
impl LookupCache for RedisLookupCache {
    async fn get_url(&self, code: &str) -> Option<String> {
        let key = self.url_key(code);

        let mut conn = match self.get_connection().await {
            Ok(c) => c,
            Err(e) => {
                error!("Failed to get Redis connection: {}", e);
                self.reset_connection().await;
                return None;
            }
        };

        match conn.get::<_, Option<String>>(&key).await {
            Ok(value) => value,
            Err(e) => {
                error!("Failed to read cache key '{}': {}", key, e);
                self.reset_connection().await;
                None
            }
        }
    }

    async fn set_url(&self, code: &str, url: &str) {
        let key = self.url_key(code);

        let mut conn = match self.get_connection().await {
            Ok(c) => c,
            Err(e) => {
                error!("Failed to get Redis connection: {}", e);
                self.reset_connection().await;
                return;
            }
        };

        match conn.set_ex::<_, _, ()>(&key, url, self.ttl).await {
            Ok(()) => trace!("Cached URL for code: {}", code),
            Err(e) => {
                error!("Failed to cache URL for '{}': {}", code, e);
                self.reset_connection().await;
            }
        }
    }

    async fn remove_url(&self, code: &str) {
        self.delete_key(self.url_key(code)).await;
    }

    async fn incr_clicks(&self, code: &str) {
        let key = self.clicks_key(code);

        let mut conn = match self.get_connection().await {
            Ok(c) => c,
            Err(e) => {
                error!("Failed to get Redis connection: {}", e);
                self.reset_connection().await;
                return;
            }
        };

        // INCR initializes absent keys to 0; no expiry is set on purpose
        if let Err(e) = conn.incr::<_, _, i64>(&key, 1i64).await {
            error!("Failed to increment click counter '{}': {}", key, e);
            self.reset_connection().await;
        }
    }

    async fn get_clicks(&self, code: &str) -> Option<i64> {
        let key = self.clicks_key(code);

        let mut conn = match self.get_connection().await {
            Ok(c) => c,
            Err(e) => {
                error!("Failed to get Redis connection: {}", e);
                self.reset_connection().await;
                return None;
            }
        };

        match conn.get::<_, Option<i64>>(&key).await {
            Ok(value) => value,
            Err(e) => {
                error!("Failed to read click counter '{}': {}", key, e);
                self.reset_connection().await;
                None
            }
        }
    }

    async fn remove_clicks(&self, code: &str) {
        self.delete_key(self.clicks_key(code)).await;
    }
}
