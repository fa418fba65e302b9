use std::sync::Arc;

use tracing::{debug, trace};

use crate::analytics::ClickRecorder;
use crate::cache::LookupCache;
use crate::errors::{Result, SnaplinkError};
use crate::storage::{ClickEvent, SeaOrmStorage};

/// Request attributes captured for click bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct ClickSource {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

pub struct RedirectService {
    storage: Arc<SeaOrmStorage>,
    cache: Arc<dyn LookupCache>,
    recorder: ClickRecorder,
}

impl RedirectService {
    pub fn new(storage: Arc<SeaOrmStorage>, cache: Arc<dyn LookupCache>) -> Self {
        let recorder = ClickRecorder::new(storage.clone(), cache.clone());
        Self {
            storage,
            cache,
            recorder,
        }
    }

    /// Resolve a short code to its destination URL, cache-aside.
    ///
    /// A cache miss falls through to the record store, and a store hit
    /// backfills the cache before returning. Click bookkeeping is dispatched
    /// after resolution and never awaited.
    pub async fn resolve(&self, code: &str, source: ClickSource) -> Result<String> {
        let original_url = match self.cache.get_url(code).await {
            Some(url) => {
                trace!("Cache hit for code: {}", code);
                url
            }
            None => {
                trace!("Cache miss for code: {}", code);
                let record = self.storage.get(code).await?.ok_or_else(|| {
                    debug!("Short URL not found: {}", code);
                    SnaplinkError::not_found(format!("Short URL not found: {}", code))
                })?;

                self.cache.set_url(code, &record.original_url).await;
                record.original_url
            }
        };

        self.recorder
            .dispatch(ClickEvent::new(code, source.ip_address, source.user_agent));

        Ok(original_url)
    }
}
