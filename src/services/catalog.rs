use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cache::LookupCache;
use crate::errors::Result;
use crate::storage::{SeaOrmStorage, ShortUrl};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_urls: u64,
    pub limit: u64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlPage {
    pub urls: Vec<ShortUrl>,
    pub pagination: Pagination,
}

pub struct CatalogService {
    storage: Arc<SeaOrmStorage>,
    cache: Arc<dyn LookupCache>,
}

impl CatalogService {
    pub fn new(storage: Arc<SeaOrmStorage>, cache: Arc<dyn LookupCache>) -> Self {
        Self { storage, cache }
    }

    /// One page of records, newest first.
    pub async fn list(&self, page: u64, limit: u64) -> Result<UrlPage> {
        let page = page.max(1);
        let limit = limit.clamp(1, 100);

        let total_urls = self.storage.count().await?;
        let urls = self.storage.load_paginated(page, limit).await?;

        let total_pages = total_urls.div_ceil(limit);

        Ok(UrlPage {
            urls,
            pagination: Pagination {
                current_page: page,
                total_pages,
                total_urls,
                limit,
                has_next_page: page < total_pages,
                has_prev_page: page > 1,
            },
        })
    }

    /// Delete a record together with its click events and cache entries.
    ///
    /// Fails with `NotFound` when the record does not exist. The cache
    /// removals are idempotent; deleting keys that were never set is fine.
    pub async fn delete(&self, code: &str) -> Result<()> {
        self.storage.remove(code).await?;
        let removed_clicks = self.storage.remove_clicks(code).await?;

        self.cache.remove_url(code).await;
        self.cache.remove_clicks(code).await;

        info!(
            "Deleted short URL '{}' and {} click events",
            code, removed_clicks
        );
        Ok(())
    }
}
