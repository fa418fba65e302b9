use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cache::LookupCache;
use crate::errors::{Result, SnaplinkError};
use crate::storage::{AgentCount, ClickEvent, SeaOrmStorage};

/// How many of the latest click events the stats response carries.
const RECENT_CLICKS_LIMIT: u64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlStats {
    pub short_code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub total_clicks: i64,
    pub recent_clicks: Vec<ClickEvent>,
    pub browser_stats: Vec<AgentCount>,
}

pub struct AnalyticsService {
    storage: Arc<SeaOrmStorage>,
    cache: Arc<dyn LookupCache>,
}

impl AnalyticsService {
    pub fn new(storage: Arc<SeaOrmStorage>, cache: Arc<dyn LookupCache>) -> Self {
        Self { storage, cache }
    }

    /// Assemble per-code statistics.
    ///
    /// `total_clicks` prefers the cache's approximate counter and falls back
    /// to the stored count when the counter was never initialized. The two
    /// can disagree in either direction within the staleness window; no
    /// reconciliation is attempted.
    pub async fn stats_for(&self, code: &str) -> Result<UrlStats> {
        let record = self.storage.get(code).await?.ok_or_else(|| {
            SnaplinkError::not_found(format!("Short URL not found: {}", code))
        })?;

        let total_clicks = match self.cache.get_clicks(code).await {
            Some(count) => count,
            None => record.click_count,
        };

        let recent_clicks = self.storage.recent_clicks(code, RECENT_CLICKS_LIMIT).await?;
        let browser_stats = self.storage.agent_breakdown(code).await?;

        Ok(UrlStats {
            short_code: record.short_code,
            original_url: record.original_url,
            created_at: record.created_at,
            total_clicks,
            recent_clicks,
            browser_stats,
        })
    }
}
