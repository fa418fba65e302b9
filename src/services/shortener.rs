use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cache::LookupCache;
use crate::errors::{Result, SnaplinkError};
use crate::storage::{SeaOrmStorage, ShortUrl};
use crate::utils::generate_short_code;

/// Bound on generate-check-insert rounds. With a sparse keyspace the first
/// candidate is almost always free; hitting this bound means the keyspace is
/// effectively full for the configured code length.
const MAX_GENERATE_ATTEMPTS: usize = 16;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenedUrl {
    pub short_url: String,
    pub short_code: String,
    pub original_url: String,
}

pub struct ShortenerService {
    storage: Arc<SeaOrmStorage>,
    cache: Arc<dyn LookupCache>,
    base_url: String,
    code_length: usize,
}

impl ShortenerService {
    pub fn new(
        storage: Arc<SeaOrmStorage>,
        cache: Arc<dyn LookupCache>,
        base_url: impl Into<String>,
        code_length: usize,
    ) -> Self {
        Self {
            storage,
            cache,
            base_url: base_url.into(),
            code_length,
        }
    }

    /// Issue a new short code for a URL.
    ///
    /// The existence check is an optimization only; the insert's uniqueness
    /// constraint is what actually guarantees the code is free. Losing the
    /// insert race to a concurrent request just means another round of the
    /// loop.
    pub async fn shorten(&self, original_url: &str) -> Result<ShortenedUrl> {
        let original_url = original_url.trim();
        if original_url.is_empty() {
            return Err(SnaplinkError::validation("Submitted URL must not be empty"));
        }

        let mut attempts = 0;
        let record = loop {
            attempts += 1;
            if attempts > MAX_GENERATE_ATTEMPTS {
                return Err(SnaplinkError::duplicate_code(format!(
                    "No free short code found after {} attempts",
                    MAX_GENERATE_ATTEMPTS
                )));
            }

            let code = generate_short_code(self.code_length);
            if self.storage.exists(&code).await? {
                debug!("Candidate code already taken: {}", code);
                continue;
            }

            let record = ShortUrl {
                short_code: code,
                original_url: original_url.to_string(),
                created_at: Utc::now(),
                click_count: 0,
            };

            match self.storage.insert(&record).await {
                Ok(()) => break record,
                Err(SnaplinkError::DuplicateCode(_)) => {
                    debug!(
                        "Lost insert race for candidate code: {}",
                        record.short_code
                    );
                    continue;
                }
                Err(e) => return Err(e),
            }
        };

        // Prime the lookup cache. A cache failure is already swallowed by
        // the cache layer; the shorten has durably succeeded at this point.
        self.cache
            .set_url(&record.short_code, &record.original_url)
            .await;

        info!("Shortened URL, code: {}", record.short_code);

        Ok(ShortenedUrl {
            short_url: format!("{}/{}", self.base_url, record.short_code),
            short_code: record.short_code,
            original_url: record.original_url,
        })
    }
}
