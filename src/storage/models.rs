use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A short code to original URL mapping.
///
/// `click_count` is the authoritative persisted counter. The cache keeps an
/// approximate counter alongside it; the two are never reconciled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortUrl {
    pub short_code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub click_count: i64,
}

/// One successful redirect. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickEvent {
    pub short_code: String,
    pub timestamp: DateTime<Utc>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl ClickEvent {
    pub fn new(short_code: &str, ip_address: Option<String>, user_agent: Option<String>) -> Self {
        Self {
            short_code: short_code.to_string(),
            timestamp: Utc::now(),
            ip_address,
            user_agent,
        }
    }
}

/// Click count for one user agent, used by the stats breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentCount {
    pub user_agent: Option<String>,
    pub count: i64,
}
