//! Read-only operations for SeaOrmStorage.

use sea_orm::{
    ColumnTrait, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use super::converters::{model_to_click_event, model_to_short_url};
use super::SeaOrmStorage;
use crate::errors::{Result, SnaplinkError};
use crate::storage::models::{AgentCount, ClickEvent, ShortUrl};

use migration::entities::{click_event, short_url};

/// Row shape for the grouped user-agent aggregation.
#[derive(Debug, FromQueryResult)]
struct AgentCountRow {
    user_agent: Option<String>,
    count: i64,
}

impl SeaOrmStorage {
    pub async fn get(&self, code: &str) -> Result<Option<ShortUrl>> {
        let model = short_url::Entity::find_by_id(code)
            .one(&self.db)
            .await
            .map_err(|e| {
                SnaplinkError::database_operation(format!(
                    "Failed to look up short URL '{}': {}",
                    code, e
                ))
            })?;

        Ok(model.map(model_to_short_url))
    }

    pub async fn exists(&self, code: &str) -> Result<bool> {
        let count = short_url::Entity::find()
            .filter(short_url::Column::ShortCode.eq(code))
            .count(&self.db)
            .await
            .map_err(|e| {
                SnaplinkError::database_operation(format!(
                    "Failed to check existence of '{}': {}",
                    code, e
                ))
            })?;

        Ok(count > 0)
    }

    /// Total number of short URL records.
    pub async fn count(&self) -> Result<u64> {
        short_url::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| {
                SnaplinkError::database_operation(format!("Failed to count short URLs: {}", e))
            })
    }

    /// One page of records, newest first. `page` is 1-based.
    pub async fn load_paginated(&self, page: u64, limit: u64) -> Result<Vec<ShortUrl>> {
        let page_offset = page.saturating_sub(1);

        let models = short_url::Entity::find()
            .order_by_desc(short_url::Column::CreatedAt)
            .paginate(&self.db, limit)
            .fetch_page(page_offset)
            .await
            .map_err(|e| {
                SnaplinkError::database_operation(format!("Paginated load failed: {}", e))
            })?;

        Ok(models.into_iter().map(model_to_short_url).collect())
    }

    /// The most recent click events for a code, newest first.
    pub async fn recent_clicks(&self, code: &str, limit: u64) -> Result<Vec<ClickEvent>> {
        let models = click_event::Entity::find()
            .filter(click_event::Column::ShortCode.eq(code))
            .order_by_desc(click_event::Column::ClickedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| {
                SnaplinkError::database_operation(format!(
                    "Failed to load recent clicks for '{}': {}",
                    code, e
                ))
            })?;

        Ok(models.into_iter().map(model_to_click_event).collect())
    }

    /// Click events for a code grouped by user agent, highest count first.
    /// Ties come back in whatever order the grouping produced.
    pub async fn agent_breakdown(&self, code: &str) -> Result<Vec<AgentCount>> {
        let mut rows: Vec<AgentCountRow> = click_event::Entity::find()
            .select_only()
            .column(click_event::Column::UserAgent)
            .column_as(click_event::Column::Id.count(), "count")
            .filter(click_event::Column::ShortCode.eq(code))
            .group_by(click_event::Column::UserAgent)
            .into_model::<AgentCountRow>()
            .all(&self.db)
            .await
            .map_err(|e| {
                SnaplinkError::database_operation(format!(
                    "Failed to aggregate clicks for '{}': {}",
                    code, e
                ))
            })?;

        rows.sort_by(|a, b| b.count.cmp(&a.count));

        Ok(rows
            .into_iter()
            .map(|row| AgentCount {
                user_agent: row.user_agent,
                count: row.count,
            })
            .collect())
    }

    /// Total click events stored for one code.
    pub async fn count_clicks(&self, code: &str) -> Result<u64> {
        click_event::Entity::find()
            .filter(click_event::Column::ShortCode.eq(code))
            .count(&self.db)
            .await
            .map_err(|e| {
                SnaplinkError::database_operation(format!(
                    "Failed to count clicks for '{}': {}",
                    code, e
                ))
            })
    }
}
