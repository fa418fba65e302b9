//! Write operations for SeaOrmStorage.

use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, SqlErr};
use tracing::{debug, info};

use super::converters::{click_event_to_active_model, short_url_to_active_model};
use super::SeaOrmStorage;
use crate::errors::{Result, SnaplinkError};
use crate::storage::models::{ClickEvent, ShortUrl};

use migration::entities::{click_event, short_url};

impl SeaOrmStorage {
    /// Insert a new short URL record.
    ///
    /// The primary key on `short_code` is the real uniqueness guarantee:
    /// when two requests race past the existence check with the same
    /// candidate, the loser gets `DuplicateCode` and the caller regenerates.
    pub async fn insert(&self, record: &ShortUrl) -> Result<()> {
        let active_model = short_url_to_active_model(record);

        match short_url::Entity::insert(active_model).exec(&self.db).await {
            Ok(_) => {
                debug!("Short URL inserted: {}", record.short_code);
                Ok(())
            }
            Err(e) => match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Err(SnaplinkError::duplicate_code(
                    format!("Short code already taken: {}", record.short_code),
                )),
                _ => Err(SnaplinkError::database_operation(format!(
                    "Failed to insert short URL '{}': {}",
                    record.short_code, e
                ))),
            },
        }
    }

    /// Atomically increment the persisted click counter for a code.
    pub async fn increment_click(&self, code: &str) -> Result<()> {
        short_url::Entity::update_many()
            .col_expr(
                short_url::Column::ClickCount,
                Expr::col(short_url::Column::ClickCount).add(1),
            )
            .filter(short_url::Column::ShortCode.eq(code))
            .exec(&self.db)
            .await
            .map_err(|e| {
                SnaplinkError::database_operation(format!(
                    "Failed to increment click count for '{}': {}",
                    code, e
                ))
            })?;

        Ok(())
    }

    /// Remove a short URL record. Fails with `NotFound` when no row matches.
    pub async fn remove(&self, code: &str) -> Result<()> {
        let result = short_url::Entity::delete_by_id(code)
            .exec(&self.db)
            .await
            .map_err(|e| {
                SnaplinkError::database_operation(format!(
                    "Failed to delete short URL '{}': {}",
                    code, e
                ))
            })?;

        if result.rows_affected == 0 {
            return Err(SnaplinkError::not_found(format!(
                "Short URL not found: {}",
                code
            )));
        }

        info!("Short URL deleted: {}", code);
        Ok(())
    }

    /// Append one click event.
    pub async fn insert_click(&self, event: &ClickEvent) -> Result<()> {
        click_event::Entity::insert(click_event_to_active_model(event))
            .exec(&self.db)
            .await
            .map_err(|e| {
                SnaplinkError::database_operation(format!(
                    "Failed to record click for '{}': {}",
                    event.short_code, e
                ))
            })?;

        Ok(())
    }

    /// Remove all click events for a code. Returns the number removed.
    pub async fn remove_clicks(&self, code: &str) -> Result<u64> {
        let result = click_event::Entity::delete_many()
            .filter(click_event::Column::ShortCode.eq(code))
            .exec(&self.db)
            .await
            .map_err(|e| {
                SnaplinkError::database_operation(format!(
                    "Failed to delete click events for '{}': {}",
                    code, e
                ))
            })?;

        Ok(result.rows_affected)
    }
}
