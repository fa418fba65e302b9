//! Conversions between entity models and the domain structs.

use sea_orm::Set;

use crate::storage::models::{ClickEvent, ShortUrl};
use migration::entities::{click_event, short_url};

pub fn model_to_short_url(model: short_url::Model) -> ShortUrl {
    ShortUrl {
        short_code: model.short_code,
        original_url: model.original_url,
        created_at: model.created_at,
        click_count: model.click_count,
    }
}

pub fn short_url_to_active_model(record: &ShortUrl) -> short_url::ActiveModel {
    short_url::ActiveModel {
        short_code: Set(record.short_code.clone()),
        original_url: Set(record.original_url.clone()),
        created_at: Set(record.created_at),
        click_count: Set(record.click_count),
    }
}

pub fn model_to_click_event(model: click_event::Model) -> ClickEvent {
    ClickEvent {
        short_code: model.short_code,
        timestamp: model.clicked_at,
        ip_address: model.ip_address,
        user_agent: model.user_agent,
    }
}

pub fn click_event_to_active_model(event: &ClickEvent) -> click_event::ActiveModel {
    click_event::ActiveModel {
        id: Default::default(),
        short_code: Set(event.short_code.clone()),
        clicked_at: Set(event.timestamp),
        ip_address: Set(event.ip_address.clone()),
        user_agent: Set(event.user_agent.clone()),
    }
}
