//! Storage backend tests
//!
//! Exercises SeaOrmStorage against temporary SQLite databases.

use chrono::{Duration, Utc};
use snaplink::errors::SnaplinkError;
use snaplink::storage::backend::infer_backend_from_url;
use snaplink::storage::{ClickEvent, SeaOrmStorage, ShortUrl};
use tempfile::TempDir;

fn test_record(code: &str, url: &str) -> ShortUrl {
    ShortUrl {
        short_code: code.to_string(),
        original_url: url.to_string(),
        created_at: Utc::now(),
        click_count: 0,
    }
}

fn test_click(code: &str, agent: &str, age_secs: i64) -> ClickEvent {
    ClickEvent {
        short_code: code.to_string(),
        timestamp: Utc::now() - Duration::seconds(age_secs),
        ip_address: Some("203.0.113.7".to_string()),
        user_agent: Some(agent.to_string()),
    }
}

async fn create_temp_storage() -> (SeaOrmStorage, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let storage = SeaOrmStorage::new(&db_url, "sqlite")
        .await
        .expect("Failed to create storage");

    (storage, temp_dir)
}

#[test]
fn infers_backend_from_url() {
    assert_eq!(infer_backend_from_url("sqlite://test.db").unwrap(), "sqlite");
    assert_eq!(infer_backend_from_url("links.sqlite").unwrap(), "sqlite");
    assert_eq!(
        infer_backend_from_url("mysql://root@localhost/snaplink").unwrap(),
        "mysql"
    );
    assert_eq!(
        infer_backend_from_url("postgres://localhost/snaplink").unwrap(),
        "postgres"
    );
    assert!(infer_backend_from_url("mongodb://localhost").is_err());
}

#[tokio::test]
async fn insert_and_get_round_trip() {
    let (storage, _dir) = create_temp_storage().await;

    let record = test_record("aZ3kq1", "https://example.com");
    storage.insert(&record).await.unwrap();

    let loaded = storage.get("aZ3kq1").await.unwrap().unwrap();
    assert_eq!(loaded.short_code, "aZ3kq1");
    assert_eq!(loaded.original_url, "https://example.com");
    assert_eq!(loaded.click_count, 0);

    assert!(storage.exists("aZ3kq1").await.unwrap());
    assert!(!storage.exists("missing").await.unwrap());
    assert!(storage.get("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_insert_reports_duplicate_code() {
    let (storage, _dir) = create_temp_storage().await;

    storage
        .insert(&test_record("dup001", "https://first.example"))
        .await
        .unwrap();

    let err = storage
        .insert(&test_record("dup001", "https://second.example"))
        .await
        .unwrap_err();

    assert!(matches!(err, SnaplinkError::DuplicateCode(_)));

    // The loser must not have overwritten the original mapping
    let loaded = storage.get("dup001").await.unwrap().unwrap();
    assert_eq!(loaded.original_url, "https://first.example");
}

#[tokio::test]
async fn increment_click_accumulates() {
    let (storage, _dir) = create_temp_storage().await;

    storage
        .insert(&test_record("clicky", "https://example.com"))
        .await
        .unwrap();

    for _ in 0..5 {
        storage.increment_click("clicky").await.unwrap();
    }

    let loaded = storage.get("clicky").await.unwrap().unwrap();
    assert_eq!(loaded.click_count, 5);
}

#[tokio::test]
async fn increment_click_on_missing_code_is_a_noop() {
    let (storage, _dir) = create_temp_storage().await;
    storage.increment_click("missing").await.unwrap();
}

#[tokio::test]
async fn remove_missing_record_is_not_found() {
    let (storage, _dir) = create_temp_storage().await;

    let err = storage.remove("missing").await.unwrap_err();
    assert!(matches!(err, SnaplinkError::NotFound(_)));
}

#[tokio::test]
async fn recent_clicks_are_newest_first_and_capped() {
    let (storage, _dir) = create_temp_storage().await;

    for age in 0..15 {
        storage
            .insert_click(&test_click("code01", "Firefox", age))
            .await
            .unwrap();
    }

    let recent = storage.recent_clicks("code01", 10).await.unwrap();
    assert_eq!(recent.len(), 10);
    for pair in recent.windows(2) {
        assert!(pair[0].timestamp >= pair[1].timestamp);
    }

    assert_eq!(storage.count_clicks("code01").await.unwrap(), 15);
}

#[tokio::test]
async fn agent_breakdown_orders_by_count() {
    let (storage, _dir) = create_temp_storage().await;

    for age in 0..3 {
        storage
            .insert_click(&test_click("code02", "Firefox", age))
            .await
            .unwrap();
    }
    storage
        .insert_click(&test_click("code02", "Chrome", 10))
        .await
        .unwrap();
    // Clicks for other codes must not leak into the breakdown
    storage
        .insert_click(&test_click("other", "Safari", 1))
        .await
        .unwrap();

    let breakdown = storage.agent_breakdown("code02").await.unwrap();
    assert_eq!(breakdown.len(), 2);
    assert_eq!(breakdown[0].user_agent.as_deref(), Some("Firefox"));
    assert_eq!(breakdown[0].count, 3);
    assert_eq!(breakdown[1].user_agent.as_deref(), Some("Chrome"));
    assert_eq!(breakdown[1].count, 1);
}

#[tokio::test]
async fn remove_clicks_deletes_only_that_code() {
    let (storage, _dir) = create_temp_storage().await;

    storage
        .insert_click(&test_click("gone", "Firefox", 0))
        .await
        .unwrap();
    storage
        .insert_click(&test_click("gone", "Chrome", 1))
        .await
        .unwrap();
    storage
        .insert_click(&test_click("kept", "Safari", 0))
        .await
        .unwrap();

    assert_eq!(storage.remove_clicks("gone").await.unwrap(), 2);
    assert_eq!(storage.count_clicks("gone").await.unwrap(), 0);
    assert_eq!(storage.count_clicks("kept").await.unwrap(), 1);

    // Deleting again removes nothing and is not an error
    assert_eq!(storage.remove_clicks("gone").await.unwrap(), 0);
}

#[tokio::test]
async fn pagination_is_newest_first() {
    let (storage, _dir) = create_temp_storage().await;

    for i in 0..25 {
        let record = ShortUrl {
            short_code: format!("code{:02}", i),
            original_url: format!("https://example.com/{}", i),
            // Strictly increasing ages so ordering is deterministic
            created_at: Utc::now() - Duration::seconds(i),
            click_count: 0,
        };
        storage.insert(&record).await.unwrap();
    }

    assert_eq!(storage.count().await.unwrap(), 25);

    let first_page = storage.load_paginated(1, 10).await.unwrap();
    assert_eq!(first_page.len(), 10);
    assert_eq!(first_page[0].short_code, "code00");
    for pair in first_page.windows(2) {
        assert!(pair[0].created_at >= pair[1].created_at);
    }

    let last_page = storage.load_paginated(3, 10).await.unwrap();
    assert_eq!(last_page.len(), 5);
    assert_eq!(last_page[4].short_code, "code24");
}
