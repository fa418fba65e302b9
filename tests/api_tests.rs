//! HTTP API tests
//!
//! Drives the actix-web surface end to end with the in-process cache and a
//! temporary SQLite database.

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;

use snaplink::api;
use snaplink::cache::{LookupCache, MemoryLookupCache};
use snaplink::services::{AnalyticsService, CatalogService, RedirectService, ShortenerService};
use snaplink::storage::SeaOrmStorage;

const BASE_URL: &str = "https://short.example";

struct ApiEnv {
    shortener: web::Data<ShortenerService>,
    redirect: web::Data<RedirectService>,
    analytics: web::Data<AnalyticsService>,
    catalog: web::Data<CatalogService>,
    _dir: TempDir,
}

async fn create_api_env() -> ApiEnv {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_url = format!("sqlite://{}?mode=rwc", dir.path().join("test.db").display());

    let storage = Arc::new(
        SeaOrmStorage::new(&db_url, "sqlite")
            .await
            .expect("Failed to create storage"),
    );
    let cache: Arc<dyn LookupCache> = Arc::new(MemoryLookupCache::new(3600));

    ApiEnv {
        shortener: web::Data::new(ShortenerService::new(
            storage.clone(),
            cache.clone(),
            BASE_URL,
            6,
        )),
        redirect: web::Data::new(RedirectService::new(storage.clone(), cache.clone())),
        analytics: web::Data::new(AnalyticsService::new(storage.clone(), cache.clone())),
        catalog: web::Data::new(CatalogService::new(storage, cache)),
        _dir: dir,
    }
}

macro_rules! init_app {
    ($env:expr) => {
        test::init_service(
            App::new()
                .app_data($env.shortener.clone())
                .app_data($env.redirect.clone())
                .app_data($env.analytics.clone())
                .app_data($env.catalog.clone())
                .service(api::api_routes())
                .service(api::redirect_routes()),
        )
        .await
    };
}

macro_rules! shorten {
    ($app:expr, $url:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/shorten")
            .set_json(json!({ "url": $url }))
            .to_request();
        let resp = test::call_service($app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        body
    }};
}

#[actix_web::test]
async fn shorten_returns_201_with_the_contract_fields() {
    let env = create_api_env().await;
    let app = init_app!(env);

    let body = shorten!(&app, "https://example.com");

    let code = body["shortCode"].as_str().unwrap();
    assert_eq!(code.len(), 6);
    assert_eq!(body["originalUrl"], "https://example.com");
    assert_eq!(
        body["shortUrl"].as_str().unwrap(),
        format!("{}/{}", BASE_URL, code)
    );
}

#[actix_web::test]
async fn shorten_rejects_missing_and_empty_urls() {
    let env = create_api_env().await;
    let app = init_app!(env);

    for payload in [json!({}), json!({ "url": "" }), json!({ "url": "  " })] {
        let req = test::TestRequest::post()
            .uri("/api/shorten")
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}

#[actix_web::test]
async fn redirect_returns_302_to_the_original_url() {
    let env = create_api_env().await;
    let app = init_app!(env);

    let body = shorten!(&app, "https://example.com");
    let code = body["shortCode"].as_str().unwrap();

    let req = test::TestRequest::get()
        .uri(&format!("/{}", code))
        .insert_header(("user-agent", "Firefox"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        resp.headers().get("Location").unwrap(),
        "https://example.com"
    );
}

#[actix_web::test]
async fn redirect_unknown_or_malformed_codes_is_404() {
    let env = create_api_env().await;
    let app = init_app!(env);

    for path in ["/zzzzzz", "/favicon.ico"] {
        let req = test::TestRequest::get().uri(path).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "path: {}", path);
    }
}

#[actix_web::test]
async fn stats_report_clicks_eventually() {
    let env = create_api_env().await;
    let app = init_app!(env);

    let body = shorten!(&app, "https://example.com");
    let code = body["shortCode"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri(&format!("/{}", code))
        .insert_header(("user-agent", "Firefox"))
        .to_request();
    test::call_service(&app, req).await;

    // The click side effects are fire-and-forget; poll until they land
    let mut stats = Value::Null;
    for _ in 0..100 {
        let req = test::TestRequest::get()
            .uri(&format!("/api/stats/{}", code))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        stats = test::read_body_json(resp).await;
        if stats["totalClicks"].as_i64().unwrap_or(0) >= 1 {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }

    assert_eq!(stats["shortCode"], code.as_str());
    assert_eq!(stats["originalUrl"], "https://example.com");
    assert!(stats["totalClicks"].as_i64().unwrap() >= 1);
    assert_eq!(stats["recentClicks"].as_array().unwrap().len(), 1);
    assert_eq!(stats["browserStats"][0]["userAgent"], "Firefox");
    assert_eq!(stats["browserStats"][0]["count"], 1);
}

#[actix_web::test]
async fn stats_for_unknown_code_is_404() {
    let env = create_api_env().await;
    let app = init_app!(env);

    let req = test::TestRequest::get()
        .uri("/api/stats/zzzzzz")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn urls_listing_carries_pagination_metadata() {
    let env = create_api_env().await;
    let app = init_app!(env);

    for i in 0..3 {
        shorten!(&app, &format!("https://example.com/{}", i));
    }

    let req = test::TestRequest::get()
        .uri("/api/urls?page=1&limit=2")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["urls"].as_array().unwrap().len(), 2);
    assert_eq!(body["pagination"]["currentPage"], 1);
    assert_eq!(body["pagination"]["totalPages"], 2);
    assert_eq!(body["pagination"]["totalUrls"], 3);
    assert_eq!(body["pagination"]["limit"], 2);
    assert_eq!(body["pagination"]["hasNextPage"], true);
    assert_eq!(body["pagination"]["hasPrevPage"], false);
}

#[actix_web::test]
async fn delete_removes_the_code_and_is_not_repeatable() {
    let env = create_api_env().await;
    let app = init_app!(env);

    let body = shorten!(&app, "https://example.com");
    let code = body["shortCode"].as_str().unwrap().to_string();

    let req = test::TestRequest::delete()
        .uri(&format!("/api/urls/{}", code))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "URL deleted successfully");
    assert_eq!(body["shortCode"], code.as_str());

    // Gone from every read path, and a second delete is a 404
    for uri in [
        format!("/api/urls/{}", code),
        format!("/api/stats/{}", code),
        format!("/{}", code),
    ] {
        let req = if uri.starts_with("/api/urls") {
            test::TestRequest::delete().uri(&uri).to_request()
        } else {
            test::TestRequest::get().uri(&uri).to_request()
        };
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "uri: {}", uri);
    }
}
