use actix_web::{web, App, HttpServer};
use tracing::{error, info};

use snaplink::api;
use snaplink::cache::CacheFactory;
use snaplink::config::{get_config, init_config};
use snaplink::logging::init_logging;
use snaplink::services::{AnalyticsService, CatalogService, RedirectService, ShortenerService};
use snaplink::storage::StorageFactory;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    init_config();

    let config = get_config();
    init_logging(&config.logging.level);

    // A dead store or cache at startup is fatal; there is no degraded mode.
    let storage = match StorageFactory::create().await {
        Ok(storage) => storage,
        Err(e) => {
            error!("Storage initialization failed: {}", e);
            std::process::exit(1);
        }
    };

    let cache = match CacheFactory::create().await {
        Ok(cache) => cache,
        Err(e) => {
            error!("Cache initialization failed: {}", e);
            std::process::exit(1);
        }
    };

    let shortener = web::Data::new(ShortenerService::new(
        storage.clone(),
        cache.clone(),
        config.server.base_url.trim_end_matches('/'),
        config.features.code_length,
    ));
    let redirect = web::Data::new(RedirectService::new(storage.clone(), cache.clone()));
    let analytics = web::Data::new(AnalyticsService::new(storage.clone(), cache.clone()));
    let catalog = web::Data::new(CatalogService::new(storage.clone(), cache.clone()));

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    info!("Starting server at http://{}", bind_address);

    HttpServer::new(move || {
        App::new()
            .app_data(shortener.clone())
            .app_data(redirect.clone())
            .app_data(analytics.clone())
            .app_data(catalog.clone())
            .service(api::api_routes())
            .service(api::redirect_routes())
    })
    .bind(bind_address)?
    .run()
    .await
}
