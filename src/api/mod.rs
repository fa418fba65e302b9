//! HTTP surface: the JSON API under `/api` and the public redirect route.

pub mod redirect;
pub mod shorten;
pub mod stats;
pub mod types;
pub mod urls;

use actix_web::web;

/// Routes under `/api`.
pub fn api_routes() -> actix_web::Scope {
    web::scope("/api")
        .route("/shorten", web::post().to(shorten::shorten))
        .route("/stats/{code}", web::get().to(stats::get_stats))
        .route("/urls", web::get().to(urls::list_urls))
        .route("/urls/{code}", web::delete().to(urls::delete_url))
}

/// The catch-all public redirect route.
pub fn redirect_routes() -> actix_web::Scope {
    web::scope("")
        .route("/{code}", web::get().to(redirect::handle_redirect))
        .route("/{code}", web::head().to(redirect::handle_redirect))
}
