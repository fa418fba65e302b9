use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use tracing::trace;

use super::types::error_response;
use crate::services::ShortenerService;

#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    pub url: Option<String>,
}

/// `POST /api/shorten` — issue a new short code.
pub async fn shorten(
    payload: web::Json<ShortenRequest>,
    service: web::Data<ShortenerService>,
) -> impl Responder {
    trace!("Shorten request: {:?}", payload);

    let url = payload.url.as_deref().unwrap_or_default();

    match service.shorten(url).await {
        Ok(shortened) => HttpResponse::Created().json(shortened),
        Err(e) => error_response(&e),
    }
}
