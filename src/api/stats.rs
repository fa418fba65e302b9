use actix_web::{web, HttpResponse, Responder};

use super::types::error_response;
use crate::services::AnalyticsService;

/// `GET /api/stats/{code}` — usage statistics for one short code.
pub async fn get_stats(
    path: web::Path<String>,
    service: web::Data<AnalyticsService>,
) -> impl Responder {
    let code = path.into_inner();

    match service.stats_for(&code).await {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(e) => error_response(&e),
    }
}
