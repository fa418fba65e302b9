use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use super::types::error_response;
use crate::services::CatalogService;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteResponse {
    message: &'static str,
    short_code: String,
}

/// `GET /api/urls?page&limit` — paginated listing, newest first.
pub async fn list_urls(
    query: web::Query<ListQuery>,
    service: web::Data<CatalogService>,
) -> impl Responder {
    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(10);

    match service.list(page, limit).await {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(e) => error_response(&e),
    }
}

/// `DELETE /api/urls/{code}` — remove a record, its click events, and its
/// cache entries.
pub async fn delete_url(
    path: web::Path<String>,
    service: web::Data<CatalogService>,
) -> impl Responder {
    let code = path.into_inner();

    match service.delete(&code).await {
        Ok(()) => HttpResponse::Ok().json(DeleteResponse {
            message: "URL deleted successfully",
            short_code: code,
        }),
        Err(e) => error_response(&e),
    }
}
