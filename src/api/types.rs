use actix_web::HttpResponse;
use serde::Serialize;
use tracing::error;

use crate::errors::SnaplinkError;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Map a service error onto the HTTP contract.
///
/// Validation problems carry their message; everything unexpected collapses
/// into a generic 500 so internal detail never leaks to clients.
pub fn error_response(err: &SnaplinkError) -> HttpResponse {
    match err {
        SnaplinkError::Validation(_) => HttpResponse::BadRequest().json(ErrorBody {
            error: err.message().to_string(),
        }),
        SnaplinkError::NotFound(_) => HttpResponse::NotFound().json(ErrorBody {
            error: "URL not found".to_string(),
        }),
        _ => {
            error!("Request failed: {}", err);
            HttpResponse::InternalServerError().json(ErrorBody {
                error: "Server Error".to_string(),
            })
        }
    }
}
