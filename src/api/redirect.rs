use actix_web::{web, HttpRequest, HttpResponse, Responder};
use tracing::trace;

use super::types::error_response;
use crate::errors::SnaplinkError;
use crate::services::{ClickSource, RedirectService};
use crate::utils::is_valid_short_code;

/// `GET /{code}` — resolve and redirect.
pub async fn handle_redirect(
    req: HttpRequest,
    path: web::Path<String>,
    service: web::Data<RedirectService>,
) -> impl Responder {
    let code = path.into_inner();

    // Junk paths never reach the cache or the database
    if !is_valid_short_code(&code) {
        trace!("Invalid short code rejected: {}", code);
        return error_response(&SnaplinkError::not_found(code));
    }

    let source = click_source(&req);

    match service.resolve(&code, source).await {
        Ok(original_url) => HttpResponse::Found()
            .insert_header(("Location", original_url))
            .finish(),
        Err(e) => error_response(&e),
    }
}

fn click_source(req: &HttpRequest) -> ClickSource {
    let ip_address = req
        .connection_info()
        .realip_remote_addr()
        .map(|addr| addr.to_string());

    let user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string());

    ClickSource {
        ip_address,
        user_agent,
    }
}
