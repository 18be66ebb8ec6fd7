use actix_web::{HttpRequest, HttpResponse};

use crate::errors::AppError;

/// Fallback for paths no route matches.
pub async fn not_found(req: HttpRequest) -> HttpResponse {
    tracing::debug!("No route for {} {}", req.method(), req.path());
    actix_web::ResponseError::error_response(&AppError::NotFound(format!("No page at {}", req.path())))
}
