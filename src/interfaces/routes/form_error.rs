use actix_multipart::{form::MultipartFormConfig, MultipartError};
use actix_web::{
    error::UrlencodedError,
    http::StatusCode,
    web,
    HttpResponse,
    ResponseError,
};

use crate::{handlers::responses::html, views::layout::render_error_page};

/// Room for the text parts that travel alongside the file.
const MULTIPART_TEXT_ALLOWANCE: usize = 64 * 1024;

pub fn config_routes(cfg: &mut web::ServiceConfig, max_upload_bytes: usize) {
    cfg.app_data(web::FormConfig::default().error_handler(|err, _req| {
        FormError::from(err).into()
    }));

    cfg.app_data(
        MultipartFormConfig::default()
            .total_limit(max_upload_bytes + MULTIPART_TEXT_ALLOWANCE)
            .memory_limit(MULTIPART_TEXT_ALLOWANCE)
            .error_handler(|err, _req| FormError::from(err).into()),
    );
}

/// A request body that could not be decoded into a form at all. Field-level
/// problems never get here; they are re-rendered on the form.
#[derive(Debug)]
pub struct FormError {
    message: String,
    status: StatusCode
}

impl std::fmt::Display for FormError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ResponseError for FormError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        let title = match self.status {
            StatusCode::PAYLOAD_TOO_LARGE => "Upload too large",
            _ => "Bad request",
        };
        html(self.status, render_error_page(self.status, title, &self.message))
    }
}

impl From<UrlencodedError> for FormError {
    fn from(err: UrlencodedError) -> Self {
        let status = match err {
            UrlencodedError::Overflow { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        };
        FormError {
            message: format!("Form payload error: {}", err),
            status,
        }
    }
}

impl From<MultipartError> for FormError {
    fn from(err: MultipartError) -> Self {
        let status = match err {
            MultipartError::Payload(_) => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        };
        FormError {
            message: format!("Multipart payload error: {}", err),
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversized_urlencoded_body_is_413() {
        let err = FormError::from(UrlencodedError::Overflow { size: 10, limit: 5 });
        assert_eq!(err.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn wrong_content_type_is_400() {
        let err = FormError::from(UrlencodedError::ContentType);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn incompatible_multipart_is_400() {
        let err = FormError::from(MultipartError::ContentTypeIncompatible);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
