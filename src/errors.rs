use std::fmt;

use actix_web::{
    error::ResponseError,
    http::StatusCode,
    HttpResponse
};
use serde::Serialize;
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::{handlers::responses::html, storage::StorageError, views::layout::render_error_page};

#[derive(Debug)]
pub enum AppError {
    ValidationError(FieldErrors),
    NotFound(String),
    BadRequest(String),
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ValidationError(errors) => write!(f, "validation error: {}", errors),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal server error: {}", msg)
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let (title, detail) = match self {
            AppError::NotFound(msg) => ("Page not found", msg.as_str()),
            AppError::BadRequest(msg) => ("Bad request", msg.as_str()),
            AppError::ValidationError(_) => ("Bad request", "The submitted form is invalid."),
            AppError::InternalError(msg) => {
                // Details stay in the logs; the page only gets a generic note.
                tracing::error!("Internal error: {}", msg);
                ("Server error", "Something went wrong on our side.")
            }
        };

        html(self.status_code(), render_error_page(self.status_code(), title, detail))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::ValidationError(errors.into())
    }
}

impl From<FieldErrors> for AppError {
    fn from(errors: FieldErrors) -> Self {
        AppError::ValidationError(errors)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ => AppError::InternalError(format!("Database error: {}", err))
        }
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::InternalError(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(format!("I/O error: {}", err))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Field-level validation failures, grouped by field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    /// Messages attached to `field`, in insertion order.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `Ok(())` when nothing was collected, otherwise the errors themselves.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages = self.0.iter()
            .map(|e| format!("{}:{}", e.field, e.message))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{}", messages)
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut field_errors: Vec<FieldError> = errors
            .errors()
            .iter()
            .filter_map(|(field, kind)| match kind {
                ValidationErrorsKind::Field(errs) => Some((field, errs)),
                _ => None,
            })
            .flat_map(|(field, errs)| {
                errs.iter().map(|e| FieldError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "Invalid value".to_string()),
                })
            })
            .collect();

        // ValidationErrors is backed by a HashMap; keep output stable.
        field_errors.sort_by(|a, b| a.field.cmp(&b.field));
        FieldErrors(field_errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::ValidationError;

    #[test]
    fn converts_validation_errors_with_fallback_message() {
        let mut errors = ValidationErrors::new();
        let mut with_message = ValidationError::new("required");
        with_message.message = Some("This field is required.".into());
        errors.add("title", with_message);
        errors.add("content", ValidationError::new("length"));

        let field_errors = FieldErrors::from(errors);

        assert_eq!(field_errors.len(), 2);
        assert_eq!(field_errors.for_field("title").collect::<Vec<_>>(), vec!["This field is required."]);
        assert_eq!(field_errors.for_field("content").collect::<Vec<_>>(), vec!["Invalid value"]);
    }

    #[test]
    fn row_not_found_maps_to_not_found() {
        let err = AppError::from(sqlx::Error::RowNotFound);
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[actix_rt::test]
    async fn error_page_hides_internal_detail() {
        let err = AppError::InternalError("password=hunter2".into());
        let response = err.error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("500"));
        assert!(!html.contains("hunter2"));
    }
}
