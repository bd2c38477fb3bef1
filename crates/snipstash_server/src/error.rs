//! HTTP error mapping for API handlers.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use snipstash_core::{models::wire::ErrorResponse, AppError, ValidationError};

/// Error returned by handlers; converts an [`AppError`] into a JSON response.
#[derive(Debug)]
pub struct HttpError(pub AppError);

impl From<AppError> for HttpError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl From<ValidationError> for HttpError {
    fn from(value: ValidationError) -> Self {
        Self(AppError::Validation(value))
    }
}

impl From<JsonRejection> for HttpError {
    fn from(value: JsonRejection) -> Self {
        Self(AppError::Validation(ValidationError::message(format!(
            "Invalid JSON body: {}",
            value.body_text()
        ))))
    }
}

impl HttpError {
    fn status_and_body(&self) -> (StatusCode, ErrorResponse) {
        match &self.0 {
            AppError::Validation(err) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    message: err.message.clone(),
                    missing: err.missing,
                },
            ),
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    message: "Snippet not found".to_string(),
                    missing: None,
                },
            ),
            store_err => {
                tracing::error!("Store error: {}", store_err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        message: "Server Error".to_string(),
                        missing: None,
                    },
                )
            }
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::HttpError;
    use axum::http::StatusCode;
    use snipstash_core::{AppError, MissingFields, ValidationError};

    #[test]
    fn validation_errors_map_to_bad_request_with_missing_map() {
        let err = HttpError::from(ValidationError::missing(MissingFields {
            title: true,
            language: false,
            code: true,
        }));
        let (status, body) = err.status_and_body();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let missing = body.missing.expect("missing map");
        assert!(missing.title && missing.code && !missing.language);
    }

    #[test]
    fn not_found_maps_to_404() {
        let (status, body) = HttpError::from(AppError::NotFound).status_and_body();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.message, "Snippet not found");
    }

    #[test]
    fn store_errors_hide_details() {
        let err = HttpError::from(AppError::StorageMessage("disk on fire".to_string()));
        let (status, body) = err.status_and_body();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.message.contains("disk"));
    }
}
