//! Mapping of crate errors onto HTTP responses.
//!
//! Every error body has a `detail` field: a list of field errors for
//! validation failures, a message otherwise.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::constants::MAX_ERROR_DETAIL_CHARS;
use crate::types::{truncate_message, StorageError, ValidationErrors};

/// Errors a handler can return
#[derive(Debug)]
pub enum ApiError {
    /// Body or query failed validation (422)
    Validation(ValidationErrors),
    /// Query string could not be decoded (422)
    InvalidQuery(String),
    /// Body was not usable JSON (400)
    BadRequest(String),
    /// Store failure or no store (500)
    Storage(StorageError),
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl From<StorageError> for ApiError {
    fn from(error: StorageError) -> Self {
        ApiError::Storage(error)
    }
}

impl ApiError {
    /// Status code this error maps to
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::InvalidQuery(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation(errors) => {
                tracing::info!(%errors, "request rejected by validation");
                json!({ "detail": errors.details() })
            }
            ApiError::InvalidQuery(msg) | ApiError::BadRequest(msg) => {
                tracing::info!(%status, detail = %msg, "bad request");
                json!({ "detail": msg })
            }
            ApiError::Storage(err) => {
                tracing::error!(error = %err, "storage operation failed");
                json!({ "detail": truncate_message(&err.to_string(), MAX_ERROR_DETAIL_CHARS) })
            }
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldErrorKind;

    #[test]
    fn status_codes() {
        let mut errors = ValidationErrors::new();
        errors.push("name", FieldErrorKind::Missing);
        assert_eq!(ApiError::from(errors).status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(ApiError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::from(StorageError::Unavailable("down".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn storage_detail_is_truncated() {
        let long = "x".repeat(MAX_ERROR_DETAIL_CHARS * 2);
        let response = ApiError::from(StorageError::Unavailable(long)).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["detail"].as_str().unwrap().chars().count(), MAX_ERROR_DETAIL_CHARS);
    }
}
