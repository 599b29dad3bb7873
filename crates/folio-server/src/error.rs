//! HTTP error types for Folio server.
//!
//! Maps domain errors from `folio-core` into appropriate HTTP responses.
//! Every error variant produces a JSON body with a machine-readable `error`
//! field and a human-readable `message`.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use folio_core::error::ContentError;

/// Application-level error returned from HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Credential rejected or editing disabled.
    Unauthorized(String),
    /// Requested resource not found.
    NotFound(String),
    /// Client sent invalid input.
    BadRequest(String),
    /// Internal server error (storage failures land here).
    Internal(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg),
        };

        let body = ErrorBody {
            error: error_type,
            message,
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<ContentError> for AppError {
    fn from(err: ContentError) -> Self {
        match err {
            ContentError::Unauthorized => Self::Unauthorized("invalid password".to_owned()),
            ContentError::Malformed { .. } => Self::BadRequest(err.to_string()),
            ContentError::Storage(ref inner) => {
                tracing::error!(error = %inner, "portfolio storage failure");
                Self::Internal("portfolio could not be saved".to_owned())
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use folio_storage::StorageError;

    use super::*;

    #[test]
    fn content_errors_map_to_distinct_statuses() {
        let unauthorized = AppError::from(ContentError::Unauthorized).into_response();
        assert_eq!(unauthorized.status(), StatusCode::UNAUTHORIZED);

        let storage = AppError::from(ContentError::Storage(StorageError::Closed)).into_response();
        assert_eq!(storage.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let malformed = AppError::from(ContentError::Malformed {
            reason: "eof".to_owned(),
        })
        .into_response();
        assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);
    }
}
