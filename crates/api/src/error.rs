//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to Sentry
//! before responding to the client. All route handlers should return
//! `Result<T, AppError>`. Every failure renders as a JSON object with an
//! `error` message (and, for validation failures, a `details` list naming
//! every violated field).

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or missing required input.
    #[error("Validation failed: {}", violations.join("; "))]
    Validation {
        /// Every violated field, not just the first.
        violations: Vec<String>,
    },

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Referenced entity absent.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Build a validation error from a single message.
    #[must_use]
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            violations: vec![msg.into()],
        }
    }

    /// The client-facing status code and JSON body for this error.
    ///
    /// Internal detail (database messages, signing failures) is withheld;
    /// validation failures carry every violated field.
    #[must_use]
    pub fn status_and_body(&self) -> (StatusCode, ErrorBody) {
        match self {
            Self::Validation { violations } => {
                let body = match violations.as_slice() {
                    [single] => ErrorBody::new(single.clone()),
                    many => ErrorBody::with_details("Invalid request", many.to_vec()),
                };
                (StatusCode::BAD_REQUEST, body)
            }
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials | AuthError::InvalidToken => (
                    StatusCode::UNAUTHORIZED,
                    ErrorBody::new("Invalid credentials"),
                ),
                AuthError::TokenSigning | AuthError::Repository(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::new("Server error"),
                ),
            },
            Self::NotFound(what) => (
                StatusCode::NOT_FOUND,
                ErrorBody::new(format!("{what} not found")),
            ),
            Self::Database(RepositoryError::NotFound) => {
                (StatusCode::NOT_FOUND, ErrorBody::new("Not found"))
            }
            Self::Database(_) | Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::new("Server error"),
            ),
        }
    }
}

/// JSON failure body: `{"error": ..., "details": [...]}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<String>>,
}

impl ErrorBody {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    fn with_details(error: impl Into<String>, details: Vec<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details),
        }
    }

    /// The `error` message.
    #[must_use]
    pub fn error(&self) -> &str {
        &self.error
    }

    /// The violated fields, if any.
    #[must_use]
    pub fn details(&self) -> Option<&[String]> {
        self.details.as_deref()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(
            self,
            Self::Database(_) | Self::Internal(_) | Self::Auth(AuthError::TokenSigning)
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn get_status(err: &AppError) -> StatusCode {
        err.status_and_body().0
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("Product".to_string());
        assert_eq!(err.to_string(), "Not found: Product");

        let err = AppError::validation("Missing userId");
        assert_eq!(err.to_string(), "Validation failed: Missing userId");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(&AppError::validation("bad input")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(&AppError::Auth(AuthError::InvalidCredentials)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(&AppError::NotFound("Product".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(&AppError::Database(RepositoryError::NotFound)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(&AppError::Internal("boom".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_detail_is_not_leaked() {
        let err = AppError::Internal("connection refused to 10.0.0.3:5432".to_string());
        let (status, body) = err.status_and_body();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error(), "Server error");
        assert!(body.details().is_none());
    }

    #[test]
    fn test_validation_lists_every_violation() {
        let err = AppError::Validation {
            violations: vec![
                "items[0].quantity: must be a positive integer".to_string(),
                "items[2].name: must be a non-empty string".to_string(),
            ],
        };
        let (status, body) = err.status_and_body();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.details().unwrap().len(), 2);
    }

    #[test]
    fn test_single_violation_is_the_error_message() {
        let (_, body) = AppError::validation("Missing userId").status_and_body();
        assert_eq!(body.error(), "Missing userId");
        assert!(body.details().is_none());
    }

    #[test]
    fn test_error_body_serializes_without_null_details() {
        let (_, body) = AppError::validation("Missing userId").status_and_body();
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({"error": "Missing userId"}));
    }
}
