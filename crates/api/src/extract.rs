//! Request extractors.
//!
//! Axum's stock `Json` extractor rejects malformed bodies with 422; this API
//! reports every input problem as a 400 validation failure with the standard
//! `{"error": ...}` body, so routes use this wrapper instead.

use axum::extract::rejection::JsonRejection;

use crate::error::AppError;

/// JSON body extractor whose rejection is an [`AppError`] (HTTP 400).
#[derive(Debug, axum::extract::FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct Json<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}
