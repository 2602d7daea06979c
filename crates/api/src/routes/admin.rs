//! Admin login route.

use axum::extract::State;
use axum::http::header;
use axum::response::{AppendHeaders, IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::extract::Json;
use crate::services::auth::{AuthService, session_cookie};
use crate::state::AppState;

/// Login request body.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    /// The admin's email address.
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Login response body.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
}

/// Verify admin credentials and set the session cookie.
///
/// POST /admin/login
///
/// Every credential failure - unknown email, non-admin role, wrong password -
/// returns the same 401 body.
///
/// # Errors
///
/// 400 if either field is missing, 401 on invalid credentials, 500 on
/// persistence failure.
#[instrument(skip(state, body))]
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Response> {
    let mut violations = Vec::new();

    let username = match body.username.as_deref() {
        Some(username) if !username.is_empty() => Some(username.to_owned()),
        _ => {
            violations.push("username: is required".to_owned());
            None
        }
    };

    let password = match body.password.as_deref() {
        Some(password) if !password.is_empty() => Some(password.to_owned()),
        _ => {
            violations.push("password: is required".to_owned());
            None
        }
    };

    let (Some(username), Some(password)) = (username, password) else {
        return Err(AppError::Validation { violations });
    };

    let auth = AuthService::new(state.pool(), &state.config().jwt_secret);
    let user = auth.verify_credentials(&username, &password).await?;
    let token = auth.issue_session_token(&user)?;

    tracing::info!(user_id = %user.id, "admin login");

    let cookie = session_cookie(token, state.config().is_production());

    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie.to_string())]),
        axum::Json(LoginResponse { success: true }),
    )
        .into_response())
}
