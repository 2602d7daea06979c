//! Authentication service.
//!
//! Verifies admin credentials and issues the signed session token delivered
//! via the `admin_jwt` cookie. There is no revocation or refresh; expiry is
//! the only lifecycle bound.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordVerifier},
};
use chrono::Utc;
use cookie::{Cookie, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::db::users::UserRepository;
use crate::models::user::User;

/// Name of the session cookie.
pub const SESSION_COOKIE_NAME: &str = "admin_jwt";

/// Session lifetime in seconds (24 hours).
pub const SESSION_TTL_SECONDS: i64 = 24 * 60 * 60;

/// Claims embedded in the session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject: the user id.
    pub sub: String,
    /// Role asserted at login time.
    pub role: String,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch: `iat` + 24 hours.
    pub exp: i64,
}

/// Authentication service.
///
/// Handles credential verification and session-token issuance for the admin
/// role.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    jwt_secret: &'a SecretString,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool, jwt_secret: &'a SecretString) -> Self {
        Self {
            users: UserRepository::new(pool),
            jwt_secret,
        }
    }

    /// Verify admin credentials.
    ///
    /// Looks up the single user whose email equals `identifier` with the
    /// admin role, then verifies `secret` against the stored hash under
    /// argon2. Unknown email, non-admin role, malformed identifier, and
    /// wrong password all fail with the same error.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` on any mismatch, or
    /// `AuthError::Repository` if the lookup itself fails.
    pub async fn verify_credentials(
        &self,
        identifier: &str,
        secret: &str,
    ) -> Result<User, AuthError> {
        let user = self
            .users
            .get_admin_by_email(identifier)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(secret, &user.password_hash)?;

        Ok(user)
    }

    /// Issue a signed session token for an authenticated user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenSigning` if signing fails.
    pub fn issue_session_token(&self, user: &User) -> Result<String, AuthError> {
        issue_session_token(self.jwt_secret, user)
    }
}

/// Sign a session token embedding `{sub, role, iat, exp}`.
///
/// # Errors
///
/// Returns `AuthError::TokenSigning` if signing fails.
pub fn issue_session_token(secret: &SecretString, user: &User) -> Result<String, AuthError> {
    let iat = Utc::now().timestamp();
    let claims = SessionClaims {
        sub: user.id.to_string(),
        role: user.role.to_string(),
        iat,
        exp: iat + SESSION_TTL_SECONDS,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.expose_secret().as_bytes()),
    )
    .map_err(|_| AuthError::TokenSigning)
}

/// Decode and validate a session token (signature and expiry).
///
/// # Errors
///
/// Returns `AuthError::InvalidToken` if the token is tampered with, signed
/// with a different secret, or expired.
pub fn decode_session_token(secret: &SecretString, token: &str) -> Result<SessionClaims, AuthError> {
    jsonwebtoken::decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.expose_secret().as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AuthError::InvalidToken)
}

/// Build the session cookie carrying a signed token.
///
/// Scoped to path `/`, HttpOnly, SameSite=Strict, Max-Age 24 hours; Secure
/// only in production so local development over plain HTTP keeps working.
#[must_use]
pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .max_age(cookie::time::Duration::seconds(SESSION_TTL_SECONDS))
        .build()
}

/// Verify a password against a stored hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
