//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown identifier, non-admin role, or wrong password.
    ///
    /// Deliberately a single variant: the causes must stay
    /// indistinguishable to the caller.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Session token could not be signed.
    #[error("token signing failed")]
    TokenSigning,

    /// Session token failed signature or expiry validation.
    #[error("invalid session token")]
    InvalidToken,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
