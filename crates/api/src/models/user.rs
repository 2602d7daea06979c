//! User domain types.
//!
//! User records are provisioned out-of-band (see the CLI crate); this service
//! only ever reads them during credential verification.

use marigold_core::{Email, Role, UserId};

/// A user record.
///
/// Deliberately not `Serialize`: the password hash must never reach a
/// response body, and no endpoint returns user documents.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub password_hash: String,
    pub role: Role,
}
