//! User provisioning commands.
//!
//! The API never creates users; every record comes from here. Passwords are
//! hashed with Argon2id before they touch the database.
//!
//! # Usage
//!
//! ```bash
//! # Create an admin with a generated password (printed once)
//! marigold user create -e admin@example.com -r admin
//! ```
//!
//! # Environment Variables
//!
//! - `MARIGOLD_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use rand::Rng;
use rand::distr::Alphanumeric;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use marigold_core::{Email, Role, UserId};

/// Length of generated passwords.
const GENERATED_PASSWORD_LENGTH: usize = 24;

/// Errors that can occur during user provisioning.
#[derive(Debug, Error)]
pub enum UserError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Invalid role.
    #[error("Invalid role: {0}. Valid roles: admin, customer")]
    InvalidRole(String),

    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] marigold_core::EmailError),

    /// User already exists.
    #[error("User already exists with email: {0}")]
    UserExists(String),

    /// Password hashing error.
    #[error("Password hashing failed")]
    PasswordHash,
}

/// Create a new user record.
///
/// When `password` is `None`, a random one is generated and logged exactly
/// once.
///
/// # Errors
///
/// Returns `UserError` if the email or role is invalid, the email is
/// already taken, or the database write fails.
pub async fn create(email: &str, password: Option<String>, role: &str) -> Result<UserId, UserError> {
    dotenvy::dotenv().ok();

    let role: Role = role
        .parse()
        .map_err(|_| UserError::InvalidRole(role.to_owned()))?;
    let email = Email::parse(email)?;

    let database_url = std::env::var("MARIGOLD_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| UserError::MissingEnvVar("MARIGOLD_DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;

    tracing::info!("Creating user: {} ({})", email, role);

    // Check if the email is already taken
    let existing: Option<Uuid> = sqlx::query_scalar("SELECT id FROM app_user WHERE email = $1")
        .bind(email.as_str())
        .fetch_optional(&pool)
        .await?;

    if existing.is_some() {
        return Err(UserError::UserExists(email.into_inner()));
    }

    let (password, generated) = match password {
        Some(password) => (password, false),
        None => (generate_password(), true),
    };
    let password_hash = hash_password(&password)?;

    let user_id = UserId::generate();
    sqlx::query("INSERT INTO app_user (id, email, password_hash, role) VALUES ($1, $2, $3, $4)")
        .bind(user_id)
        .bind(email.as_str())
        .bind(&password_hash)
        .bind(role)
        .execute(&pool)
        .await?;

    tracing::info!(
        "User created successfully! ID: {}, Email: {}, Role: {}",
        user_id,
        email,
        role
    );
    if generated {
        tracing::warn!("Generated password (store it now, it is not recoverable): {password}");
    }

    Ok(user_id)
}

/// Generate a random alphanumeric password.
fn generate_password() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_PASSWORD_LENGTH)
        .map(char::from)
        .collect()
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, UserError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| UserError::PasswordHash)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use argon2::password_hash::{PasswordHash, PasswordVerifier};

    #[test]
    fn test_generate_password_length_and_charset() {
        let password = generate_password();
        assert_eq!(password.len(), GENERATED_PASSWORD_LENGTH);
        assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_hash_password_verifies() {
        let hash = hash_password("orchard-gate-22").unwrap();
        let parsed = PasswordHash::new(&hash).unwrap();
        assert!(
            Argon2::default()
                .verify_password(b"orchard-gate-22", &parsed)
                .is_ok()
        );
        assert!(
            Argon2::default()
                .verify_password(b"wrong", &parsed)
                .is_err()
        );
    }
}
