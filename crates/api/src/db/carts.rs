//! Cart repository for database operations.
//!
//! One row per user, keyed by `user_id`. Saves are wholesale replacements;
//! the empty cart is represented by deleting the row, so a `get` miss is a
//! normal outcome, not an error.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;

use super::RepositoryError;
use crate::models::cart::{Cart, CartItem};

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

#[derive(sqlx::FromRow)]
struct CartRow {
    user_id: String,
    items: Json<Vec<CartItem>>,
    updated_at: DateTime<Utc>,
}

impl From<CartRow> for Cart {
    fn from(row: CartRow) -> Self {
        Self {
            user_id: row.user_id,
            items: row.items.0,
            updated_at: Some(row.updated_at),
        }
    }
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get the stored cart for a user, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, user_id: &str) -> Result<Option<Cart>, RepositoryError> {
        let row: Option<CartRow> =
            sqlx::query_as("SELECT user_id, items, updated_at FROM cart WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(self.pool)
                .await?;

        Ok(row.map(Cart::from))
    }

    /// Replace the cart for a user, inserting if none exists.
    ///
    /// Full replacement in a single statement: a save with item A followed by
    /// a save with item B leaves only B.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the upsert fails.
    pub async fn upsert(&self, user_id: &str, items: &[CartItem]) -> Result<Cart, RepositoryError> {
        let row: CartRow = sqlx::query_as(
            r"
            INSERT INTO cart (user_id, items, updated_at)
            VALUES ($1, $2, now())
            ON CONFLICT (user_id)
            DO UPDATE SET items = EXCLUDED.items, updated_at = EXCLUDED.updated_at
            RETURNING user_id, items, updated_at
            ",
        )
        .bind(user_id)
        .bind(Json(items))
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Delete the stored cart for a user.
    ///
    /// Deleting an absent cart is a no-op, not an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, user_id: &str) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM cart WHERE user_id = $1")
            .bind(user_id)
            .execute(self.pool)
            .await?;

        Ok(())
    }
}
