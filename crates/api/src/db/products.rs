//! Product repository for database operations.
//!
//! Document-shaped fields persist in JSON columns: `images_by_color` uses
//! `json` rather than `jsonb` because jsonb does not preserve key order and
//! the color mapping is insertion-ordered.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use marigold_core::ProductId;

use super::RepositoryError;
use crate::models::product::{Product, ProductImage, SizeOption};

const PRODUCT_COLUMNS: &str = "id, name, description, price, default_image, images_by_color, \
                               colors, sizes, badge, just_in, published, created_at, updated_at";

/// The ordered color mapping travels as text and is cast to `json` in the
/// statement; a jsonb-typed parameter would re-sort its keys server-side
/// before any cast could run.
fn images_as_text(
    images: &IndexMap<String, Vec<ProductImage>>,
) -> Result<String, RepositoryError> {
    serde_json::to_string(images)
        .map_err(|e| RepositoryError::Database(sqlx::Error::Encode(e.into())))
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    name: String,
    description: Option<String>,
    price: Decimal,
    default_image: Option<Json<ProductImage>>,
    images_by_color: Json<IndexMap<String, Vec<ProductImage>>>,
    colors: Vec<String>,
    sizes: Json<Vec<SizeOption>>,
    badge: Option<String>,
    just_in: bool,
    published: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            desc: row.description,
            price: row.price,
            default_image: row.default_image.map(|Json(image)| image),
            images_by_color: row.images_by_color.0,
            colors: row.colors,
            sizes: row.sizes.0,
            badge: row.badge,
            just_in: row.just_in,
            published: row.published,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all products, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows: Vec<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM product ORDER BY created_at ASC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Get a product by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row: Option<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM product WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Product::from))
    }

    /// Insert a new product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert(&self, product: &Product) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO product (id, name, description, price, default_image, images_by_color,
                                 colors, sizes, badge, just_in, published, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6::json, $7, $8, $9, $10, $11, $12, $13)
            ",
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.desc)
        .bind(product.price)
        .bind(product.default_image.as_ref().map(Json))
        .bind(images_as_text(&product.images_by_color)?)
        .bind(&product.colors)
        .bind(Json(&product.sizes))
        .bind(&product.badge)
        .bind(product.just_in)
        .bind(product.published)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Replace every mutable column of an existing product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(&self, product: &Product) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE product
            SET name = $2, description = $3, price = $4, default_image = $5,
                images_by_color = $6::json, colors = $7, sizes = $8, badge = $9,
                just_in = $10, published = $11, updated_at = $12
            WHERE id = $1
            ",
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.desc)
        .bind(product.price)
        .bind(product.default_image.as_ref().map(Json))
        .bind(images_as_text(&product.images_by_color)?)
        .bind(&product.colors)
        .bind(Json(&product.sizes))
        .bind(&product.badge)
        .bind(product.just_in)
        .bind(product.published)
        .bind(product.updated_at)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM product WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Write an absolute publish flag in one conditional update.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn set_published(
        &self,
        id: ProductId,
        published: bool,
    ) -> Result<Product, RepositoryError> {
        let row: Option<ProductRow> = sqlx::query_as(&format!(
            "UPDATE product SET published = $2, updated_at = now() WHERE id = $1 \
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(id)
        .bind(published)
        .fetch_optional(self.pool)
        .await?;

        row.map(Product::from).ok_or(RepositoryError::NotFound)
    }

    /// Flip the publish flag atomically.
    ///
    /// A single conditional update: two concurrent toggles on the same id
    /// each negate the value they find at execution time, so neither flip is
    /// lost.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn toggle_published(&self, id: ProductId) -> Result<Product, RepositoryError> {
        let row: Option<ProductRow> = sqlx::query_as(&format!(
            "UPDATE product SET published = NOT published, updated_at = now() WHERE id = $1 \
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(Product::from).ok_or(RepositoryError::NotFound)
    }

    /// Batch-fetch default image URLs for a set of product ids.
    ///
    /// One round trip regardless of cart size. Ids that no longer exist, or
    /// products without a default image, are simply absent from the result.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn default_image_urls(
        &self,
        ids: &[Uuid],
    ) -> Result<HashMap<Uuid, String>, RepositoryError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(Uuid, Option<Json<ProductImage>>)> =
            sqlx::query_as("SELECT id, default_image FROM product WHERE id = ANY($1)")
                .bind(ids)
                .fetch_all(self.pool)
                .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(id, image)| image.map(|Json(image)| (id, image.url)))
            .collect())
    }
}
