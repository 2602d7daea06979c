//! Product catalog service.
//!
//! Owns the product lifecycle: create, read, update, delete, and the publish
//! flag. Publish writes are single conditional updates, so concurrent
//! toggles cannot lose a flip.

use sqlx::PgPool;

use marigold_core::ProductId;

use crate::db::{ProductRepository, RepositoryError};
use crate::error::AppError;
use crate::models::product::{Product, ProductInput};

/// Product catalog service.
pub struct CatalogService<'a> {
    products: ProductRepository<'a>,
}

impl<'a> CatalogService<'a> {
    /// Create a new catalog service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            products: ProductRepository::new(pool),
        }
    }

    /// List all products.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Product>, AppError> {
        Ok(self.products.list().await?)
    }

    /// Create a product from incoming fields.
    ///
    /// Requires a non-empty `name` and a parseable decimal `price`; assigns
    /// the id and timestamps. New products start unpublished unless the
    /// input says otherwise.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` listing every violated field, or
    /// `AppError::Database` if the insert fails.
    pub async fn create(&self, input: ProductInput) -> Result<Product, AppError> {
        let product = input
            .validate_new()
            .map_err(|violations| AppError::Validation { violations })?;

        self.products.insert(&product).await?;

        Ok(product)
    }

    /// Get a product by id.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no product has this id.
    pub async fn get_by_id(&self, id: &str) -> Result<Product, AppError> {
        let id = parse_id(id)?;

        self.products
            .get_by_id(id)
            .await?
            .ok_or_else(product_not_found)
    }

    /// Apply a partial update to a product.
    ///
    /// Absent fields are left unchanged; `updated_at` is bumped.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no product has this id, or
    /// `AppError::Validation` listing every violated field.
    pub async fn update(&self, id: &str, input: ProductInput) -> Result<Product, AppError> {
        let mut product = self.get_by_id(id).await?;

        input
            .apply_to(&mut product)
            .map_err(|violations| AppError::Validation { violations })?;

        self.products
            .update(&product)
            .await
            .map_err(not_found_or_db)?;

        Ok(product)
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no product has this id.
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let id = parse_id(id)?;

        self.products.delete(id).await.map_err(not_found_or_db)
    }

    /// Set the publish flag to an absolute value.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no product has this id.
    pub async fn set_published(&self, id: &str, published: bool) -> Result<Product, AppError> {
        let id = parse_id(id)?;

        self.products
            .set_published(id, published)
            .await
            .map_err(not_found_or_db)
    }

    /// Flip the publish flag.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no product has this id.
    pub async fn toggle_published(&self, id: &str) -> Result<Product, AppError> {
        let id = parse_id(id)?;

        self.products
            .toggle_published(id)
            .await
            .map_err(not_found_or_db)
    }
}

/// An unparseable id cannot reference any product, so it reads as absent
/// rather than malformed.
fn parse_id(id: &str) -> Result<ProductId, AppError> {
    id.parse::<ProductId>().map_err(|_| product_not_found())
}

fn product_not_found() -> AppError {
    AppError::NotFound("Product".to_owned())
}

fn not_found_or_db(err: RepositoryError) -> AppError {
    match err {
        RepositoryError::NotFound => product_not_found(),
        other => other.into(),
    }
}
