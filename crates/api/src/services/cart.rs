//! Cart storage and read-time enrichment.
//!
//! Storage is wholesale: every save fully replaces the user's item list, and
//! an empty save deletes the stored row. Enrichment composes the stored cart
//! with one batched catalog lookup and never writes anything back.

use std::collections::{HashMap, HashSet};

use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{CartRepository, ProductRepository};
use crate::error::AppError;
use crate::models::cart::{
    Cart, CartItemInput, EnrichedCart, EnrichedCartItem, validate_items,
};

/// Cart service: storage plus catalog enrichment.
pub struct CartService<'a> {
    carts: CartRepository<'a>,
    products: ProductRepository<'a>,
}

impl<'a> CartService<'a> {
    /// Create a new cart service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            carts: CartRepository::new(pool),
            products: ProductRepository::new(pool),
        }
    }

    /// Get the stored cart for a user.
    ///
    /// A user with no stored row gets an empty cart, not an error.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Database` if the lookup fails.
    pub async fn get(&self, user_id: &str) -> Result<Cart, AppError> {
        Ok(self
            .carts
            .get(user_id)
            .await?
            .unwrap_or_else(|| Cart::empty(user_id)))
    }

    /// Replace the user's cart with the given items.
    ///
    /// Saving an empty item list deletes any stored cart and returns the
    /// empty cart; saving an empty list when nothing is stored is a no-op
    /// with the same result. Item prices are stored exactly as given -
    /// snapshots that later catalog price changes never touch.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` listing every violated item field, or
    /// `AppError::Database` if the write fails.
    pub async fn save(&self, user_id: &str, items: &[CartItemInput]) -> Result<Cart, AppError> {
        let items =
            validate_items(items).map_err(|violations| AppError::Validation { violations })?;

        if items.is_empty() {
            self.carts.delete(user_id).await?;
            return Ok(Cart::empty(user_id));
        }

        Ok(self.carts.upsert(user_id, &items).await?)
    }

    /// Get the user's cart with display enrichment attached.
    ///
    /// Issues a single batched catalog fetch keyed by the distinct product
    /// ids the cart references. Items whose product is gone (or whose
    /// reference never parsed as an id) are returned unchanged, without an
    /// image - enrichment degrades per item rather than failing the cart.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Database` if a lookup fails.
    pub async fn get_enriched(&self, user_id: &str) -> Result<EnrichedCart, AppError> {
        let cart = self.get(user_id).await?;

        let ids: Vec<Uuid> = cart
            .items
            .iter()
            .filter_map(|item| Uuid::parse_str(&item.product_id).ok())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let images = self.products.default_image_urls(&ids).await?;

        Ok(attach_images(cart, &images))
    }
}

/// Merge fetched image URLs into cart items.
///
/// Pure merge step of enrichment: items without a matching product keep
/// their stored fields and simply carry no image.
#[must_use]
pub fn attach_images(cart: Cart, images: &HashMap<Uuid, String>) -> EnrichedCart {
    let items = cart
        .items
        .into_iter()
        .map(|item| {
            let image = Uuid::parse_str(&item.product_id)
                .ok()
                .and_then(|id| images.get(&id).cloned());
            EnrichedCartItem { item, image }
        })
        .collect();

    EnrichedCart {
        user_id: cart.user_id,
        items,
        updated_at: cart.updated_at,
    }
}
