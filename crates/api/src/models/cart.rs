//! Cart domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored cart line item.
///
/// `price` is snapshotted when the item is saved and never re-synchronized
/// from the live catalog on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Reference to a product id. Not enforced: the product may have been
    /// deleted since the item was added.
    pub product_id: String,
    pub name: String,
    pub price: f64,
    pub quantity: i64,
}

/// A per-user cart.
///
/// A cart with no items is never stored; its logical state is row absence,
/// which is why `updated_at` can be missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub user_id: String,
    pub items: Vec<CartItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Cart {
    /// The empty cart for a user with no stored row.
    #[must_use]
    pub fn empty(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            items: Vec::new(),
            updated_at: None,
        }
    }
}

/// A cart item with read-time display data attached.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedCartItem {
    #[serde(flatten)]
    pub item: CartItem,
    /// Default image URL of the referenced product, when it still exists and
    /// has one. Derived on read; never persisted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A cart whose items carry display enrichment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedCart {
    pub user_id: String,
    pub items: Vec<EnrichedCartItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Incoming cart line item, validated by [`validate_items`].
///
/// `quantity` arrives as a raw JSON number so that a fractional value is
/// reported as a violation rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CartItemInput {
    pub product_id: Option<String>,
    pub name: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<f64>,
}

/// Validate incoming cart items, collecting every violated field.
///
/// Each item needs a non-empty string `productId`, a non-empty string
/// `name`, a numeric `price`, and an integer `quantity >= 1`.
///
/// # Errors
///
/// Returns the full list of violations, indexed per item.
pub fn validate_items(items: &[CartItemInput]) -> Result<Vec<CartItem>, Vec<String>> {
    let mut violations = Vec::new();
    let mut validated = Vec::with_capacity(items.len());

    for (i, item) in items.iter().enumerate() {
        let product_id = match item.product_id.as_deref() {
            Some(id) if !id.is_empty() => Some(id.to_owned()),
            _ => {
                violations.push(format!("items[{i}].productId: must be a non-empty string"));
                None
            }
        };

        let name = match item.name.as_deref() {
            Some(name) if !name.is_empty() => Some(name.to_owned()),
            _ => {
                violations.push(format!("items[{i}].name: must be a non-empty string"));
                None
            }
        };

        let price = match item.price {
            Some(price) if price.is_finite() => Some(price),
            _ => {
                violations.push(format!("items[{i}].price: must be a number"));
                None
            }
        };

        let quantity = match item.quantity {
            #[allow(clippy::cast_possible_truncation)] // fract() == 0.0 checked first
            Some(q) if q.fract() == 0.0 && q >= 1.0 && q <= i64::MAX as f64 => Some(q as i64),
            _ => {
                violations.push(format!("items[{i}].quantity: must be a positive integer"));
                None
            }
        };

        if let (Some(product_id), Some(name), Some(price), Some(quantity)) =
            (product_id, name, price, quantity)
        {
            validated.push(CartItem {
                product_id,
                name,
                price,
                quantity,
            });
        }
    }

    if violations.is_empty() {
        Ok(validated)
    } else {
        Err(violations)
    }
}
