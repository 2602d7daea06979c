//! Product domain types.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use marigold_core::ProductId;

/// A catalog image reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    /// Public URL of the image.
    pub url: String,
    /// Identifier of the asset in the external image store.
    pub external_id: String,
}

/// A size option shown on the product page.
///
/// The badge is free-form display text ("JUST IN", "3 LEFT", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeOption {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
}

/// A catalog product.
///
/// `images_by_color` is an insertion-ordered mapping: the admin curates the
/// color order and the storefront renders it as given.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    /// Decimal-as-string on the wire (e.g. `"25.00"`).
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_image: Option<ProductImage>,
    #[serde(default)]
    pub images_by_color: IndexMap<String, Vec<ProductImage>>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<SizeOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    pub just_in: bool,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Incoming product fields for create and partial update.
///
/// Every field is optional; `validate_new` enforces the create-time
/// requirements and `apply_to` merges present fields into an existing
/// product. An absent field on update means "leave unchanged".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductInput {
    pub name: Option<String>,
    pub desc: Option<String>,
    /// Decimal-as-string, validated by parsing.
    pub price: Option<String>,
    pub default_image: Option<ProductImage>,
    pub images_by_color: Option<IndexMap<String, Vec<ProductImage>>>,
    pub colors: Option<Vec<String>>,
    pub sizes: Option<Vec<SizeOption>>,
    pub badge: Option<String>,
    pub just_in: Option<bool>,
    pub published: Option<bool>,
}

impl ProductInput {
    /// Validate the input as a new product, collecting every violation.
    ///
    /// Requires a non-empty `name` and a parseable decimal `price`. The id
    /// and both timestamps are assigned here; `published` defaults to false.
    ///
    /// # Errors
    ///
    /// Returns all violated fields when validation fails.
    pub fn validate_new(self) -> Result<Product, Vec<String>> {
        let mut violations = Vec::new();

        let name = match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => Some(name.to_owned()),
            _ => {
                violations.push("name: must be a non-empty string".to_owned());
                None
            }
        };

        let price = match self.price.as_deref() {
            Some(raw) => match raw.parse::<Decimal>() {
                Ok(price) => Some(price),
                Err(_) => {
                    violations.push(format!("price: '{raw}' is not a decimal amount"));
                    None
                }
            },
            None => {
                violations.push("price: is required".to_owned());
                None
            }
        };

        let (Some(name), Some(price)) = (name, price) else {
            return Err(violations);
        };

        let now = Utc::now();
        Ok(Product {
            id: ProductId::generate(),
            name,
            desc: self.desc,
            price,
            default_image: self.default_image,
            images_by_color: self.images_by_color.unwrap_or_default(),
            colors: self.colors.unwrap_or_default(),
            sizes: self.sizes.unwrap_or_default(),
            badge: self.badge,
            just_in: self.just_in.unwrap_or(false),
            published: self.published.unwrap_or(false),
            created_at: now,
            updated_at: now,
        })
    }

    /// Merge present fields into an existing product, collecting every
    /// violation. Bumps `updated_at` on success.
    ///
    /// # Errors
    ///
    /// Returns all violated fields when validation fails; the product is
    /// untouched in that case.
    pub fn apply_to(self, product: &mut Product) -> Result<(), Vec<String>> {
        let mut violations = Vec::new();

        let name = match self.name.as_deref().map(str::trim) {
            Some(name) if name.is_empty() => {
                violations.push("name: must be a non-empty string".to_owned());
                None
            }
            other => other.map(str::to_owned),
        };

        let price = match self.price.as_deref() {
            Some(raw) => match raw.parse::<Decimal>() {
                Ok(price) => Some(price),
                Err(_) => {
                    violations.push(format!("price: '{raw}' is not a decimal amount"));
                    None
                }
            },
            None => None,
        };

        if !violations.is_empty() {
            return Err(violations);
        }

        if let Some(name) = name {
            product.name = name;
        }
        if let Some(price) = price {
            product.price = price;
        }
        if let Some(desc) = self.desc {
            product.desc = Some(desc);
        }
        if let Some(default_image) = self.default_image {
            product.default_image = Some(default_image);
        }
        if let Some(images_by_color) = self.images_by_color {
            product.images_by_color = images_by_color;
        }
        if let Some(colors) = self.colors {
            product.colors = colors;
        }
        if let Some(sizes) = self.sizes {
            product.sizes = sizes;
        }
        if let Some(badge) = self.badge {
            product.badge = Some(badge);
        }
        if let Some(just_in) = self.just_in {
            product.just_in = just_in;
        }
        if let Some(published) = self.published {
            product.published = published;
        }
        product.updated_at = Utc::now();

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn minimal_input() -> ProductInput {
        ProductInput {
            name: Some("Shawl".to_owned()),
            price: Some("25.00".to_owned()),
            ..ProductInput::default()
        }
    }

    #[test]
    fn test_validate_new_minimal() {
        let product = minimal_input().validate_new().unwrap();
        assert_eq!(product.name, "Shawl");
        assert_eq!(product.price.to_string(), "25.00");
        assert!(!product.published);
        assert!(!product.just_in);
        assert!(product.images_by_color.is_empty());
        assert_eq!(product.created_at, product.updated_at);
    }

    #[test]
    fn test_validate_new_collects_every_violation() {
        let input = ProductInput {
            name: Some("   ".to_owned()),
            price: Some("twenty".to_owned()),
            ..ProductInput::default()
        };
        let violations = input.validate_new().unwrap_err();
        assert_eq!(violations.len(), 2);
        assert!(violations.iter().any(|v| v.starts_with("name:")));
        assert!(violations.iter().any(|v| v.starts_with("price:")));
    }

    #[test]
    fn test_validate_new_missing_fields() {
        let violations = ProductInput::default().validate_new().unwrap_err();
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn test_apply_to_merges_only_present_fields() {
        let mut product = minimal_input().validate_new().unwrap();
        let before_update = product.updated_at;

        let patch = ProductInput {
            badge: Some("10% OFF".to_owned()),
            just_in: Some(true),
            ..ProductInput::default()
        };
        patch.apply_to(&mut product).unwrap();

        assert_eq!(product.name, "Shawl");
        assert_eq!(product.badge.as_deref(), Some("10% OFF"));
        assert!(product.just_in);
        assert!(product.updated_at >= before_update);
    }

    #[test]
    fn test_apply_to_rejects_bad_price_without_mutating() {
        let mut product = minimal_input().validate_new().unwrap();
        let patch = ProductInput {
            price: Some("free".to_owned()),
            name: Some(String::new()),
            ..ProductInput::default()
        };
        let violations = patch.apply_to(&mut product).unwrap_err();
        assert_eq!(violations.len(), 2);
        assert_eq!(product.name, "Shawl");
        assert_eq!(product.price.to_string(), "25.00");
    }

    #[test]
    fn test_wire_shape_is_camel_case() {
        let mut product = minimal_input().validate_new().unwrap();
        product.default_image = Some(ProductImage {
            url: "https://img.example/p1.jpg".to_owned(),
            external_id: "p1".to_owned(),
        });
        let json = serde_json::to_value(&product).unwrap();

        assert_eq!(json["price"], "25.00");
        assert!(json["defaultImage"]["externalId"].is_string());
        assert!(json.get("imagesByColor").is_some());
        assert!(json.get("justIn").is_some());
        // absent optionals are omitted, not null
        assert!(json.get("badge").is_none());
    }

    #[test]
    fn test_images_by_color_preserves_insertion_order() {
        let raw = r#"{
            "name": "Shawl",
            "price": "25.00",
            "imagesByColor": {
                "rust": [{"url": "https://img.example/r1.jpg", "externalId": "r1"}],
                "indigo": [{"url": "https://img.example/i1.jpg", "externalId": "i1"}],
                "cream": []
            }
        }"#;
        let input: ProductInput = serde_json::from_str(raw).unwrap();
        let product = input.validate_new().unwrap();

        let colors: Vec<&String> = product.images_by_color.keys().collect();
        assert_eq!(colors, ["rust", "indigo", "cream"]);
    }
}
