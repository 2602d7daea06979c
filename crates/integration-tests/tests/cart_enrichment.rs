//! Cart validation and read-time enrichment tests.

use std::collections::HashMap;

use uuid::Uuid;

use marigold_api::models::cart::{Cart, CartItemInput, validate_items};
use marigold_api::services::cart::attach_images;

use marigold_integration_tests::cart_item_input;

#[test]
fn validated_items_preserve_order_and_fields() {
    let inputs = vec![cart_item_input("p1"), cart_item_input("p2")];
    let items = validate_items(&inputs).expect("valid items");

    let ids: Vec<&str> = items.iter().map(|i| i.product_id.as_str()).collect();
    assert_eq!(ids, ["p1", "p2"]);
    assert!(items.iter().all(|i| i.name == "Shawl"));
    assert!(items.iter().all(|i| i.quantity == 2));
}

#[test]
fn quantity_matrix_rejects_every_non_positive_integer_shape() {
    for bad in [0.0, -1.0, 0.5, f64::NAN, f64::INFINITY] {
        let mut input = cart_item_input("p1");
        input.quantity = Some(bad);
        assert!(
            validate_items(std::slice::from_ref(&input)).is_err(),
            "quantity {bad} should be rejected"
        );
    }

    let mut missing = cart_item_input("p1");
    missing.quantity = None;
    assert!(validate_items(&[missing]).is_err());
}

#[test]
fn enrichment_attaches_image_for_live_product() {
    let product_id = Uuid::new_v4();
    let items = validate_items(&[cart_item_input(&product_id.to_string())]).expect("valid");
    let cart = Cart {
        user_id: "u1".to_owned(),
        items,
        updated_at: Some(chrono::Utc::now()),
    };
    let images = HashMap::from([(product_id, "https://img.example/shawl.jpg".to_owned())]);

    let enriched = attach_images(cart, &images);
    let json = serde_json::to_value(&enriched).expect("serializable");

    assert_eq!(json["items"][0]["image"], "https://img.example/shawl.jpg");
    assert_eq!(json["items"][0]["productId"], product_id.to_string());
    // snapshotted fields ride along unchanged
    assert_eq!(json["items"][0]["price"], 25.0);
    assert_eq!(json["items"][0]["quantity"], 2);
}

#[test]
fn enrichment_degrades_per_item_for_deleted_products() {
    let live = Uuid::new_v4();
    let deleted = Uuid::new_v4();
    let items = validate_items(&[
        cart_item_input(&live.to_string()),
        cart_item_input(&deleted.to_string()),
    ])
    .expect("valid");
    let cart = Cart {
        user_id: "u1".to_owned(),
        items,
        updated_at: Some(chrono::Utc::now()),
    };
    let images = HashMap::from([(live, "https://img.example/live.jpg".to_owned())]);

    let enriched = attach_images(cart, &images);
    let json = serde_json::to_value(&enriched).expect("serializable");

    // both items survive; only the live one carries an image field
    assert_eq!(json["items"].as_array().expect("items").len(), 2);
    assert!(json["items"][0].get("image").is_some());
    assert!(json["items"][1].get("image").is_none());
}

#[test]
fn empty_cart_serializes_without_updated_at() {
    let enriched = attach_images(Cart::empty("u1"), &HashMap::new());
    let json = serde_json::to_value(&enriched).expect("serializable");

    assert_eq!(json, serde_json::json!({"userId": "u1", "items": []}));
}

#[test]
fn delete_on_empty_is_decided_by_the_validated_item_count() {
    // An empty items array validates to an empty list - the save path turns
    // that into a row delete rather than an upsert of an empty document.
    let items: Vec<CartItemInput> = Vec::new();
    let validated = validate_items(&items).expect("empty is valid");
    assert!(validated.is_empty());
}
