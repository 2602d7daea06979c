//! Router-level request/response contract tests.
//!
//! Every request here is resolved by validation or routing before any
//! database query runs, so the full HTTP surface is exercised without a live
//! `PostgreSQL`: status codes, `{"error": ...}` bodies, and the
//! 400-on-malformed-JSON behavior of the custom extractor.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use marigold_api::routes;
use marigold_integration_tests::test_state;

fn app() -> axum::Router {
    routes::routes().with_state(test_state())
}

async fn send(request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app().oneshot(request).await.expect("infallible router");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collect")
        .to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON body")
    };
    (status, json)
}

fn json_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_owned()))
        .expect("request")
}

// =============================================================================
// POST /admin/login
// =============================================================================

#[tokio::test]
async fn login_with_missing_fields_is_400_listing_both() {
    let (status, body) = send(json_post("/admin/login", "{}")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let details = body["details"].as_array().expect("details array");
    assert_eq!(details.len(), 2);
    assert!(details.iter().any(|d| d == "username: is required"));
    assert!(details.iter().any(|d| d == "password: is required"));
}

#[tokio::test]
async fn login_with_missing_password_only_is_400() {
    let (status, body) = send(json_post("/admin/login", r#"{"username": "a@b.c"}"#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "password: is required");
}

#[tokio::test]
async fn login_with_malformed_json_is_400_not_422() {
    let (status, body) = send(json_post("/admin/login", "{not json")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

// =============================================================================
// /products
// =============================================================================

#[tokio::test]
async fn create_product_without_required_fields_is_400_listing_both() {
    let (status, body) = send(json_post("/products", "{}")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let details = body["details"].as_array().expect("details array");
    assert!(details.iter().any(|d| {
        d.as_str()
            .is_some_and(|d| d.starts_with("name:"))
    }));
    assert!(details.iter().any(|d| {
        d.as_str()
            .is_some_and(|d| d.starts_with("price:"))
    }));
}

#[tokio::test]
async fn create_product_with_numeric_price_is_400() {
    // price is decimal-as-string on the wire; a bare number is a shape error
    let (status, _) = send(json_post("/products", r#"{"name": "Shawl", "price": 25}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn product_routes_treat_unparseable_id_as_absent() {
    for request in [
        Request::builder()
            .uri("/products/not-a-uuid")
            .body(Body::empty())
            .expect("request"),
        Request::builder()
            .method("DELETE")
            .uri("/products/not-a-uuid")
            .body(Body::empty())
            .expect("request"),
        Request::builder()
            .method("PATCH")
            .uri("/products/not-a-uuid/toggle")
            .body(Body::empty())
            .expect("request"),
    ] {
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Product not found");
    }
}

#[tokio::test]
async fn set_published_without_flag_is_400() {
    let request = Request::builder()
        .method("PATCH")
        .uri(format!("/products/{}", uuid::Uuid::new_v4()))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .expect("request");

    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "published: is required");
}

// =============================================================================
// /cart
// =============================================================================

#[tokio::test]
async fn get_cart_without_user_id_is_400() {
    let request = Request::builder()
        .uri("/cart")
        .body(Body::empty())
        .expect("request");

    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing userId");
}

#[tokio::test]
async fn save_cart_without_items_array_is_400() {
    let (status, body) = send(json_post("/cart", r#"{"userId": "u1"}"#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "items: must be an array");
}

#[tokio::test]
async fn save_cart_with_invalid_quantity_is_400_naming_the_field() {
    let body_json = r#"{
        "userId": "u1",
        "items": [
            {"productId": "p1", "name": "Shawl", "price": 25, "quantity": 1.5}
        ]
    }"#;
    let (status, body) = send(json_post("/cart", body_json)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "items[0].quantity: must be a positive integer");
}

#[tokio::test]
async fn save_cart_lists_every_violated_item_field() {
    let body_json = r#"{
        "userId": "u1",
        "items": [
            {"productId": "p1", "name": "Shawl", "price": 25, "quantity": 2},
            {"productId": "", "name": "", "price": 10, "quantity": 0}
        ]
    }"#;
    let (status, body) = send(json_post("/cart", body_json)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let details = body["details"].as_array().expect("details array");
    assert_eq!(details.len(), 3);
    assert!(
        details
            .iter()
            .all(|d| d.as_str().is_some_and(|d| d.starts_with("items[1].")))
    );
}
