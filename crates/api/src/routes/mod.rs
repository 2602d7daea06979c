//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! POST  /admin/login           - Verify admin credentials, set session cookie
//!
//! # Products
//! GET    /products             - List products
//! POST   /products             - Create product
//! GET    /products/{id}        - Product by id
//! PUT    /products/{id}        - Partial update
//! DELETE /products/{id}        - Delete product
//! PATCH  /products/{id}        - Set publish flag to an absolute value
//! PATCH  /products/{id}/toggle - Flip publish flag
//!
//! # Cart
//! GET  /cart?userId=...        - Cart with display enrichment
//! POST /cart                   - Replace cart (empty items deletes it)
//! ```
//!
//! All bodies are JSON; failures are `{"error": ...}` with the status codes
//! of the error taxonomy.

pub mod admin;
pub mod cart;
pub mod products;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::state::AppState;

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/login", post(admin::login))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route(
            "/{id}",
            get(products::show)
                .put(products::update)
                .delete(products::destroy)
                .patch(products::set_published),
        )
        .route("/{id}/toggle", patch(products::toggle_published))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new().route("/", get(cart::show).post(cart::save))
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/admin", admin_routes())
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
}
