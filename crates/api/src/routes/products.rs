//! Product route handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::extract::Json;
use crate::models::product::ProductInput;
use crate::services::CatalogService;
use crate::state::AppState;

/// Body for PATCH /products/{id}.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SetPublishedRequest {
    pub published: Option<bool>,
}

/// Body for DELETE /products/{id} responses.
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub success: bool,
}

/// List all products.
///
/// GET /products
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Response> {
    let products = CatalogService::new(state.pool()).list().await?;
    Ok(axum::Json(products).into_response())
}

/// Create a product.
///
/// POST /products
///
/// # Errors
///
/// 400 listing every violated field when `name` or `price` is missing or
/// malformed.
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<ProductInput>,
) -> Result<Response> {
    let product = CatalogService::new(state.pool()).create(body).await?;

    tracing::info!(product_id = %product.id, "product created");

    Ok((StatusCode::CREATED, axum::Json(product)).into_response())
}

/// Get a product by id.
///
/// GET /products/{id}
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response> {
    let product = CatalogService::new(state.pool()).get_by_id(&id).await?;
    Ok(axum::Json(product).into_response())
}

/// Apply a partial update to a product.
///
/// PUT /products/{id}
#[instrument(skip(state, body))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<ProductInput>,
) -> Result<Response> {
    let product = CatalogService::new(state.pool()).update(&id, body).await?;
    Ok(axum::Json(product).into_response())
}

/// Delete a product.
///
/// DELETE /products/{id}
#[instrument(skip(state))]
pub async fn destroy(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response> {
    CatalogService::new(state.pool()).delete(&id).await?;

    tracing::info!(product_id = %id, "product deleted");

    Ok(axum::Json(DeletedResponse { success: true }).into_response())
}

/// Set the publish flag to an absolute value.
///
/// PATCH /products/{id} with `{"published": bool}`
///
/// A single conditional update; unlike the toggle there is no value to race
/// on.
#[instrument(skip(state, body))]
pub async fn set_published(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<SetPublishedRequest>,
) -> Result<Response> {
    let Some(published) = body.published else {
        return Err(AppError::validation("published: is required"));
    };

    let product = CatalogService::new(state.pool())
        .set_published(&id, published)
        .await?;

    Ok(axum::Json(product).into_response())
}

/// Flip the publish flag.
///
/// PATCH /products/{id}/toggle
#[instrument(skip(state))]
pub async fn toggle_published(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    let product = CatalogService::new(state.pool())
        .toggle_published(&id)
        .await?;

    tracing::info!(product_id = %product.id, published = product.published, "publish flag flipped");

    Ok(axum::Json(product).into_response())
}
