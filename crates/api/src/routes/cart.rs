//! Cart route handlers.

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::extract::Json;
use crate::models::cart::CartItemInput;
use crate::services::CartService;
use crate::state::AppState;

/// Query parameters for GET /cart.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CartQuery {
    pub user_id: Option<String>,
}

/// Body for POST /cart.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SaveCartRequest {
    pub user_id: Option<String>,
    pub items: Option<Vec<CartItemInput>>,
}

/// Get the cart for a user, enriched with product images.
///
/// GET /cart?userId=...
///
/// A user without a stored cart gets an empty one; items whose product no
/// longer exists come back without an `image` field.
///
/// # Errors
///
/// 400 when `userId` is missing.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Query(query): Query<CartQuery>) -> Result<Response> {
    let user_id = query
        .user_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::validation("Missing userId"))?;

    let cart = CartService::new(state.pool()).get_enriched(&user_id).await?;

    Ok(axum::Json(cart).into_response())
}

/// Save (fully replace) the cart for a user.
///
/// POST /cart with `{"userId": ..., "items": [...]}`
///
/// An empty `items` array deletes the stored cart and returns the empty
/// cart. The response is the stored document - enrichment happens only on
/// read.
///
/// # Errors
///
/// 400 listing every violated field when the body shape is invalid.
#[instrument(skip(state, body))]
pub async fn save(
    State(state): State<AppState>,
    Json(body): Json<SaveCartRequest>,
) -> Result<Response> {
    let mut violations = Vec::new();

    let user_id = match body.user_id.as_deref() {
        Some(id) if !id.is_empty() => Some(id.to_owned()),
        _ => {
            violations.push("userId: must be a non-empty string".to_owned());
            None
        }
    };

    let items = match body.items {
        Some(items) => Some(items),
        None => {
            violations.push("items: must be an array".to_owned());
            None
        }
    };

    let (Some(user_id), Some(items)) = (user_id, items) else {
        return Err(AppError::Validation { violations });
    };

    let cart = CartService::new(state.pool()).save(&user_id, &items).await?;

    Ok(axum::Json(cart).into_response())
}
