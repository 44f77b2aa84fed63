//! Cart route handlers.
//!
//! Carts are keyed by email and need no credentials.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use corner_store_core::{Email, ItemId};

use super::views::CartView;
use crate::error::Result;
use crate::services::CartService;
use crate::state::AppState;

/// Query for `POST /cart`.
#[derive(Debug, Deserialize)]
pub struct AddToCartQuery {
    pub email: Email,
    pub item_id: ItemId,
}

/// Show the cart for an email. Unknown emails get an empty cart.
///
/// GET /cart/{email}
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    email: std::result::Result<Path<Email>, PathRejection>,
) -> Result<Json<CartView>> {
    let Path(email) = email?;
    let cart = CartService::new(state.repos()).get_cart(&email).await?;
    Ok(Json(CartView::from(&cart)))
}

/// Add one unit of an item to a cart.
///
/// POST /cart
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    query: std::result::Result<Query<AddToCartQuery>, QueryRejection>,
) -> Result<StatusCode> {
    let Query(query) = query?;
    CartService::new(state.repos())
        .add_to_cart(&query.email, query.item_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Remove every unit of an item from a cart.
///
/// DELETE /cart/{email}/{item_id}
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    path: std::result::Result<Path<(Email, ItemId)>, PathRejection>,
) -> Result<StatusCode> {
    let Path((email, item_id)) = path?;
    CartService::new(state.repos())
        .remove_from_cart(&email, item_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
