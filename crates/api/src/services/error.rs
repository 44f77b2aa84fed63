//! Store service error types.

use thiserror::Error;

use corner_store_core::ItemId;

use crate::db::RepositoryError;

/// Errors returned by the catalog, cart and checkout services.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No item with this ID exists in the catalog.
    #[error("item not found: {0}")]
    ItemNotFound(ItemId),

    /// The cart holds no entry for this item.
    #[error("item not in cart: {0}")]
    ItemNotInCart(ItemId),

    /// Checkout was attempted on an empty cart.
    #[error("cart is empty")]
    CartIsEmpty,

    /// Repository/database error.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}
