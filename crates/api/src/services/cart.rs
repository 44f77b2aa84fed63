//! Cart service.

use tracing::instrument;

use corner_store_core::{Email, ItemId};

use super::ServiceError;
use crate::db::{CartRepository, ItemRepository, Repositories};
use crate::models::Cart;

/// Per-email cart operations.
pub struct CartService<'a> {
    items: &'a dyn ItemRepository,
    carts: &'a dyn CartRepository,
}

impl<'a> CartService<'a> {
    #[must_use]
    pub fn new(repos: &'a Repositories) -> Self {
        Self {
            items: repos.items(),
            carts: repos.carts(),
        }
    }

    /// The stored cart for `email`, or a new empty one.
    ///
    /// A new cart is not persisted until something is added to it.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the cart cannot be read.
    pub async fn get_cart(&self, email: &Email) -> Result<Cart, ServiceError> {
        Ok(self
            .carts
            .get_by_email(email)
            .await?
            .unwrap_or_else(|| Cart::new(email.clone())))
    }

    /// Append a snapshot of the item to the cart for `email`.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::ItemNotFound` if no item has this ID.
    /// Returns `ServiceError::Repository` on storage failure.
    #[instrument(skip_all, fields(email = %email, item_id = %item_id))]
    pub async fn add_to_cart(&self, email: &Email, item_id: ItemId) -> Result<Cart, ServiceError> {
        let item = self
            .items
            .get(item_id)
            .await?
            .ok_or(ServiceError::ItemNotFound(item_id))?;

        let mut cart = self.get_cart(email).await?;
        cart.add(item);
        self.carts.save(&cart).await?;
        tracing::debug!(entries = cart.items.len(), "Item added to cart");
        Ok(cart)
    }

    /// Remove every entry for the item from the cart for `email`.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::ItemNotInCart` if the cart holds no such entry.
    /// Returns `ServiceError::Repository` on storage failure.
    #[instrument(skip_all, fields(email = %email, item_id = %item_id))]
    pub async fn remove_from_cart(
        &self,
        email: &Email,
        item_id: ItemId,
    ) -> Result<Cart, ServiceError> {
        let mut cart = self.get_cart(email).await?;
        if cart.remove_item(item_id) == 0 {
            return Err(ServiceError::ItemNotInCart(item_id));
        }
        self.carts.save(&cart).await?;
        Ok(cart)
    }
}
