//! Checkout service.

use tracing::instrument;

use corner_store_core::Email;

use super::{CartService, ServiceError};
use crate::db::{CartRepository, OrderRepository, Repositories};
use crate::models::Order;

/// Turns carts into orders.
pub struct CheckoutService<'a> {
    carts: CartService<'a>,
    cart_repo: &'a dyn CartRepository,
    orders: &'a dyn OrderRepository,
}

impl<'a> CheckoutService<'a> {
    #[must_use]
    pub fn new(repos: &'a Repositories) -> Self {
        Self {
            carts: CartService::new(repos),
            cart_repo: repos.carts(),
            orders: repos.orders(),
        }
    }

    /// Place an order for the contents of the cart for `email`, then empty
    /// the cart.
    ///
    /// The order is stored before the cart is cleared. If clearing fails the
    /// order stands and the error is returned.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::CartIsEmpty` if there is nothing to order.
    /// Returns `ServiceError::Repository` on storage failure.
    #[instrument(skip_all, fields(email = %email))]
    pub async fn checkout(&self, email: &Email) -> Result<Order, ServiceError> {
        let mut cart = self.carts.get_cart(email).await?;
        if cart.is_empty() {
            return Err(ServiceError::CartIsEmpty);
        }

        let order = Order::from_cart(&cart);
        self.orders.place(&order).await?;

        cart.clear();
        self.cart_repo.save(&cart).await?;

        tracing::info!(
            order_id = %order.id,
            items = order.items.len(),
            total = %order.total(),
            "Order placed"
        );
        Ok(order)
    }

    /// Orders placed for `email`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the orders cannot be read.
    pub async fn orders_for(&self, email: &Email) -> Result<Vec<Order>, ServiceError> {
        Ok(self.orders.list_by_email(email).await?)
    }
}
