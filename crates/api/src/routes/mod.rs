//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                  - Liveness check
//! GET    /health/ready            - Readiness check (pings the database)
//!
//! # Catalog
//! GET    /items                   - List items
//! POST   /items                   - Create item (admin)
//! PUT    /items/{item_id}         - Change item (manager or admin)
//!
//! # Cart
//! GET    /cart/{email}            - Show cart
//! POST   /cart                    - Add item to cart
//! DELETE /cart/{email}/{item_id}  - Remove item from cart
//!
//! # Orders
//! POST   /checkout                - Place order from cart
//! GET    /orders/{email}          - Order history
//! ```
//!
//! Inputs arrive in the path and query string. Privileged routes take
//! `email` and `password` query parameters.

pub mod cart;
pub mod items;
pub mod orders;
pub mod views;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

/// Create the catalog routes router.
pub fn item_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(items::index).post(items::create))
        .route("/{item_id}", put(items::update))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(cart::add))
        .route("/{email}", get(cart::show))
        .route("/{email}/{item_id}", delete(cart::remove))
}

/// Create all store routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/items", item_routes())
        .nest("/cart", cart_routes())
        .route("/checkout", post(orders::checkout))
        .route("/orders/{email}", get(orders::index))
}
