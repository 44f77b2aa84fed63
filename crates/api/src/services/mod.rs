//! Business logic services.
//!
//! Services borrow the repositories they need from a [`Repositories`] bundle
//! and hold no state of their own, so handlers build one per request.
//!
//! # Services
//!
//! - [`CatalogService`] - listing, creating and editing items
//! - [`CartService`] - per-email carts
//! - [`CheckoutService`] - turning a cart into an order
//! - [`AuthService`] - password login and role checks
//!
//! [`Repositories`]: crate::db::Repositories

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
mod error;

pub use auth::{AuthError, AuthService, Credentials};
pub use cart::CartService;
pub use catalog::CatalogService;
pub use checkout::CheckoutService;
pub use error::ServiceError;
