//! Domain models for the store.
//!
//! These types represent validated domain objects, separate from the database
//! row types in [`crate::db`] and the wire types in [`crate::routes`].

pub mod cart;
pub mod item;
pub mod order;
pub mod user;

pub use cart::Cart;
pub use item::{Item, ItemChanges, NewItem};
pub use order::Order;
pub use user::User;
