//! Core types for Corner Store.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod password;
pub mod price;
pub mod role;

pub use email::{Email, EmailError};
pub use id::*;
pub use password::PasswordDigest;
pub use price::{Price, PriceError};
pub use role::{Role, RoleError};
