//! Corner Store Core - Shared types library.
//!
//! This crate provides common types used across all Corner Store components:
//! - `api` - HTTP API serving the catalog, carts and checkout
//! - `cli` - Command-line tools for migrations, seeding and user management
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, emails, prices, roles and password digests

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
