//! HTTP middleware stack for the API.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (capture errors, one hub per request)
//! 2. `TraceLayer` (request span with method, path, status and latency)
//! 3. Request ID (add unique ID to each request)

pub mod request_id;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
