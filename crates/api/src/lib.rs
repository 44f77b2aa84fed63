//! Corner Store API library.
//!
//! A small store: an item catalog, per-email carts and checkout into orders.
//! Item changes are restricted to managers and admins, who authenticate with
//! an email and a salted SHA-512 password digest.
//!
//! The crate is split in layers:
//!
//! - [`routes`] - axum handlers and JSON views
//! - [`services`] - business rules over repository traits
//! - [`db`] - repository traits and the memory, file and postgres backends
//! - [`defaults`] - default users, items and carts seeded at startup

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod defaults;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use std::time::Duration;

use axum::{Router, extract::State, http::StatusCode, routing::get};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use state::AppState;

/// Build the application router with its middleware stack.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes::routes())
        .layer(axum::middleware::from_fn(
            middleware::request_id_middleware,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        // Credentials travel in the query string; only the path is recorded.
                        uri = %request.uri().path(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>, latency: Duration, span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// With the postgres backend, verifies database connectivity and returns
/// 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    let Some(pool) = state.pool() else {
        return StatusCode::OK;
    };
    match sqlx::query("SELECT 1").fetch_one(pool).await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::Method;

    use crate::middleware::REQUEST_ID_HEADER;
    use crate::routes::testing::TestApp;

    #[tokio::test]
    async fn test_health() {
        let app = TestApp::seeded().await;
        let (status, _) = app.send(Method::GET, "/health/ready").await;
        assert_eq!(status, 200);
    }

    #[tokio::test]
    async fn test_responses_carry_request_id() {
        use axum::body::Body;
        use tower::ServiceExt;

        let router = crate::app(crate::state::AppState::new(
            crate::db::Repositories::memory(),
        ));
        let response = router
            .oneshot(
                axum::http::Request::get("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    }

    #[tokio::test]
    async fn test_request_logs_omit_query_credentials() {
        use std::sync::{Arc, Mutex};

        #[derive(Clone, Default)]
        struct Capture(Arc<Mutex<Vec<u8>>>);

        impl std::io::Write for Capture {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let app = TestApp::seeded().await;
        app.create_item("x", "1").await;
        let (status, _) = app
            .send(
                Method::PUT,
                &format!(
                    "/items/{}?email=vasya%40example.com&password=hunter2&price=2",
                    uuid::Uuid::new_v4()
                ),
            )
            .await;
        assert_eq!(status, 401);

        let out = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        assert!(out.contains("Item created"), "nothing captured: {out}");
        assert!(out.contains("uri=/items"));
        assert!(!out.contains("password=god"), "password leaked: {out}");
        assert!(!out.contains("hunter2"), "password leaked: {out}");
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let app = TestApp::seeded().await;
        let (status, _) = app.send(Method::GET, "/nope").await;
        assert_eq!(status, 404);
    }
}
