//! Corner Store API server.
//!
//! Serves the catalog, cart and checkout API on port 8000 by default. The
//! storage backend is chosen at startup with `STORE_BACKEND`; see
//! [`corner_store_api::config`] for every setting.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use corner_store_api::config::{ApiConfig, Backend};
use corner_store_api::db::{self, Repositories};
use corner_store_api::defaults::Defaults;
use corner_store_api::state::AppState;
use sentry::integrations::tracing as sentry_tracing;
use sentry::protocol::Event;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &ApiConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            sample_rate: config.sentry_sample_rate,
            traces_sample_rate: config.sentry_traces_sample_rate,
            attach_stacktrace: true,
            before_send: Some(Arc::new(strip_query_string)),
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Drop query strings from request context; they may carry passwords.
fn strip_query_string(mut event: Event<'static>) -> Option<Event<'static>> {
    if let Some(request) = event.request.as_mut() {
        request.query_string = None;
        if let Some(url) = request.url.as_mut() {
            url.set_query(None);
        }
    }
    Some(event)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    // Load configuration from environment (needed for Sentry init)
    let config = ApiConfig::from_env().expect("Failed to load configuration");

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "corner_store_api=info,tower_http=debug".into());

    let json_layer = config
        .log_json
        .then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!config.log_json).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let state = match &config.backend {
        Backend::Memory => AppState::new(Repositories::memory()),
        Backend::File(dir) => AppState::new(Repositories::file(dir)),
        Backend::Postgres(url) => {
            let pool = db::create_pool(url)
                .await
                .expect("Failed to create database pool");
            tracing::info!("Database pool created");
            // NOTE: Migrations are NOT run automatically on startup.
            // Run them explicitly via: cargo run -p corner-store-cli -- migrate
            AppState::with_pool(pool)
        }
    };
    tracing::info!(backend = config.backend.name(), "Repositories ready");

    if config.seed_defaults {
        let defaults =
            Defaults::load(&config.defaults_path).expect("Failed to load default data");
        defaults
            .seed(state.repos())
            .await
            .expect("Failed to seed default data");
    }

    let app = corner_store_api::app(state);

    let addr = config.socket_addr();
    tracing::info!("corner store listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
