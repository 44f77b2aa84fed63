//! Integration tests for Corner Store.
//!
//! Each test starts the full application on an ephemeral local port and talks
//! to it over HTTP with `reqwest`.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p corner-store-integration-tests
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use corner_store_api::db::Repositories;
use corner_store_api::defaults::Defaults;
use corner_store_api::state::AppState;
use reqwest::Client;
use tokio::task::JoinHandle;

/// Built-in admin credentials.
pub const ADMIN: [(&str, &str); 2] = [("email", "admin@example.com"), ("password", "god")];
/// Built-in manager credentials.
pub const MANAGER: [(&str, &str); 2] = [("email", "ivan@example.com"), ("password", "test")];
/// Built-in plain user, who has no password.
pub const USER: [(&str, &str); 2] = [("email", "vasya@example.com"), ("password", "")];

/// A running API server.
///
/// The server task is aborted when this value is dropped.
pub struct TestServer {
    pub client: Client,
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server over a memory store seeded with the built-in users.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot be started.
    pub async fn start() -> Self {
        Self::with_repositories(Repositories::memory()).await
    }

    /// Start a server over JSON documents in `dir`, seeding built-in users.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot be started.
    pub async fn with_data_dir(dir: impl Into<PathBuf>) -> Self {
        Self::with_repositories(Repositories::file(dir)).await
    }

    /// Start a server over `repos`, seeding built-in users.
    ///
    /// # Panics
    ///
    /// Panics if seeding fails or no local port can be bound.
    pub async fn with_repositories(repos: Repositories) -> Self {
        Defaults::builtin()
            .seed(&repos)
            .await
            .unwrap_or_else(|e| panic!("failed to seed defaults: {e}"));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .unwrap_or_else(|e| panic!("failed to bind: {e}"));
        let addr = listener
            .local_addr()
            .unwrap_or_else(|e| panic!("no local address: {e}"));

        let app = corner_store_api::app(AppState::new(repos));
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            client: Client::new(),
            addr,
            handle,
        }
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// `path` with percent-encoded query parameters appended.
#[must_use]
pub fn with_query(path: &str, params: &[(&str, &str)]) -> String {
    let query = params
        .iter()
        .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{path}?{query}")
}

/// A fresh directory under the system temp dir.
#[must_use]
pub fn temp_data_dir() -> PathBuf {
    std::env::temp_dir().join(format!("corner-store-it-{}", uuid::Uuid::new_v4()))
}
