//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::db::Repositories;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// repositories and, for the postgres backend, the connection pool.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    repos: Repositories,
    pool: Option<PgPool>,
}

impl AppState {
    /// State for the memory or file backend.
    #[must_use]
    pub fn new(repos: Repositories) -> Self {
        Self {
            inner: Arc::new(AppStateInner { repos, pool: None }),
        }
    }

    /// State for the postgres backend. Readiness checks ping `pool`.
    #[must_use]
    pub fn with_pool(pool: PgPool) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                repos: Repositories::postgres(pool.clone()),
                pool: Some(pool),
            }),
        }
    }

    /// Get a reference to the repositories.
    #[must_use]
    pub fn repos(&self) -> &Repositories {
        &self.inner.repos
    }

    /// Get a reference to the database connection pool, if any.
    #[must_use]
    pub fn pool(&self) -> Option<&PgPool> {
        self.inner.pool.as_ref()
    }
}
