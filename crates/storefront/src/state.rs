//! Shared application state.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::StorefrontConfig;

/// State handed to every handler: configuration plus the connection pool.
///
/// Cloning is an `Arc` bump, so axum can hand a copy to each request.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

struct Inner {
    config: StorefrontConfig,
    pool: PgPool,
}

impl AppState {
    #[must_use]
    pub fn new(config: StorefrontConfig, pool: PgPool) -> Self {
        Self {
            inner: Arc::new(Inner { config, pool }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }
}
