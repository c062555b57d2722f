//! Postgres-backed session layer.

use sqlx::PgPool;
use tower_sessions::cookie::SameSite;
use tower_sessions::cookie::time::Duration;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::StorefrontConfig;

/// Name of the session cookie.
pub const SESSION_COOKIE_NAME: &str = "dogear_session";

/// Sessions expire after a week without activity.
const INACTIVITY_LIMIT_DAYS: i64 = 7;

/// Build the tower-sessions layer over the shared connection pool.
///
/// The backing table ships with the schema migrations; nothing is created
/// here. Cookies are http-only and `Lax`, and marked secure whenever the
/// site is served over https.
#[must_use]
pub fn create_session_layer(
    pool: &PgPool,
    config: &StorefrontConfig,
) -> SessionManagerLayer<PostgresStore> {
    let store = PostgresStore::new(pool.clone());

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(Duration::days(INACTIVITY_LIMIT_DAYS)))
        .with_secure(config.base_url.starts_with("https://"))
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
