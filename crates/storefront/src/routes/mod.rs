//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                    - Catalog page (requires auth)
//! GET  /health              - Health check
//! GET  /health/ready        - Readiness check (pings the database)
//!
//! # Auth
//! GET  /login               - Login page
//! POST /login               - Login action
//! GET  /register            - Registration page
//! POST /register            - Registration action
//! GET  /logout              - Logout action
//!
//! # Orders
//! POST /create_order        - Place an order (form: items JSON, total_amount)
//! GET  /order/confirmation  - Confirmation page (?order_id=)
//! ```

pub mod auth;
pub mod home;
pub mod orders;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", get(auth::logout))
        .route("/create_order", post(orders::create))
        .route("/order/confirmation", get(orders::confirmation))
}
