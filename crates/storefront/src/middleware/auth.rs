//! Session-backed authentication extractors.
//!
//! Handlers declare the customer they need as an argument instead of
//! consulting any process-global login state; the extractors pull the
//! identity out of the request's session on every call.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::{CurrentCustomer, session_keys};

/// Read the logged-in customer out of the request's session, if any.
async fn session_customer(parts: &Parts) -> Option<CurrentCustomer> {
    let session = parts.extensions.get::<Session>()?;
    session
        .get::<CurrentCustomer>(session_keys::CURRENT_CUSTOMER)
        .await
        .ok()
        .flatten()
}

/// Extractor for pages that require a logged-in customer.
///
/// Rejects with a redirect to `/login` when nobody is logged in, so every
/// protected page gets the same entry flow without per-handler checks.
///
/// ```rust,ignore
/// async fn catalog(RequireAuth(customer): RequireAuth) -> impl IntoResponse {
///     format!("Welcome back, {}", customer.display_name)
/// }
/// ```
pub struct RequireAuth(pub CurrentCustomer);

/// Rejection produced when [`RequireAuth`] finds no customer.
pub enum AuthRejection {
    /// Send the browser to the login page.
    RedirectToLogin,
    /// No session layer is installed at all; nothing sensible to redirect to.
    Unauthorized,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/login").into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if parts.extensions.get::<Session>().is_none() {
            return Err(AuthRejection::Unauthorized);
        }

        session_customer(parts)
            .await
            .map(Self)
            .ok_or(AuthRejection::RedirectToLogin)
    }
}

/// Extractor that yields the customer when present and `None` otherwise,
/// never rejecting the request.
pub struct OptionalAuth(pub Option<CurrentCustomer>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(session_customer(parts).await))
    }
}

/// Store the customer identity in the session after a successful login.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_customer(
    session: &Session,
    customer: &CurrentCustomer,
) -> Result<(), tower_sessions::session::Error> {
    session
        .insert(session_keys::CURRENT_CUSTOMER, customer)
        .await
}

/// Drop the customer identity from the session on logout.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_customer(
    session: &Session,
) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentCustomer>(session_keys::CURRENT_CUSTOMER)
        .await?;
    Ok(())
}
