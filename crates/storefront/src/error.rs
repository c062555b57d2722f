//! Top-level request error type with Sentry capture.
//!
//! Handlers return `Result<T, AppError>`; converting into a response picks
//! the status code, swaps internal detail for a client-safe message, and
//! reports server-class failures to Sentry first.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;
use crate::services::orders::OrderError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("database error: {0}")]
    Database(#[from] RepositoryError),

    #[error("order error: {0}")]
    Order(#[from] OrderError),

    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Server-class errors get captured to Sentry; client mistakes do not.
    fn is_server_error(&self) -> bool {
        match self {
            Self::Database(_) | Self::Internal(_) => true,
            Self::Order(err) => matches!(err, OrderError::Database { .. }),
            Self::Auth(err) => matches!(err, AuthError::Repository(_) | AuthError::PasswordHash),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Order(err) => match err {
                OrderError::InvalidFormat(_) | OrderError::QuantityExceedsStock { .. } => {
                    StatusCode::BAD_REQUEST
                }
                OrderError::NotFound(_) => StatusCode::NOT_FOUND,
                OrderError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::EmailTaken => StatusCode::CONFLICT,
                AuthError::Validation(_) => StatusCode::BAD_REQUEST,
                AuthError::Repository(_) | AuthError::PasswordHash => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }

    /// What the client is told. Validation and stock problems are safe to
    /// repeat verbatim; anything server-side collapses to a generic line.
    fn client_message(&self) -> String {
        match self {
            Self::Database(_) | Self::Internal(_) => "Internal server error".to_owned(),
            Self::Order(err) => match err {
                OrderError::InvalidFormat(_) | OrderError::QuantityExceedsStock { .. } => {
                    err.to_string()
                }
                OrderError::NotFound(_) => "Order not found".to_owned(),
                OrderError::Database { .. } => {
                    "An unexpected error occurred while creating the order".to_owned()
                }
            },
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => "Invalid email or password".to_owned(),
                AuthError::EmailTaken => "An account with this email already exists".to_owned(),
                AuthError::Validation(errors) => errors.join(" "),
                AuthError::Repository(_) | AuthError::PasswordHash => {
                    "Authentication error".to_owned()
                }
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        (self.status(), self.client_message()).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Attach the logged-in customer to the Sentry scope so later errors carry
/// who they happened to.
pub fn set_sentry_user(customer_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(customer_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Detach the customer from the Sentry scope on logout.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use dogear_core::OrderId;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_server_errors_are_500() {
        assert_eq!(
            status_of(AppError::Internal("boom".to_owned())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(AppError::Database(RepositoryError::NotFound)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_auth_status_codes() {
        assert_eq!(
            status_of(AppError::Auth(AuthError::InvalidCredentials)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::Auth(AuthError::EmailTaken)),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(AppError::Auth(AuthError::Validation(vec![
                "Invalid first name.".to_owned()
            ]))),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_order_status_codes() {
        assert_eq!(
            status_of(AppError::Order(OrderError::InvalidFormat(
                "empty cart".to_owned()
            ))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::Order(OrderError::NotFound(OrderId::new(1)))),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_stock_message_reaches_the_client_verbatim() {
        let err = AppError::Order(OrderError::QuantityExceedsStock {
            title: "Dune".to_owned(),
            requested: 10,
            available: 5,
        });
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.client_message(),
            "Cannot order 10 copies of 'Dune'. Only 5 available in stock."
        );
    }

    #[test]
    fn test_database_detail_is_hidden() {
        let err = AppError::Database(RepositoryError::Conflict("email".to_owned()));
        assert_eq!(err.client_message(), "Internal server error");
    }
}
