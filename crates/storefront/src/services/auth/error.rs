//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid credentials (wrong password or unknown email).
    ///
    /// Deliberately a single variant: the caller must not be able to tell
    /// which of the two happened.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Email is already registered.
    #[error("email already registered")]
    EmailTaken,

    /// One or more registration rules were violated. Carries every violated
    /// rule so the form can show them all at once.
    #[error("registration validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
