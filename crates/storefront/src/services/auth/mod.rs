//! Authentication and registration service.
//!
//! Wraps the customer repository with argon2 password hashing, login
//! verification, and batch registration validation.

mod error;
pub mod validation;

pub use error::AuthError;
pub use validation::{RegisterForm, validate_registration};

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;

use dogear_core::Email;

use crate::db::RepositoryError;
use crate::db::customers::CustomerRepository;
use crate::models::{Customer, NewCustomer};

/// Authentication service.
pub struct AuthService<'a> {
    customers: CustomerRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            customers: CustomerRepository::new(pool),
        }
    }

    /// Log in with email and password.
    ///
    /// Unknown email and wrong password both come back as
    /// `InvalidCredentials`; to keep the two paths from being
    /// distinguishable by timing, a throwaway hash is computed when the
    /// email has no account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` on any credential failure,
    /// `AuthError::Repository` if the lookup itself fails.
    pub async fn login(&self, email: &str, password: &str) -> Result<Customer, AuthError> {
        // Normalizes (trim + lowercase); a malformed email can't match anyway
        let Ok(email) = Email::parse(email) else {
            return Err(AuthError::InvalidCredentials);
        };

        let Some((customer, stored_hash)) =
            self.customers.get_with_password_hash(&email).await?
        else {
            let _ = hash_password(password);
            return Err(AuthError::InvalidCredentials);
        };

        verify_password(password, &stored_hash)?;

        tracing::info!(customer_id = %customer.id, "customer logged in");
        Ok(customer)
    }

    /// Register a new customer.
    ///
    /// Validates the whole form first and returns every violated rule at
    /// once (including a taken email) so the page can show the full list.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` with all violated rules,
    /// `AuthError::EmailTaken` if the unique index fires despite the
    /// pre-check (concurrent registration), or `AuthError::Repository` for
    /// other database failures.
    pub async fn register(&self, form: &RegisterForm) -> Result<Customer, AuthError> {
        let mut errors = validate_registration(form);

        // Uniqueness joins the batch only when the address itself is well-formed
        let email = Email::parse(&form.email).ok();
        if let Some(ref email) = email
            && errors.iter().all(|e| e != "Invalid email format.")
            && self.customers.email_taken(email).await?
        {
            errors.push("Email is already registered.".to_string());
        }

        if !errors.is_empty() {
            return Err(AuthError::Validation(errors));
        }

        // Validation guaranteed a parseable email above
        let email = email.ok_or_else(|| {
            AuthError::Validation(vec!["Invalid email format.".to_string()])
        })?;

        let password_hash = hash_password(&form.password)?;
        let new = NewCustomer {
            email,
            password_hash,
            first_name: form.first_name.trim().to_lowercase(),
            last_name: form.last_name.trim().to_lowercase(),
            phone_number: validation::normalize_phone(&form.phone_number),
            address_line1: form.address_line1.trim().to_lowercase(),
            address_line2: match form.address_line2.trim() {
                "" => None,
                line2 => Some(line2.to_lowercase()),
            },
            city: form.city.trim().to_lowercase(),
            state: form.state.trim().to_lowercase(),
            zip_code: form.zip_code.trim().to_string(),
        };

        let customer = self.customers.create(&new).await.map_err(|e| match e {
            RepositoryError::Conflict(_) => AuthError::EmailTaken,
            other => AuthError::Repository(other),
        })?;

        tracing::info!(customer_id = %customer.id, "customer registered");
        Ok(customer)
    }
}

/// Hash a password with argon2 and a fresh random salt.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AuthError::PasswordHash)?;
    Ok(hash.to_string())
}

/// Verify a password against a stored argon2 PHC hash.
fn verify_password(password: &str, stored_hash: &str) -> Result<(), AuthError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|_| AuthError::PasswordHash)?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("Sup3rSecret!").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("Sup3rSecret!", &hash).is_ok());
    }

    #[test]
    fn test_wrong_password_rejected() {
        let hash = hash_password("Sup3rSecret!").unwrap();
        assert!(matches!(
            verify_password("WrongPassword1!", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("Sup3rSecret!").unwrap();
        let b = hash_password("Sup3rSecret!").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_garbage_stored_hash_is_not_a_credential_error() {
        assert!(matches!(
            verify_password("anything", "not-a-phc-string"),
            Err(AuthError::PasswordHash)
        ));
    }
}
