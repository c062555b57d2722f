//! Customer repository for database operations.

use sqlx::PgPool;
use sqlx::Row;

use dogear_core::{CustomerId, Email};

use super::RepositoryError;
use crate::models::{Customer, NewCustomer};

const CUSTOMER_COLUMNS: &str = "customer_id AS id, email, first_name, last_name, phone_number, \
     address_line1, address_line2, city, state, zip_code, created_at";

/// Repository for customer database operations.
pub struct CustomerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CustomerRepository<'a> {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a customer by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE customer_id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(customer)
    }

    /// Get a customer together with their stored password hash.
    ///
    /// Returns `None` if no customer has this email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_with_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(Customer, String)>, RepositoryError> {
        let row = sqlx::query(&format!(
            "SELECT {CUSTOMER_COLUMNS}, password FROM customers WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let hash: String = row.try_get("password")?;
        let customer = build_customer(&row)?;

        Ok(Some((customer, hash)))
    }

    /// Check whether an email address is already registered.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn email_taken(&self, email: &Email) -> Result<bool, RepositoryError> {
        let row = sqlx::query("SELECT 1 FROM customers WHERE email = $1")
            .bind(email)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.is_some())
    }

    /// Insert a new customer row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists (the
    /// unique index is the authority even when `email_taken` raced).
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new: &NewCustomer) -> Result<Customer, RepositoryError> {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            r"
            INSERT INTO customers (
                email, password, first_name, last_name, phone_number,
                address_line1, address_line2, city, state, zip_code, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, NOW())
            RETURNING {CUSTOMER_COLUMNS}
            "
        ))
        .bind(&new.email)
        .bind(&new.password_hash)
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(&new.phone_number)
        .bind(&new.address_line1)
        .bind(&new.address_line2)
        .bind(&new.city)
        .bind(&new.state)
        .bind(&new.zip_code)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("email already registered".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(customer)
    }
}

/// Map a joined row back into a `Customer` (used where extra columns are
/// selected alongside the customer fields).
fn build_customer(row: &sqlx::postgres::PgRow) -> Result<Customer, RepositoryError> {
    use sqlx::FromRow;
    Customer::from_row(row).map_err(RepositoryError::Database)
}
