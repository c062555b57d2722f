//! Order processing error types.

use thiserror::Error;

use dogear_core::OrderId;

use crate::db::RepositoryError;

/// Errors that can occur while creating or retrieving an order.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The submitted cart is malformed or references unknown rows
    /// (bad JSON, non-positive quantity, unknown customer or book).
    #[error("invalid order format: {0}")]
    InvalidFormat(String),

    /// Requested quantity exceeds the available stock for one book.
    #[error("Cannot order {requested} copies of '{title}'. Only {available} available in stock.")]
    QuantityExceedsStock {
        title: String,
        requested: i32,
        available: i32,
    },

    /// The order does not exist (or belongs to someone else).
    #[error("order {0} not found")]
    NotFound(OrderId),

    /// A persistence operation failed; the transaction was rolled back.
    #[error("database error while {operation}: {source}")]
    Database {
        operation: &'static str,
        #[source]
        source: RepositoryError,
    },
}

/// Wrap a lower-level error as a `Database` variant with context.
pub(super) fn db<E>(operation: &'static str) -> impl FnOnce(E) -> OrderError
where
    E: Into<RepositoryError>,
{
    move |e| OrderError::Database {
        operation,
        source: e.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_exceeds_stock_message() {
        let err = OrderError::QuantityExceedsStock {
            title: "Dune".to_string(),
            requested: 10,
            available: 5,
        };
        assert_eq!(
            err.to_string(),
            "Cannot order 10 copies of 'Dune'. Only 5 available in stock."
        );
    }

    #[test]
    fn test_database_error_carries_operation() {
        let err = db("inserting order header")(sqlx::Error::PoolClosed);
        assert!(err.to_string().contains("inserting order header"));
    }
}
