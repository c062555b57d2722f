//! Order creation and retrieval.
//!
//! `create_order` is the single canonical order transaction: cart
//! validation, header and line-item inserts, and stock decrements all run
//! on one connection inside one transaction. Stock is decremented with a
//! guarded UPDATE (`... AND stock_quantity >= $qty`, checking the affected
//! row count) so concurrent orders for the same book can never oversell,
//! regardless of what the earlier read saw.

mod error;

pub use error::OrderError;

use error::db;
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{PgPool, Row};

use dogear_core::{CustomerId, OrderId};

use crate::db::customers::CustomerRepository;
use crate::models::{Order, OrderDetails, OrderLine};

/// One cart line as submitted by the client.
///
/// Deserialized from the `items` form field (a JSON array); serde rejects
/// non-integer ids and quantities outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CartItem {
    pub book_id: i32,
    pub quantity: i32,
}

/// Order service owning the order transaction and confirmation reads.
pub struct OrderService<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderService<'a> {
    /// Create a new order service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create an order for `customer_id` from the JSON-encoded cart.
    ///
    /// All-or-nothing: the header, every line item, and every stock
    /// decrement commit together or not at all. The client's
    /// `claimed_total` is informational; a mismatch with the authoritative
    /// decimal total is logged, never fatal.
    ///
    /// # Errors
    ///
    /// - `OrderError::InvalidFormat` for a malformed cart, unknown
    ///   customer, or unknown book
    /// - `OrderError::QuantityExceedsStock` when a line asks for more than
    ///   the book has, carrying title/requested/available
    /// - `OrderError::Database` when persistence fails; the transaction is
    ///   rolled back before the error surfaces
    pub async fn create_order(
        &self,
        customer_id: CustomerId,
        items_json: &str,
        claimed_total: Option<&str>,
    ) -> Result<OrderId, OrderError> {
        let items = parse_items(items_json)?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db("opening transaction"))?;

        // Customer must exist before anything is written
        let customer_row = sqlx::query("SELECT 1 FROM customers WHERE customer_id = $1")
            .bind(customer_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(db("checking customer"))?;
        if customer_row.is_none() {
            return Err(OrderError::InvalidFormat(format!(
                "customer {customer_id} does not exist"
            )));
        }

        // Look up each book and pre-check stock. The guarded UPDATE below is
        // the authority under concurrency; this pass exists to reject
        // obviously bad carts with a precise message before writing anything.
        let mut priced = Vec::with_capacity(items.len());
        for item in &items {
            let row = sqlx::query(
                "SELECT title, price, stock_quantity FROM books WHERE book_id = $1",
            )
            .bind(item.book_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(db("loading book"))?;

            let Some(row) = row else {
                return Err(OrderError::InvalidFormat(format!(
                    "book {} does not exist",
                    item.book_id
                )));
            };

            let title: String = row.try_get("title").map_err(db("loading book"))?;
            let price: Decimal = row.try_get("price").map_err(db("loading book"))?;
            let available: i32 = row
                .try_get("stock_quantity")
                .map_err(db("loading book"))?;

            if item.quantity > available {
                return Err(OrderError::QuantityExceedsStock {
                    title,
                    requested: item.quantity,
                    available,
                });
            }

            priced.push((price, item.quantity));
        }

        let total = order_total(&priced);
        if let Some(claimed) = claimed_total.and_then(|t| t.parse::<Decimal>().ok())
            && claimed != total
        {
            tracing::warn!(
                %customer_id,
                claimed = %claimed,
                authoritative = %total,
                "client-supplied total disagrees with computed total"
            );
        }

        let order_id: OrderId = sqlx::query_scalar(
            r"
            INSERT INTO orders (customer_id, order_date, total_amount)
            VALUES ($1, NOW(), $2)
            RETURNING order_id
            ",
        )
        .bind(customer_id)
        .bind(total)
        .fetch_one(&mut *tx)
        .await
        .map_err(db("inserting order header"))?;

        for item in &items {
            sqlx::query("INSERT INTO order_items (order_id, book_id, quantity) VALUES ($1, $2, $3)")
                .bind(order_id)
                .bind(item.book_id)
                .bind(item.quantity)
                .execute(&mut *tx)
                .await
                .map_err(db("inserting order items"))?;

            // Guarded decrement: the WHERE clause re-checks stock atomically
            // with the write, so a concurrent order that got there first makes
            // this affect zero rows instead of driving stock negative.
            let result = sqlx::query(
                r"
                UPDATE books
                SET stock_quantity = stock_quantity - $1
                WHERE book_id = $2 AND stock_quantity >= $1
                ",
            )
            .bind(item.quantity)
            .bind(item.book_id)
            .execute(&mut *tx)
            .await
            .map_err(db("updating stock"))?;

            if result.rows_affected() == 0 {
                // Lost the race since the pre-check; re-read for the message
                let row = sqlx::query(
                    "SELECT title, stock_quantity FROM books WHERE book_id = $1",
                )
                .bind(item.book_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(db("updating stock"))?;

                let title: String = row.try_get("title").map_err(db("updating stock"))?;
                let available: i32 = row
                    .try_get("stock_quantity")
                    .map_err(db("updating stock"))?;

                tx.rollback().await.map_err(db("rolling back"))?;
                return Err(OrderError::QuantityExceedsStock {
                    title,
                    requested: item.quantity,
                    available,
                });
            }
        }

        tx.commit().await.map_err(db("committing order"))?;

        tracing::info!(%order_id, %customer_id, total = %total, "order created");
        Ok(order_id)
    }

    /// Load the confirmation-page view of an order.
    ///
    /// Only the owning customer can see an order; anyone else gets the same
    /// `NotFound` as a nonexistent ID.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::NotFound` or `OrderError::Database`.
    pub async fn get_confirmation(
        &self,
        order_id: OrderId,
        customer_id: CustomerId,
    ) -> Result<OrderDetails, OrderError> {
        let order = sqlx::query_as::<_, Order>(
            r"
            SELECT order_id AS id, customer_id, order_date, total_amount
            FROM orders
            WHERE order_id = $1
            ",
        )
        .bind(order_id)
        .fetch_optional(self.pool)
        .await
        .map_err(db("loading order"))?
        .ok_or(OrderError::NotFound(order_id))?;

        if order.customer_id != customer_id {
            return Err(OrderError::NotFound(order_id));
        }

        let customer = CustomerRepository::new(self.pool)
            .get_by_id(order.customer_id)
            .await
            .map_err(db("loading customer"))?
            .ok_or_else(|| {
                db("loading customer")(crate::db::RepositoryError::DataCorruption(format!(
                    "order {order_id} references missing customer"
                )))
            })?;

        let items = sqlx::query_as::<_, OrderLine>(
            r"
            SELECT b.title, oi.quantity, b.price
            FROM order_items oi
            JOIN books b ON b.book_id = oi.book_id
            WHERE oi.order_id = $1
            ORDER BY oi.order_item_id
            ",
        )
        .bind(order_id)
        .fetch_all(self.pool)
        .await
        .map_err(db("loading order items"))?;

        Ok(OrderDetails {
            id: order.id,
            customer_name: customer.display_name(),
            shipping_address: customer.shipping_address(),
            total: order.total_amount,
            created_at: order.order_date,
            items,
        })
    }
}

/// Parse and validate the JSON cart.
///
/// # Errors
///
/// Returns `OrderError::InvalidFormat` for malformed JSON, an empty list,
/// or any non-positive id/quantity.
pub fn parse_items(items_json: &str) -> Result<Vec<CartItem>, OrderError> {
    let items: Vec<CartItem> = serde_json::from_str(items_json)
        .map_err(|e| OrderError::InvalidFormat(format!("cart is not a valid item list: {e}")))?;

    if items.is_empty() {
        return Err(OrderError::InvalidFormat(
            "order contains no items".to_string(),
        ));
    }

    for item in &items {
        if item.book_id <= 0 {
            return Err(OrderError::InvalidFormat(format!(
                "book id {} is not a positive integer",
                item.book_id
            )));
        }
        if item.quantity <= 0 {
            return Err(OrderError::InvalidFormat(format!(
                "quantity {} is not a positive integer",
                item.quantity
            )));
        }
    }

    Ok(items)
}

/// Authoritative order total: sum of price x quantity in exact decimals.
#[must_use]
pub fn order_total(lines: &[(Decimal, i32)]) -> Decimal {
    lines
        .iter()
        .map(|(price, qty)| *price * Decimal::from(*qty))
        .sum()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_items_ok() {
        let items = parse_items(r#"[{"book_id": 1, "quantity": 2}]"#).unwrap();
        assert_eq!(
            items,
            vec![CartItem {
                book_id: 1,
                quantity: 2
            }]
        );
    }

    #[test]
    fn test_parse_items_extra_keys_tolerated() {
        let items =
            parse_items(r#"[{"book_id": 1, "quantity": 2, "note": "gift"}]"#).unwrap();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_parse_items_malformed_json() {
        assert!(matches!(
            parse_items("not json"),
            Err(OrderError::InvalidFormat(_))
        ));
        assert!(matches!(
            parse_items(r#"{"book_id": 1}"#),
            Err(OrderError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_parse_items_non_integer_quantity() {
        assert!(matches!(
            parse_items(r#"[{"book_id": 1, "quantity": 1.5}]"#),
            Err(OrderError::InvalidFormat(_))
        ));
        assert!(matches!(
            parse_items(r#"[{"book_id": 1, "quantity": "2"}]"#),
            Err(OrderError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_parse_items_missing_field() {
        assert!(matches!(
            parse_items(r#"[{"book_id": 1}]"#),
            Err(OrderError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_parse_items_empty_list() {
        assert!(matches!(
            parse_items("[]"),
            Err(OrderError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_parse_items_non_positive() {
        assert!(matches!(
            parse_items(r#"[{"book_id": 1, "quantity": 0}]"#),
            Err(OrderError::InvalidFormat(_))
        ));
        assert!(matches!(
            parse_items(r#"[{"book_id": -1, "quantity": 1}]"#),
            Err(OrderError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_order_total_exact_decimal() {
        // 9.99 * 2 = 19.98, exactly
        let total = order_total(&[("9.99".parse().unwrap(), 2)]);
        assert_eq!(total, "19.98".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_order_total_multiple_lines() {
        let total = order_total(&[
            ("9.99".parse().unwrap(), 2),
            ("14.50".parse().unwrap(), 1),
        ]);
        assert_eq!(total, "34.48".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_order_total_empty() {
        assert_eq!(order_total(&[]), Decimal::ZERO);
    }
}
