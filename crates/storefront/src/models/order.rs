//! Order domain types.
//!
//! Orders and their line items are created together in one transaction and
//! never mutated afterward.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

use dogear_core::{CustomerId, OrderId};

/// An order header row.
#[derive(Debug, Clone, FromRow)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub order_date: DateTime<Utc>,
    /// Sum of line subtotals, exact decimal.
    pub total_amount: Decimal,
}

/// A line item as displayed on the confirmation page.
#[derive(Debug, Clone, FromRow)]
pub struct OrderLine {
    pub title: String,
    pub quantity: i32,
    /// Unit price at the time the order was placed.
    pub price: Decimal,
}

impl OrderLine {
    /// Line subtotal (price x quantity).
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Everything the confirmation page needs about one order.
#[derive(Debug, Clone)]
pub struct OrderDetails {
    pub id: OrderId,
    pub customer_name: String,
    pub shipping_address: String,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderLine>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_line_subtotal_exact() {
        let line = OrderLine {
            title: "Dune".to_string(),
            quantity: 3,
            price: "9.99".parse().unwrap(),
        };
        assert_eq!(line.subtotal(), "29.97".parse::<Decimal>().unwrap());
    }
}
