//! Book catalog domain type.

use rust_decimal::Decimal;
use sqlx::FromRow;

use dogear_core::BookId;

/// A book in the catalog.
///
/// Book rows are seeded externally; the storefront only reads them and
/// decrements `stock_quantity` when orders are placed.
#[derive(Debug, Clone, FromRow)]
pub struct Book {
    /// Unique book ID.
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub genre: String,
    /// Unit price in dollars, exact decimal.
    pub price: Decimal,
    /// Purchasable units remaining. Never negative.
    pub stock_quantity: i32,
    pub description: Option<String>,
}

impl Book {
    /// Whether any stock remains.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock_quantity > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_stock() {
        let mut book = Book {
            id: BookId::new(1),
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            genre: "Science Fiction".to_string(),
            price: Decimal::new(999, 2),
            stock_quantity: 5,
            description: None,
        };
        assert!(book.in_stock());
        book.stock_quantity = 0;
        assert!(!book.in_stock());
    }
}
