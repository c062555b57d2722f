//! Domain models for the storefront.

pub mod book;
pub mod customer;
pub mod order;
pub mod session;

pub use book::Book;
pub use customer::{Customer, NewCustomer};
pub use order::{Order, OrderDetails, OrderLine};
pub use session::{CurrentCustomer, keys as session_keys};
