//! Type-safe wrappers for the domain's primitive values.

pub mod email;
pub mod id;
pub mod price;

pub use email::{Email, EmailError};
pub use id::*;
pub use price::format_usd;
