//! Shared domain types for the Dogear bookstore.
//!
//! No I/O lives here: just the newtype IDs, the validating [`types::Email`]
//! wrapper, and decimal price formatting that both the storefront and any
//! future binaries share. Database trait impls are gated behind the
//! `postgres` feature so the crate stays dependency-light elsewhere.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
