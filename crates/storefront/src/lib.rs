//! Dogear storefront library.
//!
//! The binary in `main.rs` only does wiring; everything testable lives
//! here so unit tests can reach the services and models directly.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
