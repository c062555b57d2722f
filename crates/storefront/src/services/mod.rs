//! Business-logic services.
//!
//! Services sit between route handlers and the repositories: handlers parse
//! the request, services enforce the domain rules, repositories talk SQL.

pub mod auth;
pub mod orders;
