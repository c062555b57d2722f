//! Session-related types.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use dogear_core::{CustomerId, Email};

/// Session-stored customer identity.
///
/// Minimal data stored in the session to identify the logged-in customer.
/// Handlers receive this through the `RequireAuth` / `OptionalAuth`
/// extractors rather than any process-global login state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentCustomer {
    /// Customer's database ID.
    pub id: CustomerId,
    /// Customer's email address.
    pub email: Email,
    /// Title-cased display name for page headers.
    pub display_name: String,
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in customer.
    pub const CURRENT_CUSTOMER: &str = "current_customer";
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_current_customer_serde_roundtrip() {
        let customer = CurrentCustomer {
            id: CustomerId::new(9),
            email: Email::parse("jane@example.com").unwrap(),
            display_name: "Jane Doe".to_string(),
        };
        let json = serde_json::to_string(&customer).unwrap();
        let parsed: CurrentCustomer = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, customer.id);
        assert_eq!(parsed.email, customer.email);
        assert_eq!(parsed.display_name, "Jane Doe");
    }
}
