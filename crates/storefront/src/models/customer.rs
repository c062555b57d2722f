//! Customer domain types.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use dogear_core::{CustomerId, Email};

/// A registered customer.
///
/// The password hash lives in the same table but is only fetched by the
/// auth service's credential lookup, never alongside general reads.
#[derive(Debug, Clone, FromRow)]
pub struct Customer {
    /// Unique customer ID.
    pub id: CustomerId,
    /// Email address, stored lowercase.
    pub email: Email,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// Title-cased "First Last" for greeting the customer.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!(
            "{} {}",
            title_case(&self.first_name),
            title_case(&self.last_name)
        )
    }

    /// Single-line shipping address for the confirmation page.
    #[must_use]
    pub fn shipping_address(&self) -> String {
        let street = match &self.address_line2 {
            Some(line2) if !line2.is_empty() => {
                format!("{} {}", self.address_line1, line2)
            }
            _ => self.address_line1.clone(),
        };
        format!(
            "{}, {}, {} {}",
            title_case(&street),
            title_case(&self.city),
            self.state.to_uppercase(),
            self.zip_code
        )
    }
}

/// Fields for inserting a new customer row.
///
/// Produced by the registration service after validation and hashing;
/// string fields are already normalized (email lowercase, phone digits only).
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub email: Email,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

/// Uppercase the first letter of each whitespace-separated word.
fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().collect::<String>() + chars.as_str()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> Customer {
        Customer {
            id: CustomerId::new(1),
            email: Email::parse("jane@example.com").unwrap(),
            first_name: "jane".to_string(),
            last_name: "doe".to_string(),
            phone_number: "5551234567".to_string(),
            address_line1: "12 main st".to_string(),
            address_line2: None,
            city: "springfield".to_string(),
            state: "il".to_string(),
            zip_code: "62701".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_display_name() {
        assert_eq!(sample().display_name(), "Jane Doe");
    }

    #[test]
    fn test_shipping_address_without_line2() {
        assert_eq!(
            sample().shipping_address(),
            "12 Main St, Springfield, IL 62701"
        );
    }

    #[test]
    fn test_shipping_address_with_line2() {
        let mut customer = sample();
        customer.address_line2 = Some("apt 4".to_string());
        assert_eq!(
            customer.shipping_address(),
            "12 Main St Apt 4, Springfield, IL 62701"
        );
    }
}
