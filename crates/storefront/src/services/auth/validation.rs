//! Registration form validation.
//!
//! Every rule is checked and every violation collected, so the registration
//! page can show the complete list instead of one error per round trip.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

/// Maximum length for address lines.
const MAX_ADDRESS_LEN: usize = 100;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

// The regex crate has no lookahead, so password strength is checked with
// character-class scans instead of the usual (?=...) pattern.
static NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"^[A-Za-z\s'-]{1,50}$").unwrap()
});
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+$").unwrap()
});
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"^\d{10,15}$").unwrap()
});
static STATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"^[A-Za-z]{2}$").unwrap()
});
static ZIP_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"^\d{5}(-\d{4})?$").unwrap()
});

/// Registration form fields as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
    pub confirm_password: String,
    pub address_line1: String,
    #[serde(default)]
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

/// Validate a registration form.
///
/// Returns every violated rule as a human-readable message; an empty vec
/// means the form passed. Email uniqueness is a database concern and is
/// checked by the caller.
#[must_use]
pub fn validate_registration(form: &RegisterForm) -> Vec<String> {
    let mut errors = Vec::new();

    if !is_valid_name(&form.first_name) {
        errors.push("Invalid first name.".to_string());
    }
    if !is_valid_name(&form.last_name) {
        errors.push("Invalid last name.".to_string());
    }

    if !is_valid_email(&form.email) {
        errors.push("Invalid email format.".to_string());
    }

    if !is_valid_phone(&form.phone_number) {
        errors.push("Invalid phone number. Use digits only, 10-15 digits.".to_string());
    }

    if !is_strong_password(&form.password) {
        errors.push(
            "Password must be at least 8 characters with an uppercase letter, \
             a lowercase letter, a number, and a special character."
                .to_string(),
        );
    } else if form.password != form.confirm_password {
        errors.push("Passwords do not match.".to_string());
    }

    if form.address_line1.is_empty() || form.address_line1.len() > MAX_ADDRESS_LEN {
        errors.push("Invalid address line 1.".to_string());
    }
    if form.address_line2.len() > MAX_ADDRESS_LEN {
        errors.push("Address line 2 too long.".to_string());
    }
    if !is_valid_name(&form.city) {
        errors.push("Invalid city name.".to_string());
    }
    if !is_valid_state(&form.state) {
        errors.push("Invalid state. Use 2-letter abbreviation.".to_string());
    }
    if !is_valid_zip(&form.zip_code) {
        errors.push("Invalid ZIP code format.".to_string());
    }

    errors
}

/// Strip common phone formatting (hyphens, spaces, parentheses, dots).
#[must_use]
pub fn normalize_phone(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| !matches!(c, '-' | '(' | ')' | '.' | ' '))
        .collect()
}

fn is_valid_name(name: &str) -> bool {
    NAME_RE.is_match(name)
}

fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(&normalize_phone(phone))
}

fn is_valid_state(state: &str) -> bool {
    STATE_RE.is_match(state)
}

fn is_valid_zip(zip: &str) -> bool {
    ZIP_RE.is_match(zip)
}

/// At least 8 characters with an uppercase letter, a lowercase letter,
/// a digit, and a non-alphanumeric character.
fn is_strong_password(password: &str) -> bool {
    password.len() >= MIN_PASSWORD_LENGTH
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| !c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> RegisterForm {
        RegisterForm {
            first_name: "Jane".to_string(),
            last_name: "O'Brien-Smith".to_string(),
            email: "jane@example.com".to_string(),
            phone_number: "(555) 123-4567".to_string(),
            password: "Sup3rSecret!".to_string(),
            confirm_password: "Sup3rSecret!".to_string(),
            address_line1: "12 Main St".to_string(),
            address_line2: String::new(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            zip_code: "62701".to_string(),
        }
    }

    #[test]
    fn test_valid_form_passes() {
        assert!(validate_registration(&valid_form()).is_empty());
    }

    #[test]
    fn test_plus_four_zip_accepted() {
        let mut form = valid_form();
        form.zip_code = "62701-1234".to_string();
        assert!(validate_registration(&form).is_empty());
    }

    #[test]
    fn test_invalid_name() {
        let mut form = valid_form();
        form.first_name = "J4ne".to_string();
        assert_eq!(validate_registration(&form), vec!["Invalid first name."]);

        form.first_name = "x".repeat(51);
        assert_eq!(validate_registration(&form), vec!["Invalid first name."]);
    }

    #[test]
    fn test_invalid_email() {
        let mut form = valid_form();
        form.email = "not-an-email".to_string();
        assert_eq!(validate_registration(&form), vec!["Invalid email format."]);
    }

    #[test]
    fn test_phone_formatting_stripped() {
        assert_eq!(normalize_phone("(555) 123-4567"), "5551234567");
        let mut form = valid_form();
        form.phone_number = "555-123".to_string();
        assert_eq!(validate_registration(&form).len(), 1);
    }

    #[test]
    fn test_weak_passwords_rejected() {
        for weak in ["alllowercase1!", "ALLUPPER1!", "NoDigits!!", "NoSpecial11", "Ab1!"] {
            assert!(!is_strong_password(weak), "{weak} should be weak");
        }
        // exactly 8 chars with all four classes is enough
        assert!(is_strong_password("short1!A"));
    }

    #[test]
    fn test_password_mismatch_only_reported_when_strong() {
        let mut form = valid_form();
        form.confirm_password = "Different1!".to_string();
        assert_eq!(validate_registration(&form), vec!["Passwords do not match."]);

        // weak password reports weakness, not the mismatch
        form.password = "weak".to_string();
        let errors = validate_registration(&form);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Password must be"));
    }

    #[test]
    fn test_invalid_state_and_zip() {
        let mut form = valid_form();
        form.state = "Illinois".to_string();
        form.zip_code = "627".to_string();
        let errors = validate_registration(&form);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_all_violations_collected() {
        let form = RegisterForm {
            first_name: "1".to_string(),
            last_name: "2".to_string(),
            email: "bad".to_string(),
            phone_number: "123".to_string(),
            password: "weak".to_string(),
            confirm_password: "other".to_string(),
            address_line1: String::new(),
            address_line2: "x".repeat(101),
            city: "3".to_string(),
            state: "XYZ".to_string(),
            zip_code: "abc".to_string(),
        };
        // every rule violated, every message present
        assert_eq!(validate_registration(&form).len(), 10);
    }
}
