//! Common validation utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum accepted password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    // Pragmatic email shape check; full RFC validation is not attempted
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid")
});

/// Checks whether a string looks like an email address
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

/// Checks whether a password satisfies the minimum length policy
pub fn is_valid_password(value: &str) -> bool {
    value.chars().count() >= MIN_PASSWORD_LENGTH
}

/// Normalizes an email address for storage and lookup
pub fn normalize_email(value: &str) -> String {
    value.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("a@x.com"));
        assert!(is_valid_email("first.last@sub.example.org"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("missing@tld"));
        assert!(!is_valid_email("two@@x.com"));
        assert!(!is_valid_email("spaces in@x.com"));
    }

    #[test]
    fn password_length_policy() {
        assert!(is_valid_password("password"));
        assert!(!is_valid_password("short"));
    }

    #[test]
    fn normalize_lowercases_and_trims() {
        assert_eq!(normalize_email("  Ansar@Gmail.COM "), "ansar@gmail.com");
    }
}
