//! Input validation for user registration.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Bounds for first/last name length (characters).
const MIN_NAME_LENGTH: usize = 2;
const MAX_NAME_LENGTH: usize = 100;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid")
});

/// Validate an email address shape. Does not check deliverability.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if email.len() > 254 || !EMAIL_RE.is_match(email) {
        return Err(CoreError::Validation(format!(
            "'{email}' is not a valid email address"
        )));
    }
    Ok(())
}

/// Validate a first or last name. `field` is used in the error message.
pub fn validate_name(field: &str, value: &str) -> Result<(), CoreError> {
    let len = value.trim().chars().count();
    if !(MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&len) {
        return Err(CoreError::Validation(format!(
            "{field} must be between {MIN_NAME_LENGTH} and {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate that a password meets the minimum length.
pub fn validate_password(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn accepts_plain_email() {
        assert!(validate_email("a@x.com").is_ok());
    }

    #[test]
    fn rejects_email_without_domain() {
        assert_matches!(validate_email("a@"), Err(CoreError::Validation(_)));
        assert_matches!(validate_email("no-at-sign.com"), Err(CoreError::Validation(_)));
        assert_matches!(validate_email("a b@x.com"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn name_bounds() {
        assert!(validate_name("first_name", "Al").is_ok());
        assert_matches!(validate_name("first_name", "A"), Err(CoreError::Validation(_)));
        assert_matches!(
            validate_name("last_name", &"x".repeat(101)),
            Err(CoreError::Validation(msg)) if msg.contains("last_name")
        );
    }

    #[test]
    fn password_min_length() {
        assert!(validate_password("12345678").is_ok());
        let err = validate_password("short").unwrap_err();
        assert!(err.to_string().contains("at least 8 characters"));
    }
}
