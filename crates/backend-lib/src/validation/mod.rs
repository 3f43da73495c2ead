// ============================
// crates/backend-lib/src/validation/mod.rs
// ============================
//! Input validation for user identities and passwords.

use crate::error::UserError;

const MIN_USERNAME_LENGTH: usize = 2;
const MAX_USERNAME_LENGTH: usize = 128;
const MIN_REALM_LENGTH: usize = 1;
const MAX_REALM_LENGTH: usize = 128;
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, UserError>;

/// Validate a username
pub fn validate_username(username: &str) -> ValidationResult<&str> {
    let len = username.chars().count();
    if len < MIN_USERNAME_LENGTH {
        return Err(UserError::invalid("username must be at least 2 characters"));
    }
    if len > MAX_USERNAME_LENGTH {
        return Err(UserError::invalid("username can not exceed 128 characters"));
    }
    Ok(username)
}

/// Validate a realm
pub fn validate_realm(realm: &str) -> ValidationResult<&str> {
    let len = realm.chars().count();
    if len < MIN_REALM_LENGTH {
        return Err(UserError::invalid("realm must be at least 1 character"));
    }
    if len > MAX_REALM_LENGTH {
        return Err(UserError::invalid("realm can not exceed 128 characters"));
    }
    Ok(realm)
}

/// Validate a plaintext password before hashing
pub fn validate_password(password: &str) -> ValidationResult<&str> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(UserError::invalid("password must be at least 6 characters"));
    }
    Ok(password)
}

/// Check username, password and realm in one go.
///
/// Construction paths that have no password yet pass a placeholder of
/// the minimum length.
pub fn check_all_with_password(username: &str, password: &str, realm: &str) -> ValidationResult<()> {
    validate_username(username)?;
    validate_password(password)?;
    validate_realm(realm)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username() {
        assert!(validate_username("baz").is_ok());
        assert!(validate_username(&"u".repeat(128)).is_ok());

        let err = validate_username("b").unwrap_err();
        assert_eq!(err.to_string(), "username must be at least 2 characters");
        let err = validate_username(&"u".repeat(129)).unwrap_err();
        assert_eq!(err.to_string(), "username can not exceed 128 characters");
    }

    #[test]
    fn test_validate_realm() {
        assert!(validate_realm("_default").is_ok());
        assert!(validate_realm("r").is_ok());
        assert!(validate_realm("").is_err());
        assert!(validate_realm(&"r".repeat(129)).is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("p4ssword").is_ok());
        assert!(validate_password("xxxxxx").is_ok());
        let err = validate_password("short").unwrap_err();
        assert!(matches!(err, UserError::Validation(_)));
    }

    #[test]
    fn test_check_all_with_password() {
        assert!(check_all_with_password("foo", "raboof", "bar").is_ok());
        assert!(check_all_with_password("f", "raboof", "bar").is_err());
        assert!(check_all_with_password("foo", "rab", "bar").is_err());
        assert!(check_all_with_password("foo", "raboof", "").is_err());
    }
}
