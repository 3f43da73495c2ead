// crates/backend-lib/src/error.rs

//! Central error type.
use thiserror::Error;

/// Errors raised by the user store, the resolver and the façade
#[derive(Error, Debug)]
pub enum UserError {
    /// Wrong kind of input at construction time
    #[error("{0}")]
    Type(String),

    /// Input of the right kind but out of bounds
    #[error("{0}")]
    Validation(String),

    #[error("failed to update password")]
    UpdateFailed,

    #[error("username already exists")]
    AlreadyExists,

    #[error("user not found")]
    NotFound,

    #[error("bcrypt error: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl UserError {
    pub(crate) fn type_error(msg: &str) -> Self {
        UserError::Type(msg.to_string())
    }

    pub(crate) fn invalid(msg: &str) -> Self {
        UserError::Validation(msg.to_string())
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            UserError::Type(_) => "TYPE_001",
            UserError::Validation(_) => "VAL_001",
            UserError::UpdateFailed => "USER_001",
            UserError::AlreadyExists => "USER_002",
            UserError::NotFound => "USER_003",
            UserError::Hash(_) => "HASH_001",
            UserError::Io(_) => "IO_001",
            UserError::Json(_) => "JSON_001",
            UserError::Internal(_) => "INT_001",
        }
    }

    /// Whether the caller can fix this error by changing its input
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            UserError::Type(_)
                | UserError::Validation(_)
                | UserError::UpdateFailed
                | UserError::AlreadyExists
                | UserError::NotFound
        )
    }
}

impl From<tokio::task::JoinError> for UserError {
    fn from(err: tokio::task::JoinError) -> Self {
        UserError::Internal(format!("hashing task failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error as IoError, ErrorKind};

    #[test]
    fn test_user_error_display() {
        assert_eq!(UserError::UpdateFailed.to_string(), "failed to update password");
        assert_eq!(UserError::AlreadyExists.to_string(), "username already exists");
        assert_eq!(UserError::NotFound.to_string(), "user not found");
        assert_eq!(
            UserError::type_error("db must be an array").to_string(),
            "db must be an array"
        );

        let io_error = UserError::Io(IoError::new(ErrorKind::NotFound, "File not found"));
        assert!(io_error.to_string().contains("IO error"));
    }

    #[test]
    fn test_user_error_codes() {
        assert_eq!(UserError::invalid("x").error_code(), "VAL_001");
        assert_eq!(UserError::UpdateFailed.error_code(), "USER_001");
        assert_eq!(UserError::Internal("test".to_string()).error_code(), "INT_001");

        let json_err: serde_json::Error =
            serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        assert_eq!(UserError::Json(json_err).error_code(), "JSON_001");
    }

    #[test]
    fn test_caller_errors() {
        assert!(UserError::UpdateFailed.is_caller_error());
        assert!(UserError::type_error("db must be an array").is_caller_error());
        assert!(!UserError::Internal("boom".into()).is_caller_error());
    }

    #[test]
    fn test_error_from_impls() {
        let io_err = IoError::new(ErrorKind::PermissionDenied, "Permission denied");
        let err: UserError = io_err.into();
        assert!(matches!(err, UserError::Io(_)));

        let json_err: serde_json::Error =
            serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: UserError = json_err.into();
        assert!(matches!(err, UserError::Json(_)));

        let err: UserError = bcrypt::verify("pw", "not a hash").unwrap_err().into();
        assert!(matches!(err, UserError::Hash(_)));
    }
}
