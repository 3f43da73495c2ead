// ============================
// array-user/src/auth/password.rs
// ============================
//! Password hashing and verification.
use bcrypt::Version;
use zeroize::Zeroizing;

use crate::error::UserError;

/// Hash a password using bcrypt, emitting a `$2a$` hash
pub fn hash_password(plain: &str, cost: u32) -> Result<String, UserError> {
    let parts = bcrypt::hash_with_result(plain, cost)?;
    Ok(parts.format_for_version(Version::TwoA))
}

/// Verify a password against a bcrypt hash
pub fn verify_password(hash: &str, plain: &str) -> Result<bool, UserError> {
    Ok(bcrypt::verify(plain, hash)?)
}

/// Hash on the blocking pool. The plaintext is wiped once hashing is done.
pub async fn hash_password_blocking(plain: &str, cost: u32) -> Result<String, UserError> {
    let plain = Zeroizing::new(plain.to_owned());
    tokio::task::spawn_blocking(move || hash_password(&plain, cost)).await?
}

/// Verify on the blocking pool. The plaintext is wiped once verification is done.
pub async fn verify_password_blocking(hash: String, plain: &str) -> Result<bool, UserError> {
    let plain = Zeroizing::new(plain.to_owned());
    tokio::task::spawn_blocking(move || verify_password(&hash, &plain)).await?
}
