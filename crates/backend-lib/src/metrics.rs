// ==============
// crates/backend-lib/src/metrics.rs

//! Central place for metric keys
pub const USER_REGISTERED: &str = "user.registered";
pub const VERIFY_OK: &str = "user.verify.ok";
pub const VERIFY_FAILED: &str = "user.verify.failed";
pub const PASSWORD_UPDATED: &str = "user.password.updated";
pub const PASSWORD_UPDATE_FAILED: &str = "user.password.update_failed";
