// ============================
// array-user/src/auth/mod.rs
// ============================
//! Authentication module.

mod bcrypt_user;
pub mod password;

pub use bcrypt_user::{BcryptUser, UserOptions, DEFAULT_COST, DEFAULT_REALM, MAX_COST, MIN_COST};
pub use password::{hash_password, verify_password};
