// ============================
// array-user/src/lib.rs
// ============================
//! Users with bcrypt passwords stored in a shared in-memory array.

pub mod auth;
pub mod config;
pub mod error;
pub mod metrics;
pub mod resolver;
pub mod storage;
pub mod user;
pub mod validation;

pub use array_user_common::{Lookup, UserRecord};
pub use auth::{BcryptUser, UserOptions, DEFAULT_REALM};
pub use error::UserError;
pub use resolver::{ArrayResolver, Resolver};
pub use storage::UserDb;
pub use user::ArrayUser;
