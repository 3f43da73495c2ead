// ============================
// array-user/src/auth/bcrypt_user.rs
// ============================
//! A user identity bound to a [`Resolver`], with bcrypt-hashed passwords.
use array_user_common::{Lookup, UserRecord};
use metrics::counter;
use tracing::{debug, info, warn};

use super::password::{hash_password_blocking, verify_password_blocking};
use crate::{
    error::UserError,
    metrics::{PASSWORD_UPDATED, PASSWORD_UPDATE_FAILED, USER_REGISTERED, VERIFY_FAILED, VERIFY_OK},
    resolver::Resolver,
    validation::{check_all_with_password, validate_password, MIN_PASSWORD_LENGTH},
};

/// Realm used when none is given
pub const DEFAULT_REALM: &str = "_default";
/// bcrypt cost used for new hashes
pub const DEFAULT_COST: u32 = 10;
pub const MIN_COST: u32 = 4;
pub const MAX_COST: u32 = 31;

/// Per-user options
#[derive(Debug, Clone)]
pub struct UserOptions {
    /// Realm of the user, [`DEFAULT_REALM`] when `None`
    pub realm: Option<String>,
    /// Emit a debug event for every operation
    pub debug: bool,
    /// Do not log failures
    pub hide: bool,
    /// bcrypt cost factor
    pub cost: u32,
}

impl Default for UserOptions {
    fn default() -> Self {
        Self {
            realm: None,
            debug: false,
            hide: false,
            cost: DEFAULT_COST,
        }
    }
}

impl UserOptions {
    pub fn realm(mut self, realm: impl Into<String>) -> Self {
        self.realm = Some(realm.into());
        self
    }

    pub fn cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }
}

/// A (username, realm) identity whose records live behind a [`Resolver`]
pub struct BcryptUser<R> {
    resolver: R,
    username: String,
    realm: String,
    options: UserOptions,
}

impl<R: Resolver> BcryptUser<R> {
    pub fn new(resolver: R, username: &str, options: UserOptions) -> Result<Self, UserError> {
        let realm = options.realm.as_deref().unwrap_or(DEFAULT_REALM);
        // no password yet, only the identity is checked
        let placeholder = "x".repeat(MIN_PASSWORD_LENGTH);
        check_all_with_password(username, &placeholder, realm)?;
        if !(MIN_COST..=MAX_COST).contains(&options.cost) {
            return Err(UserError::Validation(format!(
                "cost must be between {MIN_COST} and {MAX_COST}"
            )));
        }

        Ok(Self {
            username: username.to_string(),
            realm: realm.to_string(),
            resolver,
            options,
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn realm(&self) -> &str {
        &self.realm
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    fn lookup(&self) -> Lookup {
        Lookup::identity(&self.username, &self.realm)
    }

    fn trace(&self, op: &str) {
        if self.options.debug {
            debug!(username = %self.username, realm = %self.realm, "{op}");
        }
    }

    fn report(&self, op: &str, err: &UserError) {
        if !self.options.hide {
            warn!(username = %self.username, realm = %self.realm, error = %err, "{op} failed");
        }
    }

    /// Whether a record exists for this identity
    pub async fn exists(&self) -> Result<bool, UserError> {
        self.trace("exists");
        Ok(self.resolver.find(&self.lookup()).await?.is_some())
    }

    /// Load the stored record for this identity
    pub async fn find(&self) -> Result<UserRecord, UserError> {
        self.trace("find");
        self.resolver
            .find(&self.lookup())
            .await?
            .ok_or(UserError::NotFound)
    }

    /// Create the record for this identity. Fails if it already exists.
    pub async fn register(&self, password: &str) -> Result<(), UserError> {
        self.trace("register");
        validate_password(password)?;

        if self.exists().await? {
            let err = UserError::AlreadyExists;
            self.report("register", &err);
            return Err(err);
        }

        // check and insert are separate critical sections: concurrent registrations
        // of one identity can both land, lookups then see the first one
        let hash = hash_password_blocking(password, self.options.cost).await?;
        self.resolver
            .insert(UserRecord::new(&self.username, &self.realm, hash))
            .await?;

        counter!(USER_REGISTERED).increment(1);
        info!(username = %self.username, realm = %self.realm, "user registered");
        Ok(())
    }

    /// Compare `password` with the stored hash. A missing user never verifies.
    pub async fn verify_password(&self, password: &str) -> Result<bool, UserError> {
        self.trace("verify_password");
        let Some(user) = self.resolver.find(&self.lookup()).await? else {
            counter!(VERIFY_FAILED).increment(1);
            return Ok(false);
        };

        let correct = verify_password_blocking(user.password, password).await?;
        if correct {
            counter!(VERIFY_OK).increment(1);
        } else {
            counter!(VERIFY_FAILED).increment(1);
        }
        Ok(correct)
    }

    /// Replace the stored hash with a hash of `password`
    pub async fn set_password(&self, password: &str) -> Result<(), UserError> {
        self.trace("set_password");
        validate_password(password)?;

        let hash = hash_password_blocking(password, self.options.cost).await?;
        if let Err(err) = self.resolver.update_hash(&self.lookup(), &hash).await {
            counter!(PASSWORD_UPDATE_FAILED).increment(1);
            self.report("set_password", &err);
            return Err(err);
        }

        counter!(PASSWORD_UPDATED).increment(1);
        info!(username = %self.username, realm = %self.realm, "password updated");
        Ok(())
    }
}
