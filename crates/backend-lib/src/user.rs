// ============================
// array-user/src/user.rs
// ============================
//! Store and verify users with bcrypt passwords kept in a shared array.
use array_user_common::UserRecord;

use crate::{
    auth::{BcryptUser, UserOptions},
    error::UserError,
    resolver::ArrayResolver,
    storage::UserDb,
};

/// A user bound to one (username, realm) identity in a [`UserDb`].
///
/// All authentication work is forwarded to a [`BcryptUser`] whose resolver
/// reads and writes the collection passed to [`ArrayUser::new`].
pub struct ArrayUser {
    inner: BcryptUser<ArrayResolver>,
}

impl ArrayUser {
    /// Bind a user to `db`. The realm falls back to `_default` when `options.realm` is unset.
    pub fn new(db: &UserDb, username: &str, options: UserOptions) -> Result<Self, UserError> {
        let inner = BcryptUser::new(ArrayResolver::new(db), username, options)?;
        Ok(Self { inner })
    }

    /// Shorthand for [`ArrayUser::new`] with default options and an optional realm
    pub fn with_realm(db: &UserDb, username: &str, realm: Option<&str>) -> Result<Self, UserError> {
        let options = UserOptions {
            realm: realm.map(str::to_string),
            ..UserOptions::default()
        };
        Self::new(db, username, options)
    }

    /// Construct a user and register it with `password`
    pub async fn register_user(
        db: &UserDb,
        username: &str,
        password: &str,
        realm: Option<&str>,
    ) -> Result<Self, UserError> {
        let user = Self::with_realm(db, username, realm)?;
        user.register(password).await?;
        Ok(user)
    }

    /// Construct a user and make sure its record exists
    pub async fn find_user(db: &UserDb, username: &str, realm: Option<&str>) -> Result<Self, UserError> {
        let user = Self::with_realm(db, username, realm)?;
        user.find().await?;
        Ok(user)
    }

    pub fn username(&self) -> &str {
        self.inner.username()
    }

    pub fn realm(&self) -> &str {
        self.inner.realm()
    }

    /// The collection this user reads and writes
    pub fn db(&self) -> &UserDb {
        self.inner.resolver().db()
    }

    pub async fn register(&self, password: &str) -> Result<(), UserError> {
        self.inner.register(password).await
    }

    pub async fn verify_password(&self, password: &str) -> Result<bool, UserError> {
        self.inner.verify_password(password).await
    }

    pub async fn set_password(&self, password: &str) -> Result<(), UserError> {
        self.inner.set_password(password).await
    }

    pub async fn exists(&self) -> Result<bool, UserError> {
        self.inner.exists().await
    }

    pub async fn find(&self) -> Result<UserRecord, UserError> {
        self.inner.find().await
    }
}
