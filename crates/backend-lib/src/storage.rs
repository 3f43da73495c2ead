// ============================
// array-user/src/storage.rs
// ============================
//! The shared in-memory user array, with optional JSON-file persistence.
use std::{path::Path, sync::Arc};

use array_user_common::UserRecord;
use serde_json::Value;
use tokio::{fs as tokio_fs, sync::RwLock};

use crate::error::UserError;

/// Ordered collection of user records.
///
/// Cloning a `UserDb` clones the handle: every clone, and every resolver
/// or façade built from one, sees the same records.
#[derive(Clone, Debug, Default)]
pub struct UserDb {
    users: Arc<RwLock<Vec<UserRecord>>>,
}

impl UserDb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(users: Vec<UserRecord>) -> Self {
        Self {
            users: Arc::new(RwLock::new(users)),
        }
    }

    /// Build a collection from untyped JSON. Anything but an array is a type error.
    pub fn from_json(value: Value) -> Result<Self, UserError> {
        if !value.is_array() {
            return Err(UserError::type_error("db must be an array"));
        }
        let users: Vec<UserRecord> = serde_json::from_value(value)?;
        Ok(Self::from_records(users))
    }

    pub async fn to_json(&self) -> Result<Value, UserError> {
        let users = self.users.read().await;
        Ok(serde_json::to_value(&*users)?)
    }

    /// Copy of the current records, in order
    pub async fn snapshot(&self) -> Vec<UserRecord> {
        self.users.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }

    /// Whether both handles point at the same collection
    pub fn same_collection(&self, other: &UserDb) -> bool {
        Arc::ptr_eq(&self.users, &other.users)
    }

    pub(crate) fn records(&self) -> &RwLock<Vec<UserRecord>> {
        &self.users
    }

    /// Load a collection from a JSON file. A missing file yields an empty collection.
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self, UserError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = tokio_fs::read_to_string(path).await?;
        if content.trim().is_empty() {
            return Ok(Self::new());
        }
        Self::from_json(serde_json::from_str(&content)?)
    }

    /// Write the collection to a JSON file, replacing it atomically.
    pub async fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), UserError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio_fs::create_dir_all(parent).await?;
        }

        let json = {
            let users = self.users.read().await;
            serde_json::to_string_pretty(&*users)?
        };

        let tmp = path.with_extension("json.tmp");
        tokio_fs::write(&tmp, json).await?;
        tokio_fs::rename(&tmp, path).await?;
        Ok(())
    }
}
