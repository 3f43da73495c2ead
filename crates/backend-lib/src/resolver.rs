// ============================
// array-user/src/resolver.rs
// ============================
//! Persistence seam used by the bcrypt user, and its in-memory array implementation.
use array_user_common::{Lookup, UserRecord};
use async_trait::async_trait;

use crate::{error::UserError, storage::UserDb};

/// The three persistence operations a [`BcryptUser`](crate::auth::BcryptUser) needs.
#[async_trait]
pub trait Resolver: Send + Sync {
    /// First record matching `lookup`, or `None`. Absence is not an error.
    async fn find(&self, lookup: &Lookup) -> Result<Option<UserRecord>, UserError>;

    /// Store a new record. No uniqueness check is performed.
    async fn insert(&self, user: UserRecord) -> Result<(), UserError>;

    /// Replace the password hash of the first record matching `lookup`.
    ///
    /// Fails with [`UserError::UpdateFailed`] when nothing matches.
    async fn update_hash(&self, lookup: &Lookup, hash: &str) -> Result<(), UserError>;
}

/// Resolver over a shared [`UserDb`]
#[derive(Clone, Debug)]
pub struct ArrayResolver {
    db: UserDb,
}

impl ArrayResolver {
    pub fn new(db: &UserDb) -> Self {
        Self { db: db.clone() }
    }

    pub fn db(&self) -> &UserDb {
        &self.db
    }
}

#[async_trait]
impl Resolver for ArrayResolver {
    async fn find(&self, lookup: &Lookup) -> Result<Option<UserRecord>, UserError> {
        let users = self.db.records().read().await;
        Ok(users.iter().find(|user| lookup.matches(user)).cloned())
    }

    async fn insert(&self, user: UserRecord) -> Result<(), UserError> {
        self.db.records().write().await.push(user);
        // completion is never synchronous with the push
        tokio::task::yield_now().await;
        Ok(())
    }

    async fn update_hash(&self, lookup: &Lookup, hash: &str) -> Result<(), UserError> {
        let mut users = self.db.records().write().await;
        match users.iter_mut().find(|user| lookup.matches(user)) {
            Some(user) => {
                user.password = hash.to_string();
                Ok(())
            }
            None => Err(UserError::UpdateFailed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::FutureExt;
    use serde_json::json;

    fn seeded() -> UserDb {
        UserDb::from_records(vec![
            UserRecord::new("baz", "ooregister", "hash-1"),
            UserRecord::new("baz", "other", "hash-2"),
            UserRecord::new("foo", "ooregister", "hash-3"),
        ])
    }

    #[tokio::test]
    async fn test_find_first_match() {
        let resolver = ArrayResolver::new(&seeded());

        let found = resolver
            .find(&Lookup::default().username("baz"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.realm, "ooregister");
        assert_eq!(found.password, "hash-1");

        let found = resolver
            .find(&Lookup::default().realm("ooregister").username("foo"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.password, "hash-3");
    }

    #[tokio::test]
    async fn test_find_missing_is_not_an_error() {
        let resolver = ArrayResolver::new(&seeded());
        let found = resolver.find(&Lookup::identity("baz", "nowhere")).await.unwrap();
        assert!(found.is_none());

        let empty = ArrayResolver::new(&UserDb::new());
        assert!(empty.find(&Lookup::default()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_is_idempotent() {
        let resolver = ArrayResolver::new(&seeded());
        let lookup = Lookup::identity("baz", "other");
        let first = resolver.find(&lookup).await.unwrap();
        let second = resolver.find(&lookup).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_insert_then_find() {
        let db = UserDb::new();
        let resolver = ArrayResolver::new(&db);
        let mut user = UserRecord::new("qux", "_default", "hash");
        user.extra.insert("email".into(), json!("qux@example.com"));

        resolver.insert(user.clone()).await.unwrap();

        let found = resolver.find(&Lookup::identity("qux", "_default")).await.unwrap();
        assert_eq!(found, Some(user));
    }

    #[tokio::test]
    async fn test_insert_never_completes_on_first_poll() {
        let db = UserDb::new();
        let resolver = ArrayResolver::new(&db);

        let mut insert = Box::pin(resolver.insert(UserRecord::new("baz", "r", "hash")));
        assert!((&mut insert).now_or_never().is_none());

        insert.await.unwrap();
        let found = resolver.find(&Lookup::identity("baz", "r")).await.unwrap();
        assert_eq!(found.unwrap().password, "hash");
        assert_eq!(db.len().await, 1);
    }

    #[tokio::test]
    async fn test_insert_appends_duplicates() {
        let db = seeded();
        let resolver = ArrayResolver::new(&db);
        resolver
            .insert(UserRecord::new("baz", "ooregister", "hash-4"))
            .await
            .unwrap();

        let users = db.snapshot().await;
        assert_eq!(users.len(), 4);
        assert_eq!(users[3].password, "hash-4");

        // the older record still shadows the new one
        let found = resolver.find(&Lookup::identity("baz", "ooregister")).await.unwrap();
        assert_eq!(found.unwrap().password, "hash-1");
    }

    #[tokio::test]
    async fn test_update_hash_only_touches_password() {
        let db = seeded();
        db.records().write().await[0]
            .extra
            .insert("email".into(), json!("baz@example.com"));
        let resolver = ArrayResolver::new(&db);

        resolver
            .update_hash(&Lookup::default().username("baz"), "new-hash")
            .await
            .unwrap();

        let users = db.snapshot().await;
        assert_eq!(users[0].username, "baz");
        assert_eq!(users[0].realm, "ooregister");
        assert_eq!(users[0].password, "new-hash");
        assert_eq!(users[0].extra.get("email"), Some(&json!("baz@example.com")));
        // only the first match is updated
        assert_eq!(users[1].password, "hash-2");
        assert_eq!(users[2].password, "hash-3");
    }

    #[tokio::test]
    async fn test_update_hash_without_match() {
        let db = seeded();
        let before = db.snapshot().await;
        let resolver = ArrayResolver::new(&db);

        let err = resolver
            .update_hash(&Lookup::identity("baz", "ooregister2"), "new-hash")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "failed to update password");
        assert_eq!(db.snapshot().await, before);
    }
}
