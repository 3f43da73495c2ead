// ================
// common/src/lib.rs
// ================
//! Common types shared by the array user store and its command line front end.
//! This module defines the stored user record, lookup criteria and the
//! structural matcher used to compare the two.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single stored user.
///
/// Identity is the (`username`, `realm`) pair. Any additional fields found
/// on the wire are kept in `extra` and written back untouched.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserRecord {
    /// Name of the user
    pub username: String,
    /// Namespace the user belongs to
    pub realm: String,
    /// bcrypt hash of the password
    pub password: String,
    /// Fields not known to this crate
    #[serde(flatten, default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

impl UserRecord {
    pub fn new(
        username: impl Into<String>,
        realm: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            realm: realm.into(),
            password: password.into(),
            extra: Map::new(),
        }
    }
}

/// Partial criteria matched against a [`UserRecord`].
///
/// Every field that is set must be equal to the corresponding field of the
/// record; unset fields match anything.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Lookup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(flatten, default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

impl Lookup {
    /// Criteria selecting a single identity.
    pub fn identity(username: impl Into<String>, realm: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            realm: Some(realm.into()),
            ..Self::default()
        }
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn realm(mut self, realm: impl Into<String>) -> Self {
        self.realm = Some(realm.into());
        self
    }

    /// Require a field to be present and equal.
    ///
    /// `username`, `realm` and `password` with string values land in the typed
    /// fields, so the lookup matches exactly like its deserialized form. Any
    /// other value for those keys can never match a record.
    pub fn field(mut self, key: impl Into<String>, value: Value) -> Self {
        let key = key.into();
        let slot = match key.as_str() {
            "username" => &mut self.username,
            "realm" => &mut self.realm,
            "password" => &mut self.password,
            _ => {
                self.extra.insert(key, value);
                return self;
            }
        };
        match value {
            Value::String(value) => *slot = Some(value),
            other => {
                self.extra.insert(key, other);
            }
        }
        self
    }

    /// Returns `true` if every field set in `self` is equal in `record`.
    pub fn matches(&self, record: &UserRecord) -> bool {
        field_matches(self.username.as_deref(), &record.username)
            && field_matches(self.realm.as_deref(), &record.realm)
            && field_matches(self.password.as_deref(), &record.password)
            && match_map(&self.extra, &record.extra)
    }
}

fn field_matches(expected: Option<&str>, actual: &str) -> bool {
    expected.map_or(true, |expected| expected == actual)
}

/// Structural subset match of two JSON values.
///
/// Objects match when every key of `criteria` exists in `candidate` and its
/// value matches recursively. Every other value must be equal.
pub fn match_value(criteria: &Value, candidate: &Value) -> bool {
    match (criteria, candidate) {
        (Value::Object(criteria), Value::Object(candidate)) => match_map(criteria, candidate),
        (Value::Object(_), _) => false,
        (criteria, candidate) => criteria == candidate,
    }
}

/// Subset match of two JSON objects, see [`match_value`].
pub fn match_map(criteria: &Map<String, Value>, candidate: &Map<String, Value>) -> bool {
    criteria.iter().all(|(key, expected)| {
        candidate
            .get(key)
            .is_some_and(|actual| match_value(expected, actual))
    })
}
