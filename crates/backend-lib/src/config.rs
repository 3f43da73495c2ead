// ============================
// array-user/src/config.rs
// ============================
//! Configuration management.
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::auth::{UserOptions, DEFAULT_COST, DEFAULT_REALM, MAX_COST, MIN_COST};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// bcrypt cost factor used for new hashes
    pub bcrypt_cost: u32,
    /// Realm used when none is given
    pub default_realm: String,
    /// Log level
    pub log_level: String,
    /// JSON file holding the user array
    pub db_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bcrypt_cost: DEFAULT_COST,
            default_realm: DEFAULT_REALM.to_string(),
            log_level: "info".to_string(),
            db_path: PathBuf::from("users.json"),
        }
    }
}

impl Settings {
    /// Load settings from `array-user.toml` and `ARRAY_USER_*` variables
    pub fn load() -> Result<Self> {
        Self::load_from("array-user.toml")
    }

    /// Load settings from the given file, then environment variables
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let settings: Settings = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("ARRAY_USER_"))
            .extract()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if !(MIN_COST..=MAX_COST).contains(&self.bcrypt_cost) {
            bail!("bcrypt_cost must be between {MIN_COST} and {MAX_COST}");
        }
        if self.default_realm.is_empty() {
            bail!("default_realm must not be empty");
        }
        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            bail!("unknown log level: {}", self.log_level);
        }
        Ok(())
    }

    /// Options for a façade in the given realm, or the default realm
    pub fn user_options(&self, realm: Option<&str>) -> UserOptions {
        UserOptions {
            realm: Some(realm.unwrap_or(self.default_realm.as_str()).to_string()),
            debug: self.log_level.eq_ignore_ascii_case("debug")
                || self.log_level.eq_ignore_ascii_case("trace"),
            hide: false,
            cost: self.bcrypt_cost,
        }
    }
}
