//! Storage configuration.

use config::ConfigError;
use serde::Deserialize;

/// SQLite storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// SQLite connection URL, e.g. `sqlite://students.sqlite` or `sqlite::memory:`.
    #[serde(default = "default_url")]
    pub url: String,

    /// Connection pool maximum size.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Create the database file if it does not exist.
    #[serde(default = "default_create_if_missing")]
    pub create_if_missing: bool,
}

impl StorageConfig {
    /// In-memory database configuration, mainly for tests.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            ..Self::default()
        }
    }

    /// Whether the URL names a private in-memory database.
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }

    /// Validate the storage configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is empty or not a SQLite URL, or the pool size is 0.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::Message(
                "storage.url cannot be empty".to_string(),
            ));
        }
        if !self.url.starts_with("sqlite:") {
            return Err(ConfigError::Message(format!(
                "storage.url must be a sqlite URL, got {}",
                self.url
            )));
        }
        if self.max_connections == 0 {
            return Err(ConfigError::Message(
                "storage.max_connections cannot be 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_url() -> String {
    "sqlite://students.sqlite".to_string()
}

const fn default_max_connections() -> u32 {
    5
}

const fn default_create_if_missing() -> bool {
    true
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            max_connections: default_max_connections(),
            create_if_missing: true,
        }
    }
}
