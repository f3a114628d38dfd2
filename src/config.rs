//! Service configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Configuration for the game service.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_url")]
    database_url: String,

    /// Public base URL prefixed to snapshot references.
    #[serde(default = "default_base_url")]
    base_url: String,
}

fn default_database_url() -> String {
    "parlor.db".to_string()
}

fn default_base_url() -> String {
    "http://localhost:8088".to_string()
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(database_url = %config.database_url, "Config loaded successfully");
        Ok(config)
    }

    /// Loads configuration from the given file when it exists, falling
    /// back to defaults, then applies `DATABASE_URL` and `BASE_PATH`
    /// environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if an existing file fails to load.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let mut config = if path.as_ref().exists() {
            Self::from_file(path)?
        } else {
            debug!("Config file not found, using defaults");
            Self::default()
        };

        if let Ok(database_url) = std::env::var("DATABASE_URL") {
            info!("Overriding database path from DATABASE_URL");
            config.database_url = database_url;
        }
        if let Ok(base_url) = std::env::var("BASE_PATH") {
            info!("Overriding base URL from BASE_PATH");
            config.base_url = base_url;
        }

        Ok(config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            base_url: default_base_url(),
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where the error occurred.
    pub line: u32,
    /// Source file where the error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
