//! Tool-local configuration persistence.
//!
//! A single JSON document holding whatever the embedding app wants to
//! remember between runs (selected profile, window state, ...). Values
//! are schemaless on purpose; the store only guarantees load/save
//! round-trips. A missing or corrupt file loads as an empty config.

use std::path::PathBuf;

/// Arbitrary string-keyed configuration values.
pub type Config = serde_json::Map<String, serde_json::Value>;

/// Default configuration filename in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".evecfg.json";

/// Errors from saving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Loads and saves the tool configuration file.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Creates a store over the default file in the working directory.
    pub fn new() -> Self {
        Self::with_path(PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Creates a store over an explicit path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Loads the configuration; missing or unparsable files read as empty.
    pub fn load(&self) -> Config {
        let Ok(text) = std::fs::read_to_string(&self.path) else {
            return Config::new();
        };
        match serde_json::from_str(&text) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "corrupt config, using empty");
                Config::new()
            }
        }
    }

    /// Writes the configuration, replacing the previous content.
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(config)?;
        std::fs::write(&self.path, json)?;
        tracing::debug!(path = %self.path.display(), "configuration saved");
        Ok(())
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}
