//! Store configuration.

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use crate::error::ConfigError;

/// Slot name used for the mirror when nothing else is configured.
pub const DEFAULT_STORAGE_KEY: &str = "messageHighlightedStates";

/// When mutations reach the durable mirror.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PersistMode {
    /// Every mutation rewrites the mirror before returning.
    #[default]
    WriteThrough,
    /// Mutations only mark the table dirty; the host calls `flush`.
    Deferred,
}

/// Store settings.
///
/// Fields and builders are not checked on assignment; [`Self::validate`]
/// covers the backend-independent rules and [`Self::from_env`] runs it.
/// Backend-specific key rules (e.g. file names) surface from the backend as
/// `StorageError::InvalidKey`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub storage_key: String,
    pub persist_mode: PersistMode,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { storage_key: DEFAULT_STORAGE_KEY.to_owned(), persist_mode: PersistMode::WriteThrough }
    }
}

impl StoreConfig {
    /// Build config from environment variables, for native hosts.
    ///
    /// Optional:
    /// - `HIGHLIGHT_STORE_KEY`: mirror slot name (default `messageHighlightedStates`)
    /// - `HIGHLIGHT_PERSIST_MODE`: `write_through` (default) or `deferred`
    ///
    /// # Errors
    ///
    /// [`ConfigError::EmptyKey`] for a blank key and
    /// [`ConfigError::InvalidPersistMode`] for an unknown mode.
    pub fn from_env() -> Result<Self, ConfigError> {
        let storage_key = match std::env::var("HIGHLIGHT_STORE_KEY") {
            Ok(key) => key.trim().to_owned(),
            Err(_) => DEFAULT_STORAGE_KEY.to_owned(),
        };
        let persist_mode = match std::env::var("HIGHLIGHT_PERSIST_MODE") {
            Ok(mode) => parse_persist_mode(&mode)?,
            Err(_) => PersistMode::default(),
        };

        let config = Self { storage_key, persist_mode };
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// [`ConfigError::EmptyKey`] when the storage key is empty or whitespace.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::EmptyKey);
        }
        Ok(())
    }

    /// Not validated here; see [`Self::validate`].
    #[must_use]
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    #[must_use]
    pub fn with_persist_mode(mut self, mode: PersistMode) -> Self {
        self.persist_mode = mode;
        self
    }
}

fn parse_persist_mode(raw: &str) -> Result<PersistMode, ConfigError> {
    match raw.trim() {
        "write_through" => Ok(PersistMode::WriteThrough),
        "deferred" => Ok(PersistMode::Deferred),
        other => Err(ConfigError::InvalidPersistMode(other.to_owned())),
    }
}
