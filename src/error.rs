//! Error types for the highlight store and its storage backends.
//!
//! ERROR HANDLING
//! ==============
//! Only write-side failures reach callers. Load-side problems (unreadable
//! slot, malformed mirror, bad entries) are logged and recovered inside
//! `HighlightStore::init`, so they have no variant here.

/// Failure reported by a [`crate::storage::KeyValueStorage`] backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Filesystem failure in the native file backend.
    #[error("storage i/o failed for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    /// The value does not fit in the backend's quota.
    #[error("storage quota exceeded for key '{key}': {needed} bytes needed, {quota} allowed")]
    QuotaExceeded { key: String, needed: usize, quota: usize },
    /// The key cannot be mapped onto the backend (e.g. not a safe file name).
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),
    /// The backend rejected the operation with an opaque message (browser exceptions).
    #[error("storage backend rejected key '{key}': {message}")]
    Backend { key: String, message: String },
    /// No storage area exists in this environment.
    #[error("storage is unavailable: {0}")]
    Unavailable(String),
}

/// Error returned by mutating [`crate::HighlightStore`] operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Writing the mirror failed. The in-memory table keeps the mutation.
    #[error("failed to write highlight mirror: {0}")]
    Storage(#[from] StorageError),
    /// The table could not be encoded as JSON.
    #[error("failed to encode highlight mirror: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Error returned by [`crate::StoreConfig::from_env`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unsupported persist mode '{0}' (expected 'write_through' or 'deferred')")]
    InvalidPersistMode(String),
    #[error("storage key must not be empty")]
    EmptyKey,
}
