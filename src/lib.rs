//! Per-message highlight flags that survive reloads.
//!
//! SYSTEM CONTEXT
//! ==============
//! A [`HighlightStore`] keeps message states in memory and mirrors the whole
//! table into one persistent key-value slot after every mutation. On
//! startup the host builds the store around a storage backend and calls
//! `init` to rehydrate it, then passes the store by reference to whatever
//! UI code toggles highlights.
//!
//! ```
//! use highlight_store::{HighlightStore, MemoryStorage};
//!
//! let storage = MemoryStorage::new();
//! let mut store = HighlightStore::new(&storage);
//! store.init();
//! assert!(store.toggle_highlighted(42)?);
//! assert!(store.is_highlighted(42));
//! # Ok::<(), highlight_store::StoreError>(())
//! ```

pub mod config;
pub mod error;
pub mod state;
pub mod storage;
pub mod store;

pub use config::{DEFAULT_STORAGE_KEY, PersistMode, StoreConfig};
pub use error::{ConfigError, StorageError, StoreError};
pub use state::{MessageId, MessageState, StoreTable};
#[cfg(feature = "hydrate")]
pub use storage::LocalStorage;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use store::{HighlightStore, LoadOutcome};
