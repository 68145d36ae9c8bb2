//! Highlight store: in-memory table with a durable JSON mirror.
//!
//! DESIGN
//! ======
//! The table lives in memory and is the source of truth for reads. Every
//! write serializes the whole table and replaces the mirror slot in one
//! storage call, so the mirror is always a complete snapshot.
//!
//! `init` uses replace semantics: the table is cleared before it is
//! repopulated, so calling it again never keeps entries the mirror lacks.
//!
//! ERROR HANDLING
//! ==============
//! Load problems are logged and recovered (the table starts empty or skips
//! the bad entry). Write failures propagate to the caller with the
//! mutation still applied in memory; the dirty flag is cleared only after a
//! successful write, so `flush` can retry later.

use tracing::{debug, error, info, warn};

use crate::config::{PersistMode, StoreConfig};
use crate::error::StoreError;
use crate::state::{MessageId, MessageState, StoreTable, decode_table, encode_table};
use crate::storage::KeyValueStorage;

/// What `init` found in the mirror slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The slot has never been written.
    Absent,
    /// The slot parsed; `skipped` entries had a bad id or a non-object state.
    Loaded { entries: usize, skipped: usize },
    /// The slot held something other than a JSON object.
    Malformed,
    /// The backend failed to read the slot.
    Unreadable,
}

/// Per-message highlight flags backed by a [`KeyValueStorage`] slot.
///
/// Mutations take `&mut self`; hosts that share one store wrap it in their
/// own `RefCell` or `Mutex`.
#[derive(Debug)]
pub struct HighlightStore<S> {
    storage: S,
    config: StoreConfig,
    table: StoreTable,
    dirty: bool,
}

impl<S: KeyValueStorage> HighlightStore<S> {
    /// Empty store with the default config. Call [`Self::init`] to load the mirror.
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self::with_config(storage, StoreConfig::default())
    }

    #[must_use]
    pub fn with_config(storage: S, config: StoreConfig) -> Self {
        Self { storage, config, table: StoreTable::new(), dirty: false }
    }

    /// Construct and load in one step, the usual startup path.
    #[must_use]
    pub fn open(storage: S, config: StoreConfig) -> Self {
        let mut store = Self::with_config(storage, config);
        store.init();
        store
    }

    /// Replace the table with the contents of the mirror.
    ///
    /// Never fails: an absent, unreadable or malformed mirror leaves the
    /// table empty. Unflushed deferred changes are discarded.
    pub fn init(&mut self) -> LoadOutcome {
        self.table.clear();
        self.dirty = false;

        let key = self.config.storage_key.as_str();
        let raw = match self.storage.read(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key, "no highlight mirror found; starting empty");
                return LoadOutcome::Absent;
            }
            Err(e) => {
                warn!(key, error = %e, "failed to read highlight mirror; starting empty");
                return LoadOutcome::Unreadable;
            }
        };

        match decode_table(&raw) {
            Ok(decoded) => {
                let entries = decoded.table.len();
                self.table = decoded.table;
                info!(key, entries, skipped = decoded.skipped, "highlight mirror loaded");
                LoadOutcome::Loaded { entries, skipped: decoded.skipped }
            }
            Err(e) => {
                warn!(key, error = %e, "failed to load saved message states; starting empty");
                LoadOutcome::Malformed
            }
        }
    }

    /// Write the whole table to the mirror, overwriting prior content.
    ///
    /// # Errors
    ///
    /// [`StoreError::Storage`] when the backend rejects the write, or
    /// [`StoreError::Serialize`] when the table cannot be encoded.
    pub fn persist(&mut self) -> Result<(), StoreError> {
        let key = self.config.storage_key.as_str();
        let payload = encode_table(&self.table)?;

        if let Err(e) = self.storage.write(key, &payload) {
            error!(key, error = %e, entries = self.table.len(), "highlight mirror write failed");
            return Err(e.into());
        }

        self.dirty = false;
        debug!(key, entries = self.table.len(), bytes = payload.len(), "highlight mirror written");
        Ok(())
    }

    /// Write the mirror only if there are unwritten mutations.
    ///
    /// # Errors
    ///
    /// Same as [`Self::persist`]; the store stays dirty on failure.
    pub fn flush(&mut self) -> Result<(), StoreError> {
        if !self.dirty {
            return Ok(());
        }
        self.persist()
    }

    /// `true` iff `id` has a record whose flag is exactly `true`.
    #[must_use]
    pub fn is_highlighted(&self, id: MessageId) -> bool {
        self.table.get(&id).is_some_and(MessageState::is_highlighted)
    }

    /// Merge the flag into the record for `id`, then persist per the mode.
    ///
    /// # Errors
    ///
    /// In write-through mode, any [`Self::persist`] failure. The mutation
    /// is kept in memory either way.
    pub fn set_highlighted(&mut self, id: MessageId, value: bool) -> Result<(), StoreError> {
        self.table.entry(id).or_default().set_highlighted(value);
        self.dirty = true;

        match self.config.persist_mode {
            PersistMode::WriteThrough => self.persist(),
            PersistMode::Deferred => Ok(()),
        }
    }

    /// Flip the flag for `id` and return the new value.
    ///
    /// One read plus one [`Self::set_highlighted`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::set_highlighted`]; the flip is still applied in memory.
    pub fn toggle_highlighted(&mut self, id: MessageId) -> Result<bool, StoreError> {
        let next = !self.is_highlighted(id);
        self.set_highlighted(id, next)?;
        Ok(next)
    }

    #[must_use]
    pub fn state(&self, id: MessageId) -> Option<&MessageState> {
        self.table.get(&id)
    }

    /// Ids with a record, in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = MessageId> + '_ {
        self.table.keys().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Mutations exist that the mirror does not reflect yet.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }
}

impl<S> Drop for HighlightStore<S> {
    fn drop(&mut self) {
        if self.dirty {
            warn!(
                key = %self.config.storage_key,
                entries = self.table.len(),
                "highlight store dropped with unwritten changes"
            );
        }
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
