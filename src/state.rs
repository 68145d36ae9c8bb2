//! Per-message state records and the mirror codec.
//!
//! DESIGN
//! ======
//! `MessageState` is an open record rather than a bare boolean so new
//! per-message flags can ride along in the same mirror without a migration.
//! Fields this crate does not know about are carried through untouched.
//!
//! The mirror is one JSON object keyed by the decimal message id:
//! `{"42": {"isHighlighted": true}, ...}`.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// Host-supplied message identifier.
pub type MessageId = i64;

/// Field name of the highlight flag inside a [`MessageState`].
pub const HIGHLIGHT_FIELD: &str = "isHighlighted";

/// In-memory table of message states, ordered by id so the mirror is stable.
pub type StoreTable = BTreeMap<MessageId, MessageState>;

/// Open per-message record. Serializes as a plain JSON object.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageState {
    fields: Map<String, Value>,
}

impl MessageState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record with only the highlight flag set.
    #[must_use]
    pub fn highlighted(value: bool) -> Self {
        let mut state = Self::new();
        state.set_highlighted(value);
        state
    }

    #[must_use]
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// `true` only when the flag is present and exactly JSON `true`.
    #[must_use]
    pub fn is_highlighted(&self) -> bool {
        matches!(self.fields.get(HIGHLIGHT_FIELD), Some(Value::Bool(true)))
    }

    /// Overwrite the highlight flag, leaving every other field alone.
    pub fn set_highlighted(&mut self, value: bool) {
        self.fields.insert(HIGHLIGHT_FIELD.to_owned(), Value::Bool(value));
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: Value) -> Option<Value> {
        self.fields.insert(field.into(), value)
    }

    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

/// Result of decoding a mirror payload.
#[derive(Debug, Default)]
pub(crate) struct DecodedTable {
    pub(crate) table: StoreTable,
    /// Entries dropped because of a bad id or a non-object value.
    pub(crate) skipped: usize,
}

/// Decode a mirror payload.
///
/// Fails only when the payload is not JSON or its top level is not an
/// object. Individual bad entries are skipped and logged.
pub(crate) fn decode_table(raw: &str) -> Result<DecodedTable, serde_json::Error> {
    let entries: Map<String, Value> = serde_json::from_str(raw)?;
    let mut decoded = DecodedTable::default();

    for (key, value) in entries {
        let id = match key.trim().parse::<MessageId>() {
            Ok(id) => id,
            Err(e) => {
                warn!(key = %key, error = %e, "skipping mirror entry with non-integer message id");
                decoded.skipped += 1;
                continue;
            }
        };
        let Value::Object(fields) = value else {
            warn!(id, "skipping mirror entry whose state is not an object");
            decoded.skipped += 1;
            continue;
        };
        decoded.table.insert(id, MessageState::from_fields(fields));
    }

    Ok(decoded)
}

/// Encode the whole table as one mirror payload.
pub(crate) fn encode_table(table: &StoreTable) -> Result<String, serde_json::Error> {
    serde_json::to_string(table)
}
