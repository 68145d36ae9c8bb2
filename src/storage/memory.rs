//! In-process slot map.

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

use std::cell::RefCell;
use std::collections::HashMap;

use super::KeyValueStorage;
use crate::error::StorageError;

/// Slot storage held in memory for the life of the value.
///
/// An optional quota caps the total bytes of all keys and values, the way
/// a browser storage area does. Writes that would exceed it fail and leave
/// the previous slot content in place.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: RefCell<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_quota(quota: usize) -> Self {
        Self { slots: RefCell::default(), quota: Some(quota) }
    }

    /// Seed a slot without going through the quota check.
    #[must_use]
    pub fn with_slot(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.slots.borrow_mut().insert(key.into(), value.into());
        self
    }

    /// Current content of a slot.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.slots.borrow().get(key).cloned()
    }

    pub fn remove(&self, key: &str) -> Option<String> {
        self.slots.borrow_mut().remove(key)
    }

    /// Total bytes held across all slots.
    #[must_use]
    pub fn used_bytes(&self) -> usize {
        self.slots.borrow().iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.get(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut slots = self.slots.borrow_mut();

        if let Some(quota) = self.quota {
            let others: usize = slots
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > quota {
                return Err(StorageError::QuotaExceeded { key: key.to_owned(), needed, quota });
            }
        }

        slots.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
