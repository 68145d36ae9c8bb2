//! Persistent key-value slot backends for the durable mirror.
//!
//! SYSTEM CONTEXT
//! ==============
//! The store only needs two operations from its storage area: read a slot
//! and overwrite a slot. Keeping that behind [`KeyValueStorage`] lets the
//! same store run against browser `localStorage` (feature `hydrate`), a
//! directory on disk, or an in-process map in tests.
//!
//! TRADE-OFFS
//! ==========
//! Both operations take `&self` like the browser API does. Backends with
//! mutable internals use interior mutability, which also lets several store
//! instances share one backend by reference.

mod file;
#[cfg(feature = "hydrate")]
mod local;
mod memory;

use std::rc::Rc;

use crate::error::StorageError;

pub use file::FileStorage;
#[cfg(feature = "hydrate")]
pub use local::LocalStorage;
pub use memory::MemoryStorage;

/// Synchronous key-value slot storage.
pub trait KeyValueStorage {
    /// Read the slot for `key`. `Ok(None)` means the slot has never been written.
    ///
    /// # Errors
    ///
    /// Backend failures such as I/O errors, invalid keys or browser exceptions.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the slot for `key` with `value` as one operation.
    ///
    /// # Errors
    ///
    /// Backend failures, including [`StorageError::QuotaExceeded`].
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for &S {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for Rc<S> {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for Box<S> {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }
}
