//! Browser `localStorage` backend.
//!
//! Only compiled with the `hydrate` feature. Browser exceptions (quota
//! exceeded, storage disabled by privacy settings) surface as
//! [`StorageError::Backend`] with the exception text.

use wasm_bindgen::JsValue;

use super::KeyValueStorage;
use crate::error::StorageError;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    /// Open `window.localStorage`.
    ///
    /// # Errors
    ///
    /// [`StorageError::Unavailable`] outside a browser or when storage is disabled.
    pub fn from_window() -> Result<Self, StorageError> {
        let Some(window) = web_sys::window() else {
            return Err(StorageError::Unavailable("no browser window".into()));
        };
        match window.local_storage() {
            Ok(Some(storage)) => Ok(Self { storage }),
            Ok(None) => Err(StorageError::Unavailable("localStorage is disabled".into())),
            Err(e) => Err(StorageError::Unavailable(describe(&e))),
        }
    }

    #[must_use]
    pub fn new(storage: web_sys::Storage) -> Self {
        Self { storage }
    }
}

impl KeyValueStorage for LocalStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage
            .get_item(key)
            .map_err(|e| StorageError::Backend { key: key.to_owned(), message: describe(&e) })
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StorageError::Backend { key: key.to_owned(), message: describe(&e) })
    }
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
