//! Directory-backed slot storage for native hosts.
//!
//! DESIGN
//! ======
//! Each slot is `<dir>/<key>.json`. A write lands in a uuid-suffixed temp
//! file next to the target and is then renamed over it, so readers see
//! either the previous payload or the new one.

#[cfg(test)]
#[path = "file_test.rs"]
mod tests;

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use tracing::warn;
use uuid::Uuid;

use super::KeyValueStorage;
use crate::error::StorageError;

#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    ///
    /// # Errors
    ///
    /// [`StorageError::InvalidKey`] when `key` is not a safe file name.
    pub fn slot_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { key: key.to_owned(), source }),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.slot_path(key)?;
        let io_err = |source| StorageError::Io { key: key.to_owned(), source };

        fs::create_dir_all(&self.dir).map_err(io_err)?;

        let temp_path = self.dir.join(format!("{key}.{}.tmp", Uuid::new_v4().simple()));
        replace_via_temp(&temp_path, &path, value).map_err(io_err)
    }
}

/// Write `value` to `temp_path` and rename it over `path`.
///
/// The temp file is removed on any failure, including a short write on a
/// full disk, so failed retries never pile up partial files.
fn replace_via_temp(temp_path: &Path, path: &Path, value: &str) -> io::Result<()> {
    let result = fs::write(temp_path, value).and_then(|()| fs::rename(temp_path, path));
    if result.is_err() {
        discard_temp(temp_path);
    }
    result
}

fn discard_temp(temp_path: &Path) {
    match fs::remove_file(temp_path) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => warn!(path = %temp_path.display(), error = %e, "failed to remove temp slot file"),
    }
}

/// Keys become file names, so only a conservative character set is allowed.
fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if valid { Ok(()) } else { Err(StorageError::InvalidKey(key.to_owned())) }
}
