//! File-backed local mirror.
//!
//! Stands in for browser local storage: one directory, one file per key,
//! values are UTF-8 strings (typically JSON payloads). The mirror is read
//! once at startup and written on every mutation. No cross-process lock is
//! taken; concurrent writers overwrite each other non-deterministically.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Well-known mirror keys.
pub mod keys {
    /// JSON-encoded array of cart lines.
    pub const SHOPPING_CART: &str = "shopping_cart";
    /// Anonymous-session token.
    pub const ANON_ID: &str = "anon_id";
    /// Contact id recorded by a successful identify exchange.
    pub const CONTACT_ID: &str = "contact_id";
}

/// Errors that can occur when reading or writing the mirror.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A file-backed key/value store.
///
/// Cheap to clone; holds only the backing directory path. The directory is
/// created on construction.
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    /// Open a store backed by `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    /// Read the value stored under `key`, if any.
    ///
    /// Unreadable values (missing file, bad UTF-8) are treated as absent;
    /// callers fall back to their empty state.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(value) => Some(value),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::debug!(key, error = %e, "Unreadable mirror value, treating as absent");
                None
            }
        }
    }

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the write fails.
    pub fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        fs::write(&path, value).map_err(|source| StorageError::Io { path, source })
    }

    /// Remove the value stored under `key`. Removing a missing key is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the removal fails for any reason other
    /// than the key being absent.
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    /// The backing directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, LocalStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = LocalStore::open(dir.path()).expect("open store");
        (dir, store)
    }

    #[test]
    fn test_get_missing_key() {
        let (_dir, store) = temp_store();
        assert_eq!(store.get("nope"), None);
    }

    #[test]
    fn test_set_get_roundtrip() {
        let (_dir, store) = temp_store();
        store.set(keys::ANON_ID, "token-1").expect("set");
        assert_eq!(store.get(keys::ANON_ID).as_deref(), Some("token-1"));
    }

    #[test]
    fn test_set_overwrites() {
        let (_dir, store) = temp_store();
        store.set("k", "a").expect("set");
        store.set("k", "b").expect("set");
        assert_eq!(store.get("k").as_deref(), Some("b"));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let (_dir, store) = temp_store();
        store.set("k", "v").expect("set");
        store.remove("k").expect("remove");
        assert_eq!(store.get("k"), None);
        store.remove("k").expect("remove missing");
    }

    #[test]
    fn test_persists_across_instances() {
        let dir = tempfile::tempdir().expect("tempdir");
        {
            let store = LocalStore::open(dir.path()).expect("open");
            store.set("k", "v").expect("set");
        }
        let store = LocalStore::open(dir.path()).expect("reopen");
        assert_eq!(store.get("k").as_deref(), Some("v"));
    }
}
