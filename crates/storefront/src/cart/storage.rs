//! String-keyed persistent store, mirroring browser `localStorage`.
//!
//! The cart owns whichever store it is handed (an explicit constructor
//! parameter, never ambient global state). Production uses [`FileStore`];
//! tests use [`MemoryStore`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;

/// Errors raised by the persistent store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file itself is not a valid JSON object.
    ///
    /// Distinct from a malformed *value* under a key, which callers degrade
    /// to empty; a corrupt file is surfaced so it is not silently clobbered.
    #[error("store file {path} is not a JSON object: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A string-keyed store of string values.
///
/// Matches `localStorage` semantics: values are opaque strings, last write
/// wins, and removing an absent key is a no-op.
pub trait KeyValueStore {
    /// Read the value under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key` entirely. Absent keys are ignored.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

// =============================================================================
// FileStore
// =============================================================================

/// File-backed store: a single JSON object `{key: value}` on disk.
///
/// Every mutation reads the current file, applies the change, and writes the
/// whole object back. That keeps the file authoritative across surfaces that
/// hold their own in-memory views, the same way separate browser tabs share
/// one `localStorage`.
pub struct FileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileStore {
    /// Open a store at `path`, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        serde_json::from_slice(&bytes).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(map).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        std::fs::write(&self.path, bytes).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

fn poisoned_lock() -> StorageError {
    StorageError::Io {
        path: PathBuf::new(),
        source: std::io::Error::other("store lock poisoned"),
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().map_err(|_| poisoned_lock())?;
        Ok(self.read_map()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().map_err(|_| poisoned_lock())?;
        let mut map = self.read_map()?;
        map.insert(key.to_owned(), value.to_owned());
        self.write_map(&map)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().map_err(|_| poisoned_lock())?;
        let mut map = self.read_map()?;
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

// =============================================================================
// MemoryStore
// =============================================================================

/// In-memory store for tests.
#[derive(Default)]
pub struct MemoryStore {
    map: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with entries.
    #[must_use]
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            map: Mutex::new(map),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let map = self.map.lock().map_err(|_| poisoned_lock())?;
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = self.map.lock().map_err(|_| poisoned_lock())?;
        map.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut map = self.map.lock().map_err(|_| poisoned_lock())?;
        map.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("local-store.json")).unwrap();

        assert!(store.get("cart").unwrap().is_none());
        store.set("cart", "[]").unwrap();
        assert_eq!(store.get("cart").unwrap().as_deref(), Some("[]"));

        store.set("cart", "[1,2]").unwrap();
        assert_eq!(store.get("cart").unwrap().as_deref(), Some("[1,2]"));
    }

    #[test]
    fn test_file_store_remove_deletes_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("local-store.json")).unwrap();

        store.set("cart", "[]").unwrap();
        store.remove("cart").unwrap();
        assert!(store.get("cart").unwrap().is_none());

        // Removing an absent key is a no-op
        store.remove("cart").unwrap();
    }

    #[test]
    fn test_file_store_shares_state_across_handles() {
        // Two handles over the same path see each other's writes, like two
        // browser tabs over one localStorage.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local-store.json");
        let writer = FileStore::open(&path).unwrap();
        let reader = FileStore::open(&path).unwrap();

        writer.set("cart", "[\"x\"]").unwrap();
        assert_eq!(reader.get("cart").unwrap().as_deref(), Some("[\"x\"]"));
    }

    #[test]
    fn test_file_store_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/store.json");
        let store = FileStore::open(&path).unwrap();
        store.set("theme", "dark").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_file_store_corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local-store.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileStore::open(&path).unwrap();
        assert!(matches!(
            store.get("cart"),
            Err(StorageError::Corrupt { .. })
        ));
    }

    #[test]
    fn test_memory_store_behaves_like_file_store() {
        let store = MemoryStore::new();
        assert!(store.get("cart").unwrap().is_none());
        store.set("cart", "[]").unwrap();
        assert_eq!(store.get("cart").unwrap().as_deref(), Some("[]"));
        store.remove("cart").unwrap();
        assert!(store.get("cart").unwrap().is_none());
    }
}
