//! Key-value stores that back the persistence gateway.

use super::{PersistenceError, PersistenceErrorKind};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, instrument};

/// Durable string key-value store, the stand-in for browser local storage.
pub trait KeyValueStore: Send {
    /// Reads the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Stores `value` under `key`, overwriting any prior value.
    fn set(&mut self, key: &str, value: String) -> Result<(), PersistenceError>;

    /// Removes `key`. Removing a missing key succeeds.
    fn remove(&mut self, key: &str) -> Result<(), PersistenceError>;
}

/// In-memory store.
///
/// Clones share the same map, so a test can keep a clone and inspect what
/// the machine wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding a single entry.
    #[instrument(skip(value))]
    pub fn with_entry(key: &str, value: impl Into<String>) -> Self {
        let store = Self::new();
        if let Ok(mut entries) = store.lock() {
            entries.insert(key.to_string(), value.into());
        }
        store
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, PersistenceError> {
        self.entries
            .lock()
            .map_err(|e| PersistenceError::storage(format!("Store lock poisoned: {}", e)))
    }
}

impl KeyValueStore for MemoryStore {
    #[instrument(skip(self))]
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.lock()?.get(key).cloned())
    }

    #[instrument(skip(self, value))]
    fn set(&mut self, key: &str, value: String) -> Result<(), PersistenceError> {
        self.lock()?.insert(key.to_string(), value);
        Ok(())
    }

    #[instrument(skip(self))]
    fn remove(&mut self, key: &str) -> Result<(), PersistenceError> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// Store keeping one `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `dir`. The directory is created on first write.
    #[instrument(skip(dir), fields(dir = %dir.as_ref().display()))]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Directory holding the entries.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No stored entry");
                Ok(None)
            }
            // The file exists but is not UTF-8, so its contents are corrupt.
            Err(e) if e.kind() == ErrorKind::InvalidData => Err(PersistenceError::new(
                PersistenceErrorKind::Deserialization(format!("Stored entry is not text: {}", e)),
            )),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self, value), fields(dir = %self.dir.display()))]
    fn set(&mut self, key: &str, value: String) -> Result<(), PersistenceError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }

    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    fn remove(&mut self, key: &str) -> Result<(), PersistenceError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_clones_share_entries() {
        let store = MemoryStore::new();
        let mut writer = store.clone();
        writer.set("k", "v".to_string()).expect("set");
        assert_eq!(store.get("k").expect("get"), Some("v".to_string()));

        writer.remove("k").expect("remove");
        assert_eq!(store.get("k").expect("get"), None);
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = FileStore::new(dir.path().join("nested"));

        assert_eq!(store.get("game").expect("get"), None);
        store.set("game", "{}".to_string()).expect("set");
        assert_eq!(store.get("game").expect("get"), Some("{}".to_string()));
        assert!(dir.path().join("nested").join("game.json").exists());

        store.remove("game").expect("remove");
        store.remove("game").expect("second remove is a no-op");
        assert_eq!(store.get("game").expect("get"), None);
    }

    #[test]
    fn test_file_store_non_utf8_is_deserialization_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("game.json"), [0xff, 0xfe, 0x7b]).expect("write");

        let store = FileStore::new(dir.path());
        let err = store.get("game").expect_err("binary data must fail");
        assert!(err.is_deserialization(), "unexpected error: {}", err);
    }
}
