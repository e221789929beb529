//! Key-value persistence
//!
//! Every collection the dashboard keeps lives under one fixed key as a JSON
//! document. The store itself only moves strings; [`TypedStore`] adds the
//! serde layer on top of any [`KeyValueStore`].
//!
//! Stored data has no schema version. A document that no longer decodes is
//! logged and read back as an empty collection, so a bad record never stops
//! the dashboard from starting.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;

/// Registered accounts
pub const USERS_KEY: &str = "users";
/// Logged-in account
pub const CURRENT_USER_KEY: &str = "current_user";
/// Machine registry
pub const MACHINES_KEY: &str = "machines";
/// Id of the monitored machine
pub const CURRENT_MACHINE_KEY: &str = "current_machine";
/// Scheduled and completed maintenance
pub const MAINTENANCE_KEY: &str = "maintenance_history";
/// Alert log, newest first
pub const ALERTS_KEY: &str = "alerts";

/// String storage addressed by key
pub trait KeyValueStore {
    /// Read the document under `key`, `None` if absent
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the document under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete `key`; deleting an absent key is not an error
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Serde helpers available on every [`KeyValueStore`]
pub trait TypedStore: KeyValueStore {
    /// Load a collection; absent or undecodable documents give an empty one
    fn load_collection<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, StoreError> {
        Ok(self.load_value(key)?.unwrap_or_default())
    }

    /// Save a whole collection
    fn save_collection<T: Serialize>(&mut self, key: &str, items: &[T]) -> Result<(), StoreError> {
        self.save_value(key, items)
    }

    /// Load a single value; undecodable documents give `None`
    fn load_value<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let Some(raw) = self.get(key)? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                log::warn!("discarding unreadable {:?} record: {}", key, e);
                Ok(None)
            }
        }
    }

    /// Save a single value
    fn save_value<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value)?;
        self.set(key, &raw)
    }
}

impl<S: KeyValueStore + ?Sized> TypedStore for S {}

fn check_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

/// One `<key>.json` file per key under a data directory
///
/// Writes go to a temporary file first and are renamed into place, so a
/// crash mid-write leaves the previous document intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a data directory
    pub fn open(root: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Data directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, key: &str) -> Result<PathBuf, StoreError> {
        check_key(key)?;
        Ok(self.root.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path(key)?) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path(key)?;
        let tmp = self.root.join(format!(".{}.json.tmp", key));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path(key)?) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process store for tests and throwaway sessions
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys held
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no key is held
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        check_key(key)?;
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        check_key(key)?;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        check_key(key)?;
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_collection_is_empty() {
        let store = MemoryStore::new();
        let items: Vec<u32> = store.load_collection(MACHINES_KEY).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn collection_round_trip() {
        let mut store = MemoryStore::new();
        store.save_collection(MACHINES_KEY, &[1u32, 2, 3]).unwrap();
        assert_eq!(store.load_collection::<u32>(MACHINES_KEY).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn malformed_document_loads_empty() {
        let mut store = MemoryStore::new();
        store.set(MAINTENANCE_KEY, "{not json").unwrap();
        let items: Vec<u32> = store.load_collection(MAINTENANCE_KEY).unwrap();
        assert!(items.is_empty());

        store.set(CURRENT_MACHINE_KEY, "\"seven\"").unwrap();
        assert_eq!(store.load_value::<u64>(CURRENT_MACHINE_KEY).unwrap(), None);
    }

    #[test]
    fn keys_are_restricted() {
        let mut store = MemoryStore::new();
        assert!(matches!(store.set("../etc/passwd", "x"), Err(StoreError::InvalidKey(_))));
        assert!(matches!(store.get(""), Err(StoreError::InvalidKey(_))));
    }

    #[test]
    fn file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();

        let mut store = FileStore::open(dir.path()).unwrap();
        store.save_value(CURRENT_MACHINE_KEY, &7u64).unwrap();
        assert!(dir.path().join("current_machine.json").exists());
        assert!(!dir.path().join(".current_machine.json.tmp").exists());

        let reopened = FileStore::open(dir.path()).unwrap();
        assert_eq!(reopened.load_value::<u64>(CURRENT_MACHINE_KEY).unwrap(), Some(7));
    }

    #[test]
    fn file_store_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path().join("nested")).unwrap();

        store.set(CURRENT_USER_KEY, "{}").unwrap();
        store.remove(CURRENT_USER_KEY).unwrap();
        store.remove(CURRENT_USER_KEY).unwrap();
        assert_eq!(store.get(CURRENT_USER_KEY).unwrap(), None);
    }
}
