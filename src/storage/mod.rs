//! Key-value stores backing the history log
//!
//! The history log only needs `get` and `set` on string keys. `MemoryStore`
//! is used in tests and native hosts, `FileStore` keeps one file per key in a
//! directory, and `LocalStorageStore` writes to the browser's
//! `window.localStorage`.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::errors::StoreError;

/// Persistent byte store addressed by string keys
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), StoreError>;
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Drop a key, e.g. to simulate an evicted or corrupted slot
    pub fn remove(&mut self, key: &str) -> Option<Vec<u8>> {
        self.entries.remove(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

/// One file per key inside `root`
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `root`
    pub fn open(root: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// One file per key; bytes outside `[A-Za-z0-9_-]` are written as `%XX`
    fn path_for(&self, key: &str) -> PathBuf {
        let mut file_name = String::with_capacity(key.len());
        for byte in key.bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-' {
                file_name.push(byte as char);
            } else {
                file_name.push_str(&format!("%{:02X}", byte));
            }
        }
        self.root.join(file_name)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        // Write-then-rename so a crash never leaves a half-written snapshot
        let path = self.path_for(key);
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// Browser `window.localStorage`
pub struct LocalStorageStore {
    storage: web_sys::Storage,
}

impl LocalStorageStore {
    pub fn open() -> Result<Self, StoreError> {
        let window = web_sys::window()
            .ok_or_else(|| StoreError::Unavailable("no global window".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))?
            .ok_or_else(|| StoreError::Unavailable("localStorage disabled".to_string()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.storage
            .get_item(key)
            .map(|item| item.map(String::into_bytes))
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let value =
            std::str::from_utf8(value).map_err(|_| StoreError::InvalidUtf8(key.to_string()))?;
        self.storage
            .set_item(key, value)
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_get_set() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("a").unwrap(), None);

        store.set("a", b"one").unwrap();
        store.set("a", b"two").unwrap();

        assert_eq!(store.get("a").unwrap(), Some(b"two".to_vec()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path().join("history")).unwrap();

        assert_eq!(store.get("save_abc_0").unwrap(), None);
        store.set("save_abc_0", b"{}").unwrap();

        let reopened = FileStore::open(store.root()).unwrap();
        assert_eq!(reopened.get("save_abc_0").unwrap(), Some(b"{}".to_vec()));
    }

    #[test]
    fn test_file_store_escapes_path_separators() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();

        store.set("save_../x_0", b"data").unwrap();

        assert!(store.path_for("save_../x_0").starts_with(dir.path()));
        assert_eq!(store.get("save_../x_0").unwrap(), Some(b"data".to_vec()));
    }

    #[test]
    fn test_file_store_keeps_punctuated_keys_apart() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();

        store.set("save_a.b_0", b"dotted").unwrap();
        store.set("save_a/b_0", b"slashed").unwrap();
        store.set("save_a%2Eb_0", b"literal").unwrap();

        assert_eq!(store.get("save_a.b_0").unwrap(), Some(b"dotted".to_vec()));
        assert_eq!(store.get("save_a/b_0").unwrap(), Some(b"slashed".to_vec()));
        assert_eq!(store.get("save_a%2Eb_0").unwrap(), Some(b"literal".to_vec()));
    }
}
