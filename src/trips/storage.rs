//! Key/value storage for client-side state.
//!
//! `FileStorage` keeps a JSON object of string values at ~/.bestcar/storage.json,
//! the same shape a browser's localStorage has. A missing or malformed file
//! loads as empty.

use super::types::StorageError;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Whole-value get/set on string keys.
pub trait Storage: Send {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&mut self, key: &str, value: String) -> Result<(), StorageError>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn read(&self, key: &str) -> Option<String> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        (**self).write(key, value)
    }
}

// ─── In-memory ──────────────────────────────────────────────────

#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value, bypassing any encoding.
    pub fn with_value(key: &str, value: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.to_string(), value.into());
        Self { entries }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

// ─── File-backed ────────────────────────────────────────────────

#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileStorage {
    /// Load from the default location (~/.bestcar/storage.json).
    pub fn load() -> Self {
        Self::load_from(Self::default_path())
    }

    /// Load from a specific path.
    pub fn load_from(path: PathBuf) -> Self {
        let entries = Self::read_file(&path).unwrap_or_default();
        Self { path, entries }
    }

    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".bestcar")
            .join("storage.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_file(path: &Path) -> Option<HashMap<String, String>> {
        let data = fs::read_to_string(path).ok()?;
        serde_json::from_str(&data).ok()
    }

    fn persist(&self, entries: &HashMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    /// The in-memory view only changes once the file has been written.
    fn write(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        let mut next = self.entries.clone();
        next.insert(key.to_string(), value);
        self.persist(&next)?;
        self.entries = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_storage() -> (FileStorage, TempDir) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        (FileStorage::load_from(path), dir)
    }

    #[test]
    fn test_memory_read_write() {
        let mut storage = MemoryStorage::new();
        assert!(storage.read("k").is_none());
        storage.write("k", "v".into()).unwrap();
        assert_eq!(storage.read("k").as_deref(), Some("v"));
        storage.clear();
        assert!(storage.read("k").is_none());
    }

    #[test]
    fn test_file_missing_is_empty() {
        let (storage, _dir) = test_storage();
        assert!(storage.read("recentTrips").is_none());
    }

    #[test]
    fn test_file_persistence() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        {
            let mut storage = FileStorage::load_from(path.clone());
            storage.write("recentTrips", "[]".into()).unwrap();
            storage.write("other", "x".into()).unwrap();
        }

        let reloaded = FileStorage::load_from(path);
        assert_eq!(reloaded.read("recentTrips").as_deref(), Some("[]"));
        assert_eq!(reloaded.read("other").as_deref(), Some("x"));
    }

    #[test]
    fn test_file_malformed_loads_empty() {
        let (storage, _dir) = test_storage();
        fs::write(storage.path(), "not json {").unwrap();

        let mut storage = FileStorage::load_from(storage.path().to_path_buf());
        assert!(storage.read("recentTrips").is_none());

        // First write replaces the garbage.
        storage.write("recentTrips", "[]".into()).unwrap();
        let data = fs::read_to_string(storage.path()).unwrap();
        assert!(data.contains("recentTrips"));
    }

    #[test]
    fn test_failed_write_keeps_previous_value() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        let mut storage = FileStorage::load_from(path.clone());
        storage.write("recentTrips", "[]".into()).unwrap();

        // Parent is a regular file: create_dir_all fails.
        let blocker = dir.path().join("blocked");
        fs::write(&blocker, "").unwrap();
        let mut storage = FileStorage::load_from(blocker.join("storage.json"));
        assert!(storage.write("recentTrips", "[1]".into()).is_err());
        assert!(storage.read("recentTrips").is_none());

        // Target is a directory: the write itself fails.
        let mut kept = FileStorage::load_from(path.clone());
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();
        assert!(kept.write("recentTrips", "[2]".into()).is_err());
        assert_eq!(kept.read("recentTrips").as_deref(), Some("[]"));
    }

    #[test]
    fn test_boxed_storage() {
        let mut storage: Box<dyn Storage> = Box::new(MemoryStorage::new());
        storage.write("k", "v".into()).unwrap();
        assert_eq!(storage.read("k").as_deref(), Some("v"));
    }
}
