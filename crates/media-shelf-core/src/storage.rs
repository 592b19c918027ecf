use crate::error::StoreError;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::{debug, trace};

/// Generic durable key-value storage.
///
/// Values are structured JSON so the stored document stays self-describing.
/// Implementations must treat a missing key as `None`, never as an error.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;

    /// Returns whether the key was present.
    fn remove(&self, key: &str) -> Result<bool, StoreError>;

    fn keys(&self) -> Result<Vec<String>, StoreError>;
}

/// All keys live in a single JSON object on disk.
///
/// Every operation re-reads the document so a value written by an earlier
/// process is always visible. Writes replace the whole file through a
/// temp-file rename, so a crash never leaves a half-written document.
pub struct FileKeyValueStore {
    path: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn load_document(&self) -> Result<BTreeMap<String, Value>, StoreError> {
        if !self.path.exists() {
            debug!("Storage document {:?} does not exist, treating as empty", self.path);
            return Ok(BTreeMap::new());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content).map_err(|source| StoreError::CorruptDocument {
            path: self.path.clone(),
            source,
        })
    }

    fn save_document(&self, document: &BTreeMap<String, Value>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        let content = serde_json::to_string_pretty(document).map_err(|source| StoreError::Serialize {
            key: "<document>".to_string(),
            source,
        })?;

        // Atomic write: write to temp file, then rename
        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, content).map_err(|e| self.io_error(e))?;
        std::fs::rename(&temp_path, &self.path).map_err(|e| self.io_error(e))?;

        trace!("Saved storage document {:?} ({} keys)", self.path, document.len());
        Ok(())
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.load_document()?.remove(key))
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut document = self.load_document()?;
        document.insert(key.to_string(), value);
        self.save_document(&document)
    }

    fn remove(&self, key: &str) -> Result<bool, StoreError> {
        let mut document = self.load_document()?;
        if document.remove(key).is_none() {
            return Ok(false);
        }
        self.save_document(&document)?;
        Ok(true)
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.load_document()?.into_keys().collect())
    }
}

/// In-process store for tests. Nothing survives the process.
#[derive(Default)]
pub struct MemoryKeyValueStore {
    values: RwLock<HashMap<String, Value>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let values = self.values.read().map_err(|_| StoreError::Poisoned)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut values = self.values.write().map_err(|_| StoreError::Poisoned)?;
        values.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, StoreError> {
        let mut values = self.values.write().map_err(|_| StoreError::Poisoned)?;
        Ok(values.remove(key).is_some())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        let values = self.values.read().map_err(|_| StoreError::Poisoned)?;
        let mut keys: Vec<String> = values.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}
