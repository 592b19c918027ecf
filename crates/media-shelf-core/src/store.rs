use crate::error::StoreError;
use crate::storage::{FileKeyValueStore, KeyValueStore};
use media_shelf_config::{Config, PathManager};
use media_shelf_models::MediaItem;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

pub use media_shelf_config::DEFAULT_COLLECTION_KEY;

/// Owner of the canonical, insertion-ordered media collection.
pub trait CollectionStore: Send + Sync {
    /// Current collection. Empty when nothing has been persisted yet.
    fn read(&self) -> Result<Vec<MediaItem>, StoreError>;

    /// Replace the persisted collection wholesale.
    fn write(&self, items: &[MediaItem]) -> Result<(), StoreError>;

    /// Read, transform and write back as one step, returning the new collection.
    ///
    /// No other caller of the same store can read or write between the read
    /// and the write. A transform that leaves the collection as it was is
    /// not written back.
    fn update<F>(&self, transform: F) -> Result<Vec<MediaItem>, StoreError>
    where
        F: FnOnce(Vec<MediaItem>) -> Vec<MediaItem>;
}

/// [`CollectionStore`] that keeps the collection as a JSON array under one key
/// of a [`KeyValueStore`].
pub struct MediaStore<K: KeyValueStore> {
    backend: K,
    key: String,
    lock: Mutex<()>,
}

impl<K: KeyValueStore> MediaStore<K> {
    pub fn new(backend: K, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn with_default_key(backend: K) -> Self {
        Self::new(backend, DEFAULT_COLLECTION_KEY)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Drop the persisted collection entirely. Returns whether anything was stored.
    pub fn clear(&self) -> Result<bool, StoreError> {
        let _guard = self.guard()?;
        let removed = self.backend.remove(&self.key)?;
        if removed {
            info!("Cleared media collection '{}'", self.key);
        }
        Ok(removed)
    }

    fn guard(&self) -> Result<MutexGuard<'_, ()>, StoreError> {
        self.lock.lock().map_err(|_| StoreError::Poisoned)
    }

    fn read_unlocked(&self) -> Result<Vec<MediaItem>, StoreError> {
        match self.backend.get(&self.key)? {
            None => {
                debug!("Collection '{}' not persisted yet, starting empty", self.key);
                Ok(Vec::new())
            }
            Some(value) => {
                let items: Vec<MediaItem> =
                    serde_json::from_value(value).map_err(|source| StoreError::Corrupt {
                        key: self.key.clone(),
                        source,
                    })?;
                debug!("Loaded collection '{}' ({} items)", self.key, items.len());
                Ok(items)
            }
        }
    }

    fn write_unlocked(&self, items: &[MediaItem]) -> Result<(), StoreError> {
        let value = serde_json::to_value(items).map_err(|source| StoreError::Serialize {
            key: self.key.clone(),
            source,
        })?;
        self.backend.set(&self.key, value)?;
        debug!("Saved collection '{}' ({} items)", self.key, items.len());
        Ok(())
    }
}

impl MediaStore<FileKeyValueStore> {
    /// Open the on-disk library described by the configuration.
    pub fn open(path_manager: &PathManager, config: &Config) -> Self {
        let library_file = path_manager.library_file(config);
        debug!("Opening media library at {:?}", library_file);
        Self::new(
            FileKeyValueStore::new(library_file),
            config.storage.collection_key.clone(),
        )
    }
}

impl<K: KeyValueStore> CollectionStore for MediaStore<K> {
    fn read(&self) -> Result<Vec<MediaItem>, StoreError> {
        let _guard = self.guard()?;
        self.read_unlocked()
    }

    fn write(&self, items: &[MediaItem]) -> Result<(), StoreError> {
        let _guard = self.guard()?;
        self.write_unlocked(items)
    }

    fn update<F>(&self, transform: F) -> Result<Vec<MediaItem>, StoreError>
    where
        F: FnOnce(Vec<MediaItem>) -> Vec<MediaItem>,
    {
        let _guard = self.guard()?;
        let current = self.read_unlocked()?;
        let next = transform(current.clone());
        if next == current {
            debug!("Collection '{}' unchanged, skipping write", self.key);
            return Ok(next);
        }
        self.write_unlocked(&next)?;
        Ok(next)
    }
}
