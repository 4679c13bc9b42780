//! Async key-value store adapter.
//!
//! The engine talks to storage through this trait only. Individual calls
//! are atomic per key; composite read-then-write sequences are not, the
//! single-writer usage model makes that acceptable (last write wins).

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::StorageError;

/// Opaque, persistent, string-keyed store.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Read one value. `Ok(None)` when the key is absent.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write one value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Every key currently present, in no particular order.
    async fn get_all_keys(&self) -> Result<Vec<String>, StorageError>;

    /// Bulk read: one `(key, value)` pair per requested key.
    async fn multi_get(&self, keys: &[String]) -> Result<Vec<(String, Option<String>)>, StorageError>;

    /// Delete everything in the store.
    async fn clear(&self) -> Result<(), StorageError>;
}

/// In-memory store for tests and embedders that do not need persistence.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for MemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn get_all_keys(&self) -> Result<Vec<String>, StorageError> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        Ok(entries.keys().cloned().collect())
    }

    async fn multi_get(&self, keys: &[String]) -> Result<Vec<(String, Option<String>)>, StorageError> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        Ok(keys
            .iter()
            .map(|k| (k.clone(), entries.get(k).cloned()))
            .collect())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.clear();
        Ok(())
    }
}
