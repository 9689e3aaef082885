use std::collections::HashMap;
use std::sync::RwLock;

use crate::{DeviceStore, StoreError, StoreKey};

/// In-memory device store.
///
/// Backs guest sessions without durable storage, and every test.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<&'static str, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DeviceStore for MemoryStore {
    fn get(&self, key: StoreKey) -> Result<Option<String>, StoreError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
        Ok(entries.get(key.as_str()).cloned())
    }

    fn put(&self, key: StoreKey, value: String) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
        entries.insert(key.as_str(), value);
        Ok(())
    }

    fn remove(&self, key: StoreKey) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
        entries.remove(key.as_str());
        Ok(())
    }
}
