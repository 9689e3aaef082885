//! `dzcart-store` — the device store.
//!
//! A guest's cart and addresses live on their device until an authenticated
//! identity exists. This crate is that storage seam: a narrow key-value
//! interface over opaque JSON strings, plus one centralized decoder for typed,
//! versioned records. Anything that fails to decode is deleted and treated as
//! absent; corrupted device data never propagates.

pub mod key;
pub mod memory;
pub mod record;
pub mod sqlite;

use std::sync::Arc;

use thiserror::Error;

pub use key::StoreKey;
pub use memory::MemoryStore;
pub use record::{read_record, write_record};
pub use sqlite::SqliteStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("device store backend error: {0}")]
    Backend(String),
}

/// Key-value store scoped to one device.
///
/// Values are opaque JSON strings; typing and versioning live in
/// [`record`]. Each call is atomic, but there is no cross-call transaction:
/// callers must not interleave a read and a write of the same key across an
/// await point without re-validating.
pub trait DeviceStore: Send + Sync {
    fn get(&self, key: StoreKey) -> Result<Option<String>, StoreError>;
    fn put(&self, key: StoreKey, value: String) -> Result<(), StoreError>;
    fn remove(&self, key: StoreKey) -> Result<(), StoreError>;
}

impl<S> DeviceStore for Arc<S>
where
    S: DeviceStore + ?Sized,
{
    fn get(&self, key: StoreKey) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn put(&self, key: StoreKey, value: String) -> Result<(), StoreError> {
        (**self).put(key, value)
    }

    fn remove(&self, key: StoreKey) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}
