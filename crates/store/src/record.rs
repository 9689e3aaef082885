//! Typed, versioned records over the raw device store.
//!
//! This module is the single place where device data is decoded. The policy is
//! uniform: a record that is missing reads as `None`; a record that is
//! malformed, has the wrong shape, or carries an unknown schema version is
//! deleted and also reads as `None`. Decoding never surfaces an error to the
//! caller, so a corrupted device entry cannot take the storefront down.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::{DeviceStore, StoreError, StoreKey};

/// Current on-device schema version.
const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct RecordEnvelope<T> {
    v: u32,
    data: T,
}

/// Read and decode a record.
///
/// Backend read failures degrade to `None` as well (the device store is a
/// cache of convenience, never an authority).
pub fn read_record<T, S>(store: &S, key: StoreKey) -> Option<T>
where
    T: DeserializeOwned,
    S: DeviceStore + ?Sized,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(err) => {
            tracing::warn!(%key, %err, "device store read failed; treating record as absent");
            return None;
        }
    };

    match serde_json::from_str::<RecordEnvelope<T>>(&raw) {
        Ok(envelope) if envelope.v == SCHEMA_VERSION => Some(envelope.data),
        Ok(envelope) => {
            tracing::warn!(%key, version = envelope.v, "unknown device record version; discarding");
            discard(store, key);
            None
        }
        Err(err) => {
            tracing::warn!(%key, %err, "corrupt device record; discarding");
            discard(store, key);
            None
        }
    }
}

/// Encode and write a record under the current schema version.
pub fn write_record<T, S>(store: &S, key: StoreKey, value: &T) -> Result<(), StoreError>
where
    T: Serialize,
    S: DeviceStore + ?Sized,
{
    let envelope = RecordEnvelope {
        v: SCHEMA_VERSION,
        data: value,
    };
    let raw = serde_json::to_string(&envelope)
        .map_err(|e| StoreError::Backend(format!("record serialization failed: {e}")))?;
    store.put(key, raw)
}

fn discard<S: DeviceStore + ?Sized>(store: &S, key: StoreKey) {
    if let Err(err) = store.remove(key) {
        tracing::warn!(%key, %err, "failed to discard corrupt device record");
    }
}
