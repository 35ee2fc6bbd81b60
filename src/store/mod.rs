//! Record stores: where encoded session records live between runs.

#[cfg(feature = "kv")]
mod envelope;
#[cfg(feature = "kv")]
mod kv;

#[cfg(feature = "kv")]
pub use envelope::{ENVELOPE_VERSION, open_envelope, seal};
#[cfg(feature = "kv")]
pub use kv::KvStore;

use std::collections::HashMap;
use std::sync::Mutex;

/// Errors from record store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[cfg(feature = "kv")]
    #[error("Fjall error: {0}")]
    Fjall(#[from] fjall::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Store lock poisoned")]
    Poisoned,

    #[error("Store not initialized at {0}")]
    NotInitialized(String),
}

/// Key-addressed storage for encoded session records.
///
/// Implementations only move opaque bytes; encoding belongs to
/// [`crate::record::codec`].
pub trait RecordStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    fn save(&self, key: &str, record: &[u8]) -> Result<(), StoreError>;

    /// Save without waiting for the record to reach disk.
    ///
    /// Used for high-frequency writes such as clock ticks. The next durable
    /// [`save`](Self::save) or a clean shutdown makes it permanent.
    fn save_buffered(&self, key: &str, record: &[u8]) -> Result<(), StoreError> {
        self.save(key, record)
    }

    /// Remove the record under `key`. Purging a missing key is not an error.
    fn purge(&self, key: &str) -> Result<(), StoreError>;

    /// Every key that currently holds a record, sorted.
    fn keys(&self) -> Result<Vec<String>, StoreError>;
}

/// Process-local store, used in tests and by hosts without persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let records = self.records.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(records.get(key).cloned())
    }

    fn save(&self, key: &str, record: &[u8]) -> Result<(), StoreError> {
        let mut records = self.records.lock().map_err(|_| StoreError::Poisoned)?;
        records.insert(key.to_string(), record.to_vec());
        Ok(())
    }

    fn purge(&self, key: &str) -> Result<(), StoreError> {
        let mut records = self.records.lock().map_err(|_| StoreError::Poisoned)?;
        records.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        let records = self.records.lock().map_err(|_| StoreError::Poisoned)?;
        let mut keys: Vec<String> = records.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        assert_eq!(store.load("a").unwrap(), None);
        store.save("b", b"2").unwrap();
        store.save("a", b"1").unwrap();
        assert_eq!(store.load("a").unwrap(), Some(b"1".to_vec()));
        assert_eq!(store.keys().unwrap(), vec!["a".to_string(), "b".to_string()]);
        store.purge("a").unwrap();
        store.purge("missing").unwrap();
        assert_eq!(store.keys().unwrap(), vec!["b".to_string()]);
    }
}
