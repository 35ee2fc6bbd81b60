//! fjall-backed record store.

use std::path::Path;

use fjall::{Keyspace, KeyspaceCreateOptions, PersistMode};

use super::envelope::{open_envelope, seal};
use super::{RecordStore, StoreError};
use crate::logging::debug;

const META_KEYSPACE: &str = "_meta";
const META_CONFIG_KEY: &str = "config";
const SESSIONS_KEYSPACE: &str = "sessions";

/// Current store layout version.
const STORE_VERSION: u32 = 1;

/// Session records persisted in a fjall database.
pub struct KvStore {
    db: fjall::Database,
    sessions: Keyspace,
}

impl KvStore {
    /// Open an existing store at the given path.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            return Err(StoreError::NotInitialized(path.display().to_string()));
        }

        let db = fjall::Database::builder(path).open()?;
        let meta = db.keyspace(META_KEYSPACE, KeyspaceCreateOptions::default)?;

        let Some(config) = meta.get(META_CONFIG_KEY)? else {
            return Err(StoreError::NotInitialized(path.display().to_string()));
        };
        let version = u32::from_le_bytes(
            config
                .as_ref()
                .try_into()
                .map_err(|_| StoreError::InvalidFormat("Invalid config format".to_string()))?,
        );
        if version != STORE_VERSION {
            return Err(StoreError::InvalidFormat(format!(
                "Store version mismatch: expected {}, got {}",
                STORE_VERSION, version
            )));
        }

        let sessions = db.keyspace(SESSIONS_KEYSPACE, KeyspaceCreateOptions::default)?;
        Ok(Self { db, sessions })
    }

    /// Initialize a new store at the given path.
    pub fn init(path: &Path) -> Result<Self, StoreError> {
        let db = fjall::Database::builder(path).open()?;
        let meta = db.keyspace(META_KEYSPACE, KeyspaceCreateOptions::default)?;
        meta.insert(META_CONFIG_KEY, STORE_VERSION.to_le_bytes())?;
        let sessions = db.keyspace(SESSIONS_KEYSPACE, KeyspaceCreateOptions::default)?;
        db.persist(PersistMode::SyncAll)?;

        Ok(Self { db, sessions })
    }

    /// Open the store, initializing it first if the path does not exist yet.
    pub fn open_or_init(path: &Path) -> Result<Self, StoreError> {
        if path.exists() {
            Self::open(path)
        } else {
            debug!(path = %path.display(), "initializing record store");
            Self::init(path)
        }
    }
}

impl RecordStore for KvStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let Some(bytes) = self.sessions.get(key)? else {
            return Ok(None);
        };
        open_envelope(&bytes).map(|payload| Some(payload.to_vec()))
    }

    fn save(&self, key: &str, record: &[u8]) -> Result<(), StoreError> {
        self.sessions.insert(key, seal(record))?;
        self.db.persist(PersistMode::SyncAll)?;
        Ok(())
    }

    fn save_buffered(&self, key: &str, record: &[u8]) -> Result<(), StoreError> {
        self.sessions.insert(key, seal(record))?;
        self.db.persist(PersistMode::Buffer)?;
        Ok(())
    }

    fn purge(&self, key: &str) -> Result<(), StoreError> {
        self.sessions.remove(key)?;
        self.db.persist(PersistMode::SyncAll)?;
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        // Keys come back in sorted order; unreadable entries are skipped.
        Ok(self
            .sessions
            .iter()
            .filter_map(|kv| kv.key().ok())
            .map(|key| String::from_utf8_lossy(&key).into_owned())
            .collect())
    }
}
