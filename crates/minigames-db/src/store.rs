//! Database store wrapper.

use crate::error::{Error, Result};
use crate::models::*;
use crate::state::StateStore;
use native_db::*;
use std::path::Path;
use std::sync::LazyLock;

// Static models for the database
static MODELS: LazyLock<Models> = LazyLock::new(|| {
    let mut models = Models::new();
    models.define::<StoredRecord>().unwrap();
    models
});

/// Database store for persistent game state.
pub struct Store {
    db: Database<'static>,
}

impl Store {
    /// Open or create a database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = Builder::new()
            .create(&MODELS, path.as_ref())
            .map_err(|e| Error::Database(e.to_string()))?;
        tracing::debug!(path = %path.as_ref().display(), "opened state database");
        Ok(Self { db })
    }

    /// Create an in-memory database.
    pub fn in_memory() -> Result<Self> {
        let db = Builder::new()
            .create_in_memory(&MODELS)
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(Self { db })
    }

    /// Delete the payload under `key`; returns whether one existed.
    pub fn remove(&self, key: &str) -> Result<bool> {
        let rw = self.db.rw_transaction()?;
        let stored: Option<StoredRecord> = rw.get().primary(key.to_string())?;
        let existed = stored.is_some();
        if let Some(record) = stored {
            rw.remove(record)?;
        }
        rw.commit()?;
        Ok(existed)
    }

    /// All stored keys.
    pub fn keys(&self) -> Result<Vec<String>> {
        let r = self.db.r_transaction()?;
        let scan = r.scan().primary::<StoredRecord>()?;
        let iter = scan.all()?;
        let records: std::result::Result<Vec<StoredRecord>, _> = iter.collect();
        let records = records.map_err(|e| Error::Database(e.to_string()))?;
        Ok(records.into_iter().map(|r| r.key).collect())
    }

    /// Clear all data.
    pub fn clear(&self) -> Result<()> {
        let keys = self.keys()?;

        let rw = self.db.rw_transaction()?;
        for key in keys {
            if let Some(record) = rw.get().primary::<StoredRecord>(key)? {
                rw.remove(record)?;
            }
        }
        rw.commit()?;
        Ok(())
    }
}

impl StateStore for Store {
    fn read_raw(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let r = self.db.r_transaction()?;
        let stored: Option<StoredRecord> = r.get().primary(key.to_string())?;
        Ok(stored.map(|s| s.data))
    }

    fn write_raw(&self, key: &str, bytes: Vec<u8>) -> Result<()> {
        let rw = self.db.rw_transaction()?;
        rw.upsert(StoredRecord::new(key, bytes))?;
        rw.commit()?;
        Ok(())
    }

    fn write_batch(&self, entries: Vec<(String, Vec<u8>)>) -> Result<()> {
        let rw = self.db.rw_transaction()?;
        for (key, bytes) in entries {
            rw.upsert(StoredRecord::new(key, bytes))?;
        }
        rw.commit()?;
        Ok(())
    }
}

impl From<native_db::db_type::Error> for Error {
    fn from(err: native_db::db_type::Error) -> Self {
        Error::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StateStoreExt;

    #[test]
    fn test_write_and_read_back() {
        let store = Store::in_memory().unwrap();
        store.write("luck_coins", &42u64).unwrap();
        assert_eq!(store.read::<u64>("luck_coins").unwrap(), Some(42));
        assert_eq!(store.read::<u64>("missing").unwrap(), None);
    }

    #[test]
    fn test_batch_upserts() {
        let store = Store::in_memory().unwrap();
        store.write_raw("a", vec![0]).unwrap();
        store
            .write_batch(vec![
                ("a".to_string(), vec![1]),
                ("b".to_string(), vec![2]),
            ])
            .unwrap();

        assert_eq!(store.read_raw("a").unwrap(), Some(vec![1]));
        assert_eq!(store.read_raw("b").unwrap(), Some(vec![2]));

        let mut keys = store.keys().unwrap();
        keys.sort();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_remove_and_clear() {
        let store = Store::in_memory().unwrap();
        store.write_raw("a", vec![1]).unwrap();
        store.write_raw("b", vec![2]).unwrap();

        assert!(store.remove("a").unwrap());
        assert!(!store.remove("a").unwrap());

        store.clear().unwrap();
        assert!(store.keys().unwrap().is_empty());
    }
}
