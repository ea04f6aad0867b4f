//! In-memory store.

use crate::error::{Error, Result};
use crate::state::StateStore;
use std::collections::HashMap;
use std::sync::Mutex;

/// A [`StateStore`] backed by a map; nothing outlives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.data.lock().map(|d| d.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StateStore for MemoryStore {
    fn read_raw(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let data = self.data.lock().map_err(|_| Error::Poisoned)?;
        Ok(data.get(key).cloned())
    }

    fn write_raw(&self, key: &str, bytes: Vec<u8>) -> Result<()> {
        let mut data = self.data.lock().map_err(|_| Error::Poisoned)?;
        data.insert(key.to_string(), bytes);
        Ok(())
    }

    fn write_batch(&self, entries: Vec<(String, Vec<u8>)>) -> Result<()> {
        // single lock: readers never see half a batch
        let mut data = self.data.lock().map_err(|_| Error::Poisoned)?;
        data.extend(entries);
        Ok(())
    }
}
