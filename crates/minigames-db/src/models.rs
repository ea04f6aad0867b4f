//! Database models for persistent storage.

use native_db::*;
use native_model::{native_model, Model};
use serde::{Deserialize, Serialize};

/// One saved payload, addressed by its state key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 1, version = 1)]
#[native_db]
pub struct StoredRecord {
    /// Primary key - state key such as `luck_inventory`.
    #[primary_key]
    pub key: String,
    /// bincode payload.
    pub data: Vec<u8>,
}

impl StoredRecord {
    pub fn new(key: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            key: key.into(),
            data,
        }
    }
}
