//! Key-value store interface.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Raw key-value persistence.
///
/// Implementations must apply [`StateStore::write_batch`] atomically: after
/// it returns an error, none of the batch is visible.
pub trait StateStore {
    /// Read the payload stored under `key`, if any.
    fn read_raw(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store a payload under `key`, replacing any previous one.
    fn write_raw(&self, key: &str, bytes: Vec<u8>) -> Result<()>;

    /// Store several payloads in one atomic write.
    fn write_batch(&self, entries: Vec<(String, Vec<u8>)>) -> Result<()>;
}

/// Encode a value the way every store payload is encoded.
pub fn encode<T: Serialize>(key: &str, value: &T) -> Result<Vec<u8>> {
    bincode::serialize(value).map_err(|e| Error::Serialization {
        key: key.to_string(),
        message: e.to_string(),
    })
}

/// Decode a payload produced by [`encode`].
pub fn decode<T: DeserializeOwned>(key: &str, bytes: &[u8]) -> Result<T> {
    bincode::deserialize(bytes).map_err(|e| Error::Serialization {
        key: key.to_string(),
        message: e.to_string(),
    })
}

/// Typed access on top of any [`StateStore`].
pub trait StateStoreExt: StateStore {
    /// Read and decode the value under `key`.
    fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.read_raw(key)? {
            Some(bytes) => decode(key, &bytes).map(Some),
            None => Ok(None),
        }
    }

    /// Encode and store `value` under `key`.
    fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        self.write_raw(key, encode(key, value)?)
    }

    /// Read the value under `key`, storing `init()` first when it is missing.
    fn get_or_init<T, F>(&self, key: &str, init: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> T,
    {
        if let Some(value) = self.read(key)? {
            return Ok(value);
        }
        let value = init();
        self.write(key, &value)?;
        Ok(value)
    }
}

impl<S: StateStore + ?Sized> StateStoreExt for S {}
