//! Minigames DB - Key-value persistence for progression state
//!
//! Game state is saved as opaque byte payloads under string keys:
//! - `StateStore` is the raw key-value interface (with atomic batch writes)
//! - `StateStoreExt` adds typed, bincode-encoded reads and writes
//! - `MemoryStore` keeps everything in a map (tests, throwaway sessions)
//! - `Store` persists to disk through native_db

mod error;
mod memory;
mod models;
mod state;
mod store;

pub use error::{Error, Result};
pub use memory::MemoryStore;
pub use state::{decode, encode, StateStore, StateStoreExt};
pub use store::Store;
