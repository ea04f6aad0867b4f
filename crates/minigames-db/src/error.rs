//! Error types for storage operations.

use thiserror::Error;

/// Errors that can occur while reading or writing saved state.
#[derive(Debug, Error)]
pub enum Error {
    /// Native DB error.
    #[error("Database error: {0}")]
    Database(String),

    /// Payload could not be encoded or decoded.
    #[error("Serialization error for key {key}: {message}")]
    Serialization { key: String, message: String },

    /// In-memory store lock was poisoned by a panicking writer.
    #[error("Store lock poisoned")]
    Poisoned,
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, Error>;
