//! Error types for minigames-core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid luck: {0} (luck must be positive)")]
    InvalidLuck(String),

    #[error("Selection table is empty")]
    EmptySelection,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
