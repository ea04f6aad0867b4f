//! Error types for minigames-script

use thiserror::Error;

/// Content loading error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),

    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    #[error("Duplicate definition: {0}")]
    DuplicateDefinition(String),

    #[error("Enemy {enemy:?} uses unknown card {card:?}")]
    UnknownCard { enemy: String, card: String },

    #[error(transparent)]
    Core(#[from] minigames_core::Error),

    #[error(transparent)]
    Luck(#[from] minigames_luck::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
