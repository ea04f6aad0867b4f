//! Error types for the luck minigame

use thiserror::Error;

/// Luck minigame error type
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] minigames_core::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] minigames_db::Error),

    #[error("Tier registry is empty")]
    NoTiers,

    #[error("Tier {index} has an empty name")]
    EmptyTierName { index: usize },

    #[error("Tier name {0:?} must be single-spaced without surrounding whitespace")]
    IrregularTierName(String),

    #[error("Duplicate tier name: {0}")]
    DuplicateTier(String),

    #[error("Tier name {0:?} reads as a modifier followed by another tier")]
    AmbiguousTier(String),

    #[error("Modifier list must start with the empty \"no modifier\" entry")]
    MissingNoneModifier,

    #[error("Invalid modifier name {name:?}: {reason}")]
    InvalidModifier { name: String, reason: &'static str },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
