//! Error types for battles

use crate::UnitId;
use thiserror::Error;

/// Battle error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("A battle needs at least one side")]
    EmptyBattle,

    #[error("No unit at side {}, slot {}", .0.side, .0.slot)]
    NoSuchUnit(UnitId),

    #[error("Unit {unit} has no action named {action:?}")]
    UnknownAction { unit: UnitId, action: String },

    #[error("Action {action:?} failed: {reason}")]
    ActionFailed { action: String, reason: String },

    #[error(transparent)]
    Core(#[from] minigames_core::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
