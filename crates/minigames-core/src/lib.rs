//! Minigames Core - numbers, randomness and stat composition
//!
//! This crate provides the building blocks shared by every minigame:
//! - `Decimal`, a signed number with no practical magnitude limit
//! - Deterministic RNG (`GameRng`)
//! - Luck-scaled weighted selection (`RandomSelector`)
//! - Ordered stat composition (`Boost`) driven by `ModifyOp` transforms
//! - Roman numerals for unbounded tier indices
//! - Shared game configuration (`GameConfig`)

mod boost;
mod config;
pub mod decimal;
pub mod effect;
mod error;
mod rng;
mod roman;
pub mod selector;

pub use boost::{Boost, BoostContribution};
pub use config::GameConfig;
pub use decimal::{Decimal, DecimalParts};
pub use effect::{ModifyOp, Transform};
pub use error::{Error, Result};
pub use rng::GameRng;
pub use roman::to_roman;
pub use selector::{RandomSelector, SelectionEntry};
