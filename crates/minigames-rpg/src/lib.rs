//! Minigames RPG - card-driven units and a turn-based battle engine
//!
//! Units carry cards. Resetting a unit for battle replays its cards, which
//! rebuild the unit's [`minigames_core::Boost`] stats and grant its actions.
//! A [`Battle`] drains queued actions side by side through an async
//! [`ActionExecutor`].

mod action;
mod battle;
mod card;
mod error;
mod executor;
mod unit;

pub mod catalog;

pub use action::{ActionDef, ActionEffect, QueuedAction};
pub use battle::Battle;
pub use card::{Card, CardEffect, CardKind, Stat};
pub use error::{Error, Result};
pub use executor::{ActionExecutor, StandardExecutor};
pub use unit::{Unit, UnitId, UnitPatch, UnitView, BASE_HP, BASE_STRENGTH};
