//! Minigames Script - RON content loader and schema definitions
//!
//! Loads game content from RON files:
//! - Rarity tiers and modifiers
//! - Cards with data-driven effects
//! - Enemies built from named cards
//! - Game configuration

mod error;
mod loader;
mod schema;

pub use error::{Error, Result};
pub use loader::{GameContent, Loader};
pub use schema::{ActionEffectDef, CardDef, EffectDef, EnemyDef, Number, RarityDefs};
