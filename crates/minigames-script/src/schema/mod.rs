//! Schema definitions for RON content files

pub mod card;
pub mod enemy;
pub mod rarity;

pub use card::{ActionEffectDef, CardDef, EffectDef};
pub use enemy::EnemyDef;
pub use rarity::RarityDefs;

use crate::Result;
use minigames_core::Decimal;
use serde::{Deserialize, Serialize};

/// A number as written in content files
///
/// Plain RON numbers cover everyday values. Strings reach past `f64`,
/// e.g. `"1e400"` or `"ee5"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    Float(f64),
    Text(String),
}

impl Number {
    pub fn to_decimal(&self) -> Result<Decimal> {
        match self {
            Number::Float(value) => Ok(Decimal::from_f64(*value)),
            Number::Text(text) => Ok(text.parse()?),
        }
    }
}
