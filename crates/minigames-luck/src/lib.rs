//! Minigames Luck - rarity tiers, rolls and the inventory ledger
//!
//! This crate implements the luck minigame:
//! - Tier registry with display metadata (`TierRegistry`)
//! - Rarity arithmetic: weights, values, names and identities (`RarityModel`)
//! - Luck-scaled candidate tables with caching (`SelectionAdapter`)
//! - Inventory and coin bookkeeping over a store (`InventoryLedger`)
//! - Direct roll sessions (`RollSession`)
//! - `LuckContext` tying all of the above to one player

mod context;
mod currency;
mod error;
pub mod ledger;
pub mod rarity;
mod registry;
pub mod selection;
mod session;

pub use context::{LuckContext, RollReport};
pub use currency::Currency;
pub use error::{Error, Result};
pub use ledger::{InventoryEntry, InventoryLedger, COINS_KEY, INVENTORY_KEY};
pub use rarity::{Rarity, RarityModel};
pub use registry::{TierDefinition, TierRegistry};
pub use selection::{Acquisition, SelectionAdapter};
pub use session::{RollOutcome, RollSession};
