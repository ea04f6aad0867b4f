//! Inventory ledger
//!
//! Counts every `(tier, modifier)` identity the player owns and pays out
//! coins for new acquisitions. Entries and coins are loaded from the store
//! on first access and written back together after every update.

use crate::currency::Currency;
use crate::rarity::{Rarity, RarityModel};
use crate::selection::Acquisition;
use crate::Result;
use indexmap::IndexMap;
use minigames_core::Decimal;
use minigames_db::{encode, StateStore, StateStoreExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Store key of the entry list
pub const INVENTORY_KEY: &str = "luck_inventory";

/// Store key of the coin balance
pub const COINS_KEY: &str = "luck_coins";

/// Owned amount of one identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryEntry {
    pub identity: String,
    pub tier: u64,
    pub modifier: u64,
    pub amount: Decimal,
}

#[derive(Debug, Clone)]
struct LedgerState {
    entries: IndexMap<String, InventoryEntry>,
    coins: Currency,
}

pub struct InventoryLedger<S> {
    store: S,
    model: Arc<RarityModel>,
    reward_scale: Decimal,
    state: Option<LedgerState>,
}

impl<S: StateStore> InventoryLedger<S> {
    /// Create a ledger over a store; nothing is read until first use
    pub fn new(store: S, model: Arc<RarityModel>, reward_scale: f64) -> Self {
        Self {
            store,
            model,
            reward_scale: Decimal::from(reward_scale),
            state: None,
        }
    }

    /// Get the backing store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Whether the saved state has been read yet
    pub fn is_loaded(&self) -> bool {
        self.state.is_some()
    }

    /// Get every inventory entry, loading them if needed
    pub fn entries(&mut self) -> Result<&IndexMap<String, InventoryEntry>> {
        Ok(&self.load()?.entries)
    }

    /// Amount held of one identity (zero if absent)
    pub fn amount_of(&mut self, identity: &str) -> Result<Decimal> {
        Ok(self
            .load()?
            .entries
            .get(identity)
            .map(|e| e.amount)
            .unwrap_or_default())
    }

    /// Sum of all amounts held
    pub fn total_amount(&mut self) -> Result<Decimal> {
        Ok(self.load()?.entries.values().map(|e| e.amount).sum())
    }

    /// Get the coin balance
    pub fn coins(&mut self) -> Result<Decimal> {
        Ok(self.load()?.coins.amount())
    }

    /// Coins paid for an acquisition: `amount * value * reward_scale`
    pub fn reward_for(&self, acquisition: &Acquisition) -> Option<Decimal> {
        self.model
            .value(&acquisition.rarity)
            .map(|value| acquisition.amount * value * self.reward_scale)
    }

    /// Add acquisitions to the inventory and pay out their coins
    ///
    /// Unresolved rarities and negative amounts are skipped with a warning.
    /// Identities missing from the seed are appended. The updated entries
    /// and coins are persisted in one batch; if that write fails the ledger
    /// is left exactly as it was. Returns the coins gained.
    pub fn record_acquisitions(&mut self, acquisitions: &[Acquisition]) -> Result<Decimal> {
        let current = self.load()?;
        let mut entries = current.entries.clone();
        let mut coins = current.coins;
        let mut gained = Decimal::ZERO;

        for acquisition in acquisitions {
            let Rarity::Valid { tier, modifier } = acquisition.rarity else {
                tracing::warn!(identity = %acquisition.identity, "skipping acquisition with unresolved rarity");
                continue;
            };
            if acquisition.amount.is_negative() {
                tracing::warn!(
                    identity = %acquisition.identity,
                    amount = %acquisition.amount,
                    "skipping negative acquisition"
                );
                continue;
            }
            if acquisition.amount.is_zero() {
                continue;
            }

            match entries.get_mut(&acquisition.identity) {
                Some(entry) => entry.amount += acquisition.amount,
                None => {
                    tracing::warn!(
                        identity = %acquisition.identity,
                        "identity missing from the ledger seed, appending"
                    );
                    entries.insert(
                        acquisition.identity.clone(),
                        InventoryEntry {
                            identity: acquisition.identity.clone(),
                            tier,
                            modifier,
                            amount: acquisition.amount,
                        },
                    );
                }
            }

            if let Some(reward) = self.reward_for(acquisition) {
                if coins.gain(&reward) {
                    gained += reward;
                }
            }
        }

        let list: Vec<&InventoryEntry> = entries.values().collect();
        let batch = vec![
            (INVENTORY_KEY.to_string(), encode(INVENTORY_KEY, &list)?),
            (COINS_KEY.to_string(), encode(COINS_KEY, &coins)?),
        ];
        self.store.write_batch(batch)?;

        tracing::debug!(count = acquisitions.len(), %gained, "recorded acquisitions");
        self.state = Some(LedgerState { entries, coins });
        Ok(gained)
    }

    fn load(&mut self) -> Result<&mut LedgerState> {
        let state = match self.state.take() {
            Some(state) => state,
            None => self.read_state()?,
        };
        Ok(self.state.insert(state))
    }

    fn read_state(&self) -> Result<LedgerState> {
        let mut entries: IndexMap<String, InventoryEntry> = self
            .model
            .registry()
            .pairs()
            .map(|(tier, modifier)| {
                let identity = self.model.to_identity(&Rarity::new(tier, modifier));
                let entry = InventoryEntry {
                    identity: identity.clone(),
                    tier,
                    modifier,
                    amount: Decimal::ZERO,
                };
                (identity, entry)
            })
            .collect();

        let saved: Option<Vec<InventoryEntry>> = self.store.read(INVENTORY_KEY)?;
        let restored = saved.as_ref().map_or(0, Vec::len);
        for entry in saved.into_iter().flatten() {
            match entries.get_mut(&entry.identity) {
                Some(seeded) => seeded.amount = entry.amount,
                None => {
                    tracing::debug!(identity = %entry.identity, "restoring identity outside the registry");
                    entries.insert(entry.identity.clone(), entry);
                }
            }
        }

        let coins = self.store.read::<Currency>(COINS_KEY)?.unwrap_or_default();
        tracing::debug!(entries = entries.len(), restored, "loaded luck inventory");
        Ok(LedgerState { entries, coins })
    }
}
