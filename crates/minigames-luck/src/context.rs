//! Luck minigame context
//!
//! Owns everything one player's luck screen needs: the rarity model, the
//! cached selection table, the ledger over a store and the seeded RNG.

use crate::ledger::InventoryLedger;
use crate::rarity::RarityModel;
use crate::registry::TierRegistry;
use crate::selection::{Acquisition, SelectionAdapter};
use crate::session::{RollOutcome, RollSession};
use crate::Result;
use minigames_core::{Decimal, GameConfig, GameRng};
use minigames_db::StateStore;
use std::sync::Arc;

/// What a batch of rolls produced
#[derive(Debug, Clone, PartialEq)]
pub struct RollReport {
    pub acquisitions: Vec<Acquisition>,
    pub coins_gained: Decimal,
}

pub struct LuckContext<S> {
    model: Arc<RarityModel>,
    adapter: SelectionAdapter,
    ledger: InventoryLedger<S>,
    session: RollSession,
    rng: GameRng,
}

impl<S: StateStore> LuckContext<S> {
    /// Create a context from a registry and the game configuration
    pub fn new(store: S, registry: TierRegistry, config: &GameConfig) -> Self {
        let model =
            Arc::new(RarityModel::new(registry).with_value_exponent(config.value_exponent()));
        Self {
            adapter: SelectionAdapter::new(Arc::clone(&model), config.exact_roll_limit()),
            ledger: InventoryLedger::new(store, Arc::clone(&model), config.reward_scale()),
            session: RollSession::new(),
            rng: GameRng::new(config.seed()),
            model,
        }
    }

    /// Default tiers and configuration over `store`
    pub fn with_defaults(store: S) -> Self {
        Self::new(store, TierRegistry::default(), &GameConfig::default())
    }

    /// Get the rarity model
    pub fn model(&self) -> &RarityModel {
        &self.model
    }

    /// Get the selection adapter
    pub fn adapter(&self) -> &SelectionAdapter {
        &self.adapter
    }

    /// Get the inventory ledger
    pub fn ledger(&mut self) -> &mut InventoryLedger<S> {
        &mut self.ledger
    }

    /// Get the direct roll session
    pub fn session(&self) -> &RollSession {
        &self.session
    }

    /// Get the RNG (useful for saving/loading)
    pub fn rng(&self) -> &GameRng {
        &self.rng
    }

    /// Roll once and record the result
    pub fn roll_once(&mut self, luck: &Decimal) -> Result<RollReport> {
        let acquisition = self.adapter.select_one(luck, &mut self.rng)?;
        self.record(vec![acquisition])
    }

    /// Roll `count` times and record the aggregated results
    pub fn roll(&mut self, count: &Decimal, luck: &Decimal) -> Result<RollReport> {
        let acquisitions = self.adapter.acquisitions(count, luck, &mut self.rng)?;
        self.record(acquisitions)
    }

    /// Direct roll with `luck` as a multiplier; not recorded in the ledger
    pub fn multiplier_roll(&mut self, luck: &Decimal) -> RollOutcome {
        self.session.multiplier_roll(luck, &mut self.rng)
    }

    /// Best of `times` direct rolls; not recorded in the ledger
    pub fn repeat_roll(&mut self, times: u64) -> Option<RollOutcome> {
        self.session.repeat_roll(times, &mut self.rng)
    }

    fn record(&mut self, acquisitions: Vec<Acquisition>) -> Result<RollReport> {
        let coins_gained = self.ledger.record_acquisitions(&acquisitions)?;
        Ok(RollReport {
            acquisitions,
            coins_gained,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minigames_db::MemoryStore;

    #[test]
    fn test_roll_records_every_item() {
        let mut ctx = LuckContext::with_defaults(MemoryStore::new());
        let report = ctx.roll(&Decimal::from(200.0), &Decimal::ONE).unwrap();

        let rolled: Decimal = report.acquisitions.iter().map(|a| a.amount).sum();
        assert_eq!(rolled, Decimal::from(200.0));
        assert_eq!(ctx.ledger().total_amount().unwrap(), Decimal::from(200.0));
        assert!(report.coins_gained.is_positive());
        assert_eq!(ctx.ledger().coins().unwrap(), report.coins_gained);
    }

    #[test]
    fn test_same_seed_same_results() {
        let mut a = LuckContext::with_defaults(MemoryStore::new());
        let mut b = LuckContext::with_defaults(MemoryStore::new());
        for _ in 0..10 {
            let ra = a.roll_once(&Decimal::from(3.0)).unwrap();
            let rb = b.roll_once(&Decimal::from(3.0)).unwrap();
            assert_eq!(ra, rb);
        }
        assert_eq!(a.adapter().generation(), 1);
    }

    #[test]
    fn test_huge_roll_count() {
        let mut ctx = LuckContext::with_defaults(MemoryStore::new());
        let count: Decimal = "1e50".parse().unwrap();
        let report = ctx.roll(&count, &Decimal::ONE).unwrap();
        let total = ctx.ledger().total_amount().unwrap().to_f64();
        assert!((total / 1e50 - 1.0).abs() < 1e-9);
        assert!(!report.acquisitions.is_empty());
    }

    #[test]
    fn test_direct_rolls_leave_ledger_alone() {
        let mut ctx = LuckContext::with_defaults(MemoryStore::new());
        ctx.multiplier_roll(&Decimal::from(10.0));
        assert!(ctx.repeat_roll(5).is_some());
        assert_eq!(ctx.session().rolls(), 6);
        assert!(!ctx.ledger().is_loaded());
    }
}
