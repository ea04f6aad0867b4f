//! Weighted selection adapter
//!
//! Builds the luck-dependent candidate table (every tier with every
//! modifier) and rolls against it. The table is cached per luck value.

use crate::rarity::{modifier_luck_multiplier, tier_weight, Rarity, RarityModel};
use crate::Result;
use indexmap::IndexMap;
use minigames_core::{Decimal, Error as CoreError, GameRng, RandomSelector, SelectionEntry};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Items gained from a roll, ready for the ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Acquisition {
    pub identity: String,
    pub rarity: Rarity,
    pub amount: Decimal,
}

impl Acquisition {
    /// Create an acquisition
    pub fn new(identity: impl Into<String>, rarity: Rarity, amount: impl Into<Decimal>) -> Self {
        Self {
            identity: identity.into(),
            rarity,
            amount: amount.into(),
        }
    }
}

#[derive(Debug)]
pub struct SelectionAdapter {
    model: Arc<RarityModel>,
    /// identity -> (tier, modifier), in enumeration order
    rarities: IndexMap<String, (u64, u64)>,
    table: Option<(Decimal, RandomSelector)>,
    generation: u64,
    exact_roll_limit: u64,
}

impl SelectionAdapter {
    /// Create an adapter; batches of up to `exact_roll_limit` are rolled one by one
    pub fn new(model: Arc<RarityModel>, exact_roll_limit: u64) -> Self {
        let rarities = model
            .registry()
            .pairs()
            .map(|(tier, modifier)| {
                let identity = model.to_identity(&Rarity::new(tier, modifier));
                (identity, (tier, modifier))
            })
            .collect();
        Self {
            model,
            rarities,
            table: None,
            generation: 0,
            exact_roll_limit,
        }
    }

    /// Get the rarity model
    pub fn model(&self) -> &RarityModel {
        &self.model
    }

    /// Number of table rebuilds so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Rarity behind a table identity
    pub fn rarity_of(&self, identity: &str) -> Rarity {
        match self.rarities.get(identity) {
            Some(&(tier, modifier)) => Rarity::new(tier, modifier),
            None => self.model.from_identity(identity),
        }
    }

    /// Candidate table for `luck`, rebuilt only when luck changed
    pub fn table(&mut self, luck: &Decimal) -> Result<&RandomSelector> {
        if !luck.is_positive() {
            return Err(CoreError::InvalidLuck(luck.to_string()).into());
        }
        let stale = !matches!(&self.table, Some((cached, _)) if cached == luck);
        if stale {
            let entries = self
                .rarities
                .iter()
                .map(|(identity, &(tier, modifier))| {
                    SelectionEntry::new(
                        identity.clone(),
                        tier_weight(tier) * modifier_luck_multiplier(modifier, luck),
                    )
                })
                .collect();
            self.generation += 1;
            tracing::debug!(%luck, generation = self.generation, "rebuilt selection table");
            self.table = Some((*luck, RandomSelector::new(entries)));
        }
        match &self.table {
            Some((_, selector)) => Ok(selector),
            None => Err(CoreError::EmptySelection.into()),
        }
    }

    /// Roll once
    pub fn select_one(&mut self, luck: &Decimal, rng: &mut GameRng) -> Result<Acquisition> {
        let identity = self
            .table(luck)?
            .select(luck, rng)
            .map(|entry| entry.name.clone())
            .ok_or(CoreError::EmptySelection)?;
        let rarity = self.rarity_of(&identity);
        Ok(Acquisition::new(identity, rarity, Decimal::ONE))
    }

    /// Roll `count` times, returning how often each identity came up
    pub fn select_many(
        &mut self,
        count: &Decimal,
        luck: &Decimal,
        rng: &mut GameRng,
    ) -> Result<IndexMap<String, Decimal>> {
        let limit = self.exact_roll_limit;
        Ok(self.table(luck)?.select_many(count, luck, rng, limit))
    }

    /// [`SelectionAdapter::select_many`] as ledger input
    pub fn acquisitions(
        &mut self,
        count: &Decimal,
        luck: &Decimal,
        rng: &mut GameRng,
    ) -> Result<Vec<Acquisition>> {
        let counts = self.select_many(count, luck, rng)?;
        Ok(counts
            .into_iter()
            .map(|(identity, amount)| {
                let rarity = self.rarity_of(&identity);
                Acquisition::new(identity, rarity, amount)
            })
            .collect())
    }
}
