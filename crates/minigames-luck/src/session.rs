//! Roll sessions
//!
//! Direct rolls against the tier curve, independent of the inventory: a roll
//! is `luck / u` and lands on the highest tier whose weight it reaches.

use crate::rarity::{tier_for_weight, RarityModel};
use minigames_core::{Decimal, GameRng};
use serde::{Deserialize, Serialize};

/// Result of one direct roll
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollOutcome {
    /// Roll before luck: `1 / u`
    pub base_roll: Decimal,
    /// Roll after luck: `luck / u`
    pub roll: Decimal,
    /// Tier reached; may lie past `u64`
    pub tier: Decimal,
}

impl RollOutcome {
    fn draw(luck: &Decimal, rng: &mut GameRng) -> Self {
        let u = rng.next_unit_decimal();
        let roll = *luck / u;
        Self {
            base_roll: Decimal::ONE / u,
            roll,
            tier: tier_for_weight(&roll),
        }
    }

    /// Tier name of this outcome
    pub fn name(&self, model: &RarityModel) -> String {
        model.tier_data_at(&self.tier).name
    }
}

/// Running totals of a roll screen
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RollSession {
    rolls: u64,
    effective_rolls: Decimal,
    last: Option<RollOutcome>,
    best: Option<RollOutcome>,
}

impl RollSession {
    /// Create an empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rolls made
    pub fn rolls(&self) -> u64 {
        self.rolls
    }

    /// Sum of the luck of every roll
    pub fn effective_rolls(&self) -> Decimal {
        self.effective_rolls
    }

    /// Most recent roll
    pub fn last(&self) -> Option<&RollOutcome> {
        self.last.as_ref()
    }

    /// Highest roll so far
    pub fn best(&self) -> Option<&RollOutcome> {
        self.best.as_ref()
    }

    /// One roll with `luck` as a multiplier
    pub fn multiplier_roll(&mut self, luck: &Decimal, rng: &mut GameRng) -> RollOutcome {
        let outcome = RollOutcome::draw(luck, rng);
        self.rolls += 1;
        self.effective_rolls += *luck;
        self.observe(outcome.clone());
        outcome
    }

    /// `times` rolls at luck 1, keeping the best of them
    pub fn repeat_roll(&mut self, times: u64, rng: &mut GameRng) -> Option<RollOutcome> {
        let mut best: Option<RollOutcome> = None;
        for _ in 0..times {
            let outcome = RollOutcome::draw(&Decimal::ONE, rng);
            if best.as_ref().map_or(true, |b| outcome.roll > b.roll) {
                best = Some(outcome);
            }
        }
        self.rolls += times;
        self.effective_rolls += Decimal::from(times);
        if let Some(outcome) = &best {
            self.observe(outcome.clone());
        }
        best
    }

    fn observe(&mut self, outcome: RollOutcome) {
        if self.best.as_ref().map_or(true, |b| outcome.roll > b.roll) {
            self.best = Some(outcome.clone());
        }
        self.last = Some(outcome);
    }
}
