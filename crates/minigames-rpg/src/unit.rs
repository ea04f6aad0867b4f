//! Battle units
//!
//! A unit's strength and max HP are [`Boost`]s rebuilt from its cards before
//! every battle. Current HP never exceeds max HP but may drop below zero.

use crate::action::{ActionDef, QueuedAction};
use crate::card::{Card, Stat};
use minigames_core::{Boost, Decimal};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

pub const BASE_HP: f64 = 10.0;
pub const BASE_STRENGTH: f64 = 1.0;

/// Position of a unit in a battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitId {
    pub side: usize,
    pub slot: usize,
}

impl UnitId {
    /// Create an ID from a side and a slot on that side
    pub fn new(side: usize, slot: usize) -> Self {
        Self { side, slot }
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.side, self.slot)
    }
}

/// Read-only snapshot handed to action executors
#[derive(Debug, Clone, PartialEq)]
pub struct UnitView {
    pub id: UnitId,
    pub name: String,
    pub hp: Decimal,
    pub max_hp: Decimal,
    pub strength: Decimal,
}

/// Changes an executor wants made to the target
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnitPatch {
    pub hp: Option<Decimal>,
}

impl UnitPatch {
    /// Patch that sets HP
    pub fn hp(hp: Decimal) -> Self {
        Self { hp: Some(hp) }
    }
}

#[derive(Debug, Clone)]
pub struct Unit {
    name: String,
    cards: Vec<Arc<Card>>,
    actions: Vec<ActionDef>,
    strength: Boost,
    hp_boost: Boost,
    hp: Decimal,
    pub(crate) outgoing: Vec<QueuedAction>,
}

impl Unit {
    /// Create a unit with base stats and no cards
    pub fn new(name: impl Into<String>) -> Self {
        let hp_boost = Boost::new(BASE_HP);
        Self {
            name: name.into(),
            cards: Vec::new(),
            actions: Vec::new(),
            strength: Boost::new(BASE_STRENGTH),
            hp: hp_boost.calculate(),
            hp_boost,
            outgoing: Vec::new(),
        }
    }

    /// Add cards (builder pattern)
    pub fn with_cards(mut self, cards: impl IntoIterator<Item = Arc<Card>>) -> Self {
        self.add_cards(cards);
        self
    }

    /// Get the unit name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the cards this unit carries
    pub fn cards(&self) -> &[Arc<Card>] {
        &self.cards
    }

    /// Add a card; it takes effect on the next reset
    pub fn add_card(&mut self, card: Arc<Card>) {
        self.cards.push(card);
    }

    /// Add several cards
    pub fn add_cards(&mut self, cards: impl IntoIterator<Item = Arc<Card>>) {
        self.cards.extend(cards);
    }

    /// Get the actions this unit can take
    pub fn actions(&self) -> &[ActionDef] {
        &self.actions
    }

    /// Look up an action by name
    pub fn action(&self, name: &str) -> Option<&ActionDef> {
        self.actions.iter().find(|a| a.name == name)
    }

    /// Grant an action until the next reset
    pub fn add_action(&mut self, action: ActionDef) {
        self.actions.push(action);
    }

    /// Current strength
    pub fn strength(&self) -> Decimal {
        self.strength.calculate()
    }

    /// Maximum HP
    pub fn max_hp(&self) -> Decimal {
        self.hp_boost.calculate()
    }

    /// Current HP
    pub fn hp(&self) -> Decimal {
        self.hp
    }

    /// Set current HP, clamped to max HP
    pub fn set_hp(&mut self, hp: Decimal) {
        self.hp = hp.min(self.max_hp());
    }

    /// Get the boost behind a stat
    pub fn boost(&self, stat: Stat) -> &Boost {
        match stat {
            Stat::Strength => &self.strength,
            Stat::Hp => &self.hp_boost,
        }
    }

    /// Get the boost behind a stat mutably
    pub fn boost_mut(&mut self, stat: Stat) -> &mut Boost {
        match stat {
            Stat::Strength => &mut self.strength,
            Stat::Hp => &mut self.hp_boost,
        }
    }

    /// Actions queued for this turn, in FIFO order
    pub fn outgoing(&self) -> &[QueuedAction] {
        &self.outgoing
    }

    /// HP at or below zero
    pub fn is_defeated(&self) -> bool {
        !self.hp.is_positive()
    }

    /// Prepare for a new battle
    ///
    /// Clears actions and queued actions, clears both boosts, applies every
    /// card, then sets HP to the new max HP. Cards may change max HP, so the
    /// HP reset comes last.
    pub fn reset_before_battle(&mut self) {
        self.actions.clear();
        self.outgoing.clear();
        self.strength.clear_boosts();
        self.hp_boost.clear_boosts();

        let cards = self.cards.clone();
        for card in &cards {
            card.apply(self);
        }

        self.hp = self.max_hp();
    }

    /// Apply an executor result
    pub fn apply_patch(&mut self, patch: UnitPatch) {
        if let Some(hp) = patch.hp {
            self.set_hp(hp);
        }
    }

    /// Snapshot of this unit for an executor
    pub fn view(&self, id: UnitId) -> UnitView {
        UnitView {
            id,
            name: self.name.clone(),
            hp: self.hp,
            max_hp: self.max_hp(),
            strength: self.strength(),
        }
    }
}
