//! Cards
//!
//! A card is a list of effect descriptors applied to its owner every time
//! the owner is reset for a battle.

use crate::action::ActionDef;
use crate::unit::Unit;
use minigames_core::BoostContribution;
use serde::{Deserialize, Serialize};

/// Stats a card can boost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stat {
    Strength,
    Hp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardKind {
    Action,
    Passive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CardEffect {
    /// Register (or replace) a contribution on one of the owner's stats
    SetBoost {
        stat: Stat,
        contribution: BoostContribution,
    },
    /// Give the owner an action for this battle
    GrantAction(ActionDef),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub kind: CardKind,
    #[serde(default)]
    pub effects: Vec<CardEffect>,
}

impl Card {
    /// Create a card with no effects
    pub fn new(name: impl Into<String>, kind: CardKind) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            kind,
            effects: Vec::new(),
        }
    }

    /// Set the description (builder pattern)
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add an effect (builder pattern)
    pub fn with_effect(mut self, effect: CardEffect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Apply every effect to `unit`, in order
    pub fn apply(&self, unit: &mut Unit) {
        for effect in &self.effects {
            match effect {
                CardEffect::SetBoost { stat, contribution } => {
                    unit.boost_mut(*stat).set_boost(contribution.clone());
                }
                CardEffect::GrantAction(action) => unit.add_action(action.clone()),
            }
        }
    }
}
