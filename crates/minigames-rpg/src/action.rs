//! Actions units can take in battle

use crate::UnitId;
use minigames_core::Decimal;
use serde::{Deserialize, Serialize};

/// What an action does to its target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActionEffect {
    /// Take the performer's strength off the target's HP
    Strike,
    /// Set the target's HP to a random whole value between 0 and
    /// `hp - strength`
    RandomStrike,
    /// Restore HP, never above max
    Heal { amount: Decimal },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionDef {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Without a target the action applies to the performer itself
    #[serde(default)]
    pub requires_target: bool,
    pub effect: ActionEffect,
}

impl ActionDef {
    /// Create an untargeted action
    pub fn new(name: impl Into<String>, effect: ActionEffect) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            requires_target: false,
            effect,
        }
    }

    /// Set the description (builder pattern)
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Require a target other than the performer
    pub fn targeted(mut self) -> Self {
        self.requires_target = true;
        self
    }
}

/// An action waiting in a unit's outgoing queue
#[derive(Debug, Clone, PartialEq)]
pub struct QueuedAction {
    pub action: ActionDef,
    pub performer: UnitId,
    pub target: UnitId,
}
