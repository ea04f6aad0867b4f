//! Card definition schema

use super::Number;
use crate::Result;
use minigames_core::{BoostContribution, ModifyOp, Transform};
use minigames_rpg::{ActionDef, ActionEffect, Card, CardEffect, CardKind, Stat};
use serde::{Deserialize, Serialize};

/// Definition of a card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardDef {
    /// Unique name, also used by enemies to reference the card
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub kind: CardKind,
    #[serde(default)]
    pub effects: Vec<EffectDef>,
}

/// What a card does when its owner is reset for battle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EffectDef {
    /// Set a boost contribution on one of the owner's stats
    Boost {
        stat: Stat,
        id: String,
        #[serde(default)]
        order: i32,
        op: ModifyOp,
        value: Number,
    },
    /// Grant the owner an action
    Action {
        name: String,
        #[serde(default)]
        description: String,
        #[serde(default)]
        requires_target: bool,
        effect: ActionEffectDef,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ActionEffectDef {
    Strike,
    RandomStrike,
    Heal { amount: Number },
}

impl CardDef {
    /// Build the runtime card
    pub fn build(&self) -> Result<Card> {
        let mut card = Card::new(&self.name, self.kind).with_description(&self.description);
        for effect in &self.effects {
            card = card.with_effect(effect.build()?);
        }
        Ok(card)
    }
}

impl EffectDef {
    fn build(&self) -> Result<CardEffect> {
        Ok(match self {
            EffectDef::Boost {
                stat,
                id,
                order,
                op,
                value,
            } => CardEffect::SetBoost {
                stat: *stat,
                contribution: BoostContribution::new(
                    id,
                    *order,
                    Transform::new(*op, value.to_decimal()?),
                ),
            },
            EffectDef::Action {
                name,
                description,
                requires_target,
                effect,
            } => {
                let effect = match effect {
                    ActionEffectDef::Strike => ActionEffect::Strike,
                    ActionEffectDef::RandomStrike => ActionEffect::RandomStrike,
                    ActionEffectDef::Heal { amount } => ActionEffect::Heal {
                        amount: amount.to_decimal()?,
                    },
                };
                let mut action = ActionDef::new(name, effect).with_description(description);
                action.requires_target = *requires_target;
                CardEffect::GrantAction(action)
            }
        })
    }
}
