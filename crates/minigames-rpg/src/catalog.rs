//! Built-in cards and enemies

use crate::action::{ActionDef, ActionEffect};
use crate::card::{Card, CardEffect, CardKind, Stat};
use crate::unit::Unit;
use minigames_core::{BoostContribution, Transform};
use std::sync::Arc;

pub const BLACK_HOLE: &str = "Black Hole";
pub const CRUELER_KING: &str = "crueler king";
pub const ICE_DAGGER_BUT_CRUELER: &str = "ice dagger but crueler";

/// Doubles strength, applied after base values
pub fn black_hole() -> Arc<Card> {
    Arc::new(
        Card::new(BLACK_HOLE, CardKind::Passive).with_effect(CardEffect::SetBoost {
            stat: Stat::Strength,
            contribution: BoostContribution::new("card-black-hole-attack", 2, Transform::mul(2.0)),
        }),
    )
}

/// Base HP 30 and base strength 5
pub fn crueler_king_card() -> Arc<Card> {
    Arc::new(
        Card::new(CRUELER_KING, CardKind::Passive)
            .with_description("the crueler king")
            .with_effect(CardEffect::SetBoost {
                stat: Stat::Hp,
                contribution: BoostContribution::new("base", 0, Transform::set(30.0)),
            })
            .with_effect(CardEffect::SetBoost {
                stat: Stat::Strength,
                contribution: BoostContribution::new("base", 0, Transform::set(5.0)),
            }),
    )
}

/// The crueler king's attack
pub fn ice_dagger_but_crueler() -> Arc<Card> {
    Arc::new(
        Card::new(ICE_DAGGER_BUT_CRUELER, CardKind::Action)
            .with_description("cold")
            .with_effect(CardEffect::GrantAction(
                ActionDef::new(ICE_DAGGER_BUT_CRUELER, ActionEffect::RandomStrike)
                    .with_description("cold")
                    .targeted(),
            )),
    )
}

/// The crueler king with both of its cards
pub fn crueler_king() -> Unit {
    Unit::new(CRUELER_KING).with_cards([crueler_king_card(), ice_dagger_but_crueler()])
}

/// Cards players can collect
pub fn cards() -> Vec<Arc<Card>> {
    vec![black_hole()]
}

/// Enemies players can fight
pub fn enemies() -> Vec<Unit> {
    vec![crueler_king()]
}
