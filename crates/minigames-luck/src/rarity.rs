//! Rarity model
//!
//! Turns `(tier, modifier)` pairs into selection weights, item values and
//! display data. Weights are "one in N" odds and grow without bound with the
//! tier index; tiers past the end of the registry reuse the last tier's
//! metadata with a Roman-numeral suffix.

use crate::registry::{TierDefinition, TierRegistry};
use minigames_core::{to_roman, Decimal};
use serde::{Deserialize, Serialize};

/// Base of the tier curve
const CURVE_BASE: f64 = 1.75;

/// Exponent applied to `tier + 1` before raising [`CURVE_BASE`]
const CURVE_EXPONENT: f64 = 1.25;

/// Weights at or above `10^GRID_LIMIT_LOG10` are left unrounded
const GRID_LIMIT_LOG10: f64 = 1000.0;

/// Tiers above this are read straight off the inverted curve
const STEPPED_TIER_LIMIT: f64 = 1e12;

/// Largest index that converts to `u64` without losing digits
const EXACT_INDEX_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Name shown for a rarity that could not be resolved
pub const UNKNOWN_NAME: &str = "Unknown";

/// A resolved or unresolved rarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Valid { tier: u64, modifier: u64 },
    Invalid,
}

impl Rarity {
    /// Create a valid rarity
    pub fn new(tier: u64, modifier: u64) -> Self {
        Rarity::Valid { tier, modifier }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Rarity::Valid { .. })
    }
}

/// Round to two significant digits, leaving astronomically large values alone
pub fn round_to_grid(value: &Decimal) -> Decimal {
    let Some(log) = value.log10() else {
        return *value;
    };
    let log = log.to_f64();
    if log >= GRID_LIMIT_LOG10 {
        return *value;
    }
    let scale = Decimal::pow10(&Decimal::from_f64(log.floor()));
    let mantissa = (*value / scale).to_f64();
    Decimal::from_f64((mantissa * 10.0).round() / 10.0) * scale
}

/// Unmodified weight of a tier: `1.75 ^ ((tier + 1) ^ 1.25)` on the grid
pub fn tier_weight(tier: u64) -> Decimal {
    tier_weight_at(&Decimal::from(tier))
}

/// [`tier_weight`] for tier indices beyond `u64`
pub fn tier_weight_at(tier: &Decimal) -> Decimal {
    let exponent = (*tier + Decimal::ONE).powf(CURVE_EXPONENT);
    round_to_grid(&Decimal::from_f64(CURVE_BASE).pow(&exponent))
}

/// `10 ^ (m (m + 1) / 2)`, or 1 for the "no modifier" entry
pub fn base_modifier_multiplier(modifier: u64) -> Decimal {
    if modifier == 0 {
        return Decimal::ONE;
    }
    let m = Decimal::from(modifier);
    Decimal::pow10(&(m * (m + Decimal::ONE) / Decimal::from(2u64)))
}

/// Modifier multiplier after luck is applied
///
/// Luck divides the base multiplier up to the base itself; luck beyond the
/// base only contributes its square root. With a luck of 1 this equals
/// [`base_modifier_multiplier`].
pub fn modifier_luck_multiplier(modifier: u64, luck: &Decimal) -> Decimal {
    if modifier == 0 {
        return Decimal::ONE;
    }
    let base = base_modifier_multiplier(modifier);
    let mut divisor = (*luck).min(base);
    if *luck > base {
        divisor += (*luck - base).sqrt();
    }
    base.checked_div(&divisor).unwrap_or(base)
}

/// Full weight of a `(tier, modifier)` pair
pub fn weight(tier: u64, modifier: u64) -> Decimal {
    tier_weight(tier) * base_modifier_multiplier(modifier)
}

/// Highest tier whose weight does not exceed `weight` (0 below tier 0)
///
/// The result is a whole number and is not bounded by `u64`.
pub fn tier_for_weight(weight: &Decimal) -> Decimal {
    if *weight < tier_weight(1) {
        return Decimal::ZERO;
    }
    let exponent = weight
        .log(&Decimal::from_f64(CURVE_BASE))
        .unwrap_or(Decimal::ONE);
    let mut tier = (exponent.powf(1.0 / CURVE_EXPONENT) - Decimal::ONE).floor();
    if tier > Decimal::from_f64(STEPPED_TIER_LIMIT) {
        return tier;
    }

    // step over grid rounding
    for _ in 0..4 {
        if tier.is_positive() && tier_weight_at(&tier) > *weight {
            tier -= Decimal::ONE;
        } else if tier_weight_at(&(tier + Decimal::ONE)) <= *weight {
            tier += Decimal::ONE;
        } else {
            break;
        }
    }
    tier
}

/// `value` as a `u64` when it is a whole number `f64` holds exactly
fn exact_index(value: &Decimal) -> Option<u64> {
    let exact = value.is_integer()
        && !value.is_negative()
        && value.to_f64() <= EXACT_INDEX_LIMIT;
    exact.then(|| value.to_u64_saturating())
}

/// Rarity arithmetic and naming over one registry
#[derive(Debug, Clone)]
pub struct RarityModel {
    registry: TierRegistry,
    value_exponent: f64,
}

impl RarityModel {
    /// Create a model with the default value exponent
    pub fn new(registry: TierRegistry) -> Self {
        Self {
            registry,
            value_exponent: 0.75,
        }
    }

    /// Set the value exponent (builder pattern)
    pub fn with_value_exponent(mut self, exponent: f64) -> Self {
        self.value_exponent = exponent;
        self
    }

    /// Get the registry
    pub fn registry(&self) -> &TierRegistry {
        &self.registry
    }

    /// Weight of a rarity; `None` for [`Rarity::Invalid`]
    pub fn weight(&self, rarity: &Rarity) -> Option<Decimal> {
        match rarity {
            Rarity::Valid { tier, modifier } => Some(weight(*tier, *modifier)),
            Rarity::Invalid => None,
        }
    }

    /// Value of one item: `weight ^ 0.75`
    pub fn value(&self, rarity: &Rarity) -> Option<Decimal> {
        self.weight(rarity).map(|w| w.powf(self.value_exponent))
    }

    /// Display data of a tier index, extended past the registry end
    pub fn tier_data(&self, tier: u64) -> TierDefinition {
        if let Some(def) = self.registry.tier(tier) {
            return def.clone();
        }
        let last = self.registry.last_tier();
        let numeral = to_roman(tier - self.registry.tier_count() + 1);
        TierDefinition {
            name: format!("{} ({numeral})", last.name),
            display_tag: last.display_tag.clone(),
        }
    }

    /// [`RarityModel::tier_data`] for any tier index
    ///
    /// Indices too large to count exactly get `(???)` in place of a numeral.
    pub fn tier_data_at(&self, tier: &Decimal) -> TierDefinition {
        if let Some(tier) = exact_index(tier) {
            return self.tier_data(tier);
        }
        let last = self.registry.last_tier();
        TierDefinition {
            name: format!("{} (???)", last.name),
            display_tag: last.display_tag.clone(),
        }
    }

    /// Display data of a rarity
    pub fn display_data(&self, rarity: &Rarity) -> TierDefinition {
        match rarity {
            Rarity::Valid { tier, .. } => self.tier_data(*tier),
            Rarity::Invalid => TierDefinition::new(UNKNOWN_NAME),
        }
    }

    /// `"<Modifier> <Tier>"`, or just the tier name without a modifier
    pub fn to_identity(&self, rarity: &Rarity) -> String {
        let Rarity::Valid { tier, modifier } = rarity else {
            return UNKNOWN_NAME.to_string();
        };
        let tier_name = self.tier_data(*tier).name;
        match self.registry.modifier(*modifier) {
            Some(m) if !m.is_empty() => format!("{m} {tier_name}"),
            Some(_) => tier_name,
            None => {
                tracing::warn!(modifier, "modifier index outside the registry");
                UNKNOWN_NAME.to_string()
            }
        }
    }

    /// Parse an identity produced by [`RarityModel::to_identity`]
    ///
    /// Unknown or empty input yields [`Rarity::Invalid`] and a warning.
    pub fn from_identity(&self, identity: &str) -> Rarity {
        let words: Vec<&str> = identity.split_whitespace().collect();

        if let [first, rest @ ..] = words.as_slice() {
            if !rest.is_empty() {
                if let Some(modifier) = self.registry.modifier_index(first) {
                    if let Some(tier) = self.registry.tier_index(&rest.join(" ")) {
                        return Rarity::Valid { tier, modifier };
                    }
                }
            }
            if let Some(tier) = self.registry.tier_index(&words.join(" ")) {
                return Rarity::Valid { tier, modifier: 0 };
            }
        }

        tracing::warn!(identity, "unknown rarity identity");
        Rarity::Invalid
    }
}

impl Default for RarityModel {
    fn default() -> Self {
        Self::new(TierRegistry::default())
    }
}
