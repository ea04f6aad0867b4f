//! Game configuration - seeding, reward scale and sampling limits
//!
//! Every field has a default, so a RON file only needs to name the settings
//! it changes.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Tunables shared by the luck and battle minigames
///
/// # Example
///
/// ```
/// use minigames_core::GameConfig;
///
/// let config = GameConfig::from_ron("(seed: 7)").unwrap();
/// assert_eq!(config.seed(), 7);
/// assert_eq!(config.exact_roll_limit(), 10_000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Seed for every [`GameRng`](crate::GameRng) the game creates
    seed: u64,
    /// Coins earned per unit of item value
    reward_scale: f64,
    /// Largest roll count that is simulated roll by roll
    ///
    /// Bigger batches fall back to expected counts.
    exact_roll_limit: u64,
    /// Exponent turning an item's weight into its value
    value_exponent: f64,
}

impl GameConfig {
    /// Parse a configuration from RON text and validate it
    pub fn from_ron(text: &str) -> Result<Self> {
        let config: GameConfig =
            ron::from_str(text).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every setting is usable
    pub fn validate(&self) -> Result<()> {
        if !self.reward_scale.is_finite() || self.reward_scale < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "reward_scale must be a non-negative number, got {}",
                self.reward_scale
            )));
        }
        if !self.value_exponent.is_finite() || self.value_exponent <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "value_exponent must be positive, got {}",
                self.value_exponent
            )));
        }
        Ok(())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn reward_scale(&self) -> f64 {
        self.reward_scale
    }

    pub fn with_reward_scale(mut self, reward_scale: f64) -> Self {
        self.reward_scale = reward_scale;
        self
    }

    pub fn exact_roll_limit(&self) -> u64 {
        self.exact_roll_limit
    }

    pub fn with_exact_roll_limit(mut self, limit: u64) -> Self {
        self.exact_roll_limit = limit;
        self
    }

    pub fn value_exponent(&self) -> f64 {
        self.value_exponent
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 12345,
            reward_scale: 1000.0,
            exact_roll_limit: 10_000,
            value_exponent: 0.75,
        }
    }
}
