//! Action execution
//!
//! Battles hand each queued action to an [`ActionExecutor`], which decides
//! what happens to the target. Execution is asynchronous so effects can wait
//! on animations, network peers or anything else.

use crate::action::{ActionDef, ActionEffect};
use crate::unit::{UnitPatch, UnitView};
use crate::{Error, Result};
use async_trait::async_trait;
use minigames_core::{Decimal, GameRng};
use std::sync::Mutex;

/// Resolves one action invocation into a patch for the target
#[async_trait]
pub trait ActionExecutor: Send + Sync {
    async fn execute(
        &self,
        action: &ActionDef,
        performer: &UnitView,
        target: &UnitView,
    ) -> Result<UnitPatch>;
}

/// Executes the built-in [`ActionEffect`]s with a seeded RNG
pub struct StandardExecutor {
    rng: Mutex<GameRng>,
}

impl StandardExecutor {
    /// Create an executor with a seeded RNG
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(GameRng::new(seed)),
        }
    }

    fn random_between(&self, action: &ActionDef, min: &Decimal, max: &Decimal) -> Result<Decimal> {
        let mut rng = self.rng.lock().map_err(|_| Error::ActionFailed {
            action: action.name.clone(),
            reason: "rng lock poisoned".to_string(),
        })?;
        Ok(rng.decimal_between(min, max))
    }
}

impl Default for StandardExecutor {
    fn default() -> Self {
        Self {
            rng: Mutex::new(GameRng::default()),
        }
    }
}

#[async_trait]
impl ActionExecutor for StandardExecutor {
    async fn execute(
        &self,
        action: &ActionDef,
        performer: &UnitView,
        target: &UnitView,
    ) -> Result<UnitPatch> {
        let hp = match &action.effect {
            ActionEffect::Strike => target.hp - performer.strength,
            ActionEffect::RandomStrike => {
                let ceiling = target.hp - performer.strength;
                self.random_between(action, &Decimal::ZERO, &ceiling)?.round()
            }
            ActionEffect::Heal { amount } => target.hp + *amount,
        };
        tracing::debug!(
            action = %action.name,
            performer = %performer.name,
            target = %target.name,
            %hp,
            "resolved action"
        );
        Ok(UnitPatch::hp(hp))
    }
}
