//! Turn-based battle resolution
//!
//! Units queue actions, then [`Battle::advance_to_next_turn`] drains every
//! queue on the current side through an [`ActionExecutor`] and hands the turn
//! to the next side.
//!
//! Units are drained one after another in slot order, and each invocation is
//! awaited before the next starts. If the executor fails, the side keeps its
//! queues and the turn; a per-slot cursor remembers which invocations already
//! landed, so calling `advance_to_next_turn` again picks up where it stopped.

use crate::executor::ActionExecutor;
use crate::unit::{Unit, UnitId, UnitView};
use crate::{Error, QueuedAction, Result};

#[derive(Debug, Clone)]
pub struct Battle {
    sides: Vec<Vec<Unit>>,
    current_side: usize,
    /// Completed invocations per slot of the current side
    cursor: Vec<usize>,
}

impl Battle {
    /// Create a battle; side 0 moves first
    pub fn new(sides: Vec<Vec<Unit>>) -> Result<Self> {
        if sides.is_empty() {
            return Err(Error::EmptyBattle);
        }
        Ok(Self {
            sides,
            current_side: 0,
            cursor: Vec::new(),
        })
    }

    /// Get all sides
    pub fn sides(&self) -> &[Vec<Unit>] {
        &self.sides
    }

    /// Index of the side whose turn it is
    pub fn current_side(&self) -> usize {
        self.current_side
    }

    /// Get a unit by ID
    pub fn unit(&self, id: UnitId) -> Result<&Unit> {
        self.sides
            .get(id.side)
            .and_then(|side| side.get(id.slot))
            .ok_or(Error::NoSuchUnit(id))
    }

    /// Get a mutable unit by ID
    pub fn unit_mut(&mut self, id: UnitId) -> Result<&mut Unit> {
        self.sides
            .get_mut(id.side)
            .and_then(|side| side.get_mut(id.slot))
            .ok_or(Error::NoSuchUnit(id))
    }

    /// HP at or below zero
    pub fn is_defeated(&self, id: UnitId) -> Result<bool> {
        Ok(self.unit(id)?.is_defeated())
    }

    /// Reset every unit for a fresh battle
    pub fn reset_all(&mut self) {
        for unit in self.sides.iter_mut().flatten() {
            unit.reset_before_battle();
        }
        self.cursor.clear();
    }

    /// Queue one of the performer's actions
    ///
    /// Actions that don't require a target are aimed at the performer.
    pub fn queue_action(&mut self, performer: UnitId, action: &str, target: UnitId) -> Result<()> {
        self.unit(target)?;
        let unit = self.unit_mut(performer)?;
        let action = unit
            .action(action)
            .cloned()
            .ok_or_else(|| Error::UnknownAction {
                unit: performer,
                action: action.to_string(),
            })?;
        let target = if action.requires_target {
            target
        } else {
            performer
        };
        unit.outgoing.push(QueuedAction {
            action,
            performer,
            target,
        });
        Ok(())
    }

    /// Resolve the current side's queued actions, then rotate to the next side
    pub async fn advance_to_next_turn<E>(&mut self, executor: &E) -> Result<()>
    where
        E: ActionExecutor + ?Sized,
    {
        let side = self.current_side;
        let slots = self.sides[side].len();
        self.cursor.resize(slots, 0);

        for slot in 0..slots {
            loop {
                let done = self.cursor[slot];
                let Some(queued) = self.sides[side][slot].outgoing.get(done).cloned() else {
                    break;
                };
                let performer = self.view(queued.performer)?;
                let target = self.view(queued.target)?;
                let patch = executor
                    .execute(&queued.action, &performer, &target)
                    .await?;
                self.unit_mut(queued.target)?.apply_patch(patch);
                self.cursor[slot] = done + 1;
            }
        }

        for unit in &mut self.sides[side] {
            unit.outgoing.clear();
        }
        self.cursor.clear();
        self.current_side = (side + 1) % self.sides.len();
        tracing::debug!(from = side, to = self.current_side, "advanced turn");
        Ok(())
    }

    fn view(&self, id: UnitId) -> Result<UnitView> {
        Ok(self.unit(id)?.view(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::executor::StandardExecutor;
    use crate::unit::UnitPatch;
    use crate::{ActionDef, ActionEffect};
    use async_trait::async_trait;
    use minigames_core::Decimal;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const HERO: UnitId = UnitId { side: 0, slot: 0 };
    const FOE: UnitId = UnitId { side: 1, slot: 0 };

    fn fighter(name: &str) -> Unit {
        let mut unit = Unit::new(name);
        unit.add_action(ActionDef::new("hit", ActionEffect::Strike).targeted());
        unit
    }

    fn duel() -> Battle {
        Battle::new(vec![vec![fighter("hero")], vec![fighter("foe")]]).unwrap()
    }

    /// Fails the first time it sees its `fail_at`-th call
    struct FlakyExecutor {
        calls: AtomicUsize,
        fail_at: usize,
        inner: StandardExecutor,
    }

    #[async_trait]
    impl ActionExecutor for FlakyExecutor {
        async fn execute(
            &self,
            action: &ActionDef,
            performer: &UnitView,
            target: &UnitView,
        ) -> Result<UnitPatch> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call == self.fail_at {
                return Err(Error::ActionFailed {
                    action: action.name.clone(),
                    reason: "interrupted".to_string(),
                });
            }
            self.inner.execute(action, performer, target).await
        }
    }

    #[test]
    fn test_empty_battle_rejected() {
        assert_eq!(Battle::new(Vec::new()).unwrap_err(), Error::EmptyBattle);
    }

    #[tokio::test]
    async fn test_strike_and_rotate() {
        let mut battle = duel();
        let strength = battle.unit(HERO).unwrap().strength();
        let before = battle.unit(FOE).unwrap().hp();

        battle.queue_action(HERO, "hit", FOE).unwrap();
        battle
            .advance_to_next_turn(&StandardExecutor::default())
            .await
            .unwrap();

        assert_eq!(battle.unit(FOE).unwrap().hp(), before - strength);
        assert_eq!(battle.current_side(), 1);
        assert!(battle.unit(HERO).unwrap().outgoing().is_empty());
    }

    #[tokio::test]
    async fn test_sides_wrap_around() {
        let mut battle = duel();
        let executor = StandardExecutor::default();
        battle.advance_to_next_turn(&executor).await.unwrap();
        battle.advance_to_next_turn(&executor).await.unwrap();
        assert_eq!(battle.current_side(), 0);
    }

    #[tokio::test]
    async fn test_failure_is_resumable() {
        let mut battle = duel();
        battle.queue_action(HERO, "hit", FOE).unwrap();
        battle.queue_action(HERO, "hit", FOE).unwrap();
        let executor = FlakyExecutor {
            calls: AtomicUsize::new(0),
            fail_at: 1,
            inner: StandardExecutor::default(),
        };

        let err = battle.advance_to_next_turn(&executor).await.unwrap_err();
        assert!(matches!(err, Error::ActionFailed { .. }));
        assert_eq!(battle.current_side(), 0);
        assert_eq!(battle.unit(HERO).unwrap().outgoing().len(), 2);
        assert_eq!(battle.unit(FOE).unwrap().hp(), Decimal::from(9.0));

        battle.advance_to_next_turn(&executor).await.unwrap();
        assert_eq!(battle.unit(FOE).unwrap().hp(), Decimal::from(8.0));
        assert_eq!(battle.current_side(), 1);
        assert!(battle.unit(HERO).unwrap().outgoing().is_empty());
    }

    #[tokio::test]
    async fn test_untargeted_action_hits_performer() {
        let mut battle = duel();
        battle.unit_mut(HERO).unwrap().set_hp(Decimal::from(4.0));
        battle.unit_mut(HERO).unwrap().add_action(ActionDef::new(
            "mend",
            ActionEffect::Heal {
                amount: Decimal::from(3.0),
            },
        ));

        battle.queue_action(HERO, "mend", FOE).unwrap();
        assert_eq!(battle.unit(HERO).unwrap().outgoing()[0].target, HERO);

        battle
            .advance_to_next_turn(&StandardExecutor::default())
            .await
            .unwrap();
        assert_eq!(battle.unit(HERO).unwrap().hp(), Decimal::from(7.0));
        assert_eq!(battle.unit(FOE).unwrap().hp(), Decimal::from(10.0));
    }

    #[tokio::test]
    async fn test_side_drains_every_unit_in_order() {
        const MEDIC: UnitId = UnitId { side: 0, slot: 0 };
        const ARCHER: UnitId = UnitId { side: 0, slot: 1 };

        let mut medic = fighter("medic");
        medic.add_action(ActionDef::new(
            "mend",
            ActionEffect::Heal {
                amount: Decimal::from(3.0),
            },
        ));
        let mut battle =
            Battle::new(vec![vec![medic, fighter("archer")], vec![fighter("foe")]]).unwrap();

        // at full hp, strike then heal ends at max; heal then strike would not
        battle.queue_action(MEDIC, "hit", MEDIC).unwrap();
        battle.queue_action(MEDIC, "mend", FOE).unwrap();
        // lands after the medic's queue, so the medic ends one below max
        battle.queue_action(ARCHER, "hit", MEDIC).unwrap();
        battle.queue_action(ARCHER, "hit", FOE).unwrap();

        battle
            .advance_to_next_turn(&StandardExecutor::default())
            .await
            .unwrap();

        assert_eq!(battle.unit(MEDIC).unwrap().hp(), Decimal::from(9.0));
        assert_eq!(battle.unit(ARCHER).unwrap().hp(), Decimal::from(10.0));
        assert_eq!(battle.unit(FOE).unwrap().hp(), Decimal::from(9.0));
        assert!(battle.unit(MEDIC).unwrap().outgoing().is_empty());
        assert!(battle.unit(ARCHER).unwrap().outgoing().is_empty());
        assert_eq!(battle.current_side(), 1);
    }

    #[tokio::test]
    async fn test_resume_skips_landed_units() {
        const SECOND: UnitId = UnitId { side: 0, slot: 1 };

        let mut battle =
            Battle::new(vec![vec![fighter("first"), fighter("second")], vec![fighter("foe")]])
                .unwrap();
        battle.queue_action(HERO, "hit", FOE).unwrap();
        battle.queue_action(SECOND, "hit", FOE).unwrap();
        let executor = FlakyExecutor {
            calls: AtomicUsize::new(0),
            fail_at: 1,
            inner: StandardExecutor::default(),
        };

        assert!(battle.advance_to_next_turn(&executor).await.is_err());
        assert_eq!(battle.unit(FOE).unwrap().hp(), Decimal::from(9.0));
        assert_eq!(battle.unit(SECOND).unwrap().outgoing().len(), 1);

        battle.advance_to_next_turn(&executor).await.unwrap();
        assert_eq!(battle.unit(FOE).unwrap().hp(), Decimal::from(8.0));
        assert_eq!(battle.current_side(), 1);
    }

    #[test]
    fn test_queue_validation() {
        let mut battle = duel();
        let missing = UnitId::new(5, 0);
        assert_eq!(
            battle.queue_action(HERO, "hit", missing).unwrap_err(),
            Error::NoSuchUnit(missing)
        );
        assert_eq!(
            battle.queue_action(HERO, "fireball", FOE).unwrap_err(),
            Error::UnknownAction {
                unit: HERO,
                action: "fireball".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_crueler_king_fight() {
        let mut hero = fighter("hero");
        hero.add_card(catalog::black_hole());
        let mut battle = Battle::new(vec![vec![hero], vec![catalog::crueler_king()]]).unwrap();
        battle.reset_all();

        // reset drops actions that no card grants
        assert!(battle.unit(HERO).unwrap().action("hit").is_none());
        assert_eq!(battle.unit(HERO).unwrap().strength(), Decimal::from(2.0));
        assert_eq!(battle.unit(FOE).unwrap().hp(), Decimal::from(30.0));

        let executor = StandardExecutor::new(7);
        battle.advance_to_next_turn(&executor).await.unwrap();
        battle
            .queue_action(FOE, "ice dagger but crueler", HERO)
            .unwrap();
        battle.advance_to_next_turn(&executor).await.unwrap();

        // 10 hp minus 5 strength leaves at most 5
        let hero_hp = battle.unit(HERO).unwrap().hp();
        assert!(hero_hp >= Decimal::ZERO && hero_hp <= Decimal::from(5.0));
        assert_eq!(battle.current_side(), 0);
    }
}
