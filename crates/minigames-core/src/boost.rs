//! Ordered stat composition
//!
//! A [`Boost`] starts from a base value and folds named contributions over it.
//! Contributions run by ascending `order`; equal orders run in the order they
//! were first added.

use crate::{Decimal, Transform};
use serde::{Deserialize, Serialize};

/// A named step in a [`Boost`] pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoostContribution {
    pub id: String,
    pub order: i32,
    pub transform: Transform,
}

impl BoostContribution {
    pub fn new(id: impl Into<String>, order: i32, transform: Transform) -> Self {
        Self {
            id: id.into(),
            order,
            transform,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boost {
    base: Decimal,
    contributions: Vec<BoostContribution>,
}

impl Boost {
    pub fn new(base: impl Into<Decimal>) -> Self {
        Self {
            base: base.into(),
            contributions: Vec::new(),
        }
    }

    pub fn base(&self) -> Decimal {
        self.base
    }

    /// Run the base value through every contribution
    pub fn calculate(&self) -> Decimal {
        let mut ordered: Vec<&BoostContribution> = self.contributions.iter().collect();
        // stable: ties stay in insertion order
        ordered.sort_by_key(|c| c.order);
        ordered
            .into_iter()
            .fold(self.base, |value, c| c.transform.apply(&value))
    }

    /// Add a contribution, replacing any existing one with the same id
    ///
    /// A replaced contribution keeps its original insertion slot.
    pub fn set_boost(&mut self, contribution: BoostContribution) {
        match self.contributions.iter_mut().find(|c| c.id == contribution.id) {
            Some(existing) => *existing = contribution,
            None => self.contributions.push(contribution),
        }
    }

    pub fn remove_boost(&mut self, id: &str) -> Option<BoostContribution> {
        let idx = self.contributions.iter().position(|c| c.id == id)?;
        Some(self.contributions.remove(idx))
    }

    pub fn get_boost(&self, id: &str) -> Option<&BoostContribution> {
        self.contributions.iter().find(|c| c.id == id)
    }

    pub fn clear_boosts(&mut self) {
        self.contributions.clear();
    }

    pub fn contributions(&self) -> &[BoostContribution] {
        &self.contributions
    }

    pub fn len(&self) -> usize {
        self.contributions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contributions.is_empty()
    }
}
