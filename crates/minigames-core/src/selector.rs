//! Luck-scaled weighted selection
//!
//! Weights are "one in N" odds: an entry of weight 50 is hit by roughly one
//! roll in fifty. A roll is `luck / u` with `u` uniform in `(0, 1]`, and the
//! result is the first entry (highest weight first) whose weight the roll
//! reaches. Rolls that reach nothing fall back to the commonest entry.

use crate::{Decimal, GameRng};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One candidate in a selection table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionEntry {
    pub name: String,
    pub weight: Decimal,
}

impl SelectionEntry {
    pub fn new(name: impl Into<String>, weight: Decimal) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }
}

/// A selection table sorted by descending weight
///
/// Sorting is stable, so entries with equal weight keep the order they were
/// given in and the earlier one wins ties.
#[derive(Debug, Clone, Default)]
pub struct RandomSelector {
    entries: Vec<SelectionEntry>,
}

impl RandomSelector {
    pub fn new(mut entries: Vec<SelectionEntry>) -> Self {
        entries.sort_by(|a, b| b.weight.cmp(&a.weight));
        Self { entries }
    }

    pub fn entries(&self) -> &[SelectionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the entry a raw roll value lands on
    pub fn index_for_roll(&self, roll: &Decimal) -> Option<usize> {
        if self.entries.is_empty() {
            return None;
        }
        let idx = self.entries.partition_point(|e| e.weight > *roll);
        Some(idx.min(self.entries.len() - 1))
    }

    /// Roll once
    pub fn select(&self, luck: &Decimal, rng: &mut GameRng) -> Option<&SelectionEntry> {
        let roll = *luck / rng.next_unit_decimal();
        self.index_for_roll(&roll).map(|i| &self.entries[i])
    }

    /// Probability of each entry (same order as [`RandomSelector::entries`])
    ///
    /// `P(roll >= w) = min(1, luck / w)`, so each entry owns the slice of
    /// rolls between its weight and the next higher one; the last entry also
    /// owns every roll below its own weight.
    pub fn probabilities(&self, luck: &Decimal) -> Vec<Decimal> {
        let reach = |w: &Decimal| -> Decimal {
            if w.is_positive() {
                (*luck / *w).min(Decimal::ONE)
            } else {
                Decimal::ONE
            }
        };

        let n = self.entries.len();
        let mut out = Vec::with_capacity(n);
        let mut previous = Decimal::ZERO;
        for (i, entry) in self.entries.iter().enumerate() {
            let current = if i + 1 == n {
                Decimal::ONE
            } else {
                reach(&entry.weight)
            };
            out.push((current - previous).max(Decimal::ZERO));
            previous = current;
        }
        out
    }

    /// Roll `count` times and aggregate the hits per entry name
    ///
    /// Up to `exact_limit` rolls are made one by one. Beyond that, each entry
    /// receives `floor(count * p)` hits and the leftover is rolled one by one
    /// when it fits within `exact_limit`, or given to the commonest entry.
    /// Only entries with at least one hit appear in the result.
    pub fn select_many(
        &self,
        count: &Decimal,
        luck: &Decimal,
        rng: &mut GameRng,
        exact_limit: u64,
    ) -> IndexMap<String, Decimal> {
        let mut hits: IndexMap<String, Decimal> = IndexMap::new();
        let count = count.floor();
        if self.entries.is_empty() || !count.is_positive() {
            return hits;
        }

        let exact_limit_dec = Decimal::from(exact_limit);
        if count <= exact_limit_dec {
            self.roll_into(&mut hits, count.to_u64_saturating(), luck, rng);
            return hits;
        }

        let mut assigned = Decimal::ZERO;
        for (entry, p) in self.entries.iter().zip(self.probabilities(luck)) {
            let expected = (count * p).floor();
            if expected.is_positive() {
                assigned += expected;
                *hits.entry(entry.name.clone()).or_default() += expected;
            }
        }

        let leftover = (count - assigned).max(Decimal::ZERO);
        if leftover <= exact_limit_dec {
            self.roll_into(&mut hits, leftover.to_u64_saturating(), luck, rng);
        } else if let Some(last) = self.entries.last() {
            tracing::debug!(%leftover, entry = %last.name, "bulk selection leftover assigned to commonest entry");
            *hits.entry(last.name.clone()).or_default() += leftover;
        }
        hits
    }

    fn roll_into(
        &self,
        hits: &mut IndexMap<String, Decimal>,
        rolls: u64,
        luck: &Decimal,
        rng: &mut GameRng,
    ) {
        for _ in 0..rolls {
            if let Some(entry) = self.select(luck, rng) {
                *hits.entry(entry.name.clone()).or_default() += Decimal::ONE;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RandomSelector {
        RandomSelector::new(vec![
            SelectionEntry::new("common", Decimal::from(1.0)),
            SelectionEntry::new("rare", Decimal::from(10.0)),
            SelectionEntry::new("epic", Decimal::from(100.0)),
        ])
    }

    #[test]
    fn test_sorted_descending_and_stable() {
        let selector = RandomSelector::new(vec![
            SelectionEntry::new("a", Decimal::from(5.0)),
            SelectionEntry::new("b", Decimal::from(50.0)),
            SelectionEntry::new("c", Decimal::from(5.0)),
        ]);
        let names: Vec<_> = selector.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_index_for_roll() {
        let selector = table();
        assert_eq!(selector.index_for_roll(&Decimal::from(500.0)), Some(0));
        assert_eq!(selector.index_for_roll(&Decimal::from(100.0)), Some(0));
        assert_eq!(selector.index_for_roll(&Decimal::from(99.0)), Some(1));
        assert_eq!(selector.index_for_roll(&Decimal::from(2.0)), Some(2));
        // below every weight: commonest entry
        assert_eq!(selector.index_for_roll(&Decimal::from(0.5)), Some(2));
        assert_eq!(RandomSelector::default().index_for_roll(&Decimal::ONE), None);
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let selector = table();
        let probs = selector.probabilities(&Decimal::ONE);
        assert_eq!(probs[0], Decimal::from(0.01));
        assert!((probs[1].to_f64() - 0.09).abs() < 1e-12);
        assert!((probs[2].to_f64() - 0.9).abs() < 1e-12);
        let total: Decimal = probs.iter().sum();
        assert!((total.to_f64() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_luck_shifts_odds() {
        let selector = table();
        let probs = selector.probabilities(&Decimal::from(10.0));
        assert!((probs[0].to_f64() - 0.1).abs() < 1e-12);
        assert!((probs[1].to_f64() - 0.9).abs() < 1e-12);
        assert_eq!(probs[2], Decimal::ZERO);
    }

    #[test]
    fn test_select_many_exact_counts_add_up() {
        let selector = table();
        let mut rng = GameRng::new(42);
        let hits = selector.select_many(&Decimal::from(5000.0), &Decimal::ONE, &mut rng, 10_000);
        let total: Decimal = hits.values().sum();
        assert_eq!(total, Decimal::from(5000.0));
        assert!(hits["common"] > hits["rare"]);
    }

    #[test]
    fn test_select_many_bulk_uses_expectation() {
        let selector = table();
        let mut rng = GameRng::new(42);
        let count: Decimal = "1e30".parse().unwrap();
        let hits = selector.select_many(&count, &Decimal::ONE, &mut rng, 1000);
        let epic = hits["epic"].to_f64();
        assert!((epic / 1e28 - 1.0).abs() < 1e-9);
        assert!(hits["common"] > hits["rare"]);
    }

    #[test]
    fn test_select_many_nothing_to_roll() {
        let selector = table();
        let mut rng = GameRng::new(1);
        assert!(selector
            .select_many(&Decimal::ZERO, &Decimal::ONE, &mut rng, 10)
            .is_empty());
    }
}
