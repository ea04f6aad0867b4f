//! Deterministic random number generator
//!
//! Uses a simple xorshift64 algorithm so a seed replays the same rolls and
//! battle outcomes on every platform.

use crate::Decimal;
use serde::{Deserialize, Serialize};

/// A deterministic random number generator
///
/// Uses xorshift64 for simplicity and reproducibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRng {
    state: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        // Ensure non-zero state (xorshift requires this)
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Create an RNG from a saved state
    pub fn from_state(state: u64) -> Self {
        Self::new(state)
    }

    /// Get the current state (useful for saving/loading)
    pub fn state(&self) -> u64 {
        self.state
    }

    /// Generate the next raw u64 value
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Generate a random f64 in range [0, 1)
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Generate a random f64 in range (0, 1]
    ///
    /// Rolls divide by this value, so zero must never come out.
    pub fn next_unit(&mut self) -> f64 {
        1.0 - self.next_f64()
    }

    /// [`GameRng::next_unit`] as a [`Decimal`]
    pub fn next_unit_decimal(&mut self) -> Decimal {
        Decimal::from_f64(self.next_unit())
    }

    /// Uniform value between `min` and `max` (either order)
    pub fn decimal_between(&mut self, min: &Decimal, max: &Decimal) -> Decimal {
        let t = Decimal::from_f64(self.next_f64());
        *min + (*max - *min) * t
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.next_u64(), rng2.next_u64());
        }
    }

    #[test]
    fn test_zero_seed_is_usable() {
        let mut rng = GameRng::new(0);
        assert_eq!(rng.state(), 1);
        assert_ne!(rng.next_u64(), 0);
    }

    #[test]
    fn test_unit_range() {
        let mut rng = GameRng::new(42);

        for _ in 0..1000 {
            let f = rng.next_f64();
            assert!((0.0..1.0).contains(&f));

            let u = rng.next_unit();
            assert!(u > 0.0 && u <= 1.0);
        }
    }

    #[test]
    fn test_decimal_between() {
        let mut rng = GameRng::new(7);
        let low = Decimal::from(-5.0);
        let high = Decimal::from(20.0);

        for _ in 0..200 {
            let v = rng.decimal_between(&low, &high);
            assert!(v >= low && v <= high);
        }
    }

    #[test]
    fn test_resume_from_state() {
        let mut rng = GameRng::new(99);
        rng.next_u64();
        let mut resumed = GameRng::from_state(rng.state());
        assert_eq!(rng.next_u64(), resumed.next_u64());
    }
}
