//! Luck coins

use minigames_core::Decimal;
use serde::{Deserialize, Serialize};

/// A balance that only ever grows
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    amount: Decimal,
}

impl Currency {
    /// Create a balance; negative amounts become zero
    pub fn new(amount: Decimal) -> Self {
        Self {
            amount: amount.max(Decimal::ZERO),
        }
    }

    /// Get the balance
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Add a positive amount; returns whether anything was added
    pub fn gain(&mut self, amount: &Decimal) -> bool {
        if !amount.is_positive() {
            return false;
        }
        self.amount += *amount;
        true
    }
}
