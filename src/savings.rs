//! Savings account.
//!
//! Holds base currency apart from the wallet and compounds once per day at a
//! fixed daily rate. Transfers in and out are clamped to what the source
//! side actually holds, so neither balance can go negative.

use crate::types::Cash;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsConfig {
    pub name: String,
    pub initial_balance: Cash,
    /// Paid on the savings balance at every day close. 0.001 = 0.1%.
    pub daily_rate: Decimal,
}

impl Default for SavingsConfig {
    fn default() -> Self {
        Self {
            name: "Federal Reserve".to_string(),
            initial_balance: Cash::zero(),
            daily_rate: dec!(0.001),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsAccount {
    pub name: String,
    pub balance: Cash,
    pub daily_rate: Decimal,
    pub total_interest: Cash,
}

impl SavingsAccount {
    pub fn new(config: &SavingsConfig) -> Self {
        Self {
            name: config.name.clone(),
            balance: config.initial_balance,
            daily_rate: config.daily_rate,
            total_interest: Cash::zero(),
        }
    }

    /// One day of interest. returns what was earned.
    pub fn accrue_interest(&mut self) -> Cash {
        let earned = self.balance.mul(self.daily_rate);
        self.balance = self.balance.add(earned);
        self.total_interest = self.total_interest.add(earned);
        earned
    }

    pub(crate) fn credit(&mut self, amount: Cash) {
        self.balance = self.balance.add(amount);
    }

    /// Remove up to `amount`. returns what was actually taken.
    pub(crate) fn debit_clamped(&mut self, amount: Cash) -> Cash {
        let taken = amount.min(self.balance);
        self.balance = self.balance.sub(taken);
        taken
    }
}
