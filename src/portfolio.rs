//! Player holdings.
//!
//! The wallet is the single base-currency balance. Foreign holdings live on
//! each instrument, so net worth needs the market to price them.

use crate::market::MarketModel;
use crate::savings::{SavingsAccount, SavingsConfig};
use crate::types::Cash;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portfolio {
    pub wallet: Cash,
    pub savings: Option<SavingsAccount>,
}

impl Portfolio {
    pub fn new(initial_wallet: Cash, savings: Option<&SavingsConfig>) -> Self {
        Self {
            wallet: initial_wallet,
            savings: savings.map(SavingsAccount::new),
        }
    }

    pub fn savings_balance(&self) -> Cash {
        self.savings
            .as_ref()
            .map(|s| s.balance)
            .unwrap_or_else(Cash::zero)
    }

    /// Foreign holdings in base currency. zero-rate instruments are skipped.
    pub fn holdings_value(&self, market: &MarketModel) -> Cash {
        let total: Decimal = market
            .instruments()
            .iter()
            .filter_map(|i| i.holding_in_base())
            .sum();
        Cash::new(total)
    }

    /// wallet + savings + every holding converted at the current rate
    pub fn net_worth(&self, market: &MarketModel) -> Cash {
        self.wallet
            .add(self.savings_balance())
            .add(self.holdings_value(market))
    }
}
