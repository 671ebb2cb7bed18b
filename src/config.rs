// 7.0 config.rs: all economy settings in one place. day length, pulse rate,
// starting cash, instruments, optional bank.
// 7.1 presets cover the game's variants: single currency, with bank, world map.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::instrument::InstrumentConfig;
use crate::savings::SavingsConfig;
use crate::trading::MIN_TRADE;
use crate::types::Cash;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    // Wallet currency, used in headlines (e.g. "USD")
    pub base_currency: String,
    // Wallet currency's country, used in headlines (e.g. "US")
    pub base_country: String,
    // Real seconds per trading day
    pub day_duration_secs: u64,
    // Wall-clock spacing between rate pulses
    pub pulse_interval_ms: u64,
    // Starting wallet balance
    pub initial_wallet: Cash,
    // Multiplier applied to the trend every morning
    pub trend_decay: Decimal,
    // Trades worth this much or less are refused
    pub min_trade: Decimal,
    // News never fires within this many seconds of open or close
    pub event_margin_secs: u64,
    // Tradable currencies. the first one names headlines.
    pub instruments: Vec<InstrumentConfig>,
    // Bank account, if this variant has one
    pub savings: Option<SavingsConfig>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            base_currency: "USD".to_string(),
            base_country: "US".to_string(),
            day_duration_secs: 180,
            pulse_interval_ms: 500,
            initial_wallet: Cash::new(dec!(100)),
            trend_decay: dec!(0.5),
            min_trade: MIN_TRADE,
            event_margin_secs: 5,
            instruments: vec![InstrumentConfig::yen()],
            savings: Some(SavingsConfig::default()),
        }
    }
}

impl SimConfig {
    // One currency, no bank
    pub fn single_currency() -> Self {
        Self {
            savings: None,
            ..Self::default()
        }
    }

    // One currency plus a savings account
    pub fn with_bank() -> Self {
        Self::default()
    }

    // Several currencies plus a savings account
    pub fn world() -> Self {
        Self {
            instruments: vec![
                InstrumentConfig::yen(),
                InstrumentConfig::euro(),
                InstrumentConfig::pound(),
            ],
            ..Self::default()
        }
    }

    pub fn day_duration(&self) -> Duration {
        Duration::from_secs(self.day_duration_secs)
    }

    pub fn pulse_interval(&self) -> Duration {
        Duration::from_millis(self.pulse_interval_ms)
    }

    pub fn event_margin(&self) -> Duration {
        Duration::from_secs(self.event_margin_secs)
    }

    // Validate the configuration for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.instruments.is_empty() {
            return Err(ConfigError::NoInstruments);
        }

        // news must land strictly after the open
        if self.event_margin_secs == 0 {
            return Err(ConfigError::ZeroEventMargin);
        }

        // news must be able to land strictly inside the day
        if self.day_duration_secs <= self.event_margin_secs * 2 {
            return Err(ConfigError::DayTooShort {
                day_secs: self.day_duration_secs,
                margin_secs: self.event_margin_secs,
            });
        }

        if self.pulse_interval_ms == 0 {
            return Err(ConfigError::InvalidPulseInterval);
        }

        if self.initial_wallet.is_negative() {
            return Err(ConfigError::NegativeBalance {
                what: "wallet".to_string(),
            });
        }

        if self.trend_decay < Decimal::ZERO || self.trend_decay > Decimal::ONE {
            return Err(ConfigError::InvalidDecay(self.trend_decay));
        }

        for inst in &self.instruments {
            if inst.rate_floor <= Decimal::ZERO {
                return Err(ConfigError::InvalidFloor {
                    instrument: inst.name.clone(),
                    floor: inst.rate_floor,
                });
            }
            if inst.initial_rate < inst.rate_floor {
                return Err(ConfigError::InvalidRate {
                    instrument: inst.name.clone(),
                    rate: inst.initial_rate,
                });
            }
            if inst.volatility < Decimal::ZERO {
                return Err(ConfigError::InvalidVolatility {
                    instrument: inst.name.clone(),
                    volatility: inst.volatility,
                });
            }
        }

        if let Some(savings) = &self.savings {
            if savings.daily_rate < Decimal::ZERO || savings.daily_rate >= Decimal::ONE {
                return Err(ConfigError::InvalidInterestRate(savings.daily_rate));
            }
            if savings.initial_balance.is_negative() {
                return Err(ConfigError::NegativeBalance {
                    what: "savings".to_string(),
                });
            }
        }

        Ok(())
    }
}

// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("At least one instrument is required")]
    NoInstruments,

    #[error("Day of {day_secs}s leaves no room for news with a {margin_secs}s margin")]
    DayTooShort { day_secs: u64, margin_secs: u64 },

    #[error("News margin must be at least one second")]
    ZeroEventMargin,

    #[error("Pulse interval must be positive")]
    InvalidPulseInterval,

    #[error("Starting {what} balance is negative")]
    NegativeBalance { what: String },

    #[error("Trend decay {0} must be within [0, 1]")]
    InvalidDecay(Decimal),

    #[error("{instrument}: rate floor {floor} must be positive")]
    InvalidFloor { instrument: String, floor: Decimal },

    #[error("{instrument}: initial rate {rate} is below its floor")]
    InvalidRate { instrument: String, rate: Decimal },

    #[error("{instrument}: volatility {volatility} is negative")]
    InvalidVolatility { instrument: String, volatility: Decimal },

    #[error("Daily interest rate {0} must be within [0, 1)")]
    InvalidInterestRate(Decimal),
}

// Named variants of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    SingleCurrency,
    WithBank,
    World,
}

impl Preset {
    pub fn config(&self) -> SimConfig {
        match self {
            Preset::SingleCurrency => SimConfig::single_currency(),
            Preset::WithBank => SimConfig::with_bank(),
            Preset::World => SimConfig::world(),
        }
    }
}
