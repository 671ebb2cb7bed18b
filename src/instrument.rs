//! Tradable foreign currencies.
//!
//! An instrument pairs static configuration (names, volatility, floor) with
//! the runtime rate and the player's holding in that currency. Rates are
//! quoted as units of foreign currency per one unit of base currency.

use crate::types::InstrumentId;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Static instrument configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentConfig {
    /// Currency name used in headlines (e.g., "Yen")
    pub name: String,
    /// Issuing country used in headlines (e.g., "Japan")
    pub country: String,
    /// Display symbol (e.g., "¥")
    pub symbol: String,
    /// Starting rate, foreign units per base unit
    pub initial_rate: Decimal,
    /// Half-width of the uniform noise applied each pulse
    pub volatility: Decimal,
    /// Rates never drop below this
    pub rate_floor: Decimal,
}

impl InstrumentConfig {
    pub fn yen() -> Self {
        Self {
            name: "Yen".to_string(),
            country: "Japan".to_string(),
            symbol: "¥".to_string(),
            initial_rate: dec!(150),
            volatility: dec!(0.0005),
            rate_floor: dec!(75),
        }
    }

    pub fn euro() -> Self {
        Self {
            name: "Euro".to_string(),
            country: "Germany".to_string(),
            symbol: "€".to_string(),
            initial_rate: dec!(0.92),
            volatility: dec!(0.0005),
            rate_floor: dec!(0.40),
        }
    }

    pub fn pound() -> Self {
        Self {
            name: "Pound".to_string(),
            country: "Britain".to_string(),
            symbol: "£".to_string(),
            initial_rate: dec!(0.79),
            volatility: dec!(0.0005),
            rate_floor: dec!(0.35),
        }
    }
}

/// Runtime instrument state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instrument {
    pub id: InstrumentId,
    pub config: InstrumentConfig,
    /// Reference rate for % change display, set when the instrument is selected
    pub opening_rate: Decimal,
    pub current_rate: Decimal,
    /// Foreign-currency units held by the player
    pub held_balance: Decimal,
}

impl Instrument {
    pub fn new(id: InstrumentId, config: InstrumentConfig) -> Self {
        let rate = config.initial_rate;
        Self {
            id,
            config,
            opening_rate: rate,
            current_rate: rate,
            held_balance: Decimal::ZERO,
        }
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn symbol(&self) -> &str {
        &self.config.symbol
    }

    pub fn country(&self) -> &str {
        &self.config.country
    }

    pub fn snapshot_opening_rate(&mut self) {
        self.opening_rate = self.current_rate;
    }

    /// Set the rate, clamped to the floor
    pub fn set_rate(&mut self, rate: Decimal) {
        self.current_rate = rate.max(self.config.rate_floor);
    }

    /// Percentage move since the opening snapshot. None when there is no reference.
    pub fn rate_change_pct(&self) -> Option<Decimal> {
        if self.opening_rate.is_zero() {
            return None;
        }
        Some((self.current_rate - self.opening_rate) / self.opening_rate * dec!(100))
    }

    /// Holding converted to base currency at the current rate
    pub fn holding_in_base(&self) -> Option<Decimal> {
        if self.current_rate.is_zero() {
            return None;
        }
        Some(self.held_balance / self.current_rate)
    }
}

/// Read-only view handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentView {
    pub id: InstrumentId,
    pub name: String,
    pub country: String,
    pub symbol: String,
    pub current_rate: Decimal,
    pub opening_rate: Decimal,
    pub held_balance: Decimal,
    pub change_pct: Option<Decimal>,
}

impl From<&Instrument> for InstrumentView {
    fn from(instrument: &Instrument) -> Self {
        Self {
            id: instrument.id,
            name: instrument.config.name.clone(),
            country: instrument.config.country.clone(),
            symbol: instrument.config.symbol.clone(),
            current_rate: instrument.current_rate,
            opening_rate: instrument.opening_rate,
            held_balance: instrument.held_balance,
            change_pct: instrument.rate_change_pct(),
        }
    }
}
