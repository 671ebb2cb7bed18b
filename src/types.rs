// 1.0: primitives. ids, cash amounts, trade fractions, sim time.
// each is a newtype so a foreign-currency amount never gets mixed up with base cash.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstrumentId(pub u32);

impl fmt::Display for InstrumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// Base = the wallet currency gains, Foreign = the instrument gains.
// a positive trend pushes rates up, which means each unit of base buys more foreign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Base,
    Foreign,
}

impl Direction {
    pub fn sign(&self) -> Decimal {
        match self {
            Direction::Base => dec!(1),
            Direction::Foreign => dec!(-1),
        }
    }

    pub fn of_trend(trend: Decimal) -> Option<Self> {
        if trend > Decimal::ZERO {
            Some(Direction::Base)
        } else if trend < Decimal::ZERO {
            Some(Direction::Foreign)
        } else {
            None
        }
    }
}

// 1.1: base-currency amount. wallet, savings, net worth, trade spend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cash(Decimal);

impl Cash {
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn add(&self, other: Cash) -> Self {
        Self(self.0 + other.0)
    }

    pub fn sub(&self, other: Cash) -> Self {
        Self(self.0 - other.0)
    }

    pub fn mul(&self, factor: Decimal) -> Self {
        Self(self.0 * factor)
    }

    pub fn min(&self, other: Cash) -> Self {
        if other.0 < self.0 {
            other
        } else {
            *self
        }
    }
}

impl fmt::Display for Cash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0.round_dp(2))
    }
}

impl PartialOrd for Cash {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cash {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

impl Sum for Cash {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, c| acc.add(c))
    }
}

// 1.2: portion of a balance to trade. always within [0, 1], decoded values included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal")]
pub struct Fraction(Decimal);

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Fraction {0} is outside [0, 1]")]
pub struct FractionOutOfRange(pub Decimal);

impl TryFrom<Decimal> for Fraction {
    type Error = FractionOutOfRange;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Fraction::new(value).ok_or(FractionOutOfRange(value))
    }
}

impl Fraction {
    pub const ZERO: Fraction = Fraction(Decimal::ZERO);
    pub const ALL: Fraction = Fraction(Decimal::ONE);

    #[must_use]
    pub fn new(value: Decimal) -> Option<Self> {
        if value >= Decimal::ZERO && value <= Decimal::ONE {
            Some(Self(value))
        } else {
            None
        }
    }

    pub fn clamped(value: Decimal) -> Self {
        Self(value.max(Decimal::ZERO).min(Decimal::ONE))
    }

    // slider position over its max. a slider with no range trades nothing
    pub fn from_slider(value: Decimal, max: Decimal) -> Self {
        if max <= Decimal::ZERO {
            return Self::ZERO;
        }
        Self::clamped(value / max)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn as_percent(&self) -> Decimal {
        self.0 * dec!(100)
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}%", self.as_percent().round_dp(0))
    }
}

// 1.3: point in simulated time. day number plus millis into that day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SimInstant {
    pub day: u32,
    pub millis_into_day: u64,
}

impl SimInstant {
    pub fn new(day: u32, time_in_day: Duration) -> Self {
        Self {
            day,
            millis_into_day: time_in_day.as_millis() as u64,
        }
    }

    pub fn start_of(day: u32) -> Self {
        Self {
            day,
            millis_into_day: 0,
        }
    }
}

impl fmt::Display for SimInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "day {} +{}ms", self.day, self.millis_into_day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_bounds() {
        assert!(Fraction::new(dec!(0)).is_some());
        assert!(Fraction::new(dec!(1)).is_some());
        assert!(Fraction::new(dec!(1.01)).is_none());
        assert!(Fraction::new(dec!(-0.1)).is_none());

        assert_eq!(Fraction::clamped(dec!(3)), Fraction::ALL);
        assert_eq!(Fraction::clamped(dec!(-3)), Fraction::ZERO);
    }

    #[test]
    fn fraction_deserialize_checks_range() {
        let half: Fraction = serde_json::from_str("\"0.5\"").unwrap();
        assert_eq!(half.value(), dec!(0.5));
        let all: Fraction = serde_json::from_str("\"1\"").unwrap();
        assert_eq!(all, Fraction::ALL);

        assert!(serde_json::from_str::<Fraction>("\"1.5\"").is_err());
        assert!(serde_json::from_str::<Fraction>("\"-0.1\"").is_err());

        let json = serde_json::to_string(&Fraction::ALL).unwrap();
        assert_eq!(serde_json::from_str::<Fraction>(&json).unwrap(), Fraction::ALL);
    }

    #[test]
    fn fraction_from_slider() {
        assert_eq!(Fraction::from_slider(dec!(25), dec!(100)).value(), dec!(0.25));
        assert_eq!(Fraction::from_slider(dec!(5), dec!(0)), Fraction::ZERO);
        assert_eq!(Fraction::from_slider(dec!(150), dec!(100)), Fraction::ALL);
    }

    #[test]
    fn direction_follows_trend_sign() {
        assert_eq!(Direction::of_trend(dec!(0.004)), Some(Direction::Base));
        assert_eq!(Direction::of_trend(dec!(-0.002)), Some(Direction::Foreign));
        assert_eq!(Direction::of_trend(Decimal::ZERO), None);
        assert_eq!(Direction::Foreign.sign() * dec!(0.01), dec!(-0.01));
    }

    #[test]
    fn cash_display_two_places() {
        assert_eq!(Cash::new(dec!(1001)).to_string(), "$1001.00");
        assert_eq!(Cash::new(dec!(0.126)).to_string(), "$0.13");
    }

    #[test]
    fn cash_min_and_sum() {
        let a = Cash::new(dec!(500));
        let b = Cash::new(dec!(100));
        assert_eq!(a.min(b), b);
        let total: Cash = vec![a, b].into_iter().sum();
        assert_eq!(total.value(), dec!(600));
    }
}
