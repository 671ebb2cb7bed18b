// 2.0: trading-day clock. tracks time into the current day and maps it onto
// the 9:00 to 17:00 business window for display.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

pub const OPENING_HOUR: u32 = 9;
pub const BUSINESS_HOURS: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Period {
    Am,
    Pm,
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Am => write!(f, "AM"),
            Period::Pm => write!(f, "PM"),
        }
    }
}

/// Wall-clock label shown to the player. hour is 1-12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayTime {
    pub hour: u32,
    pub minute: u32,
    pub period: Period,
}

impl DisplayTime {
    pub fn end_of_day() -> Self {
        Self::from_24h(OPENING_HOUR + BUSINESS_HOURS, 0)
    }

    pub fn from_24h(hours: u32, minute: u32) -> Self {
        let period = if hours >= 12 { Period::Pm } else { Period::Am };
        let hour = if hours > 12 { hours - 12 } else { hours };
        Self {
            hour,
            minute,
            period,
        }
    }

    pub fn to_naive_time(&self) -> Option<NaiveTime> {
        let hours_24 = match (self.period, self.hour) {
            (Period::Am, 12) => 0,
            (Period::Am, h) => h,
            (Period::Pm, 12) => 12,
            (Period::Pm, h) => h + 12,
        };
        NaiveTime::from_hms_opt(hours_24, self.minute, 0)
    }
}

impl fmt::Display for DisplayTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_naive_time() {
            Some(t) => write!(f, "{}", t.format("%I:%M %p")),
            None => write!(f, "{:02}:{:02} {}", self.hour, self.minute, self.period),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Clock {
    day_duration: Duration,
    time_in_day: Duration,
}

impl Clock {
    pub fn new(day_duration: Duration) -> Self {
        Self {
            day_duration,
            time_in_day: Duration::ZERO,
        }
    }

    pub fn advance(&mut self, delta: Duration) {
        self.time_in_day += delta;
    }

    pub fn reset(&mut self) {
        self.time_in_day = Duration::ZERO;
    }

    pub fn time_in_day(&self) -> Duration {
        self.time_in_day
    }

    pub fn day_duration(&self) -> Duration {
        self.day_duration
    }

    pub fn is_day_over(&self) -> bool {
        self.time_in_day >= self.day_duration
    }

    // 2.1: linear map of elapsed fraction onto the business window.
    // anything past the end of day pins at 5:00 PM.
    pub fn display_time(&self) -> DisplayTime {
        let total = self.day_duration.as_secs_f64();
        let fraction = if total > 0.0 {
            (self.time_in_day.as_secs_f64() / total).clamp(0.0, 1.0)
        } else {
            1.0
        };

        let hour_decimal = OPENING_HOUR as f64 + fraction * BUSINESS_HOURS as f64;
        let hours = hour_decimal.floor();
        let minutes = ((hour_decimal - hours) * 60.0).floor();

        DisplayTime::from_24h(hours as u32, (minutes as u32).min(59))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock_at(secs: u64) -> Clock {
        let mut clock = Clock::new(Duration::from_secs(180));
        clock.advance(Duration::from_secs(secs));
        clock
    }

    #[test]
    fn opens_at_nine() {
        let t = clock_at(0).display_time();
        assert_eq!(t, DisplayTime { hour: 9, minute: 0, period: Period::Am });
        assert_eq!(t.to_string(), "09:00 AM");
    }

    #[test]
    fn midday_rolls_to_pm() {
        // 3/8 of the way through a 180s day is 12:00
        let t = clock_at(67).display_time();
        assert_eq!(t.period, Period::Am);

        let noon = clock_at(68).display_time();
        assert_eq!(noon.hour, 12);
        assert_eq!(noon.period, Period::Pm);
    }

    #[test]
    fn afternoon_uses_twelve_hour_clock() {
        // 135s of 180s = 0.75 -> 15:00
        let t = clock_at(135).display_time();
        assert_eq!(t, DisplayTime { hour: 3, minute: 0, period: Period::Pm });
        assert_eq!(t.to_string(), "03:00 PM");
    }

    #[test]
    fn minutes_are_floored() {
        // 30s of 180s = 1/6 of 8h = 80 minutes -> 10:20
        let t = clock_at(30).display_time();
        assert_eq!(t.hour, 10);
        assert_eq!(t.minute, 20);
    }

    #[test]
    fn end_of_day_pins_at_five_pm() {
        assert_eq!(clock_at(180).display_time(), DisplayTime::end_of_day());
        assert_eq!(clock_at(500).display_time(), DisplayTime::end_of_day());
        assert_eq!(DisplayTime::end_of_day().to_string(), "05:00 PM");
    }

    #[test]
    fn day_boundary_signal() {
        let mut clock = clock_at(179);
        assert!(!clock.is_day_over());
        clock.advance(Duration::from_secs(1));
        assert!(clock.is_day_over());
        clock.reset();
        assert_eq!(clock.time_in_day(), Duration::ZERO);
    }
}
