// 5.0: daily news. one trigger time per trading day; when it passes, a d20 roll
// picks a tier and a coin flip picks which side of the pair benefits.
// 5.1 has the roll table, 5.2 the headlines, 5.3 the scheduler itself.

use crate::instrument::Instrument;
use crate::types::Direction;
use rand::Rng;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const ROLL_SIDES: u8 = 20;
pub const FLASH_TREND: Decimal = dec!(0.01);
pub const STRONG_TREND: Decimal = dec!(0.004);
pub const MODEST_TREND: Decimal = dec!(0.002);
/// Carried-over trend at or beyond this reads as momentum in the morning headline
pub const MOMENTUM_THRESHOLD: Decimal = dec!(0.001);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NewsTier {
    /// roll 1 (5%)
    Flash,
    /// roll 2..=7 (30%)
    Strong,
    /// roll 8..=13 (30%)
    Modest,
    /// roll 14..=20 (35%)
    Quiet,
}

impl NewsTier {
    // 5.1: d20 partition
    pub fn from_roll(roll: u8) -> Self {
        match roll {
            0 | 1 => NewsTier::Flash,
            2..=7 => NewsTier::Strong,
            8..=13 => NewsTier::Modest,
            _ => NewsTier::Quiet,
        }
    }

    pub fn magnitude(&self) -> Option<Decimal> {
        match self {
            NewsTier::Flash => Some(FLASH_TREND),
            NewsTier::Strong => Some(STRONG_TREND),
            NewsTier::Modest => Some(MODEST_TREND),
            NewsTier::Quiet => None,
        }
    }
}

/// Names used when composing headlines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlineContext {
    pub base_currency: String,
    pub base_country: String,
    pub currency: String,
    pub country: String,
}

impl HeadlineContext {
    pub fn new(base_currency: &str, base_country: &str, lead: &Instrument) -> Self {
        Self {
            base_currency: base_currency.to_string(),
            base_country: base_country.to_string(),
            currency: lead.name().to_string(),
            country: lead.country().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsOutcome {
    pub roll: u8,
    pub tier: NewsTier,
    pub direction: Option<Direction>,
    pub previous_trend: Decimal,
    pub trend: Decimal,
    pub headline: String,
}

/// Resolve a roll into the new trend. the quiet tier zeroes an active trend
/// and leaves a zero trend alone; the two cases get different headlines.
pub fn resolve_roll(
    roll: u8,
    base_wins: bool,
    previous_trend: Decimal,
    ctx: &HeadlineContext,
) -> NewsOutcome {
    let tier = NewsTier::from_roll(roll);
    let direction = tier.magnitude().map(|_| {
        if base_wins {
            Direction::Base
        } else {
            Direction::Foreign
        }
    });
    let trend = match (tier.magnitude(), direction) {
        (Some(magnitude), Some(dir)) => magnitude * dir.sign(),
        _ => Decimal::ZERO,
    };
    let headline = headline(tier, direction, previous_trend, ctx);

    NewsOutcome {
        roll,
        tier,
        direction,
        previous_trend,
        trend,
        headline,
    }
}

// 5.2: headline text per tier and side
pub fn headline(
    tier: NewsTier,
    direction: Option<Direction>,
    previous_trend: Decimal,
    ctx: &HeadlineContext,
) -> String {
    match (tier, direction) {
        (NewsTier::Flash, Some(Direction::Base)) => {
            format!("FLASH: {} Skyrocketing!", ctx.base_currency)
        }
        (NewsTier::Flash, _) => format!("FLASH: {} Surge Incoming!", ctx.currency),
        (NewsTier::Strong, Some(Direction::Base)) => {
            format!("Strong {} sentiment today.", ctx.base_currency)
        }
        (NewsTier::Strong, _) => format!("Strong {} exports reported.", ctx.currency),
        (NewsTier::Modest, Some(Direction::Base)) => {
            format!("{} markets showing modest gains.", ctx.base_country)
        }
        (NewsTier::Modest, _) => format!("{} tourism boosting {}.", ctx.country, ctx.currency),
        (NewsTier::Quiet, _) if previous_trend.is_zero() => {
            "Global markets remain steady. No major news today.".to_string()
        }
        (NewsTier::Quiet, _) => "Global markets steady out. No major news today.".to_string(),
    }
}

/// Morning headline describing what is left of yesterday's trend after decay
pub fn momentum_headline(trend: Decimal, ctx: &HeadlineContext) -> String {
    if trend.abs() < MOMENTUM_THRESHOLD {
        return "Market currently showing no significant trend.".to_string();
    }
    match Direction::of_trend(trend) {
        Some(Direction::Base) => format!("Market Showing {} momentum from yesterday.", ctx.base_currency),
        Some(Direction::Foreign) => format!("Market Showing {} momentum from yesterday.", ctx.currency),
        None => "Market currently showing no significant trend.".to_string(),
    }
}

// 5.3: per-day trigger bookkeeping
#[derive(Debug, Clone)]
pub struct EventScheduler {
    edge_margin: Duration,
    scheduled_at: Duration,
    fired_today: bool,
}

impl EventScheduler {
    pub fn new(edge_margin: Duration) -> Self {
        Self {
            edge_margin,
            scheduled_at: Duration::ZERO,
            fired_today: false,
        }
    }

    pub fn scheduled_at(&self) -> Duration {
        self.scheduled_at
    }

    pub fn fired_today(&self) -> bool {
        self.fired_today
    }

    /// Pick today's trigger uniformly inside [margin, day - margin] and re-arm
    pub fn schedule_next_event<R: Rng + ?Sized>(&mut self, day_duration: Duration, rng: &mut R) -> Duration {
        let low = self.edge_margin.as_secs_f64();
        let high = day_duration.saturating_sub(self.edge_margin).as_secs_f64().max(low);
        let secs = rng.gen_range(low..=high);
        self.scheduled_at = Duration::from_secs_f64(secs);
        self.fired_today = false;
        self.scheduled_at
    }

    pub fn is_due(&self, time_in_day: Duration) -> bool {
        !self.fired_today && time_in_day >= self.scheduled_at
    }

    /// Fire at most once per day. the caller applies the outcome's trend.
    pub fn maybe_trigger<R: Rng + ?Sized>(
        &mut self,
        time_in_day: Duration,
        current_trend: Decimal,
        ctx: &HeadlineContext,
        rng: &mut R,
    ) -> Option<NewsOutcome> {
        if !self.is_due(time_in_day) {
            return None;
        }
        self.fired_today = true;
        let roll = rng.gen_range(1..=ROLL_SIDES);
        let base_wins = rng.gen_bool(0.5);
        Some(resolve_roll(roll, base_wins, current_trend, ctx))
    }
}

/// Share of rolls that land in each tier. used by tests and the sim printout.
pub fn tier_odds(tier: NewsTier) -> Decimal {
    let hits = (1..=ROLL_SIDES).filter(|r| NewsTier::from_roll(*r) == tier).count();
    Decimal::from_usize(hits).unwrap_or(Decimal::ZERO) / Decimal::from(ROLL_SIDES)
}
