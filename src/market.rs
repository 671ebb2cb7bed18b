//! Market model: instrument registry, shared trend and the rate pulse.
//!
//! The market owns every instrument and indexes them by id. Rates move only
//! through [`MarketModel::pulse`], which the engine runs on a fixed wall-clock
//! interval while the market is open.

use crate::instrument::{Instrument, InstrumentConfig, InstrumentView};
use crate::types::InstrumentId;
use rand::Rng;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Decimal places kept from each noise draw
pub const NOISE_DP: u32 = 8;

/// One instrument's rate change from a single pulse
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateMove {
    pub instrument_id: InstrumentId,
    pub old_rate: Decimal,
    pub new_rate: Decimal,
    pub noise: Decimal,
    pub floored: bool,
}

#[derive(Debug, Clone, Default)]
pub struct MarketModel {
    trend: Decimal,
    instruments: Vec<Instrument>,
}

impl MarketModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an instrument. ids are assigned in registration order starting at 1.
    pub fn register(&mut self, config: InstrumentConfig) -> InstrumentId {
        let id = InstrumentId(self.instruments.len() as u32 + 1);
        self.instruments.push(Instrument::new(id, config));
        id
    }

    pub fn get(&self, id: InstrumentId) -> Option<&Instrument> {
        self.instruments.iter().find(|i| i.id == id)
    }

    pub fn get_mut(&mut self, id: InstrumentId) -> Option<&mut Instrument> {
        self.instruments.iter_mut().find(|i| i.id == id)
    }

    /// First registered instrument. headlines name this one.
    pub fn lead(&self) -> Option<&Instrument> {
        self.instruments.first()
    }

    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    pub fn views(&self) -> Vec<InstrumentView> {
        self.instruments.iter().map(InstrumentView::from).collect()
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    pub fn trend(&self) -> Decimal {
        self.trend
    }

    pub fn set_trend(&mut self, trend: Decimal) {
        self.trend = trend;
    }

    pub fn decay_trend(&mut self, factor: Decimal) {
        self.trend *= factor;
    }

    pub fn snapshot_opening_rate(&mut self, id: InstrumentId) -> Option<Decimal> {
        let instrument = self.get_mut(id)?;
        instrument.snapshot_opening_rate();
        Some(instrument.opening_rate)
    }

    // 4.1: one pulse. every instrument moves by trend + its own noise, floor-clamped
    pub fn pulse<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<RateMove> {
        let trend = self.trend;
        self.instruments
            .iter_mut()
            .map(|instrument| {
                let noise = draw_noise(rng, instrument.config.volatility);
                let old_rate = instrument.current_rate;
                let (new_rate, floored) =
                    next_rate(old_rate, trend, noise, instrument.config.rate_floor);
                instrument.current_rate = new_rate;
                RateMove {
                    instrument_id: instrument.id,
                    old_rate,
                    new_rate,
                    noise,
                    floored,
                }
            })
            .collect()
    }
}

/// current + trend + noise, clamped to the floor. the flag reports whether the clamp bit.
pub fn next_rate(current: Decimal, trend: Decimal, noise: Decimal, floor: Decimal) -> (Decimal, bool) {
    let raw = current + trend + noise;
    if raw < floor {
        (floor, true)
    } else {
        (raw, false)
    }
}

/// Uniform draw from [-volatility, +volatility]
pub fn draw_noise<R: Rng + ?Sized>(rng: &mut R, volatility: Decimal) -> Decimal {
    let half_width = volatility.abs().to_f64().unwrap_or(0.0);
    if half_width <= 0.0 {
        return Decimal::ZERO;
    }
    let sample = rng.gen_range(-half_width..=half_width);
    Decimal::from_f64(sample)
        .map(|d| d.round_dp(NOISE_DP))
        .unwrap_or(Decimal::ZERO)
}

// 4.2: fixed-interval pulse schedule driven by host wall-clock deltas.
// first pulse fires after one full interval.
#[derive(Debug, Clone)]
pub struct PulseTimer {
    interval: Duration,
    accumulated: Duration,
}

impl PulseTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            accumulated: Duration::ZERO,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Feed elapsed wall time, get back how many pulses are due
    pub fn advance(&mut self, delta: Duration) -> u32 {
        if self.interval.is_zero() {
            return 0;
        }
        self.accumulated += delta;
        let mut due = 0;
        while self.accumulated >= self.interval {
            self.accumulated -= self.interval;
            due += 1;
        }
        due
    }

    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rust_decimal_macros::dec;

    fn yen_market() -> (MarketModel, InstrumentId) {
        let mut market = MarketModel::new();
        let id = market.register(InstrumentConfig::yen());
        (market, id)
    }

    #[test]
    fn register_assigns_sequential_ids() {
        let mut market = MarketModel::new();
        let a = market.register(InstrumentConfig::yen());
        let b = market.register(InstrumentConfig::euro());
        assert_eq!(a, InstrumentId(1));
        assert_eq!(b, InstrumentId(2));
        assert_eq!(market.len(), 2);
        assert_eq!(market.lead().map(|i| i.id), Some(a));
        assert!(market.get(InstrumentId(3)).is_none());
    }

    #[test]
    fn next_rate_applies_trend_and_noise() {
        let (rate, floored) = next_rate(dec!(150), dec!(0.01), dec!(-0.0002), dec!(75));
        assert_eq!(rate, dec!(150.0098));
        assert!(!floored);
    }

    #[test]
    fn next_rate_clamps_to_floor() {
        let (rate, floored) = next_rate(dec!(75.001), dec!(-0.01), dec!(0), dec!(75));
        assert_eq!(rate, dec!(75));
        assert!(floored);
    }

    #[test]
    fn noise_stays_within_volatility() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let n = draw_noise(&mut rng, dec!(0.03));
            assert!(n >= dec!(-0.03) && n <= dec!(0.03), "noise {} out of range", n);
        }
    }

    #[test]
    fn zero_volatility_is_silent() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(draw_noise(&mut rng, Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn pulse_moves_every_instrument() {
        let mut market = MarketModel::new();
        market.register(InstrumentConfig::yen());
        market.register(InstrumentConfig::euro());
        market.set_trend(dec!(0.004));

        let mut rng = StdRng::seed_from_u64(1);
        let moves = market.pulse(&mut rng);

        assert_eq!(moves.len(), 2);
        for mv in &moves {
            assert_eq!(mv.new_rate, mv.old_rate + dec!(0.004) + mv.noise);
            let inst = market.get(mv.instrument_id).unwrap();
            assert_eq!(inst.current_rate, mv.new_rate);
        }
    }

    #[test]
    fn pulse_never_breaks_floor() {
        let (mut market, id) = yen_market();
        market.set_trend(dec!(-5));
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            market.pulse(&mut rng);
        }
        assert_eq!(market.get(id).unwrap().current_rate, dec!(75));
    }

    #[test]
    fn trend_decay_halves() {
        let (mut market, _) = yen_market();
        market.set_trend(dec!(0.01));
        market.decay_trend(dec!(0.5));
        assert_eq!(market.trend(), dec!(0.005));
    }

    #[test]
    fn snapshot_opening_rate_tracks_current() {
        let (mut market, id) = yen_market();
        market.get_mut(id).unwrap().current_rate = dec!(152);
        assert_eq!(market.snapshot_opening_rate(id), Some(dec!(152)));
        assert_eq!(market.snapshot_opening_rate(InstrumentId(9)), None);
    }

    #[test]
    fn pulse_timer_counts_intervals() {
        let mut timer = PulseTimer::new(Duration::from_millis(500));
        assert_eq!(timer.advance(Duration::from_millis(499)), 0);
        assert_eq!(timer.advance(Duration::from_millis(1)), 1);
        assert_eq!(timer.advance(Duration::from_millis(1600)), 3);
        // 100ms carried over
        assert_eq!(timer.advance(Duration::from_millis(400)), 1);
    }

    #[test]
    fn pulse_timer_zero_interval_never_fires() {
        let mut timer = PulseTimer::new(Duration::ZERO);
        assert_eq!(timer.advance(Duration::from_secs(10)), 0);
    }
}
