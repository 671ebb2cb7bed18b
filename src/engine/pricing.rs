//! Rate pulses and instrument selection.

use super::core::Engine;
use super::results::EngineError;
use crate::events::{EventPayload, InstrumentSelectedEvent};
use crate::market::RateMove;
use crate::types::InstrumentId;
use rust_decimal::Decimal;
use std::time::Duration;

impl Engine {
    /// Apply one pulse to every instrument. no-op while closed.
    pub fn pulse_tick(&mut self) -> Vec<RateMove> {
        if !self.market_open {
            return Vec::new();
        }
        let moves = self.market.pulse(&mut self.rng);
        for mv in moves.iter().filter(|mv| mv.floored) {
            tracing::debug!(instrument = %mv.instrument_id, floor = %mv.new_rate, "rate held at floor");
        }
        moves
    }

    /// Feed host wall-clock time to the pulse timer and run whatever pulses are due.
    /// returns how many pulses ran.
    pub fn advance_pulse_clock(&mut self, delta: Duration) -> u32 {
        if !self.market_open {
            return 0;
        }
        let due = self.pulse_timer.advance(delta);
        for _ in 0..due {
            self.pulse_tick();
        }
        due
    }

    /// Mark an instrument as the one being viewed: its opening rate snaps to the current rate.
    pub fn select_instrument(&mut self, id: InstrumentId) -> Result<Decimal, EngineError> {
        let opening_rate = self
            .market
            .snapshot_opening_rate(id)
            .ok_or(EngineError::InstrumentNotFound(id))?;

        self.emit_event(EventPayload::InstrumentSelected(InstrumentSelectedEvent {
            instrument_id: id,
            opening_rate,
        }));

        Ok(opening_rate)
    }
}
