// 11.0: every state change produces an event. gives the presentation layer an
// audit trail (trade log, news ticker, interest history) without polling.
// the EventPayload enum lists all event types.

use crate::news::{NewsTier, NewsOutcome};
use crate::trading::{TradeFill, TradeSide, TransferKind, TransferResult};
use crate::types::{Cash, Direction, Fraction, InstrumentId, SimInstant};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(pub u64);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub at: SimInstant,
    pub payload: EventPayload,
}

impl Event {
    pub fn new(id: EventId, at: SimInstant, payload: EventPayload) -> Self {
        Self { id, at, payload }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EventPayload {
    // Day cycle events
    DayStarted(DayStartedEvent),
    DayClosed(DayClosedEvent),
    NewsReleased(NewsReleasedEvent),
    InterestPaid(InterestPaidEvent),

    // Trade events
    Bought(TradeEvent),
    Sold(TradeEvent),
    TradeRejected(TradeRejectedEvent),

    // Savings events
    Deposited(TransferEvent),
    Withdrew(TransferEvent),
    TransferRejected(TransferRejectedEvent),

    // Display events
    InstrumentSelected(InstrumentSelectedEvent),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayStartedEvent {
    pub day: u32,
    /// Trend left after overnight decay
    pub carried_trend: Decimal,
    pub news_scheduled_ms: u64,
    pub headline: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayClosedEvent {
    /// The day that just ended
    pub day: u32,
    pub net_worth: Cash,
    pub interest: Option<Cash>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsReleasedEvent {
    pub roll: u8,
    pub tier: NewsTier,
    pub direction: Option<Direction>,
    pub previous_trend: Decimal,
    pub trend: Decimal,
    pub headline: String,
}

impl From<&NewsOutcome> for NewsReleasedEvent {
    fn from(outcome: &NewsOutcome) -> Self {
        Self {
            roll: outcome.roll,
            tier: outcome.tier,
            direction: outcome.direction,
            previous_trend: outcome.previous_trend,
            trend: outcome.trend,
            headline: outcome.headline.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterestPaidEvent {
    pub bank: String,
    pub earned: Cash,
    pub new_balance: Cash,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeEvent {
    pub instrument_id: InstrumentId,
    pub fraction: Fraction,
    pub spent: Decimal,
    pub received: Decimal,
    pub rate: Decimal,
    pub wallet_after: Cash,
    pub held_after: Decimal,
}

impl TradeEvent {
    pub fn from_fill(instrument_id: InstrumentId, fill: &TradeFill, wallet_after: Cash, held_after: Decimal) -> Self {
        Self {
            instrument_id,
            fraction: fill.fraction,
            spent: fill.spent,
            received: fill.received,
            rate: fill.rate,
            wallet_after,
            held_after,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeRejectedEvent {
    pub instrument_id: InstrumentId,
    pub side: TradeSide,
    pub fraction: Fraction,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferEvent {
    pub requested: Cash,
    pub applied: Cash,
    pub wallet_after: Cash,
    pub savings_after: Cash,
}

impl From<&TransferResult> for TransferEvent {
    fn from(result: &TransferResult) -> Self {
        Self {
            requested: result.requested,
            applied: result.applied,
            wallet_after: result.wallet,
            savings_after: result.savings,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferRejectedEvent {
    pub kind: TransferKind,
    pub amount: Cash,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstrumentSelectedEvent {
    pub instrument_id: InstrumentId,
    pub opening_rate: Decimal,
}

pub trait EventEmitter {
    fn emit(&mut self, event: Event);
}

/// Bounded in-memory event log. oldest events are dropped past `capacity`.
#[derive(Debug)]
pub struct EventLog {
    events: Vec<Event>,
    next_id: u64,
    capacity: usize,
}

impl EventLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            events: Vec::new(),
            next_id: 1,
            capacity,
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn recent(&self, count: usize) -> &[Event] {
        let start = self.events.len().saturating_sub(count);
        &self.events[start..]
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn next_id(&mut self) -> EventId {
        let id = EventId(self.next_id);
        self.next_id += 1;
        id
    }
}

impl EventEmitter for EventLog {
    fn emit(&mut self, event: Event) {
        self.events.push(event);
        if self.events.len() > self.capacity {
            let drain_count = self.events.len() - self.capacity;
            self.events.drain(0..drain_count);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn deposit_event(log: &mut EventLog) -> Event {
        Event::new(
            log.next_id(),
            SimInstant::start_of(1),
            EventPayload::Deposited(TransferEvent {
                requested: Cash::new(dec!(500)),
                applied: Cash::new(dec!(100)),
                wallet_after: Cash::zero(),
                savings_after: Cash::new(dec!(100)),
            }),
        )
    }

    #[test]
    fn event_log_collects() {
        let mut log = EventLog::new(10);
        let event = deposit_event(&mut log);
        log.emit(event);
        assert_eq!(log.events().len(), 1);
        assert_eq!(log.events()[0].id, EventId(1));

        log.clear();
        assert!(log.events().is_empty());
    }

    #[test]
    fn event_log_drops_oldest_past_capacity() {
        let mut log = EventLog::new(3);
        for _ in 0..5 {
            let event = deposit_event(&mut log);
            log.emit(event);
        }
        assert_eq!(log.events().len(), 3);
        assert_eq!(log.events()[0].id, EventId(3));
        assert_eq!(log.recent(1)[0].id, EventId(5));
    }

    #[test]
    fn news_event_from_outcome() {
        let outcome = NewsOutcome {
            roll: 1,
            tier: NewsTier::Flash,
            direction: Some(Direction::Base),
            previous_trend: Decimal::ZERO,
            trend: dec!(0.01),
            headline: "FLASH: USD Skyrocketing!".to_string(),
        };
        let event = NewsReleasedEvent::from(&outcome);
        assert_eq!(event.trend, dec!(0.01));
        assert_eq!(event.tier, NewsTier::Flash);
    }
}
