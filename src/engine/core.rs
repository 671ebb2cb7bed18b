// 8.0 engine/core.rs: main engine. holds the clock, market, scheduler, portfolio and event log.

use super::config::EngineConfig;
use crate::clock::{Clock, DisplayTime};
use crate::config::{ConfigError, SimConfig};
use crate::events::{Event, EventEmitter, EventLog, EventPayload};
use crate::instrument::{Instrument, InstrumentView};
use crate::market::{MarketModel, PulseTimer};
use crate::news::{EventScheduler, HeadlineContext};
use crate::portfolio::Portfolio;
use crate::types::{Cash, InstrumentId, SimInstant};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const WELCOME_STATUS: &str = "Press 'Start Day' to begin trading.";

/** 8.1: main engine struct. all state lives here */
#[derive(Debug)]
pub struct Engine {
    pub(super) sim: SimConfig,
    pub(super) clock: Clock,
    pub(super) market: MarketModel,
    pub(super) scheduler: EventScheduler,
    pub(super) portfolio: Portfolio,
    pub(super) pulse_timer: PulseTimer,
    pub(super) rng: StdRng,
    pub(super) events: EventLog,
    pub(super) current_day: u32,
    pub(super) market_open: bool,
    pub(super) headline: Option<String>,
    pub(super) status: String,
}

/// Everything the presentation layer shows, in one serializable value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub day: u32,
    pub market_open: bool,
    pub clock: DisplayTime,
    pub wallet: Cash,
    pub savings: Option<Cash>,
    pub net_worth: Cash,
    pub trend: Decimal,
    pub headline: Option<String>,
    pub status: String,
    pub instruments: Vec<InstrumentView>,
}

impl Engine {
    pub fn new(sim: SimConfig, config: EngineConfig) -> Result<Self, ConfigError> {
        sim.validate()?;

        let mut market = MarketModel::new();
        for instrument in &sim.instruments {
            market.register(instrument.clone());
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            clock: Clock::new(sim.day_duration()),
            scheduler: EventScheduler::new(sim.event_margin()),
            portfolio: Portfolio::new(sim.initial_wallet, sim.savings.as_ref()),
            pulse_timer: PulseTimer::new(sim.pulse_interval()),
            market,
            rng,
            events: EventLog::new(config.max_events),
            current_day: 1,
            market_open: false,
            headline: None,
            status: WELCOME_STATUS.to_string(),
            sim,
        })
    }

    pub fn sim_config(&self) -> &SimConfig {
        &self.sim
    }

    pub fn current_day(&self) -> u32 {
        self.current_day
    }

    pub fn is_market_open(&self) -> bool {
        self.market_open
    }

    pub fn time_in_day(&self) -> Duration {
        self.clock.time_in_day()
    }

    pub fn display_time(&self) -> DisplayTime {
        self.clock.display_time()
    }

    pub fn scheduled_news_at(&self) -> Duration {
        self.scheduler.scheduled_at()
    }

    pub fn news_fired_today(&self) -> bool {
        self.scheduler.fired_today()
    }

    pub fn trend(&self) -> Decimal {
        self.market.trend()
    }

    pub fn headline(&self) -> Option<&str> {
        self.headline.as_deref()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn market(&self) -> &MarketModel {
        &self.market
    }

    pub fn instrument(&self, id: InstrumentId) -> Option<&Instrument> {
        self.market.get(id)
    }

    pub fn instrument_view(&self, id: InstrumentId) -> Option<InstrumentView> {
        self.market.get(id).map(InstrumentView::from)
    }

    pub fn instruments(&self) -> Vec<InstrumentView> {
        self.market.views()
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    pub fn wallet(&self) -> Cash {
        self.portfolio.wallet
    }

    pub fn savings_balance(&self) -> Option<Cash> {
        self.portfolio.savings.as_ref().map(|s| s.balance)
    }

    pub fn net_worth(&self) -> Cash {
        self.portfolio.net_worth(&self.market)
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            day: self.current_day,
            market_open: self.market_open,
            clock: self.display_time(),
            wallet: self.wallet(),
            savings: self.savings_balance(),
            net_worth: self.net_worth(),
            trend: self.trend(),
            headline: self.headline.clone(),
            status: self.status.clone(),
            instruments: self.instruments(),
        }
    }

    pub fn recent_events(&self, count: usize) -> &[Event] {
        self.events.recent(count)
    }

    pub fn events(&self) -> &[Event] {
        self.events.events()
    }

    pub(super) fn now(&self) -> SimInstant {
        SimInstant::new(self.current_day, self.clock.time_in_day())
    }

    pub(super) fn headline_context(&self) -> Option<HeadlineContext> {
        self.market
            .lead()
            .map(|lead| HeadlineContext::new(&self.sim.base_currency, &self.sim.base_country, lead))
    }

    pub(super) fn emit_event(&mut self, payload: EventPayload) {
        let event = Event::new(self.events.next_id(), self.now(), payload);
        tracing::debug!(event_id = event.id.0, at = %event.at, payload = ?event.payload, "event");
        self.events.emit(event);
    }
}
