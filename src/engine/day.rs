//! Day cycle: CLOSED -> OPEN on start, OPEN -> CLOSED when the clock runs out.

use super::core::Engine;
use super::results::{DayCloseReport, EngineError, TickReport};
use crate::events::{DayClosedEvent, DayStartedEvent, EventPayload, InterestPaidEvent, NewsReleasedEvent};
use crate::news::{momentum_headline, NewsOutcome};
use crate::types::Cash;
use std::time::Duration;

impl Engine {
    /// Open the market for the current day.
    pub fn start_new_day(&mut self) -> Result<(), EngineError> {
        if self.market_open {
            return Err(EngineError::DayAlreadyOpen(self.current_day));
        }

        self.clock.reset();
        self.pulse_timer.reset();
        self.market.decay_trend(self.sim.trend_decay);
        let scheduled = self
            .scheduler
            .schedule_next_event(self.clock.day_duration(), &mut self.rng);
        self.market_open = true;

        let carried_trend = self.market.trend();
        let headline = self
            .headline_context()
            .map(|ctx| momentum_headline(carried_trend, &ctx))
            .unwrap_or_default();
        self.headline = Some(headline.clone());
        self.status = "Market Status: OPEN".to_string();

        tracing::info!(
            day = self.current_day,
            trend = %carried_trend,
            news_at_secs = scheduled.as_secs_f64(),
            "market open"
        );

        self.emit_event(EventPayload::DayStarted(DayStartedEvent {
            day: self.current_day,
            carried_trend,
            news_scheduled_ms: scheduled.as_millis() as u64,
            headline,
        }));

        Ok(())
    }

    /// One controller tick. does nothing while the market is closed.
    pub fn tick(&mut self, delta: Duration) -> TickReport {
        if !self.market_open {
            return TickReport::default();
        }

        self.clock.advance(delta);

        let news = self.fire_news_if_due();

        let closed = if self.clock.is_day_over() {
            Some(self.close_day())
        } else {
            None
        };

        TickReport { news, closed }
    }

    fn fire_news_if_due(&mut self) -> Option<NewsOutcome> {
        let ctx = self.headline_context()?;
        let outcome = self.scheduler.maybe_trigger(
            self.clock.time_in_day(),
            self.market.trend(),
            &ctx,
            &mut self.rng,
        )?;

        self.market.set_trend(outcome.trend);
        self.headline = Some(outcome.headline.clone());

        tracing::info!(
            day = self.current_day,
            roll = outcome.roll,
            tier = ?outcome.tier,
            trend = %outcome.trend,
            headline = %outcome.headline,
            "news released"
        );

        self.emit_event(EventPayload::NewsReleased(NewsReleasedEvent::from(&outcome)));
        Some(outcome)
    }

    // interest is paid here and only here
    fn close_day(&mut self) -> DayCloseReport {
        let day = self.current_day;
        self.market_open = false;

        let interest = self.portfolio.savings.as_mut().map(|savings| {
            let earned = savings.accrue_interest();
            (savings.name.clone(), earned, savings.balance)
        });

        let status = match &interest {
            Some((_, earned, _)) => format!("Market Closed. Bank paid {} in interest.", earned),
            None => "Market Closed. (No Bank Account Active)".to_string(),
        };

        if let Some((bank, earned, new_balance)) = &interest {
            tracing::info!(bank = %bank, earned = %earned, balance = %new_balance, "interest paid");
            self.emit_event(EventPayload::InterestPaid(InterestPaidEvent {
                bank: bank.clone(),
                earned: *earned,
                new_balance: *new_balance,
            }));
        }

        let net_worth = self.net_worth();
        let interest: Option<Cash> = interest.map(|(_, earned, _)| earned);

        self.emit_event(EventPayload::DayClosed(DayClosedEvent {
            day,
            net_worth,
            interest,
        }));
        tracing::info!(day, net_worth = %net_worth, "market closed");

        self.current_day += 1;
        self.status = status.clone();

        DayCloseReport {
            day,
            interest,
            net_worth,
            status,
        }
    }
}
