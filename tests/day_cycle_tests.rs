//! Day cycle invariant tests.
//!
//! These run whole sessions through the OPEN/CLOSED state machine and check
//! the bookkeeping that must hold every day: one news event, one interest
//! payment, monotonic day counter.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::time::Duration;
use tradeday_core::*;

const FRAME: Duration = Duration::from_millis(16);

fn engine(seed: u64) -> Engine {
    let mut sim = SimConfig::with_bank();
    sim.day_duration_secs = 30;
    if let Some(savings) = sim.savings.as_mut() {
        savings.initial_balance = Cash::new(dec!(1000));
    }
    Engine::new(sim, EngineConfig::seeded(seed)).unwrap()
}

/// Run frames until the market closes, pulsing in step. returns the close report.
fn run_day(engine: &mut Engine) -> (Vec<NewsOutcome>, DayCloseReport) {
    engine.start_new_day().unwrap();
    let mut news = Vec::new();
    loop {
        engine.advance_pulse_clock(FRAME);
        let report = engine.tick(FRAME);
        news.extend(report.news);
        if let Some(closed) = report.closed {
            return (news, closed);
        }
    }
}

fn count<F: Fn(&EventPayload) -> bool>(engine: &Engine, pred: F) -> usize {
    engine.events().iter().filter(|e| pred(&e.payload)).count()
}

#[test]
fn exactly_one_news_event_per_day() {
    let mut engine = engine(1);
    for day in 1..=10 {
        let (news, closed) = run_day(&mut engine);
        assert_eq!(news.len(), 1, "day {} fired {} events", day, news.len());
        assert_eq!(closed.day, day);
    }
    assert_eq!(
        count(&engine, |p| matches!(p, EventPayload::NewsReleased(_))),
        10
    );
}

#[test]
fn interest_paid_once_per_close() {
    let mut engine = engine(2);
    let mut expected = dec!(1000);

    for _ in 0..5 {
        let (_, closed) = run_day(&mut engine);
        let earned = expected * dec!(0.001);
        expected += earned;
        assert_eq!(closed.interest, Some(Cash::new(earned)));
        assert_eq!(engine.savings_balance(), Some(Cash::new(expected)));

        // idle frames after the close change nothing
        for _ in 0..100 {
            assert!(engine.tick(FRAME).is_idle());
        }
        assert_eq!(engine.savings_balance(), Some(Cash::new(expected)));
    }

    assert_eq!(
        count(&engine, |p| matches!(p, EventPayload::InterestPaid(_))),
        5
    );
}

#[test]
fn interest_never_paid_while_open() {
    let mut engine = engine(3);
    engine.start_new_day().unwrap();

    let mut last = engine.savings_balance();
    while engine.is_market_open() {
        let report = engine.tick(FRAME);
        if report.closed.is_none() {
            assert_eq!(engine.savings_balance(), last);
        }
        last = engine.savings_balance();
    }
    assert_eq!(engine.savings_balance(), Some(Cash::new(dec!(1001))));
}

#[test]
fn news_flag_resets_only_on_open() {
    let mut engine = engine(4);
    run_day(&mut engine);
    assert!(engine.news_fired_today());

    // closed: flag stays set
    engine.tick(Duration::from_secs(5));
    assert!(engine.news_fired_today());

    engine.start_new_day().unwrap();
    assert!(!engine.news_fired_today());
}

#[test]
fn day_counter_is_monotonic() {
    let mut engine = engine(5);
    let mut last_day = engine.current_day();
    for _ in 0..6 {
        run_day(&mut engine);
        assert_eq!(engine.current_day(), last_day + 1);
        last_day = engine.current_day();
    }
}

#[test]
fn time_resets_only_at_day_start() {
    let mut engine = engine(6);
    engine.start_new_day().unwrap();
    let mut previous = engine.time_in_day();
    while engine.is_market_open() {
        engine.tick(FRAME);
        assert!(engine.time_in_day() > previous);
        previous = engine.time_in_day();
    }

    // still pinned at the close until the next open
    engine.tick(FRAME);
    assert_eq!(engine.time_in_day(), previous);
    assert_eq!(engine.display_time(), DisplayTime::end_of_day());

    engine.start_new_day().unwrap();
    assert_eq!(engine.time_in_day(), Duration::ZERO);
}

#[test]
fn news_fires_inside_margins() {
    for seed in 0..20 {
        let mut engine = engine(seed);
        engine.start_new_day().unwrap();
        let at = engine.scheduled_news_at();
        assert!(at >= Duration::from_secs(5));
        assert!(at <= Duration::from_secs(25));
    }
}

#[test]
fn trend_follows_news_and_decays_overnight() {
    let mut engine = engine(7);
    for _ in 0..8 {
        let (news, _) = run_day(&mut engine);
        let outcome = &news[0];
        assert_eq!(engine.trend(), outcome.trend);
        assert_eq!(engine.headline(), Some(outcome.headline.as_str()));

        let before = engine.trend();
        engine.start_new_day().unwrap();
        assert_eq!(engine.trend(), before * dec!(0.5));
        // finish the day so the loop can start the next one
        while engine.is_market_open() {
            engine.tick(Duration::from_secs(1));
        }
    }
}

#[test]
fn seeded_sessions_are_reproducible() {
    let mut a = engine(99);
    let mut b = engine(99);
    for _ in 0..3 {
        run_day(&mut a);
        run_day(&mut b);
    }
    let rates_a: Vec<Decimal> = a.instruments().iter().map(|v| v.current_rate).collect();
    let rates_b: Vec<Decimal> = b.instruments().iter().map(|v| v.current_rate).collect();
    assert_eq!(rates_a, rates_b);
    assert_eq!(a.headline(), b.headline());
}

#[test]
fn single_currency_variant_closes_without_bank() {
    let mut sim = SimConfig::single_currency();
    sim.day_duration_secs = 20;
    let mut engine = Engine::new(sim, EngineConfig::seeded(8)).unwrap();

    let (_, closed) = run_day(&mut engine);
    assert_eq!(closed.interest, None);
    assert_eq!(closed.status, "Market Closed. (No Bank Account Active)");
    assert_eq!(engine.savings_balance(), None);
}
