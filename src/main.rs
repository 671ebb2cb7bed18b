//! Trading Day Simulation.
//!
//! Runs the engine headless through the game's main flows: a frame-driven
//! trading day, a week of bank interest, a multi-currency portfolio and the
//! commands the engine refuses.

use rust_decimal_macros::dec;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use tradeday_core::*;

// ~60 frames per second
const FRAME: Duration = Duration::from_micros(16_667);

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Trading Day Simulation");
    println!("Day/Night Currency Market, Headless Run\n");

    scenario_1_trading_day();
    scenario_2_bank_interest();
    scenario_3_world_portfolio();
    scenario_4_rejections();

    println!("\nAll simulations completed successfully.");
}

fn print_snapshot(engine: &Engine) {
    let snap = engine.snapshot();
    println!(
        "  Day {} {} | wallet {} | net worth {}",
        snap.day, snap.clock, snap.wallet, snap.net_worth
    );
    println!("  {}", snap.status);
}

/// One full day driven at frame rate, with a trade in the morning and a sale after the news.
fn scenario_1_trading_day() {
    println!("Scenario 1: A Trading Day\n");

    let mut engine = Engine::new(SimConfig::single_currency(), EngineConfig::seeded(1)).unwrap();
    let yen = InstrumentId(1);
    println!("  {}", engine.status());

    let odds: Vec<String> = [NewsTier::Flash, NewsTier::Strong, NewsTier::Modest, NewsTier::Quiet]
        .iter()
        .map(|tier| format!("{:?} {}%", tier, tier_odds(*tier) * dec!(100)))
        .collect();
    println!("  News odds: {}", odds.join(", "));

    engine.start_new_day().unwrap();
    println!("  {}", engine.headline().unwrap_or_default());

    let fill = engine.buy(yen, Fraction::clamped(dec!(0.5))).unwrap();
    println!("  Bought {} yen with ${} at {}", fill.received, fill.spent, fill.rate);

    let mut frames = 0u32;
    let mut pulses = 0u32;
    let mut sold = false;
    while engine.is_market_open() {
        pulses += engine.advance_pulse_clock(FRAME);
        let report = engine.tick(FRAME);
        frames += 1;

        if let Some(news) = report.news {
            println!("  {} [{:?}] roll {}: {}", engine.display_time(), news.tier, news.roll, news.headline);
        }

        if !sold && engine.news_fired_today() && engine.is_market_open() {
            let fill = engine.sell(yen, Fraction::ALL).unwrap();
            println!("  Sold {} yen for ${:.2} at {:.4}", fill.spent, fill.received, fill.rate);
            sold = true;
        }
    }

    println!("  {} frames, {} rate pulses", frames, pulses);
    print_snapshot(&engine);
    println!();
}

/// Savings compound once per close and never while the market is open.
fn scenario_2_bank_interest() {
    println!("Scenario 2: A Week of Interest\n");

    let mut engine = Engine::new(SimConfig::with_bank(), EngineConfig::seeded(2)).unwrap();
    let moved = engine.deposit(Cash::new(dec!(100))).unwrap();
    println!("  Deposited {} with the bank, wallet {}", moved.applied, moved.wallet);

    for _ in 0..7 {
        engine.start_new_day().unwrap();
        let report = engine.tick(Duration::from_secs(180));
        if let Some(closed) = report.closed {
            println!("  Day {}: {}", closed.day, closed.status);
        }
    }

    let savings = engine.portfolio().savings.as_ref().unwrap();
    println!("  Balance {}, total interest {}\n", savings.balance, savings.total_interest);
}

/// Three currencies moving on one shared trend.
fn scenario_3_world_portfolio() {
    println!("Scenario 3: World Portfolio\n");

    let mut engine = Engine::new(SimConfig::world(), EngineConfig::seeded(3)).unwrap();
    for id in 1..=3 {
        engine.buy(InstrumentId(id), Fraction::clamped(dec!(0.25))).unwrap();
    }
    println!("  Spread 75% of the wallet across yen, euro and pound");

    for _ in 0..3 {
        engine.start_new_day().unwrap();
        while engine.is_market_open() {
            engine.advance_pulse_clock(Duration::from_millis(250));
            engine.tick(Duration::from_millis(250));
        }
        println!("  Day {} close, trend {:.4}, net worth {}", engine.current_day() - 1, engine.trend(), engine.net_worth());
    }

    for view in engine.instruments() {
        let change = view
            .change_pct
            .map(|pct| format!("{:.2}%", pct))
            .unwrap_or_else(|| "N/A".to_string());
        println!("  {} {}: {:.4} ({}), holding {:.2}", view.symbol, view.name, view.current_rate, change, view.held_balance);
    }
    println!();
}

/// Commands the engine refuses leave state untouched.
fn scenario_4_rejections() {
    println!("Scenario 4: Rejected Commands\n");

    let mut engine = Engine::new(SimConfig::single_currency(), EngineConfig::seeded(4)).unwrap();
    let yen = InstrumentId(1);

    match engine.sell(yen, Fraction::ALL) {
        Err(e) => println!("  Sell with nothing held: {}", e),
        Ok(_) => println!("  Sell with nothing held unexpectedly filled"),
    }
    match engine.deposit(Cash::new(dec!(10))) {
        Err(e) => println!("  Deposit without a bank: {}", e),
        Ok(_) => println!("  Deposit without a bank unexpectedly succeeded"),
    }
    match engine.buy(InstrumentId(9), Fraction::ALL) {
        Err(e) => println!("  Buy unknown currency: {}", e),
        Ok(_) => println!("  Buy unknown currency unexpectedly filled"),
    }

    engine.start_new_day().unwrap();
    match engine.start_new_day() {
        Err(e) => println!("  Second start: {}", e),
        Ok(_) => println!("  Second start unexpectedly opened"),
    }

    println!("  Wallet still {}, {} events logged", engine.wallet(), engine.events().len());
}
