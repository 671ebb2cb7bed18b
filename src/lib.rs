// tradeday-core: day/night currency trading simulation.
// a fixed-length trading day, a drifting exchange rate per currency, one news
// event per day, and a savings account that pays interest at the close.
// all computation is deterministic given a seed, with no external I/O.
//
// file map (search X.0 for structs, X.1+ for logic):
//   1.x  types.rs: primitives: InstrumentId, Cash, Fraction, Direction, SimInstant
//   2.x  clock.rs: time into day, 9:00 to 17:00 display mapping
//   3.x  instrument.rs: currency config + runtime rate and holding
//   4.x  market.rs: instrument registry, shared trend, rate pulse, pulse timer
//   5.x  news.rs: daily news schedule, d20 tiers, headlines
//   6.x  savings.rs: savings account and daily interest
//   7.x  config.rs: economy settings and game-variant presets
//   7.5  portfolio.rs: wallet, savings, net worth
//   8.x  trading.rs: fraction-of-balance trades, clamped transfers
//   8.x  engine/: day cycle controller and command surface
//   11.x events.rs: state transition events for audit

pub mod clock;
pub mod config;
pub mod engine;
pub mod events;
pub mod instrument;
pub mod market;
pub mod news;
pub mod portfolio;
pub mod savings;
pub mod trading;
pub mod types;

// re exports for convenience
pub use clock::*;
pub use config::*;
pub use engine::*;
pub use events::*;
pub use instrument::*;
pub use market::*;
pub use news::*;
pub use portfolio::*;
pub use savings::*;
pub use trading::{
    fraction_for_amount, TradeError, TradeFill, TradeQuote, TradeSide, TransferError, TransferKind,
    TransferResult, MIN_TRADE,
};
pub use types::*;
