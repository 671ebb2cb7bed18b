// 8.0: trading-day engine. owns the clock, market, news scheduler and portfolio,
// and runs the OPEN/CLOSED day cycle over them.
// single-threaded and tick-driven with no external I/O.

mod config;
mod core;
mod day;
mod pricing;
mod results;
mod trading;

pub use self::config::EngineConfig;
pub use self::core::{Engine, EngineSnapshot, WELCOME_STATUS};
pub use results::{DayCloseReport, EngineError, TickReport};
