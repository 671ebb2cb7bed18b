// 8.0.2: result types and errors for engine operations.

use crate::news::NewsOutcome;
use crate::trading::{TradeError, TransferError};
use crate::types::{Cash, InstrumentId};

#[derive(Debug, Clone, PartialEq)]
pub struct DayCloseReport {
    /// The day that just ended
    pub day: u32,
    /// None when no savings account is configured
    pub interest: Option<Cash>,
    pub net_worth: Cash,
    pub status: String,
}

/// What a single controller tick did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub news: Option<NewsOutcome>,
    pub closed: Option<DayCloseReport>,
}

impl TickReport {
    pub fn is_idle(&self) -> bool {
        self.news.is_none() && self.closed.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("Instrument {0} not found")]
    InstrumentNotFound(InstrumentId),

    #[error("Market is already open for day {0}")]
    DayAlreadyOpen(u32),

    #[error("Trade rejected: {0}")]
    Trade(#[from] TradeError),

    #[error("Transfer rejected: {0}")]
    Transfer(#[from] TransferError),
}
