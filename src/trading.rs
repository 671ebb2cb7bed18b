// 8.0: trade and transfer math. buys and sells are sized as a fraction of the
// balance being spent, transfers are clamped to the source balance.
// every function here either applies fully or returns Err with nothing touched.

use crate::instrument::Instrument;
use crate::portfolio::Portfolio;
use crate::types::{Cash, Fraction};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Trades worth this much or less are refused
pub const MIN_TRADE: Decimal = dec!(0.01);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeSide {
    /// base -> foreign
    Buy,
    /// foreign -> base
    Sell,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeFill {
    pub side: TradeSide,
    pub fraction: Fraction,
    /// Amount taken from the paying side (base for buys, foreign for sells)
    pub spent: Decimal,
    /// Amount credited to the receiving side
    pub received: Decimal,
    pub rate: Decimal,
}

/// Side-effect-free estimate for a slider position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeQuote {
    pub spend: Decimal,
    pub expected_yield: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferKind {
    Deposit,
    Withdrawal,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransferResult {
    pub kind: TransferKind,
    pub requested: Cash,
    /// What actually moved after clamping to the source balance
    pub applied: Cash,
    pub wallet: Cash,
    pub savings: Cash,
}

impl TransferResult {
    pub fn was_clamped(&self) -> bool {
        self.applied < self.requested
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TradeError {
    #[error("Trade value {value} is at or below the minimum {minimum}")]
    BelowMinimum { value: Decimal, minimum: Decimal },

    #[error("Exchange rate is zero")]
    ZeroRate,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransferError {
    #[error("Transfer amount must be positive, got {0}")]
    InvalidAmount(Cash),

    #[error("No savings account configured")]
    NoSavingsAccount,
}

fn check_tradeable(value: Decimal, rate: Decimal, minimum: Decimal) -> Result<(), TradeError> {
    if value <= minimum {
        return Err(TradeError::BelowMinimum { value, minimum });
    }
    if rate.is_zero() {
        return Err(TradeError::ZeroRate);
    }
    Ok(())
}

// 8.1: spend = wallet * fraction, received = spend * rate
pub fn buy(
    wallet: &mut Cash,
    instrument: &mut Instrument,
    fraction: Fraction,
    minimum: Decimal,
) -> Result<TradeFill, TradeError> {
    let rate = instrument.current_rate;
    let spend = wallet.value() * fraction.value();
    check_tradeable(spend, rate, minimum)?;

    let received = spend * rate;
    *wallet = wallet.sub(Cash::new(spend));
    instrument.held_balance += received;

    Ok(TradeFill {
        side: TradeSide::Buy,
        fraction,
        spent: spend,
        received,
        rate,
    })
}

// 8.2: amount = held * fraction, received = amount / rate
pub fn sell(
    wallet: &mut Cash,
    instrument: &mut Instrument,
    fraction: Fraction,
    minimum: Decimal,
) -> Result<TradeFill, TradeError> {
    let rate = instrument.current_rate;
    let amount = instrument.held_balance * fraction.value();
    check_tradeable(amount, rate, minimum)?;

    let received = amount / rate;
    instrument.held_balance -= amount;
    *wallet = wallet.add(Cash::new(received));

    Ok(TradeFill {
        side: TradeSide::Sell,
        fraction,
        spent: amount,
        received,
        rate,
    })
}

pub fn quote_buy(wallet: Cash, instrument: &Instrument, fraction: Fraction) -> TradeQuote {
    let spend = wallet.value() * fraction.value();
    TradeQuote {
        spend,
        expected_yield: spend * instrument.current_rate,
    }
}

pub fn quote_sell(instrument: &Instrument, fraction: Fraction) -> TradeQuote {
    let spend = instrument.held_balance * fraction.value();
    let expected_yield = if instrument.current_rate.is_zero() {
        Decimal::ZERO
    } else {
        spend / instrument.current_rate
    };
    TradeQuote {
        spend,
        expected_yield,
    }
}

/// Fraction of `balance` that a typed amount represents, amount clamped to [0, balance]
pub fn fraction_for_amount(amount: Decimal, balance: Decimal) -> Fraction {
    if balance <= Decimal::ZERO {
        return Fraction::ZERO;
    }
    let clamped = amount.max(Decimal::ZERO).min(balance);
    Fraction::clamped(clamped / balance)
}

fn check_transfer_amount(amount: Cash) -> Result<(), TransferError> {
    if amount.value() <= Decimal::ZERO {
        return Err(TransferError::InvalidAmount(amount));
    }
    Ok(())
}

// 8.3: wallet -> savings, clamped to the wallet
pub fn deposit(portfolio: &mut Portfolio, amount: Cash) -> Result<TransferResult, TransferError> {
    check_transfer_amount(amount)?;
    let savings = portfolio
        .savings
        .as_mut()
        .ok_or(TransferError::NoSavingsAccount)?;

    let applied = amount.min(portfolio.wallet);
    portfolio.wallet = portfolio.wallet.sub(applied);
    savings.credit(applied);

    Ok(TransferResult {
        kind: TransferKind::Deposit,
        requested: amount,
        applied,
        wallet: portfolio.wallet,
        savings: savings.balance,
    })
}

// 8.4: savings -> wallet, clamped to savings
pub fn withdraw(portfolio: &mut Portfolio, amount: Cash) -> Result<TransferResult, TransferError> {
    check_transfer_amount(amount)?;
    let savings = portfolio
        .savings
        .as_mut()
        .ok_or(TransferError::NoSavingsAccount)?;

    let applied = savings.debit_clamped(amount);
    portfolio.wallet = portfolio.wallet.add(applied);

    Ok(TransferResult {
        kind: TransferKind::Withdrawal,
        requested: amount,
        applied,
        wallet: portfolio.wallet,
        savings: savings.balance,
    })
}
