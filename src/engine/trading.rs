//! Trade and transfer commands.

use super::core::Engine;
use super::results::EngineError;
use crate::events::{EventPayload, TradeEvent, TradeRejectedEvent, TransferEvent, TransferRejectedEvent};
use crate::trading::{self, TradeFill, TradeQuote, TradeSide, TransferKind, TransferResult};
use crate::types::{Cash, Fraction, InstrumentId};

impl Engine {
    /// Convert `fraction` of the wallet into the instrument's currency.
    pub fn buy(&mut self, id: InstrumentId, fraction: Fraction) -> Result<TradeFill, EngineError> {
        self.trade(id, TradeSide::Buy, fraction)
    }

    /// Convert `fraction` of the held foreign balance back into base currency.
    pub fn sell(&mut self, id: InstrumentId, fraction: Fraction) -> Result<TradeFill, EngineError> {
        self.trade(id, TradeSide::Sell, fraction)
    }

    fn trade(&mut self, id: InstrumentId, side: TradeSide, fraction: Fraction) -> Result<TradeFill, EngineError> {
        let min_trade = self.sim.min_trade;
        let instrument = self
            .market
            .get_mut(id)
            .ok_or(EngineError::InstrumentNotFound(id))?;

        let wallet = &mut self.portfolio.wallet;
        let result = match side {
            TradeSide::Buy => trading::buy(wallet, instrument, fraction, min_trade),
            TradeSide::Sell => trading::sell(wallet, instrument, fraction, min_trade),
        };
        let held_after = instrument.held_balance;

        match result {
            Ok(fill) => {
                let event = TradeEvent::from_fill(id, &fill, self.portfolio.wallet, held_after);
                tracing::debug!(instrument = %id, side = ?side, spent = %fill.spent, received = %fill.received, "trade filled");
                self.emit_event(match side {
                    TradeSide::Buy => EventPayload::Bought(event),
                    TradeSide::Sell => EventPayload::Sold(event),
                });
                Ok(fill)
            }
            Err(e) => {
                tracing::debug!(instrument = %id, side = ?side, reason = %e, "trade rejected");
                self.emit_event(EventPayload::TradeRejected(TradeRejectedEvent {
                    instrument_id: id,
                    side,
                    fraction,
                    reason: e.to_string(),
                }));
                Err(EngineError::Trade(e))
            }
        }
    }

    pub fn quote_buy(&self, id: InstrumentId, fraction: Fraction) -> Result<TradeQuote, EngineError> {
        let instrument = self
            .market
            .get(id)
            .ok_or(EngineError::InstrumentNotFound(id))?;
        Ok(trading::quote_buy(self.portfolio.wallet, instrument, fraction))
    }

    pub fn quote_sell(&self, id: InstrumentId, fraction: Fraction) -> Result<TradeQuote, EngineError> {
        let instrument = self
            .market
            .get(id)
            .ok_or(EngineError::InstrumentNotFound(id))?;
        Ok(trading::quote_sell(instrument, fraction))
    }

    /// Move cash from the wallet into savings, clamped to the wallet.
    pub fn deposit(&mut self, amount: Cash) -> Result<TransferResult, EngineError> {
        self.transfer(TransferKind::Deposit, amount)
    }

    /// Move cash from savings into the wallet, clamped to savings.
    pub fn withdraw(&mut self, amount: Cash) -> Result<TransferResult, EngineError> {
        self.transfer(TransferKind::Withdrawal, amount)
    }

    fn transfer(&mut self, kind: TransferKind, amount: Cash) -> Result<TransferResult, EngineError> {
        let result = match kind {
            TransferKind::Deposit => trading::deposit(&mut self.portfolio, amount),
            TransferKind::Withdrawal => trading::withdraw(&mut self.portfolio, amount),
        };

        match result {
            Ok(done) => {
                tracing::debug!(kind = ?kind, requested = %done.requested, applied = %done.applied, "transfer");
                let event = TransferEvent::from(&done);
                self.emit_event(match kind {
                    TransferKind::Deposit => EventPayload::Deposited(event),
                    TransferKind::Withdrawal => EventPayload::Withdrew(event),
                });
                Ok(done)
            }
            Err(e) => {
                self.emit_event(EventPayload::TransferRejected(TransferRejectedEvent {
                    kind,
                    amount,
                    reason: e.to_string(),
                }));
                Err(EngineError::Transfer(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::SimConfig;
    use crate::engine::{Engine, EngineConfig, EngineError};
    use crate::events::EventPayload;
    use crate::trading::{TradeError, TransferError};
    use crate::types::{Cash, Fraction, InstrumentId};
    use rust_decimal_macros::dec;

    const YEN: InstrumentId = InstrumentId(1);

    fn engine(sim: SimConfig) -> Engine {
        Engine::new(sim, EngineConfig::seeded(3)).unwrap()
    }

    #[test]
    fn buy_all_at_150() {
        let mut e = engine(SimConfig::default());
        let fill = e.buy(YEN, Fraction::ALL).unwrap();
        assert_eq!(fill.received, dec!(15000));
        assert!(e.wallet().is_zero());
        assert_eq!(e.instrument(YEN).unwrap().held_balance, dec!(15000));
        assert!(matches!(e.events().last().unwrap().payload, EventPayload::Bought(_)));
    }

    #[test]
    fn rejected_buy_leaves_state_and_logs() {
        let mut e = engine(SimConfig::default());
        let result = e.buy(YEN, Fraction::new(dec!(0.00005)).unwrap());
        assert!(matches!(
            result,
            Err(EngineError::Trade(TradeError::BelowMinimum { .. }))
        ));
        assert_eq!(e.wallet().value(), dec!(100));
        assert!(matches!(
            e.events().last().unwrap().payload,
            EventPayload::TradeRejected(_)
        ));
    }

    #[test]
    fn unknown_instrument_is_a_no_op() {
        let mut e = engine(SimConfig::default());
        assert_eq!(
            e.sell(InstrumentId(5), Fraction::ALL),
            Err(EngineError::InstrumentNotFound(InstrumentId(5)))
        );
        assert_eq!(e.wallet().value(), dec!(100));
        assert!(e.events().is_empty());
    }

    #[test]
    fn trades_allowed_while_closed() {
        let mut e = engine(SimConfig::default());
        assert!(!e.is_market_open());
        assert!(e.buy(YEN, Fraction::clamped(dec!(0.5))).is_ok());
        assert!(e.sell(YEN, Fraction::ALL).is_ok());
        assert_eq!(e.wallet().value(), dec!(100));
    }

    #[test]
    fn decoded_fraction_cannot_overspend() {
        let mut e = engine(SimConfig::default());
        assert!(serde_json::from_str::<Fraction>("\"1.5\"").is_err());

        let decoded: Fraction = serde_json::from_str("\"1\"").unwrap();
        e.buy(YEN, decoded).unwrap();
        assert!(e.wallet().is_zero());
        assert!(!e.wallet().is_negative());
    }

    #[test]
    fn quotes_do_not_mutate() {
        let e = engine(SimConfig::default());
        let q = e.quote_buy(YEN, Fraction::ALL).unwrap();
        assert_eq!(q.expected_yield, dec!(15000));
        assert_eq!(e.wallet().value(), dec!(100));
        assert!(e.quote_sell(InstrumentId(8), Fraction::ALL).is_err());
    }

    #[test]
    fn deposit_clamped_to_wallet() {
        let mut e = engine(SimConfig::with_bank());
        let done = e.deposit(Cash::new(dec!(500))).unwrap();
        assert_eq!(done.applied.value(), dec!(100));
        assert!(e.wallet().is_zero());
        assert_eq!(e.savings_balance(), Some(Cash::new(dec!(100))));

        let back = e.withdraw(Cash::new(dec!(40))).unwrap();
        assert_eq!(back.applied.value(), dec!(40));
        assert_eq!(e.wallet().value(), dec!(40));
    }

    #[test]
    fn transfer_without_bank_rejected() {
        let mut e = engine(SimConfig::single_currency());
        assert_eq!(
            e.deposit(Cash::new(dec!(10))),
            Err(EngineError::Transfer(TransferError::NoSavingsAccount))
        );
        assert_eq!(e.wallet().value(), dec!(100));
        assert!(matches!(
            e.events().last().unwrap().payload,
            EventPayload::TransferRejected(_)
        ));
    }
}
