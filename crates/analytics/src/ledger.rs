//! Average-cost position replay.
//!
//! Every report in this crate is built on top of [`Ledger::replay`]. Positions are tracked per
//! symbol; a sell realizes `(price - avg_cost) * quantity`, rounded to a whole currency unit at
//! the moment of the sell.

use core_types::{Side, TradeRecord};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Rounds half-way values toward positive infinity, so `2.5 -> 3` and `-2.5 -> -2`.
pub fn round_half_up(value: Decimal) -> Decimal {
    (value + Decimal::new(5, 1)).floor()
}

/// Classification of a single realized result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
    Even,
}

impl Outcome {
    pub fn classify(realized: Decimal) -> Self {
        match realized.cmp(&Decimal::ZERO) {
            std::cmp::Ordering::Greater => Outcome::Win,
            std::cmp::Ordering::Less => Outcome::Loss,
            std::cmp::Ordering::Equal => Outcome::Even,
        }
    }
}

/// Open quantity and the cost attributed to it for one symbol.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PositionState {
    /// Signed: overselling drives this below zero.
    pub quantity: Decimal,
    pub cost_basis: Decimal,
}

impl PositionState {
    pub fn avg_cost(&self) -> Decimal {
        if self.quantity.is_zero() {
            Decimal::ZERO
        } else {
            self.cost_basis / self.quantity
        }
    }

    /// Applies one fill and returns the realized PnL when it is a sell.
    pub fn apply(&mut self, side: Side, price: Decimal, quantity: Decimal) -> Option<Decimal> {
        let realized = match side {
            Side::Buy => {
                self.quantity += quantity;
                self.cost_basis += price * quantity;
                None
            }
            Side::Sell => {
                let avg_cost = self.avg_cost();
                let realized = round_half_up((price - avg_cost) * quantity);
                self.quantity -= quantity;
                self.cost_basis = round_half_up(self.cost_basis - avg_cost * quantity);
                Some(realized)
            }
        };

        if self.quantity.is_zero() {
            self.cost_basis = Decimal::ZERO;
        }

        realized
    }
}

/// The state of the ledger right after one trade was applied.
#[derive(Debug, Clone, Copy)]
pub struct LedgerEntry<'a> {
    pub trade: &'a TradeRecord,
    /// `Some` for sells, `None` for buys.
    pub realized: Option<Decimal>,
    /// Position of `trade.symbol` after the trade.
    pub position: PositionState,
}

impl LedgerEntry<'_> {
    pub fn outcome(&self) -> Option<Outcome> {
        self.realized.map(Outcome::classify)
    }
}

/// Per-symbol position book.
#[derive(Debug, Default)]
pub struct Ledger {
    positions: HashMap<String, PositionState>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a trade to its symbol's position.
    pub fn apply(&mut self, trade: &TradeRecord) -> (Option<Decimal>, PositionState) {
        let position = self.positions.entry(trade.symbol.clone()).or_default();
        let realized = position.apply(trade.side, trade.price, trade.quantity);

        if let Some(realized) = realized {
            tracing::trace!(
                symbol = %trade.symbol,
                trade_id = %trade.id,
                %realized,
                remaining = %position.quantity,
                "Sell realized"
            );
        }

        (realized, *position)
    }

    pub fn position(&self, symbol: &str) -> PositionState {
        self.positions.get(symbol).copied().unwrap_or_default()
    }

    /// Replays `trades` in chronological order on a fresh ledger.
    ///
    /// The input order does not matter; trades are sorted by `(date, id)` first.
    pub fn replay(trades: &[TradeRecord]) -> impl Iterator<Item = LedgerEntry<'_>> {
        let mut ledger = Ledger::new();
        chronological(trades).into_iter().map(move |trade| {
            let (realized, position) = ledger.apply(trade);
            LedgerEntry {
                trade,
                realized,
                position,
            }
        })
    }
}

/// Returns references to `trades` sorted by `(date, id)`.
pub fn chronological(trades: &[TradeRecord]) -> Vec<&TradeRecord> {
    let mut ordered: Vec<&TradeRecord> = trades.iter().collect();
    ordered.sort_by(|a, b| a.chronological_cmp(b));
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn trade(id: &str, date: &str, side: Side, price: Decimal, qty: Decimal) -> TradeRecord {
        TradeRecord::new(id, date, "AAA", side, price, qty)
    }

    #[test]
    fn rounds_half_toward_positive_infinity() {
        assert_eq!(round_half_up(dec!(2.5)), dec!(3));
        assert_eq!(round_half_up(dec!(-2.5)), dec!(-2));
        assert_eq!(round_half_up(dec!(-2.6)), dec!(-3));
        assert_eq!(round_half_up(dec!(2.49)), dec!(2));
    }

    #[test]
    fn sell_realizes_against_average_cost() {
        let mut position = PositionState::default();
        assert_eq!(position.apply(Side::Buy, dec!(100), dec!(10)), None);
        assert_eq!(position.apply(Side::Buy, dec!(200), dec!(10)), None);
        assert_eq!(position.avg_cost(), dec!(150));

        let realized = position.apply(Side::Sell, dec!(300), dec!(5));
        assert_eq!(realized, Some(dec!(750)));
        assert_eq!(position.quantity, dec!(15));
        assert_eq!(position.cost_basis, dec!(2250));
    }

    #[test]
    fn selling_flat_realizes_full_proceeds() {
        let mut position = PositionState::default();
        let realized = position.apply(Side::Sell, dec!(12.5), dec!(4));
        assert_eq!(realized, Some(dec!(50)));
        assert_eq!(position.quantity, dec!(-4));
        assert_eq!(position.cost_basis, dec!(0));
    }

    #[test]
    fn oversold_position_is_reduced_by_later_buys() {
        let mut position = PositionState::default();
        position.apply(Side::Buy, dec!(100), dec!(5));
        position.apply(Side::Sell, dec!(120), dec!(8));
        assert_eq!(position.quantity, dec!(-3));
        assert_eq!(position.cost_basis, dec!(-300));

        // avg cost is still 100; buying 3 brings the book back to flat.
        position.apply(Side::Buy, dec!(90), dec!(3));
        assert_eq!(position.quantity, dec!(0));
        assert_eq!(position.cost_basis, dec!(0));
    }

    #[test]
    fn cost_basis_is_rounded_per_sell() {
        let mut position = PositionState::default();
        position.apply(Side::Buy, dec!(10), dec!(1));
        position.apply(Side::Buy, dec!(11), dec!(2));
        // avg = 32 / 3
        let realized = position.apply(Side::Sell, dec!(12), dec!(1));
        assert_eq!(realized, Some(dec!(1)));
        assert_eq!(position.cost_basis, dec!(21));
        assert_eq!(position.quantity, dec!(2));
    }

    #[test]
    fn classifies_outcomes() {
        assert_eq!(Outcome::classify(dec!(1)), Outcome::Win);
        assert_eq!(Outcome::classify(dec!(-1)), Outcome::Loss);
        assert_eq!(Outcome::classify(dec!(0)), Outcome::Even);
        assert_eq!(Outcome::classify(dec!(-0)), Outcome::Even);
    }

    #[test]
    fn replay_orders_by_date_then_id() {
        let trades = vec![
            trade("b", "2024-01-02", Side::Sell, dec!(200), dec!(5)),
            trade("a", "2024-01-02", Side::Buy, dec!(100), dec!(10)),
            trade("z", "2024-01-01", Side::Buy, dec!(100), dec!(10)),
        ];

        let entries: Vec<_> = Ledger::replay(&trades).collect();
        let ids: Vec<_> = entries.iter().map(|e| e.trade.id.as_str()).collect();
        assert_eq!(ids, ["z", "a", "b"]);
        assert_eq!(entries[2].realized, Some(dec!(500)));
        assert_eq!(entries[2].position.quantity, dec!(15));
        assert_eq!(entries[2].outcome(), Some(Outcome::Win));
    }

    #[test]
    fn symbols_keep_independent_positions() {
        let trades = vec![
            TradeRecord::new("1", "2024-01-01", "AAA", Side::Buy, dec!(10), dec!(1)),
            TradeRecord::new("2", "2024-01-01", "BBB", Side::Buy, dec!(50), dec!(1)),
            TradeRecord::new("3", "2024-01-02", "AAA", Side::Sell, dec!(20), dec!(1)),
        ];

        let mut ledger = Ledger::new();
        let mut realized = Vec::new();
        for trade in chronological(&trades) {
            realized.push(ledger.apply(trade).0);
        }
        assert_eq!(realized, [None, None, Some(dec!(10))]);
        assert_eq!(ledger.position("BBB").quantity, dec!(1));
        assert_eq!(ledger.position("AAA"), PositionState::default());
        assert_eq!(ledger.position("CCC"), PositionState::default());
    }
}
