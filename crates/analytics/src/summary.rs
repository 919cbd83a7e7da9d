use crate::ledger::Ledger;
use crate::report::{percentage, SymbolSummary};
use core_types::{Side, TradeRecord};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Builds one summary per symbol, sorted by symbol.
///
/// Positions are replayed per symbol, so interleaving trades of other symbols does not change a
/// symbol's numbers.
pub fn build_symbol_summaries(trades: &[TradeRecord]) -> Vec<SymbolSummary> {
    let mut summaries: BTreeMap<&str, SymbolSummary> = BTreeMap::new();

    for entry in Ledger::replay(trades) {
        let trade = entry.trade;
        let summary = summaries
            .entry(trade.symbol.as_str())
            .or_insert_with(|| SymbolSummary::new(trade.symbol.as_str()));

        if summary.symbol_name.is_none() {
            summary.symbol_name = trade
                .symbol_name
                .as_ref()
                .filter(|name| !name.trim().is_empty())
                .cloned();
        }

        match trade.side {
            Side::Buy => {
                summary.total_buy_quantity += trade.quantity;
                summary.total_buy_amount += trade.amount();
            }
            Side::Sell => {
                summary.total_sell_quantity += trade.quantity;
                summary.total_sell_amount += trade.amount();
            }
        }

        if let Some(realized) = entry.realized {
            summary.record_sell(realized);
        }

        summary.position_quantity = entry.position.quantity;
        summary.cost_basis = entry.position.cost_basis;
    }

    summaries
        .into_values()
        .map(|mut summary| {
            if summary.position_quantity > Decimal::ZERO {
                summary.avg_cost = summary.cost_basis / summary.position_quantity;
            } else {
                // Quantity keeps its sign; only the cost fields reset.
                summary.cost_basis = Decimal::ZERO;
                summary.avg_cost = Decimal::ZERO;
            }
            summary.win_rate = percentage(
                Decimal::from(summary.win_count),
                Decimal::from(summary.trade_count),
            );
            summary
        })
        .collect()
}
