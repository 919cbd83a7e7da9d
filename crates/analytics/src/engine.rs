use crate::insights::{build_insights, build_overall_stats};
use crate::labels::Labeler;
use crate::report::JournalReport;
use crate::rollup::{build_daily_pnl, build_monthly_pnl};
use crate::summary::build_symbol_summaries;
use crate::tags::build_tag_performance;
use core_types::TradeRecord;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// A stateless calculator for deriving journal reports from recorded trades.
#[derive(Debug, Default)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for building every report view.
    ///
    /// # Arguments
    ///
    /// * `trades` - All recorded trades, in any order.
    /// * `prices` - Current price per symbol. Symbols missing here are not marked to market.
    /// * `labeler` - Supplies weekday, day and month display labels.
    ///
    /// Each view replays the trades independently, so the result depends only on the inputs.
    pub fn calculate(
        &self,
        trades: &[TradeRecord],
        prices: &HashMap<String, Decimal>,
        labeler: &dyn Labeler,
    ) -> JournalReport {
        let symbols = build_symbol_summaries(trades);
        let tags = build_tag_performance(trades);
        let daily = build_daily_pnl(trades, labeler);
        let monthly = build_monthly_pnl(&daily, labeler);
        let overall = build_overall_stats(&symbols, prices);
        let insights = build_insights(trades, &tags, labeler);

        tracing::info!(
            trades = trades.len(),
            symbols = symbols.len(),
            tags = tags.len(),
            days = daily.len(),
            realized = %overall.total_realized_pnl,
            "Journal report built"
        );

        JournalReport {
            symbols,
            tags,
            daily,
            monthly,
            overall,
            insights,
        }
    }
}
