use crate::labels::{parse_date, Labeler};
use crate::ledger::{Ledger, Outcome};
use crate::report::{percentage, InsightData, OverallStats, SymbolSummary, TagPerf};
use chrono::{Datelike, Weekday};
use core_types::TradeRecord;
use rust_decimal::Decimal;
use std::collections::HashMap;

const SUNDAY_FIRST: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Totals the symbol summaries and marks open positions to market.
///
/// Only symbols holding a positive quantity *and* present in `prices` contribute to the
/// unrealized figures. Unpriced positions are left out rather than valued at zero.
pub fn build_overall_stats(
    summaries: &[SymbolSummary],
    prices: &HashMap<String, Decimal>,
) -> OverallStats {
    let mut stats = OverallStats::new();

    for summary in summaries {
        stats.total_realized_pnl += summary.realized_pnl;
        stats.total_buy_amount += summary.total_buy_amount;
        stats.total_sell_amount += summary.total_sell_amount;
        stats.total_trade_count += summary.trade_count;
        stats.total_win_count += summary.win_count;
        stats.total_loss_count += summary.loss_count;

        if summary.position_quantity <= Decimal::ZERO {
            continue;
        }
        stats.open_position_count += 1;

        let Some(price) = prices.get(&summary.symbol) else {
            tracing::debug!(symbol = %summary.symbol, "No current price, skipping valuation");
            continue;
        };

        let cost = summary.position_quantity * summary.avg_cost;
        let market_value = summary.position_quantity * *price;
        stats.total_open_cost_basis += cost;
        stats.total_market_value += market_value;
        stats.eval_pnl += market_value - cost;
    }

    stats.win_rate = percentage(
        Decimal::from(stats.total_win_count),
        Decimal::from(stats.total_trade_count),
    );
    stats.total_pnl = stats.total_realized_pnl + stats.eval_pnl;
    stats.holding_return_rate = percentage(stats.eval_pnl, stats.total_open_cost_basis);
    stats
}

/// Weekday, tag and extreme-trade highlights.
///
/// Replays every sell on its own ledger. Weekdays are compared Sunday through Saturday and the
/// first maximum wins, so ties resolve to the earlier weekday. Sells whose date does not parse
/// still count toward win rate and extremes but not toward a weekday.
pub fn build_insights(
    trades: &[TradeRecord],
    tag_performance: &[TagPerf],
    labeler: &dyn Labeler,
) -> InsightData {
    let mut insights = InsightData::new();
    // Indexed by days from Sunday.
    let mut weekday_pnl: [Option<Decimal>; 7] = [None; 7];
    let mut sells = 0usize;
    let mut wins = 0usize;

    for entry in Ledger::replay(trades) {
        let Some(realized) = entry.realized else {
            continue;
        };

        sells += 1;
        if Outcome::classify(realized) == Outcome::Win {
            wins += 1;
        }
        insights.max_win = insights.max_win.max(realized);
        insights.max_loss = insights.max_loss.min(realized);

        match parse_date(&entry.trade.date) {
            Some(date) => {
                let slot = &mut weekday_pnl[date.weekday().num_days_from_sunday() as usize];
                *slot = Some(slot.unwrap_or_default() + realized);
            }
            None => tracing::warn!(
                trade_id = %entry.trade.id,
                date = %entry.trade.date,
                "Trade date is not YYYY-MM-DD, excluded from weekday totals"
            ),
        }
    }

    let mut best: Option<(Weekday, Decimal)> = None;
    for (weekday, total) in SUNDAY_FIRST.into_iter().zip(weekday_pnl) {
        let Some(total) = total else {
            continue;
        };
        if best.is_none_or(|(_, current)| total > current) {
            best = Some((weekday, total));
        }
    }
    if let Some((weekday, total)) = best {
        insights.best_day = labeler.weekday_label(weekday);
        insights.best_day_pnl = total;
    }

    let top_tag = tag_performance
        .iter()
        .fold(None::<&TagPerf>, |best, perf| match best {
            Some(current) if current.realized_pnl >= perf.realized_pnl => Some(current),
            _ => Some(perf),
        });
    if let Some(perf) = top_tag.filter(|perf| perf.realized_pnl > Decimal::ZERO) {
        insights.best_tag = perf.tag.clone();
        insights.best_tag_pnl = perf.realized_pnl;
    }

    insights.long_win_rate = percentage(Decimal::from(wins), Decimal::from(sells));
    insights
}
