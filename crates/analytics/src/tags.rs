use crate::ledger::Ledger;
use crate::report::TagPerf;
use core_types::TradeRecord;
use std::collections::{BTreeSet, HashMap};

/// Attributes each sell's realized PnL to every tag on that sell.
///
/// Tags never get positions of their own; the realized value still comes from the symbol's
/// average cost. Busiest tags come first, ties broken by tag name.
pub fn build_tag_performance(trades: &[TradeRecord]) -> Vec<TagPerf> {
    let mut tags: HashMap<&str, TagPerf> = HashMap::new();

    for entry in Ledger::replay(trades) {
        let Some(realized) = entry.realized else {
            continue;
        };

        // A tag listed twice on the same trade still counts once.
        let unique: BTreeSet<&str> = entry.trade.tags.iter().map(String::as_str).collect();
        for tag in unique {
            tags.entry(tag)
                .or_insert_with(|| TagPerf::new(tag))
                .record_sell(realized);
        }
    }

    let mut performance: Vec<TagPerf> = tags
        .into_values()
        .map(|mut perf| {
            perf.finalize();
            perf
        })
        .collect();

    performance.sort_by(|a, b| {
        b.trade_count
            .cmp(&a.trade_count)
            .then_with(|| a.tag.cmp(&b.tag))
    });
    performance
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::Side;
    use rust_decimal_macros::dec;

    #[test]
    fn every_tag_on_a_sell_gets_the_full_result() {
        let trades = vec![
            TradeRecord::new("1", "2024-01-01", "AAA", Side::Buy, dec!(100), dec!(10)),
            TradeRecord::new("2", "2024-01-02", "AAA", Side::Sell, dec!(110), dec!(5))
                .with_tags(["breakout", "momentum", "breakout"]),
            TradeRecord::new("3", "2024-01-03", "AAA", Side::Sell, dec!(90), dec!(5))
                .with_tags(["momentum"]),
        ];

        let perf = build_tag_performance(&trades);
        let names: Vec<_> = perf.iter().map(|p| p.tag.as_str()).collect();
        assert_eq!(names, ["momentum", "breakout"]);

        let momentum = &perf[0];
        assert_eq!(momentum.trade_count, 2);
        assert_eq!(momentum.realized_pnl, dec!(0));
        assert_eq!((momentum.win_count, momentum.loss_count), (1, 1));
        assert_eq!(momentum.win_rate, dec!(50));
        assert_eq!(momentum.avg_pnl_per_trade, dec!(0));

        let breakout = &perf[1];
        assert_eq!(breakout.trade_count, 1);
        assert_eq!(breakout.realized_pnl, dec!(50));
    }

    #[test]
    fn tags_on_buys_are_ignored() {
        let trades = vec![
            TradeRecord::new("1", "2024-01-01", "AAA", Side::Buy, dec!(100), dec!(10))
                .with_tags(["entry"]),
        ];
        assert!(build_tag_performance(&trades).is_empty());
    }

    #[test]
    fn equal_counts_sort_by_name() {
        let trades = vec![
            TradeRecord::new("1", "2024-01-01", "AAA", Side::Sell, dec!(1), dec!(1))
                .with_tags(["zeta", "alpha"]),
        ];
        let perf = build_tag_performance(&trades);
        assert_eq!(perf[0].tag, "alpha");
        assert_eq!(perf[1].tag, "zeta");
    }
}
