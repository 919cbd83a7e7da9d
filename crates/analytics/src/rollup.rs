use crate::labels::Labeler;
use crate::ledger::Ledger;
use crate::report::PnLPoint;
use core_types::TradeRecord;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Key of the monthly bucket collecting daily keys too short to hold a year-month.
pub const OTHER_BUCKET: &str = "Other";

const MONTH_KEY_LEN: usize = 7;

/// Realized PnL per trade date, ascending by date. Days without sells are absent.
pub fn build_daily_pnl(trades: &[TradeRecord], labeler: &dyn Labeler) -> Vec<PnLPoint> {
    let mut buckets: BTreeMap<&str, Decimal> = BTreeMap::new();

    for entry in Ledger::replay(trades) {
        if let Some(realized) = entry.realized {
            *buckets.entry(entry.trade.date.as_str()).or_default() += realized;
        }
    }

    buckets
        .into_iter()
        .map(|(key, value)| PnLPoint {
            key: key.to_string(),
            label: labeler.day_label(key),
            value,
        })
        .collect()
}

/// Re-buckets daily points by year-month.
///
/// Works only from the daily series, so both views always sum to the same total.
pub fn build_monthly_pnl(daily: &[PnLPoint], labeler: &dyn Labeler) -> Vec<PnLPoint> {
    let mut buckets: BTreeMap<&str, Decimal> = BTreeMap::new();

    for point in daily {
        *buckets.entry(month_key(&point.key)).or_default() += point.value;
    }

    buckets
        .into_iter()
        .map(|(key, value)| PnLPoint {
            key: key.to_string(),
            label: labeler.month_label(key),
            value,
        })
        .collect()
}

/// The first seven characters of a daily key, or [`OTHER_BUCKET`] when it is shorter.
fn month_key(day_key: &str) -> &str {
    match day_key.char_indices().nth(MONTH_KEY_LEN) {
        Some((cut, _)) => &day_key[..cut],
        None if day_key.chars().count() == MONTH_KEY_LEN => day_key,
        None => OTHER_BUCKET,
    }
}
