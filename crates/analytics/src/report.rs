use crate::ledger::Outcome;
use rust_decimal::Decimal;
use serde::Serialize;

/// `part / whole * 100`, or zero when `whole` is zero.
pub(crate) fn percentage(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        Decimal::ZERO
    } else {
        part / whole * Decimal::ONE_HUNDRED
    }
}

/// Per-symbol position and realized result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolSummary {
    pub symbol: String,
    pub symbol_name: Option<String>,

    pub total_buy_quantity: Decimal,
    pub total_buy_amount: Decimal,
    pub total_sell_quantity: Decimal,
    pub total_sell_amount: Decimal,

    pub position_quantity: Decimal,
    pub avg_cost: Decimal,
    pub cost_basis: Decimal,

    pub realized_pnl: Decimal,
    pub win_count: usize,
    pub loss_count: usize,
    pub even_count: usize,
    /// Number of sells.
    pub trade_count: usize,
    pub win_rate: Decimal,
}

impl SymbolSummary {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            symbol_name: None,
            total_buy_quantity: Decimal::ZERO,
            total_buy_amount: Decimal::ZERO,
            total_sell_quantity: Decimal::ZERO,
            total_sell_amount: Decimal::ZERO,
            position_quantity: Decimal::ZERO,
            avg_cost: Decimal::ZERO,
            cost_basis: Decimal::ZERO,
            realized_pnl: Decimal::ZERO,
            win_count: 0,
            loss_count: 0,
            even_count: 0,
            trade_count: 0,
            win_rate: Decimal::ZERO,
        }
    }

    pub(crate) fn record_sell(&mut self, realized: Decimal) {
        self.trade_count += 1;
        self.realized_pnl += realized;
        match Outcome::classify(realized) {
            Outcome::Win => self.win_count += 1,
            Outcome::Loss => self.loss_count += 1,
            Outcome::Even => self.even_count += 1,
        }
    }
}

/// Realized performance attributed to one tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagPerf {
    pub tag: String,
    pub trade_count: usize,
    pub win_count: usize,
    pub loss_count: usize,
    pub even_count: usize,
    pub realized_pnl: Decimal,
    pub avg_pnl_per_trade: Decimal,
    pub win_rate: Decimal,
}

impl TagPerf {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            trade_count: 0,
            win_count: 0,
            loss_count: 0,
            even_count: 0,
            realized_pnl: Decimal::ZERO,
            avg_pnl_per_trade: Decimal::ZERO,
            win_rate: Decimal::ZERO,
        }
    }

    pub(crate) fn record_sell(&mut self, realized: Decimal) {
        self.trade_count += 1;
        self.realized_pnl += realized;
        match Outcome::classify(realized) {
            Outcome::Win => self.win_count += 1,
            Outcome::Loss => self.loss_count += 1,
            Outcome::Even => self.even_count += 1,
        }
    }

    pub(crate) fn finalize(&mut self) {
        let trades = Decimal::from(self.trade_count);
        self.avg_pnl_per_trade = if trades.is_zero() {
            Decimal::ZERO
        } else {
            self.realized_pnl / trades
        };
        self.win_rate = percentage(Decimal::from(self.win_count), trades);
    }
}

/// One bucket of a realized PnL time series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PnLPoint {
    /// `YYYY-MM-DD` for daily points, `YYYY-MM` for monthly points.
    pub key: String,
    pub label: String,
    pub value: Decimal,
}

/// Account-wide totals, realized and unrealized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallStats {
    pub total_realized_pnl: Decimal,
    pub total_buy_amount: Decimal,
    pub total_sell_amount: Decimal,
    pub total_trade_count: usize,
    pub total_win_count: usize,
    pub total_loss_count: usize,
    pub win_rate: Decimal,

    /// Symbols with a positive open quantity, priced or not.
    pub open_position_count: usize,
    /// Cost of open positions that have a known current price.
    pub total_open_cost_basis: Decimal,
    pub total_market_value: Decimal,
    pub eval_pnl: Decimal,
    pub total_pnl: Decimal,
    pub holding_return_rate: Decimal,
}

impl OverallStats {
    pub fn new() -> Self {
        Self {
            total_realized_pnl: Decimal::ZERO,
            total_buy_amount: Decimal::ZERO,
            total_sell_amount: Decimal::ZERO,
            total_trade_count: 0,
            total_win_count: 0,
            total_loss_count: 0,
            win_rate: Decimal::ZERO,
            open_position_count: 0,
            total_open_cost_basis: Decimal::ZERO,
            total_market_value: Decimal::ZERO,
            eval_pnl: Decimal::ZERO,
            total_pnl: Decimal::ZERO,
            holding_return_rate: Decimal::ZERO,
        }
    }
}

impl Default for OverallStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Highlights derived from every sell in the journal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightData {
    /// Weekday label with the highest accumulated realized PnL, empty without sells.
    pub best_day: String,
    pub best_day_pnl: Decimal,
    /// Most profitable tag, or `"-"` when no tag made money.
    pub best_tag: String,
    pub best_tag_pnl: Decimal,
    pub long_win_rate: Decimal,
    /// Always zero: short positions are not tracked.
    pub short_win_rate: Decimal,
    pub max_win: Decimal,
    pub max_loss: Decimal,
}

impl InsightData {
    pub const NO_TAG: &'static str = "-";

    pub fn new() -> Self {
        Self {
            best_day: String::new(),
            best_day_pnl: Decimal::ZERO,
            best_tag: Self::NO_TAG.to_string(),
            best_tag_pnl: Decimal::ZERO,
            long_win_rate: Decimal::ZERO,
            short_win_rate: Decimal::ZERO,
            max_win: Decimal::ZERO,
            max_loss: Decimal::ZERO,
        }
    }
}

impl Default for InsightData {
    fn default() -> Self {
        Self::new()
    }
}

/// Every view the engine produces for one trade set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JournalReport {
    pub symbols: Vec<SymbolSummary>,
    pub tags: Vec<TagPerf>,
    pub daily: Vec<PnLPoint>,
    pub monthly: Vec<PnLPoint>,
    pub overall: OverallStats,
    pub insights: InsightData,
}
