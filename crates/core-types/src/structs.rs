use crate::enums::Side;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A single executed buy or sell, as recorded by the user.
///
/// Records are immutable inputs. The analytics engine never relies on the order they arrive in;
/// it sorts by `(date, id)` itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// Opaque unique identifier. Compared lexicographically to order same-day trades.
    pub id: String,
    /// Calendar date as `YYYY-MM-DD`.
    pub date: String,
    pub symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol_name: Option<String>,
    pub side: Side,
    pub price: Decimal,
    pub quantity: Decimal,
    /// Free-text labels. Only used for attribution on sells.
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

impl TradeRecord {
    pub fn new(
        id: impl Into<String>,
        date: impl Into<String>,
        symbol: impl Into<String>,
        side: Side,
        price: Decimal,
        quantity: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            date: date.into(),
            symbol: symbol.into(),
            symbol_name: None,
            side,
            price,
            quantity,
            tags: Vec::new(),
            memo: None,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_symbol_name(mut self, name: impl Into<String>) -> Self {
        self.symbol_name = Some(name.into());
        self
    }

    /// Gross value of the trade (`price * quantity`).
    pub fn amount(&self) -> Decimal {
        self.price * self.quantity
    }

    /// Chronological ordering: date first, then id. Both compare as plain strings.
    pub fn chronological_cmp(&self, other: &Self) -> Ordering {
        self.date
            .cmp(&other.date)
            .then_with(|| self.id.cmp(&other.id))
    }
}
