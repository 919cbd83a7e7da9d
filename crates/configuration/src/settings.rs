use crate::error::ConfigError;
use chrono::format::{Item, StrftimeItems};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

/// The root configuration structure for the journal.
///
/// Every section is optional; a missing file yields English labels and no prices.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplaySettings,
    /// Current market prices used to value open positions.
    pub prices: Vec<PriceQuote>,
}

impl Config {
    /// The configured prices keyed by symbol. Later entries override earlier ones.
    pub fn price_map(&self) -> HashMap<String, Decimal> {
        self.prices
            .iter()
            .map(|quote| (quote.symbol.clone(), quote.price))
            .collect()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.display.weekday_names()?;
        validate_pattern("display.day_format", &self.display.day_format)?;
        validate_pattern("display.month_format", &self.display.month_format)?;

        self.prices
            .iter()
            .try_for_each(|quote| validate_price(&quote.symbol, quote.price))
    }
}

/// Presentation settings for report labels.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Seven weekday names, starting with Sunday.
    pub weekday_names: Vec<String>,
    /// `strftime` pattern for daily bucket labels.
    pub day_format: String,
    /// `strftime` pattern for monthly bucket labels.
    pub month_format: String,
}

impl DisplaySettings {
    pub fn weekday_names(&self) -> Result<[String; 7], ConfigError> {
        self.weekday_names.clone().try_into().map_err(|names: Vec<String>| {
            ConfigError::ValidationError(format!(
                "display.weekday_names needs exactly 7 entries (Sunday first), got {}",
                names.len()
            ))
        })
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            weekday_names: ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]
                .map(String::from)
                .to_vec(),
            day_format: "%m/%d".to_string(),
            month_format: "%b %Y".to_string(),
        }
    }
}

/// A current market price for one symbol.
#[derive(Debug, Clone, Deserialize)]
pub struct PriceQuote {
    pub symbol: String,
    pub price: Decimal,
}

/// Rejects negative current prices. Applies to every price source, not just the config file.
pub fn validate_price(symbol: &str, price: Decimal) -> Result<(), ConfigError> {
    if price < Decimal::ZERO {
        return Err(ConfigError::ValidationError(format!(
            "price for {symbol} must not be negative, got {price}"
        )));
    }
    Ok(())
}

/// Validates a merged symbol to price map.
pub fn validate_prices(prices: &HashMap<String, Decimal>) -> Result<(), ConfigError> {
    prices
        .iter()
        .try_for_each(|(symbol, price)| validate_price(symbol, *price))
}

fn validate_pattern(field: &str, pattern: &str) -> Result<(), ConfigError> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(ConfigError::ValidationError(format!(
            "{field} is not a valid strftime pattern: {pattern:?}"
        )));
    }
    Ok(())
}
