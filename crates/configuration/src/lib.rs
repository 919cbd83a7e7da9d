use crate::error::ConfigError;
use config::{Environment, File, FileFormat};
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{validate_price, validate_prices, Config, DisplaySettings, PriceQuote};

/// The file looked up in the working directory when no explicit path is given.
pub const DEFAULT_CONFIG_NAME: &str = "journal";

/// Loads the journal configuration.
///
/// With an explicit `path` the file must exist. Without one, `journal.toml` in the working
/// directory is used if present. `JOURNAL_`-prefixed environment variables are layered on top
/// (e.g. `JOURNAL_DISPLAY__MONTH_FORMAT`).
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match path {
        Some(path) => File::from(path).required(true),
        None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
    };

    let builder = config::Config::builder().add_source(file).add_source(
        Environment::with_prefix("JOURNAL")
            .prefix_separator("_")
            .separator("__"),
    );

    finish(builder)
}

/// Parses configuration from a TOML string, without consulting the environment.
pub fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let builder = config::Config::builder().add_source(File::from_str(toml, FileFormat::Toml));
    finish(builder)
}

fn finish(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<Config, ConfigError> {
    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.build()?.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(prices = config.prices.len(), "Configuration loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_document_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.display.weekday_names().unwrap()[0], "Sun");
        assert_eq!(config.display.month_format, "%b %Y");
        assert!(config.price_map().is_empty());
    }

    #[test]
    fn reads_labels_and_prices() {
        let config = parse_config(
            r#"
            [display]
            weekday_names = ["So", "Mo", "Di", "Mi", "Do", "Fr", "Sa"]
            month_format = "%m.%Y"

            [[prices]]
            symbol = "AAA"
            price = "1234.5"

            [[prices]]
            symbol = "BBB"
            price = 20
            "#,
        )
        .unwrap();

        assert_eq!(config.display.weekday_names().unwrap()[6], "Sa");
        assert_eq!(config.display.day_format, "%m/%d");
        assert_eq!(config.display.month_format, "%m.%Y");

        let prices = config.price_map();
        assert_eq!(prices["AAA"], dec!(1234.5));
        assert_eq!(prices["BBB"], dec!(20));
    }

    #[test]
    fn rejects_wrong_weekday_count() {
        let err = parse_config(
            r#"
            [display]
            weekday_names = ["Mon", "Tue"]
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn rejects_bad_strftime_pattern() {
        let err = parse_config(
            r#"
            [display]
            day_format = "%Q"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn merged_price_maps_share_the_negative_check() {
        let mut prices = parse_config("").unwrap().price_map();
        prices.insert("AAA".to_string(), dec!(12.5));
        prices.insert("ZERO".to_string(), dec!(0));
        assert!(validate_prices(&prices).is_ok());

        prices.insert("BBB".to_string(), dec!(-0.01));
        let err = validate_prices(&prices).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(ref msg) if msg.contains("BBB")));
    }

    #[test]
    fn rejects_negative_price() {
        let err = parse_config(
            r#"
            [[prices]]
            symbol = "AAA"
            price = -1
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
