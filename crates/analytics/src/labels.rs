//! Display labels for report buckets.
//!
//! Labels are presentation, so the caller decides them through a [`Labeler`]. The engine only
//! asks for them.

use chrono::{NaiveDate, Weekday};
use std::fmt::Write;

pub const DEFAULT_WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
pub const DEFAULT_DAY_FORMAT: &str = "%m/%d";
pub const DEFAULT_MONTH_FORMAT: &str = "%b %Y";

/// Supplies the human-readable labels used in reports.
pub trait Labeler {
    fn weekday_label(&self, weekday: Weekday) -> String;

    /// Label for a daily bucket keyed `YYYY-MM-DD`.
    fn day_label(&self, key: &str) -> String;

    /// Label for a monthly bucket keyed `YYYY-MM`, or the catch-all bucket.
    fn month_label(&self, key: &str) -> String;
}

/// A [`Labeler`] driven by weekday names and `strftime` patterns.
///
/// Keys that do not parse as dates are returned unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct StrftimeLabeler {
    /// Sunday first.
    weekday_names: [String; 7],
    day_format: String,
    month_format: String,
}

impl StrftimeLabeler {
    pub fn new(
        weekday_names: [String; 7],
        day_format: impl Into<String>,
        month_format: impl Into<String>,
    ) -> Self {
        Self {
            weekday_names,
            day_format: day_format.into(),
            month_format: month_format.into(),
        }
    }

    fn format(date: NaiveDate, pattern: &str, fallback: &str) -> String {
        let mut out = String::new();
        match write!(out, "{}", date.format(pattern)) {
            Ok(()) => out,
            Err(_) => fallback.to_string(),
        }
    }
}

impl Default for StrftimeLabeler {
    fn default() -> Self {
        Self::new(
            DEFAULT_WEEKDAY_NAMES.map(String::from),
            DEFAULT_DAY_FORMAT,
            DEFAULT_MONTH_FORMAT,
        )
    }
}

impl Labeler for StrftimeLabeler {
    fn weekday_label(&self, weekday: Weekday) -> String {
        self.weekday_names[weekday.num_days_from_sunday() as usize].clone()
    }

    fn day_label(&self, key: &str) -> String {
        match parse_date(key) {
            Some(date) => Self::format(date, &self.day_format, key),
            None => key.to_string(),
        }
    }

    fn month_label(&self, key: &str) -> String {
        match parse_date(&format!("{key}-01")) {
            Some(date) => Self::format(date, &self.month_format, key),
            None => key.to_string(),
        }
    }
}

/// Parses a `YYYY-MM-DD` trade date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_labels_are_english() {
        let labeler = StrftimeLabeler::default();
        assert_eq!(labeler.weekday_label(Weekday::Sun), "Sun");
        assert_eq!(labeler.weekday_label(Weekday::Wed), "Wed");
        assert_eq!(labeler.day_label("2024-01-03"), "01/03");
        assert_eq!(labeler.month_label("2024-01"), "Jan 2024");
    }

    #[test]
    fn unparseable_keys_pass_through() {
        let labeler = StrftimeLabeler::default();
        assert_eq!(labeler.month_label("Other"), "Other");
        assert_eq!(labeler.day_label("someday"), "someday");
    }

    #[test]
    fn custom_names_and_formats() {
        let names = ["일", "월", "화", "수", "목", "금", "토"].map(String::from);
        let labeler = StrftimeLabeler::new(names, "%d", "%Y년 %m월");
        assert_eq!(labeler.weekday_label(Weekday::Sat), "토");
        assert_eq!(labeler.day_label("2024-03-09"), "09");
        assert_eq!(labeler.month_label("2024-03"), "2024년 03월");
    }
}
