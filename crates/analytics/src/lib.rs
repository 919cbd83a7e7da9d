//! # Journal Analytics Engine
//!
//! This crate turns a list of recorded buy/sell trades into realized profit and loss views.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of storage, price
//!   feeds or presentation. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** Every view is rebuilt from the full trade list on each call by
//!   replaying an average-cost ledger. Nothing is cached between calls.
//! - **Per-step rounding:** Realized PnL and remaining cost basis are rounded to whole currency
//!   units at every sell, so all views sum to the same total.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: Builds a `JournalReport` with every view at once.
//! - `Ledger`: The average-cost replay kernel shared by all builders.
//! - `build_*` functions: The individual views, usable on their own.
//! - `Labeler`: Caller-supplied display labels for weekdays, days and months.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod insights;
pub mod labels;
pub mod ledger;
pub mod report;
pub mod rollup;
pub mod summary;
pub mod tags;

// Re-export the key components to create a clean, public-facing API.
pub use engine::AnalyticsEngine;
pub use insights::{build_insights, build_overall_stats};
pub use labels::{Labeler, StrftimeLabeler};
pub use ledger::{Ledger, LedgerEntry, Outcome, PositionState};
pub use report::{InsightData, JournalReport, OverallStats, PnLPoint, SymbolSummary, TagPerf};
pub use rollup::{build_daily_pnl, build_monthly_pnl};
pub use summary::build_symbol_summaries;
pub use tags::build_tag_performance;
