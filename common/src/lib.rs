//! Shared model for the liquidity monitor.
//!
//! Every crate in the workspace speaks in terms of [`MarketSnapshot`]: the
//! acquisition layer builds one, the signal engine reads one, and the
//! dashboard publishes one.

mod settings;
mod snapshot;

pub use settings::{Calendar, MacroIndicators, Thresholds, VixTermStructure};
pub use snapshot::{LiveValues, MarketSnapshot};

pub use chrono::{DateTime, NaiveDate, Utc};
pub use rust_decimal::Decimal;
