#![doc(issue_tracker_base_url = "https://github.com/factordynamics/rotation/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types for the rotation momentum backtester.
//!
//! This crate provides the foundational pieces shared by every stage of the
//! pipeline: the date × ticker [`Panel`] used for prices, returns, scores and
//! weights, the [`PriceSource`] abstraction over historical price providers,
//! the immutable [`BacktestConfig`] and the common error type.

/// The version of the rotation-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod config;
pub mod error;
pub mod signal;
pub mod source;
pub mod stats;
pub mod types;

// Re-exports
pub use config::{BacktestConfig, PERIODS_PER_YEAR};
pub use error::{Result, RotationError};
pub use signal::Signal;
pub use source::PriceSource;
pub use types::{
    CE_TO_UNIX_EPOCH_DAYS, Date, MonthlyPriceTable, Panel, PriceSeries, PriceTable, ReturnSeries,
    ReturnTable, Ticker,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert!(VERSION.contains('.'));
    }
}
