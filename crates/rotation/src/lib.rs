#![doc(issue_tracker_base_url = "https://github.com/factordynamics/rotation/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # rotation
//!
//! Cross-sectional momentum rotation backtester.
//!
//! rotation is an umbrella crate that re-exports all rotation sub-crates for
//! convenience and adds the end-to-end [`Pipeline`].
//!
//! ## Quick Start
//!
//! ```ignore
//! use rotation::{BacktestConfig, Pipeline, Result};
//! use rotation::stooq::StooqClient;
//!
//! # async fn example() -> Result<()> {
//! let config = BacktestConfig::default();
//! let pipeline = Pipeline::new(StooqClient::new(), config)?;
//!
//! let outcome = pipeline.run().await?;
//! print!("{}", rotation::report::format_table(&outcome.result.summary));
//! outcome.write_reports()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! - [`traits`] - Core types ([`Panel`], [`BacktestConfig`]) and traits ([`PriceSource`], [`Signal`])
//! - [`stooq`] - Stooq daily price client
//! - [`data`] - Price loading, monthly resampling and price CSV files
//! - [`signals`] - Trailing momentum and top-N selection
//! - [`eval`] - Portfolio simulation, metrics and the backtest driver
//! - [`report`] - Console table, CSV exports and charts
//!
//! ## Architecture
//!
//! A run is a single pass through five stages:
//!
//! 1. **Load** daily closes for every ticker, skipping tickers that fail
//! 2. **Resample** to month-end prices and monthly returns
//! 3. **Rank** tickers by lagged trailing momentum and hold the top N
//! 4. **Simulate** the lagged weights against realized returns
//! 5. **Report** metrics, CSVs and equity-curve charts

/// Version information for the rotation crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod pipeline;

pub use pipeline::{Pipeline, RunOutcome};

// ============================================================================
// Core Types
// ============================================================================

/// Core types and trait definitions.
pub mod traits {
    pub use rotation_traits::*;
}

pub use rotation_traits::{
    BacktestConfig, Date, MonthlyPriceTable, Panel, PriceSeries, PriceSource, PriceTable, Result,
    ReturnSeries, ReturnTable, RotationError, Signal, Ticker,
};

// ============================================================================
// Data
// ============================================================================

/// Stooq daily price client.
///
/// ```ignore
/// use rotation::stooq::StooqClient;
///
/// let client = StooqClient::from_env()?;
/// let bars = client.daily_bars("SPY", start, end).await?;
/// ```
pub mod stooq {
    pub use rotation_stooq::*;
}

/// Price loading, resampling and price table files.
pub mod data {
    pub use rotation_data::*;
}

// ============================================================================
// Strategy
// ============================================================================

/// Momentum signals and top-N selection.
pub mod signals {
    pub use rotation_signals::*;
}

/// Portfolio simulation, metrics and the backtest driver.
///
/// Every metric is a [`eval::Metric`]: either a value or an explicit reason
/// it is undefined (empty series, zero volatility, ...).
pub mod eval {
    pub use rotation_eval::*;
}

// ============================================================================
// Reporting
// ============================================================================

/// Summary table, CSV exports and equity-curve charts.
pub mod report {
    pub use rotation_report::*;
}

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```ignore
/// use rotation::prelude::*;
/// ```
pub mod prelude {
    pub use crate::eval::{Backtest, BacktestResult, Metric, SummaryRow};
    pub use crate::{
        BacktestConfig, Date, Panel, Pipeline, PriceSource, Result, ReturnSeries, RotationError,
        RunOutcome, Signal, Ticker,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2, "Version should have at least major.minor");
    }

    #[test]
    fn test_error_types() {
        let _result: Result<()> = Ok(());
        let _error = RotationError::InvalidData("test".to_string());
    }
}
