//! Backtesting and performance evaluation for rotation.
//!
//! This crate turns monthly prices into strategy results:
//! - Portfolio simulation: apply lagged weights to realized monthly returns
//! - Metrics: annualized return (CAGR), annualized volatility, Sharpe ratio,
//!   each reported as a [`Metric`] that is either a value or explicitly undefined
//! - Backtest driver: one momentum strategy per lookback plus the buy-and-hold
//!   benchmark, summarized as [`SummaryRow`]s
//!
//! # Example
//!
//! ```rust,ignore
//! use rotation_eval::Backtest;
//!
//! let result = Backtest::new(config).run(&monthly_prices)?;
//! for row in &result.summary {
//!     println!("{}: CAGR {:.4}", row.strategy, row.cagr);
//! }
//! ```

pub mod backtest;
pub mod metrics;
pub mod portfolio;
pub mod summary;

// Re-export main types
pub use backtest::{Backtest, BacktestResult, StrategyResult};
pub use metrics::{Metric, Undefined, annualized_return, annualized_volatility, sharpe_ratio};
pub use portfolio::simulate;
pub use summary::SummaryRow;
