//! Momentum signals and portfolio selection for rotation.
//!
//! This crate provides the ranking half of the backtest:
//! - Momentum: trailing multi-month total return, lagged one month so a
//!   month's score only uses earlier prices
//! - Selection: equal-weight the top-N scored tickers each month
//!
//! # Example
//!
//! ```ignore
//! use rotation_signals::{TopNSelector, TrailingMomentum};
//! use rotation_traits::Signal;
//!
//! let signal = TrailingMomentum::with_lookback(6);
//! let scores = signal.scores(&monthly_prices);
//! let weights = TopNSelector::with_top_n(3).weights(&scores)?;
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod momentum;
pub mod selection;

// Re-export key types
pub use momentum::{TrailingMomentum, TrailingMomentumConfig};
pub use selection::{TopNConfig, TopNSelector, WeightTable};
