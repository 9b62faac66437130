//! Momentum signals based on historical price returns.
//!
//! Momentum is the trailing total return over a lookback of whole months,
//! computed from month-end prices and shifted forward one month.

mod trailing;

pub use trailing::{TrailingMomentum, TrailingMomentumConfig};
