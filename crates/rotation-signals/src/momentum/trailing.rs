//! Trailing multi-month momentum.

use rotation_traits::{MonthlyPriceTable, Panel, Signal};
use serde::{Deserialize, Serialize};

/// Configuration for trailing momentum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrailingMomentumConfig {
    /// Number of months to look back (default: 12)
    pub lookback_months: usize,
}

impl Default for TrailingMomentumConfig {
    fn default() -> Self {
        Self {
            lookback_months: 12,
        }
    }
}

/// Trailing total-return momentum.
///
/// The raw score of a ticker at month `m` is `P[m] / P[m - L] - 1` using
/// month-end prices. The whole table is then shifted forward by one month,
/// so the score stored at `m` is the return over months `m-1-L ..= m-1` and
/// never touches the price of month `m` itself.
///
/// # Example
///
/// ```ignore
/// use rotation_signals::momentum::TrailingMomentum;
///
/// let signal = TrailingMomentum::with_lookback(3);
/// let scores = signal.scores(&monthly_prices);
/// ```
#[derive(Debug, Clone)]
pub struct TrailingMomentum {
    config: TrailingMomentumConfig,
    name: String,
}

impl TrailingMomentum {
    /// Create a new trailing momentum signal with the given configuration.
    #[must_use]
    pub fn new(config: TrailingMomentumConfig) -> Self {
        Self {
            config,
            name: format!("momentum_{}m", config.lookback_months),
        }
    }

    /// Shorthand for a signal with the given lookback in months.
    #[must_use]
    pub fn with_lookback(lookback_months: usize) -> Self {
        Self::new(TrailingMomentumConfig { lookback_months })
    }

    /// Get the lookback period in months.
    #[must_use]
    pub const fn lookback_months(&self) -> usize {
        self.config.lookback_months
    }

    /// Short strategy label, e.g. "3M".
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}M", self.config.lookback_months)
    }
}

impl Default for TrailingMomentum {
    fn default() -> Self {
        Self::new(TrailingMomentumConfig::default())
    }
}

impl Signal for TrailingMomentum {
    fn name(&self) -> &str {
        &self.name
    }

    fn scores(&self, monthly: &MonthlyPriceTable) -> Panel {
        monthly.pct_change(self.config.lookback_months).shift(1)
    }

    fn lookback(&self) -> usize {
        self.config.lookback_months
    }
}
