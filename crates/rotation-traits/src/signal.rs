//! Signal trait for ranking tickers.
//!
//! A signal turns the monthly price table into a score table of the same
//! shape. Higher scores rank first when portfolios are formed.

use crate::{MonthlyPriceTable, Panel};

/// A cross-sectional signal that scores tickers month by month.
///
/// Implementations must not look ahead: the score stored at month `m` may
/// only depend on prices from months strictly before `m`.
///
/// # Example
///
/// ```no_run
/// use rotation_traits::{MonthlyPriceTable, Panel, Signal};
///
/// struct LastMonth;
///
/// impl Signal for LastMonth {
///     fn name(&self) -> &str {
///         "last_month"
///     }
///
///     fn scores(&self, monthly: &MonthlyPriceTable) -> Panel {
///         monthly.pct_change(1).shift(1)
///     }
///
///     fn lookback(&self) -> usize {
///         1
///     }
/// }
/// ```
pub trait Signal: Send + Sync {
    /// Returns the name of this signal, used in labels and log output.
    fn name(&self) -> &str;

    /// Scores for every month and ticker of `monthly`.
    ///
    /// The result has the same dates and tickers as the input; `NaN` marks
    /// a ticker without a defined score in that month.
    fn scores(&self, monthly: &MonthlyPriceTable) -> Panel;

    /// Number of months of history the signal needs before its first score.
    fn lookback(&self) -> usize;
}
