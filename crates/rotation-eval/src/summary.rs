//! Per-strategy performance summary.

use rotation_traits::{PERIODS_PER_YEAR, ReturnSeries};
use serde::Serialize;

use crate::metrics::{Metric, annualized_return, annualized_volatility, sharpe_ratio};

/// One row of the performance summary table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    /// Strategy label, e.g. "Momentum 3M"
    pub strategy: String,
    /// Compound annual growth rate
    pub cagr: Metric,
    /// Annualized volatility
    pub vol: Metric,
    /// Annualized Sharpe ratio over the risk-free rate
    pub sharpe: Metric,
}

impl SummaryRow {
    /// Compute the summary metrics of a monthly return series.
    pub fn compute(series: &ReturnSeries, risk_free_annual: f64) -> Self {
        let returns = series.values();
        Self {
            strategy: series.label().to_string(),
            cagr: annualized_return(returns, PERIODS_PER_YEAR),
            vol: annualized_volatility(returns, PERIODS_PER_YEAR),
            sharpe: sharpe_ratio(returns, risk_free_annual, PERIODS_PER_YEAR),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::Undefined;
    use approx::assert_relative_eq;
    use rotation_traits::Date;

    #[test]
    fn test_constant_returns_summary() {
        let dates = (1..=12)
            .map(|m| Date::from_ymd_opt(2023, m, 1).unwrap())
            .collect();
        let series = ReturnSeries::new("Buy-and-Hold SPY", dates, vec![0.01; 12]).unwrap();
        let row = SummaryRow::compute(&series, 0.015);

        assert_eq!(row.strategy, "Buy-and-Hold SPY");
        assert_relative_eq!(row.cagr.value().unwrap(), 0.1268, epsilon = 1e-4);
        assert_eq!(row.vol, Metric::Value(0.0));
        assert_eq!(row.sharpe, Metric::Undefined(Undefined::ZeroVolatility));
    }

    #[test]
    fn test_empty_series_summary() {
        let series = ReturnSeries::new("Momentum 12M", Vec::new(), Vec::new()).unwrap();
        let row = SummaryRow::compute(&series, 0.015);
        assert!(!row.cagr.is_defined());
        assert!(!row.vol.is_defined());
        assert!(!row.sharpe.is_defined());
    }
}
