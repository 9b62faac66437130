//! Portfolio return simulation.

use std::collections::BTreeSet;

use rotation_traits::{Date, Result, ReturnSeries, ReturnTable};
use rotation_signals::WeightTable;

/// Realized monthly returns of a weight schedule.
///
/// The weights are lagged one further month before they are applied, so the
/// return realized in month `m` is earned by the weights formed for month
/// `m - 1`. The resulting series is indexed by every month of either table,
/// so it also covers the first price month, which has no return and earns 0.
///
/// A ticker whose return or lagged weight is missing contributes nothing;
/// its share of the book earns zero for that month. Months with no weight
/// row, no return row or an all-zero weight row return 0.
///
/// # Errors
///
/// Returns an error if the resulting series cannot be constructed.
pub fn simulate(
    label: impl Into<String>,
    weights: &WeightTable,
    returns: &ReturnTable,
) -> Result<ReturnSeries> {
    let lagged = weights.shift(1);
    let columns: Vec<Option<usize>> = returns
        .tickers()
        .iter()
        .map(|ticker| lagged.ticker_index(ticker))
        .collect();

    let dates: Vec<Date> = lagged
        .dates()
        .iter()
        .chain(returns.dates())
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let values = dates
        .iter()
        .map(|&date| match (lagged.row_index(date), returns.row_index(date)) {
            (Some(w), Some(r)) => portfolio_return(lagged.row(w), returns.row(r), &columns),
            _ => 0.0,
        })
        .collect();

    ReturnSeries::new(label, dates, values)
}

/// Weighted sum of one month of returns.
fn portfolio_return(weights: &[f64], returns: &[f64], columns: &[Option<usize>]) -> f64 {
    returns
        .iter()
        .zip(columns)
        .filter_map(|(&ret, col)| {
            let weight = weights[(*col)?];
            (weight.is_finite() && ret.is_finite()).then_some(weight * ret)
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rotation_traits::{Date, Panel, Ticker};

    fn d(month: u32) -> Date {
        Date::from_ymd_opt(2024, month, 28).unwrap()
    }

    fn names() -> Vec<Ticker> {
        vec!["A".to_string(), "B".to_string()]
    }

    #[test]
    fn test_weights_apply_one_month_later() {
        let weights = Panel::new(
            vec![d(1), d(2), d(3)],
            names(),
            vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![0.5, 0.5]],
        )
        .unwrap();
        let returns = Panel::new(
            vec![d(2), d(3)],
            names(),
            vec![vec![0.10, -0.05], vec![0.02, 0.04]],
        )
        .unwrap();

        let series = simulate("test", &weights, &returns).unwrap();
        assert_eq!(series.dates(), &[d(1), d(2), d(3)]);
        // Month 1 has no return; month 2 is earned by month 1's weights,
        // month 3 by month 2's.
        assert_eq!(series.values()[0], 0.0);
        assert_relative_eq!(series.values()[1], 0.10, epsilon = 1e-12);
        assert_relative_eq!(series.values()[2], 0.04, epsilon = 1e-12);
    }

    #[test]
    fn test_missing_return_contributes_zero() {
        let weights = Panel::new(
            vec![d(1), d(2)],
            names(),
            vec![vec![0.5, 0.5], vec![0.5, 0.5]],
        )
        .unwrap();
        let returns = Panel::new(vec![d(2)], names(), vec![vec![0.10, f64::NAN]]).unwrap();

        let series = simulate("test", &weights, &returns).unwrap();
        assert_eq!(series.len(), 2);
        assert_relative_eq!(series.values()[1], 0.05, epsilon = 1e-12);
    }

    #[test]
    fn test_no_weights_earns_zero() {
        let weights = Panel::new(vec![d(1), d(2)], names(), vec![vec![0.0, 0.0]; 2]).unwrap();
        let returns = Panel::new(
            vec![d(2), d(3)],
            names(),
            vec![vec![0.10, 0.20], vec![0.30, 0.40]],
        )
        .unwrap();

        let series = simulate("test", &weights, &returns).unwrap();
        assert_eq!(series.dates(), &[d(1), d(2), d(3)]);
        assert_eq!(series.values(), &[0.0, 0.0, 0.0]);
    }
}
