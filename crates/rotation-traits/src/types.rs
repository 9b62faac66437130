//! Common types used throughout the rotation pipeline.
//!
//! Every tabular stage of the backtest (daily prices, monthly prices, monthly
//! returns, momentum scores, portfolio weights) is a [`Panel`]: a dense
//! date × ticker matrix where a missing observation is stored as `NaN`.

use chrono::Datelike;
use polars::prelude::*;

use crate::{Result, RotationError};

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// A ticker symbol identifying a tradable instrument, e.g. "SPY".
pub type Ticker = String;

/// Days between 0001-01-01 (chrono's CE day 1) and the Unix epoch.
///
/// Polars stores `Date` values as days since the Unix epoch.
pub const CE_TO_UNIX_EPOCH_DAYS: i32 = 719_163;

/// Daily closing prices, outer-joined across tickers.
pub type PriceTable = Panel;

/// One row per calendar month holding the last price seen in that month.
pub type MonthlyPriceTable = Panel;

/// Month-over-month simple returns per ticker.
pub type ReturnTable = Panel;

/// Closing prices for a single ticker.
///
/// Observations are kept in ascending date order with at most one price per
/// date. Non-finite prices are discarded on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    ticker: Ticker,
    observations: Vec<(Date, f64)>,
}

impl PriceSeries {
    /// Build a series from raw observations.
    ///
    /// Observations are sorted by date. When a date appears more than once
    /// the last observation for it wins.
    pub fn new(ticker: impl Into<Ticker>, mut observations: Vec<(Date, f64)>) -> Self {
        observations.retain(|(_, price)| price.is_finite());
        // Stable sort keeps input order within a date, so the last duplicate wins below.
        observations.sort_by_key(|(date, _)| *date);

        let mut deduped: Vec<(Date, f64)> = Vec::with_capacity(observations.len());
        for (date, price) in observations {
            match deduped.last_mut() {
                Some(last) if last.0 == date => last.1 = price,
                _ => deduped.push((date, price)),
            }
        }

        Self {
            ticker: ticker.into(),
            observations: deduped,
        }
    }

    /// The ticker these prices belong to.
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// Date-ascending (date, close) pairs.
    pub fn observations(&self) -> &[(Date, f64)] {
        &self.observations
    }

    /// Number of observations.
    pub const fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the series has no observations.
    pub const fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

/// A dense date × ticker matrix.
///
/// Rows are strictly ascending by date and every row has one value per
/// ticker. `NaN` marks a missing observation.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    dates: Vec<Date>,
    tickers: Vec<Ticker>,
    values: Vec<Vec<f64>>,
}

impl Panel {
    /// Create a panel, validating its shape.
    ///
    /// # Errors
    ///
    /// Returns [`RotationError::InvalidData`] if the row count does not match
    /// the date count, a row has the wrong width, dates are not strictly
    /// ascending, or a ticker appears twice.
    pub fn new(dates: Vec<Date>, tickers: Vec<Ticker>, values: Vec<Vec<f64>>) -> Result<Self> {
        if dates.len() != values.len() {
            return Err(RotationError::InvalidData(format!(
                "{} dates but {} rows",
                dates.len(),
                values.len()
            )));
        }

        if let Some((i, row)) = values
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != tickers.len())
        {
            return Err(RotationError::InvalidData(format!(
                "row {i} has {} values, expected {}",
                row.len(),
                tickers.len()
            )));
        }

        if let Some(pair) = dates.windows(2).find(|w| w[0] >= w[1]) {
            return Err(RotationError::InvalidData(format!(
                "dates must be strictly ascending ({} followed by {})",
                pair[0], pair[1]
            )));
        }

        for (i, ticker) in tickers.iter().enumerate() {
            if tickers[..i].contains(ticker) {
                return Err(RotationError::InvalidData(format!(
                    "duplicate ticker column {ticker}"
                )));
            }
        }

        Ok(Self {
            dates,
            tickers,
            values,
        })
    }

    /// A panel with the given columns and no rows.
    pub const fn empty(tickers: Vec<Ticker>) -> Self {
        Self {
            dates: Vec::new(),
            tickers,
            values: Vec::new(),
        }
    }

    /// Row labels.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Column labels.
    pub fn tickers(&self) -> &[Ticker] {
        &self.tickers
    }

    /// Number of rows.
    pub const fn height(&self) -> usize {
        self.dates.len()
    }

    /// Number of ticker columns.
    pub const fn width(&self) -> usize {
        self.tickers.len()
    }

    /// Whether the panel has no rows.
    pub const fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Raw values of row `i`, `NaN` where missing.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i]
    }

    /// Iterate over `(date, row)` pairs in date order.
    pub fn rows(&self) -> impl Iterator<Item = (Date, &[f64])> + '_ {
        self.dates
            .iter()
            .copied()
            .zip(self.values.iter().map(Vec::as_slice))
    }

    /// The value at `(row, col)`, or `None` if missing or out of bounds.
    pub fn value(&self, row: usize, col: usize) -> Option<f64> {
        self.values
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .filter(|v| !v.is_nan())
    }

    /// Column position of `ticker`.
    pub fn ticker_index(&self, ticker: &str) -> Option<usize> {
        self.tickers.iter().position(|t| t == ticker)
    }

    /// Row position of `date`.
    pub fn row_index(&self, date: Date) -> Option<usize> {
        self.dates.binary_search(&date).ok()
    }

    /// All values of one ticker, `NaN` where missing.
    pub fn column(&self, ticker: &str) -> Option<Vec<f64>> {
        let idx = self.ticker_index(ticker)?;
        Some(self.values.iter().map(|row| row[idx]).collect())
    }

    /// Shift every column forward by `periods` rows.
    ///
    /// Row `i` of the result holds row `i - periods` of `self`; the first
    /// `periods` rows become missing. Dates are unchanged.
    pub fn shift(&self, periods: usize) -> Self {
        let width = self.width();
        let values = (0..self.height())
            .map(|i| {
                if i < periods {
                    vec![f64::NAN; width]
                } else {
                    self.values[i - periods].clone()
                }
            })
            .collect();

        Self {
            dates: self.dates.clone(),
            tickers: self.tickers.clone(),
            values,
        }
    }

    /// Simple return over `periods` rows: `x[i] / x[i - periods] - 1`.
    ///
    /// The result has the same shape as `self`. A value is missing when
    /// `i < periods`, either endpoint is missing, or the base is zero. Missing
    /// prices are never filled from earlier rows.
    pub fn pct_change(&self, periods: usize) -> Self {
        let width = self.width();
        let values = (0..self.height())
            .map(|i| {
                if periods == 0 || i < periods {
                    return vec![f64::NAN; width];
                }
                let base = &self.values[i - periods];
                self.values[i]
                    .iter()
                    .zip(base)
                    .map(|(&now, &then)| {
                        if now.is_finite() && then.is_finite() && then != 0.0 {
                            now / then - 1.0
                        } else {
                            f64::NAN
                        }
                    })
                    .collect()
            })
            .collect();

        Self {
            dates: self.dates.clone(),
            tickers: self.tickers.clone(),
            values,
        }
    }

    /// Drop the first `n` rows.
    pub fn skip_rows(&self, n: usize) -> Self {
        let n = n.min(self.height());
        Self {
            dates: self.dates[n..].to_vec(),
            tickers: self.tickers.clone(),
            values: self.values[n..].to_vec(),
        }
    }

    /// Convert to a DataFrame with a `date` column followed by one nullable
    /// `f64` column per ticker.
    ///
    /// # Errors
    ///
    /// Returns an error if Polars fails to build the frame.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let days: Vec<i32> = self
            .dates
            .iter()
            .map(|d| d.num_days_from_ce() - CE_TO_UNIX_EPOCH_DAYS)
            .collect();

        let mut columns = Vec::with_capacity(self.width() + 1);
        columns.push(Column::new("date".into(), days).cast(&DataType::Date)?);

        for (j, ticker) in self.tickers.iter().enumerate() {
            let values: Vec<Option<f64>> = self
                .values
                .iter()
                .map(|row| Some(row[j]).filter(|v| !v.is_nan()))
                .collect();
            columns.push(Column::new(ticker.as_str().into(), values));
        }

        Ok(DataFrame::new(columns)?)
    }

    /// Build a panel from a DataFrame with a `date` column; every other
    /// column is read as a ticker of prices.
    ///
    /// The `date` column may hold `Date` values or `YYYY-MM-DD` strings.
    /// Rows are sorted by date.
    ///
    /// # Errors
    ///
    /// Returns an error if the `date` column is missing, a date cannot be
    /// parsed, a price column cannot be cast to `f64`, or a date repeats.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        let date_col = df
            .column("date")
            .map_err(|_| RotationError::MissingColumn("date".to_string()))?
            .cast(&DataType::String)?;

        let dates = date_col
            .as_materialized_series()
            .str()?
            .into_iter()
            .map(|d: Option<&str>| {
                let raw = d.ok_or_else(|| RotationError::InvalidDate("null date".to_string()))?;
                Date::parse_from_str(raw.trim(), "%Y-%m-%d")
                    .map_err(|e| RotationError::InvalidDate(format!("{raw}: {e}")))
            })
            .collect::<Result<Vec<Date>>>()?;

        let mut tickers = Vec::new();
        let mut columns: Vec<Vec<f64>> = Vec::new();
        for column in df.get_columns() {
            if column.name().as_str() == "date" {
                continue;
            }
            let cast = column.cast(&DataType::Float64)?;
            let values = cast
                .as_materialized_series()
                .f64()?
                .into_iter()
                .map(|v: Option<f64>| v.unwrap_or(f64::NAN))
                .collect();
            tickers.push(column.name().to_string());
            columns.push(values);
        }

        let mut order: Vec<usize> = (0..dates.len()).collect();
        order.sort_by_key(|&i| dates[i]);

        let sorted_dates: Vec<Date> = order.iter().map(|&i| dates[i]).collect();
        let values = order
            .iter()
            .map(|&i| columns.iter().map(|col| col[i]).collect())
            .collect();

        Self::new(sorted_dates, tickers, values)
    }
}

/// A labelled series of periodic (monthly) returns.
///
/// Used for both strategy portfolios and the benchmark.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnSeries {
    label: String,
    dates: Vec<Date>,
    values: Vec<f64>,
}

impl ReturnSeries {
    /// Create a series.
    ///
    /// # Errors
    ///
    /// Returns [`RotationError::InvalidData`] if `dates` and `values` differ in length.
    pub fn new(label: impl Into<String>, dates: Vec<Date>, values: Vec<f64>) -> Result<Self> {
        let label = label.into();
        if dates.len() != values.len() {
            return Err(RotationError::InvalidData(format!(
                "series {label}: {} dates but {} values",
                dates.len(),
                values.len()
            )));
        }
        Ok(Self {
            label,
            dates,
            values,
        })
    }

    /// Human-readable label, e.g. "Momentum 3M".
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Period end dates.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Periodic returns; `NaN` marks a missing period.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of periods.
    pub const fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the series has no periods.
    pub const fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Growth of one unit of capital: `Π(1 + r)` up to each period.
    ///
    /// Missing periods leave the level unchanged.
    pub fn cumulative_growth(&self) -> Vec<f64> {
        self.values
            .iter()
            .scan(1.0, |level, &r| {
                if r.is_finite() {
                    *level *= 1.0 + r;
                }
                Some(*level)
            })
            .collect()
    }

    /// Running arithmetic sum of returns (not compounded).
    ///
    /// Missing periods add nothing.
    pub fn cumulative_sum(&self) -> Vec<f64> {
        self.values
            .iter()
            .scan(0.0, |total, &r| {
                if r.is_finite() {
                    *total += r;
                }
                Some(*total)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd_opt(y, m, day).unwrap()
    }

    fn sample_panel() -> Panel {
        Panel::new(
            vec![d(2024, 1, 31), d(2024, 2, 29), d(2024, 3, 31)],
            vec!["SPY".to_string(), "EFA".to_string()],
            vec![vec![100.0, 50.0], vec![110.0, f64::NAN], vec![121.0, 55.0]],
        )
        .unwrap()
    }

    #[test]
    fn test_price_series_sorts_and_dedups() {
        let series = PriceSeries::new(
            "SPY",
            vec![
                (d(2024, 1, 3), 101.0),
                (d(2024, 1, 2), 100.0),
                (d(2024, 1, 3), 102.0),
                (d(2024, 1, 4), f64::NAN),
            ],
        );
        assert_eq!(series.ticker(), "SPY");
        assert_eq!(
            series.observations(),
            &[(d(2024, 1, 2), 100.0), (d(2024, 1, 3), 102.0)]
        );
    }

    #[test]
    fn test_panel_rejects_bad_shape() {
        let result = Panel::new(
            vec![d(2024, 1, 31)],
            vec!["SPY".to_string()],
            vec![vec![1.0, 2.0]],
        );
        assert!(matches!(result, Err(RotationError::InvalidData(_))));
    }

    #[test]
    fn test_panel_rejects_unsorted_dates() {
        let result = Panel::new(
            vec![d(2024, 2, 29), d(2024, 1, 31)],
            vec!["SPY".to_string()],
            vec![vec![1.0], vec![2.0]],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_panel_value_and_column() {
        let panel = sample_panel();
        assert_eq!(panel.value(0, 0), Some(100.0));
        assert_eq!(panel.value(1, 1), None);
        assert_eq!(panel.value(9, 0), None);
        let spy = panel.column("SPY").unwrap();
        assert_eq!(spy, vec![100.0, 110.0, 121.0]);
        assert!(panel.column("QQQ").is_none());
        assert_eq!(panel.row_index(d(2024, 2, 29)), Some(1));
    }

    #[test]
    fn test_panel_shift() {
        let shifted = sample_panel().shift(1);
        assert_eq!(shifted.height(), 3);
        assert!(shifted.row(0).iter().all(|v| v.is_nan()));
        assert_eq!(shifted.row(1), &[100.0, 50.0]);
        assert_eq!(shifted.value(2, 0), Some(110.0));
        assert_eq!(shifted.dates(), sample_panel().dates());
    }

    #[test]
    fn test_panel_pct_change() {
        let changes = sample_panel().pct_change(1);
        assert_eq!(changes.height(), 3);
        assert!(changes.row(0).iter().all(|v| v.is_nan()));
        assert_relative_eq!(changes.value(1, 0).unwrap(), 0.1, epsilon = 1e-12);
        // Missing February EFA price leaves both February and March undefined.
        assert_eq!(changes.value(1, 1), None);
        assert_eq!(changes.value(2, 1), None);

        let two = sample_panel().pct_change(2);
        assert_relative_eq!(two.value(2, 0).unwrap(), 0.21, epsilon = 1e-12);
        assert_relative_eq!(two.value(2, 1).unwrap(), 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_panel_skip_rows() {
        let panel = sample_panel().skip_rows(1);
        assert_eq!(panel.height(), 2);
        assert_eq!(panel.dates()[0], d(2024, 2, 29));
        assert!(sample_panel().skip_rows(10).is_empty());
    }

    #[test]
    fn test_panel_dataframe_conversion() {
        let panel = sample_panel();
        let df = panel.to_dataframe().unwrap();
        assert_eq!(df.height(), 3);
        assert_eq!(df.width(), 3);
        assert_eq!(df.column("EFA").unwrap().null_count(), 1);

        let back = Panel::from_dataframe(&df).unwrap();
        assert_eq!(back.dates(), panel.dates());
        assert_eq!(back.tickers(), panel.tickers());
        assert_eq!(back.value(2, 1), Some(55.0));
        assert_eq!(back.value(1, 1), None);
    }

    #[test]
    fn test_panel_from_dataframe_string_dates() {
        let df = df! {
            "date" => &["2024-01-03", "2024-01-02"],
            "SPY" => &[2.0, 1.0],
        }
        .unwrap();
        let panel = Panel::from_dataframe(&df).unwrap();
        assert_eq!(panel.dates(), &[d(2024, 1, 2), d(2024, 1, 3)]);
        assert_eq!(panel.column("SPY").unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_panel_from_dataframe_missing_date() {
        let df = df! { "SPY" => &[1.0] }.unwrap();
        assert!(matches!(
            Panel::from_dataframe(&df),
            Err(RotationError::MissingColumn(_))
        ));
    }

    #[test]
    fn test_return_series_cumulative() {
        let series = ReturnSeries::new(
            "Momentum 3M",
            vec![d(2024, 1, 31), d(2024, 2, 29), d(2024, 3, 31)],
            vec![0.1, f64::NAN, -0.05],
        )
        .unwrap();

        let growth = series.cumulative_growth();
        assert_relative_eq!(growth[0], 1.1);
        assert_relative_eq!(growth[1], 1.1);
        assert_relative_eq!(growth[2], 1.1 * 0.95);

        let sum = series.cumulative_sum();
        assert_relative_eq!(sum[2], 0.05, epsilon = 1e-12);
    }

    #[test]
    fn test_return_series_length_mismatch() {
        let result = ReturnSeries::new("x", vec![d(2024, 1, 31)], vec![]);
        assert!(result.is_err());
    }
}
