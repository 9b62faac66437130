//! Price table CSV import/export.
//!
//! The file layout is a `date` column (`YYYY-MM-DD`) followed by one column
//! of closing prices per ticker; empty cells are missing prices.

use std::{fs::File, path::Path};

use polars::prelude::*;
use rotation_traits::{Date, PriceSeries, PriceSource, PriceTable, Result, RotationError};
use tracing::info;

/// Read a price table written by [`write_price_csv`].
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not have a parsable
/// `date` column.
pub fn read_price_csv(path: impl AsRef<Path>) -> Result<PriceTable> {
    let path = path.as_ref();
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    let table = PriceTable::from_dataframe(&df)?;
    info!(path = %path.display(), rows = table.height(), tickers = table.width(), "read price file");
    Ok(table)
}

/// Write a price table as CSV.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_price_csv(table: &PriceTable, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut df = table.to_dataframe()?;
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)?;
    info!(path = %path.display(), rows = table.height(), "wrote price file");
    Ok(())
}

/// A [`PriceSource`] replaying a previously saved price table.
///
/// Runs against a frozen table are fully reproducible.
#[derive(Debug, Clone)]
pub struct FrozenPrices {
    table: PriceTable,
}

impl FrozenPrices {
    /// Wrap an in-memory price table.
    pub const fn new(table: PriceTable) -> Self {
        Self { table }
    }

    /// Load a price file written by [`write_price_csv`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn from_csv(path: impl AsRef<Path>) -> Result<Self> {
        read_price_csv(path).map(Self::new)
    }

    /// The underlying table.
    pub const fn table(&self) -> &PriceTable {
        &self.table
    }
}

impl PriceSource for FrozenPrices {
    fn name(&self) -> &str {
        "frozen"
    }

    async fn fetch_closes(&self, ticker: &str, start: Date, end: Date) -> Result<PriceSeries> {
        let idx = self
            .table
            .ticker_index(ticker)
            .ok_or_else(|| RotationError::DataFetch(format!("{ticker} is not in the price file")))?;

        let observations: Vec<(Date, f64)> = self
            .table
            .rows()
            .filter(|(date, _)| *date >= start && *date <= end)
            .filter_map(|(date, row)| row[idx].is_finite().then_some((date, row[idx])))
            .collect();

        if observations.is_empty() {
            return Err(RotationError::DataFetch(format!(
                "{ticker} has no prices between {start} and {end}"
            )));
        }

        Ok(PriceSeries::new(ticker, observations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd_opt(y, m, day).unwrap()
    }

    fn table() -> PriceTable {
        PriceTable::new(
            vec![d(2024, 1, 2), d(2024, 1, 3), d(2024, 2, 1)],
            vec!["SPY".to_string(), "EFA".to_string()],
            vec![
                vec![472.65, 70.1],
                vec![468.79, f64::NAN],
                vec![489.2, 71.5],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_price_csv_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prices.csv");
        write_price_csv(&table(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("date,SPY,EFA"));
        assert!(
            text.lines()
                .any(|line| line.starts_with("2024-01-03,") && line.ends_with(','))
        );

        let back = read_price_csv(&path).unwrap();
        assert_eq!(back.dates(), table().dates());
        assert_eq!(back.tickers(), table().tickers());
        assert_eq!(back.value(1, 1), None);
        assert!((back.value(2, 0).unwrap() - 489.2).abs() < 1e-9);
    }

    #[test]
    fn test_read_missing_file() {
        assert!(read_price_csv("/nonexistent/prices.csv").is_err());
    }

    #[tokio::test]
    async fn test_frozen_prices_source() {
        let source = FrozenPrices::new(table());
        let efa = source
            .fetch_closes("EFA", d(2024, 1, 1), d(2024, 12, 31))
            .await
            .unwrap();
        assert_eq!(efa.observations(), &[(d(2024, 1, 2), 70.1), (d(2024, 2, 1), 71.5)]);

        let clipped = source
            .fetch_closes("SPY", d(2024, 1, 3), d(2024, 1, 31))
            .await
            .unwrap();
        assert_eq!(clipped.len(), 1);
    }

    #[tokio::test]
    async fn test_frozen_prices_unknown_ticker() {
        let source = FrozenPrices::new(table());
        let result = source.fetch_closes("QQQ", d(2024, 1, 1), d(2024, 12, 31)).await;
        assert!(matches!(result, Err(RotationError::DataFetch(_))));
    }
}
