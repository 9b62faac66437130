//! CSV exports.

use std::{fs::File, path::Path};

use chrono::Datelike;
use polars::prelude::*;
use rotation_eval::SummaryRow;
use rotation_traits::{CE_TO_UNIX_EPOCH_DAYS, Date, Result, ReturnSeries, RotationError};
use tracing::debug;

/// File name of the summary table.
pub const SUMMARY_FILE: &str = "momentum_summary.csv";

/// File name of a strategy's cumulative return export, e.g. `equity_3M.csv`.
pub fn equity_csv_name(key: &str) -> String {
    format!("equity_{key}.csv")
}

/// Write the summary table with columns `Strategy, CAGR, Vol, Sharpe`.
///
/// Undefined metrics are written as empty cells.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_summary_csv(rows: &[SummaryRow], path: impl AsRef<Path>) -> Result<()> {
    let strategies: Vec<&str> = rows.iter().map(|row| row.strategy.as_str()).collect();
    let cagr: Vec<Option<f64>> = rows.iter().map(|row| row.cagr.value()).collect();
    let vol: Vec<Option<f64>> = rows.iter().map(|row| row.vol.value()).collect();
    let sharpe: Vec<Option<f64>> = rows.iter().map(|row| row.sharpe.value()).collect();

    let mut df = DataFrame::new(vec![
        Column::new("Strategy".into(), strategies),
        Column::new("CAGR".into(), cagr),
        Column::new("Vol".into(), vol),
        Column::new("Sharpe".into(), sharpe),
    ])?;
    write_frame(&mut df, path.as_ref())
}

/// Write a running (non-compounded) sum of a return series with columns
/// `date, cumulative_return`.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_cumulative_sum_csv(series: &ReturnSeries, path: impl AsRef<Path>) -> Result<()> {
    let days: Vec<i32> = series
        .dates()
        .iter()
        .map(|d| d.num_days_from_ce() - CE_TO_UNIX_EPOCH_DAYS)
        .collect();

    let mut df = DataFrame::new(vec![
        Column::new("date".into(), days).cast(&DataType::Date)?,
        Column::new("cumulative_return".into(), series.cumulative_sum()),
    ])?;
    write_frame(&mut df, path.as_ref())
}

/// Read a file written by [`write_cumulative_sum_csv`].
///
/// # Errors
///
/// Returns an error if the file cannot be read, a column is missing, or a
/// date does not parse.
pub fn read_cumulative_sum_csv(path: impl AsRef<Path>) -> Result<Vec<(Date, f64)>> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.as_ref().to_path_buf()))?
        .finish()?;

    let dates = df
        .column("date")
        .map_err(|_| RotationError::MissingColumn("date".to_string()))?
        .cast(&DataType::String)?;
    let values = df
        .column("cumulative_return")
        .map_err(|_| RotationError::MissingColumn("cumulative_return".to_string()))?
        .cast(&DataType::Float64)?;

    dates
        .str()?
        .into_iter()
        .zip(values.f64()?)
        .map(|(date, value)| {
            let raw = date.ok_or_else(|| RotationError::InvalidDate("empty date".to_string()))?;
            let date = Date::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|e| RotationError::InvalidDate(format!("{raw}: {e}")))?;
            Ok((date, value.unwrap_or(f64::NAN)))
        })
        .collect()
}

fn write_frame(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file).include_header(true).finish(df)?;
    debug!(path = %path.display(), rows = df.height(), "wrote csv");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rotation_eval::{Metric, Undefined};

    #[test]
    fn test_equity_csv_name() {
        assert_eq!(equity_csv_name("3M"), "equity_3M.csv");
    }

    #[test]
    fn test_summary_csv_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SUMMARY_FILE);
        let rows = vec![
            SummaryRow {
                strategy: "Momentum 3M".to_string(),
                cagr: Metric::Value(0.5),
                vol: Metric::Value(0.25),
                sharpe: Metric::Value(2.0),
            },
            SummaryRow {
                strategy: "Buy-and-Hold SPY".to_string(),
                cagr: Metric::Value(0.5),
                vol: Metric::Value(0.0),
                sharpe: Metric::Undefined(Undefined::ZeroVolatility),
            },
        ];

        write_summary_csv(&rows, &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "Strategy,CAGR,Vol,Sharpe");
        assert!(lines[1].starts_with("Momentum 3M,"));
        assert!(lines[2].starts_with("Buy-and-Hold SPY,"));
        assert!(lines[2].ends_with(','), "undefined Sharpe is an empty cell");
    }

    #[test]
    fn test_cumulative_sum_csv_matches_running_sum() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(equity_csv_name("3M"));
        let dates = vec![
            Date::from_ymd_opt(2024, 1, 31).unwrap(),
            Date::from_ymd_opt(2024, 2, 29).unwrap(),
            Date::from_ymd_opt(2024, 3, 31).unwrap(),
        ];
        let series = ReturnSeries::new("Momentum 3M", dates.clone(), vec![0.1, -0.05, 0.02]).unwrap();

        write_cumulative_sum_csv(&series, &path).unwrap();
        let header = std::fs::read_to_string(&path).unwrap();
        assert!(header.starts_with("date,cumulative_return"));

        let read = read_cumulative_sum_csv(&path).unwrap();
        assert_eq!(read.len(), 3);
        let expected = series.cumulative_sum();
        for (i, (date, value)) in read.iter().enumerate() {
            assert_eq!(*date, dates[i]);
            assert_relative_eq!(*value, expected[i], epsilon = 1e-12);
        }
        assert_relative_eq!(read[2].1, 0.07, epsilon = 1e-12);
    }
}
