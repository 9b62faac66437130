//! Console rendering of the performance summary.

use std::fmt::Write as _;

use rotation_eval::SummaryRow;
use rotation_traits::{Result, RotationError};

const METRIC_WIDTH: usize = 10;

/// Render summary rows as an aligned text table.
///
/// Metrics are shown with four decimals; undefined metrics print as `NaN`.
pub fn format_table(rows: &[SummaryRow]) -> String {
    let label_width = rows
        .iter()
        .map(|row| row.strategy.len())
        .chain(std::iter::once("Strategy".len()))
        .max()
        .unwrap_or_default();

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<label_width$}  {:>METRIC_WIDTH$}  {:>METRIC_WIDTH$}  {:>METRIC_WIDTH$}",
        "Strategy", "CAGR", "Vol", "Sharpe"
    );
    let _ = writeln!(out, "{}", "-".repeat(label_width + 3 * (METRIC_WIDTH + 2)));
    for row in rows {
        let _ = writeln!(
            out,
            "{:<label_width$}  {:>METRIC_WIDTH$.4}  {:>METRIC_WIDTH$.4}  {:>METRIC_WIDTH$.4}",
            row.strategy, row.cagr, row.vol, row.sharpe
        );
    }
    out
}

/// Render summary rows as a pretty-printed JSON array.
///
/// Undefined metrics serialize as `null`.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json(rows: &[SummaryRow]) -> Result<String> {
    serde_json::to_string_pretty(rows).map_err(|e| RotationError::Other(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rotation_eval::{Metric, Undefined};

    fn rows() -> Vec<SummaryRow> {
        vec![
            SummaryRow {
                strategy: "Momentum 3M".to_string(),
                cagr: Metric::Value(0.123_456),
                vol: Metric::Value(0.15),
                sharpe: Metric::Value(0.7),
            },
            SummaryRow {
                strategy: "Buy-and-Hold SPY".to_string(),
                cagr: Metric::Value(0.1268),
                vol: Metric::Value(0.0),
                sharpe: Metric::Undefined(Undefined::ZeroVolatility),
            },
        ]
    }

    #[test]
    fn test_format_table() {
        let table = format_table(&rows());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Strategy"));
        assert!(lines[2].starts_with("Momentum 3M"));
        assert!(lines[2].contains("0.1235"));
        assert!(lines[3].starts_with("Buy-and-Hold SPY"));
        assert!(lines[3].trim_end().ends_with("NaN"));
        // Columns line up.
        assert_eq!(lines[2].len(), lines[3].len());
    }

    #[test]
    fn test_to_json_undefined_is_null() {
        let json = to_json(&rows()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["strategy"], "Momentum 3M");
        assert_eq!(value[1]["vol"], 0.0);
        assert!(value[1]["sharpe"].is_null());
    }
}
