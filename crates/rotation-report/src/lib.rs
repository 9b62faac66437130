//! Reporting for rotation backtests.
//!
//! Everything the backtest hands to the outside world lives here:
//! - Console summary: aligned text table or JSON
//! - CSV exports: `momentum_summary.csv` and one cumulative-return file per
//!   strategy
//! - Charts: compounded equity curves rendered to PNG under `plots/`
//!
//! [`write_reports`] produces every file for a finished backtest.

pub mod chart;
pub mod export;
pub mod table;

use std::path::PathBuf;

use rotation_eval::BacktestResult;
use rotation_traits::{BacktestConfig, Result};
use tracing::info;

pub use chart::{ChartStyle, Curve, EquityChart};
pub use export::{
    SUMMARY_FILE, equity_csv_name, read_cumulative_sum_csv, write_cumulative_sum_csv,
    write_summary_csv,
};
pub use table::{format_table, to_json};

/// Write every report file of `result` below the configured output directory.
///
/// CSVs go to `config.output_dir`, charts to its `plots/` subdirectory; both
/// are created when missing. Returns the paths written, CSVs first.
///
/// # Errors
///
/// Returns an error if a directory cannot be created, or a CSV or chart
/// cannot be written.
pub fn write_reports(result: &BacktestResult, config: &BacktestConfig) -> Result<Vec<PathBuf>> {
    let output_dir = config.output_dir.as_path();
    let plots_dir = config.plots_dir();
    std::fs::create_dir_all(&plots_dir)?;

    let mut written = Vec::new();

    let summary_path = output_dir.join(SUMMARY_FILE);
    write_summary_csv(&result.summary, &summary_path)?;
    written.push(summary_path);

    for strategy in &result.strategies {
        let path = output_dir.join(equity_csv_name(&strategy.key()));
        write_cumulative_sum_csv(&strategy.returns, &path)?;
        written.push(path);
    }

    let chart = EquityChart::default();
    written.extend(chart.render_all(result, &plots_dir)?);

    info!(dir = %output_dir.display(), files = written.len(), "reports written");
    Ok(written)
}
