//! Configuration layering for the CLI.
//!
//! Compiled-in defaults, then an optional TOML file, then command-line flags.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;
use rotation_traits::{BacktestConfig, RotationError};

/// Flags shared by every subcommand that builds a [`BacktestConfig`].
#[derive(Debug, Clone, Default, Args)]
pub(crate) struct ConfigArgs {
    /// TOML configuration file; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Ticker universe (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    tickers: Option<Vec<String>>,

    /// Buy-and-hold benchmark ticker
    #[arg(short, long)]
    benchmark: Option<String>,

    /// Start date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    start: Option<NaiveDate>,

    /// End date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    end: Option<NaiveDate>,

    /// Momentum lookbacks in months (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    lookbacks: Option<Vec<usize>>,

    /// Number of tickers held each month
    #[arg(short = 'n', long)]
    top_n: Option<usize>,

    /// Annual risk-free rate, e.g. 0.015
    #[arg(long)]
    risk_free: Option<f64>,

    /// Directory for CSV exports and charts
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

impl ConfigArgs {
    /// Merge defaults, the optional config file and flags, then validate.
    pub(crate) fn resolve(&self) -> Result<BacktestConfig> {
        let mut config = match &self.config {
            Some(path) => BacktestConfig::from_toml_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => BacktestConfig::default(),
        };

        if let Some(tickers) = &self.tickers {
            config.tickers = tickers.iter().map(|t| t.trim().to_string()).collect();
        }
        if let Some(benchmark) = &self.benchmark {
            config.benchmark = benchmark.trim().to_string();
        }
        if let Some(start) = self.start {
            config.start = start;
        }
        if let Some(end) = self.end {
            config.end = end;
        }
        if let Some(lookbacks) = &self.lookbacks {
            config.lookbacks = lookbacks.clone();
        }
        if let Some(top_n) = self.top_n {
            config.top_n = top_n;
        }
        if let Some(risk_free) = self.risk_free {
            config.risk_free_annual = risk_free;
        }
        if let Some(output_dir) = &self.output_dir {
            config.output_dir = output_dir.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

/// Parse a date string in YYYY-MM-DD format.
pub(crate) fn parse_date(date_str: &str) -> Result<NaiveDate, RotationError> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|e| RotationError::InvalidDate(format!("{date_str}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: ConfigArgs,
    }

    fn resolve(argv: &[&str]) -> Result<BacktestConfig> {
        let cli = TestCli::try_parse_from(std::iter::once("rotation").chain(argv.iter().copied()))?;
        cli.args.resolve()
    }

    #[test]
    fn test_parse_date() {
        let date = parse_date("2024-01-15").unwrap();
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), 1);
        assert_eq!(date.day(), 15);
    }

    #[test]
    fn test_parse_date_invalid() {
        assert!(parse_date("invalid").is_err());
        assert!(parse_date("2024-02-30").is_err());
    }

    #[test]
    fn test_defaults_without_flags() {
        let config = resolve(&[]).unwrap();
        assert_eq!(config.tickers.len(), 6);
        assert_eq!(config.benchmark, "SPY");
        assert_eq!(config.lookbacks, vec![3, 6, 12]);
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = resolve(&[
            "--tickers",
            "SPY,QQQ,IEF",
            "--lookbacks",
            "1,2",
            "--top-n",
            "2",
            "--start",
            "2015-01-01",
            "--end",
            "2020-12-31",
            "--risk-free",
            "0.02",
        ])
        .unwrap();

        assert_eq!(config.tickers, vec!["SPY", "QQQ", "IEF"]);
        assert_eq!(config.lookbacks, vec![1, 2]);
        assert_eq!(config.top_n, 2);
        assert_eq!(config.start, NaiveDate::from_ymd_opt(2015, 1, 1).unwrap());
        assert_eq!(config.risk_free_annual, 0.02);
    }

    #[test]
    fn test_flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rotation.toml");
        std::fs::write(
            &path,
            "tickers = [\"SPY\", \"EFA\", \"BIL\"]\ntop_n = 1\nlookbacks = [12]\n",
        )
        .unwrap();

        let config = resolve(&["--config", path.to_str().unwrap(), "--top-n", "2"]).unwrap();
        assert_eq!(config.tickers, vec!["SPY", "EFA", "BIL"]);
        assert_eq!(config.lookbacks, vec![12]);
        assert_eq!(config.top_n, 2);
    }

    #[test]
    fn test_invalid_combination_rejected() {
        assert!(resolve(&["--benchmark", "VTI"]).is_err());
        assert!(resolve(&["--top-n", "0"]).is_err());
        assert!(resolve(&["--start", "2030-01-01", "--end", "2020-01-01"]).is_err());
    }
}
