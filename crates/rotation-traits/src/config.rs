//! Backtest configuration.
//!
//! A single immutable [`BacktestConfig`] is built once per run (defaults,
//! then an optional TOML file, then command-line overrides) and passed by
//! reference into every stage.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{Date, Result, RotationError, Ticker};

/// Rebalancing periods per year; the strategy rebalances monthly.
pub const PERIODS_PER_YEAR: usize = 12;

/// Configuration for one backtest run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BacktestConfig {
    /// Universe of tickers, in the order their columns appear
    pub tickers: Vec<Ticker>,
    /// Ticker held by the buy-and-hold benchmark; must be in `tickers`
    pub benchmark: Ticker,
    /// First date of price history to request
    pub start: Date,
    /// Last date of price history to request
    pub end: Date,
    /// Momentum lookback windows in months
    pub lookbacks: Vec<usize>,
    /// Number of top-ranked tickers held each month
    pub top_n: usize,
    /// Annual risk-free rate used for the Sharpe ratio
    pub risk_free_annual: f64,
    /// Directory receiving CSV exports and the `plots/` folder
    pub output_dir: PathBuf,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            tickers: ["SPY", "EFA", "IEF", "BIL", "QQQ", "DIA"]
                .into_iter()
                .map(String::from)
                .collect(),
            benchmark: "SPY".to_string(),
            start: NaiveDate::from_ymd_opt(2010, 1, 1).unwrap(),
            end: Utc::now().date_naive(),
            lookbacks: vec![3, 6, 12],
            top_n: 3,
            risk_free_annual: 0.015,
            output_dir: PathBuf::from("."),
        }
    }
}

impl BacktestConfig {
    /// Load a configuration from a TOML file.
    ///
    /// Keys absent from the file keep their default values.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| RotationError::InvalidConfig(format!("{}: {e}", path.display())))
    }

    /// Parse a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML for this structure.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| RotationError::InvalidConfig(e.to_string()))
    }

    /// Check the configuration for values the pipeline cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`RotationError::InvalidConfig`] describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.tickers.is_empty() {
            return Err(RotationError::InvalidConfig(
                "ticker list is empty".to_string(),
            ));
        }
        if let Some(t) = self.tickers.iter().find(|t| t.trim().is_empty()) {
            return Err(RotationError::InvalidConfig(format!(
                "blank ticker {t:?}"
            )));
        }
        for (i, ticker) in self.tickers.iter().enumerate() {
            if self.tickers[..i].contains(ticker) {
                return Err(RotationError::InvalidConfig(format!(
                    "ticker {ticker} listed twice"
                )));
            }
        }
        if !self.tickers.contains(&self.benchmark) {
            return Err(RotationError::InvalidConfig(format!(
                "benchmark {} is not in the ticker list",
                self.benchmark
            )));
        }
        if self.start >= self.end {
            return Err(RotationError::InvalidConfig(format!(
                "start date {} must be before end date {}",
                self.start, self.end
            )));
        }
        if self.lookbacks.is_empty() {
            return Err(RotationError::InvalidConfig(
                "at least one lookback is required".to_string(),
            ));
        }
        if self.lookbacks.contains(&0) {
            return Err(RotationError::InvalidConfig(
                "lookbacks must be at least one month".to_string(),
            ));
        }
        if self.top_n == 0 {
            return Err(RotationError::InvalidConfig(
                "top_n must be positive".to_string(),
            ));
        }
        if self.top_n > self.tickers.len() {
            return Err(RotationError::InvalidConfig(format!(
                "top_n {} exceeds the {} configured tickers",
                self.top_n,
                self.tickers.len()
            )));
        }
        if !self.risk_free_annual.is_finite() || self.risk_free_annual < 0.0 {
            return Err(RotationError::InvalidConfig(format!(
                "risk-free rate must be finite and non-negative, got {}",
                self.risk_free_annual
            )));
        }
        Ok(())
    }

    /// Monthly risk-free rate, `rf / 12`.
    pub fn risk_free_per_period(&self) -> f64 {
        self.risk_free_annual / PERIODS_PER_YEAR as f64
    }

    /// Directory that receives chart images.
    pub fn plots_dir(&self) -> PathBuf {
        self.output_dir.join("plots")
    }
}
