//! End-to-end backtest pipeline.

use std::path::PathBuf;

use rotation_data::{FetchFailure, load_prices, to_monthly};
use rotation_eval::{Backtest, BacktestResult};
use rotation_traits::{
    BacktestConfig, MonthlyPriceTable, PriceSource, PriceTable, Result, RotationError,
};
use tracing::info;

/// Runs load → resample → backtest against a price source.
///
/// The configuration is validated once, when the pipeline is built, and is
/// immutable afterwards.
#[derive(Debug)]
pub struct Pipeline<S> {
    source: S,
    config: BacktestConfig,
}

impl<S: PriceSource> Pipeline<S> {
    /// Create a pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`RotationError::InvalidConfig`] if `config` fails validation;
    /// nothing is fetched in that case.
    pub fn new(source: S, config: BacktestConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { source, config })
    }

    /// Configuration in use.
    pub const fn config(&self) -> &BacktestConfig {
        &self.config
    }

    /// Price source in use.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Execute the backtest.
    ///
    /// Tickers that fail to load are skipped and reported in
    /// [`RunOutcome::failures`].
    ///
    /// # Errors
    ///
    /// - [`RotationError::NoData`] if no ticker loads
    /// - [`RotationError::BenchmarkUnavailable`] if the benchmark fails to load
    pub async fn run(&self) -> Result<RunOutcome> {
        info!(
            source = self.source.name(),
            tickers = self.config.tickers.len(),
            start = %self.config.start,
            end = %self.config.end,
            "starting backtest"
        );

        let loaded = load_prices(&self.source, &self.config).await?;
        if loaded.table.ticker_index(&self.config.benchmark).is_none() {
            return Err(RotationError::BenchmarkUnavailable(
                self.config.benchmark.clone(),
            ));
        }

        let monthly = to_monthly(&loaded.table)?;
        let result = Backtest::new(self.config.clone()).run(&monthly)?;
        info!(
            months = monthly.height(),
            strategies = result.strategies.len(),
            skipped = loaded.failures.len(),
            "backtest complete"
        );

        Ok(RunOutcome {
            config: self.config.clone(),
            prices: loaded.table,
            monthly,
            failures: loaded.failures,
            result,
        })
    }
}

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Configuration the run used
    pub config: BacktestConfig,
    /// Daily closes of the tickers that loaded
    pub prices: PriceTable,
    /// Month-end prices
    pub monthly: MonthlyPriceTable,
    /// Tickers that were skipped
    pub failures: Vec<FetchFailure>,
    /// Strategy and benchmark results
    pub result: BacktestResult,
}

impl RunOutcome {
    /// Write CSVs and charts below the configured output directory.
    ///
    /// # Errors
    ///
    /// Returns an error if any file cannot be written.
    pub fn write_reports(&self) -> Result<Vec<PathBuf>> {
        rotation_report::write_reports(&self.result, &self.config)
    }
}
