//! Backtesting engine.
//!
//! Runs one top-N momentum strategy per configured lookback over a monthly
//! price table, plus the buy-and-hold benchmark, and summarizes each.

use rotation_data::monthly_returns;
use rotation_signals::{TopNSelector, TrailingMomentum, WeightTable};
use rotation_traits::{
    BacktestConfig, MonthlyPriceTable, Panel, Result, ReturnSeries, ReturnTable, RotationError,
    Signal,
};
use tracing::info;

use crate::{portfolio::simulate, summary::SummaryRow};

/// Result of one momentum strategy.
#[derive(Debug, Clone)]
pub struct StrategyResult {
    /// Lookback in months
    pub lookback: usize,
    /// Momentum scores per month and ticker (already lagged one month)
    pub scores: Panel,
    /// Portfolio weights formed each month
    pub weights: WeightTable,
    /// Realized monthly portfolio returns over every price month (the first
    /// is always 0), labelled e.g. "Momentum 3M"
    pub returns: ReturnSeries,
}

impl StrategyResult {
    /// Short key used in file names, e.g. "3M".
    pub fn key(&self) -> String {
        format!("{}M", self.lookback)
    }
}

/// Backtesting results.
#[derive(Debug, Clone)]
pub struct BacktestResult {
    /// Month-over-month returns of every ticker
    pub returns: ReturnTable,
    /// One result per lookback, in configured order
    pub strategies: Vec<StrategyResult>,
    /// Buy-and-hold benchmark returns, labelled e.g. "Buy-and-Hold SPY"
    pub benchmark: ReturnSeries,
    /// Summary rows: strategies in configured order, then the benchmark
    pub summary: Vec<SummaryRow>,
}

impl BacktestResult {
    /// Every return series, strategies first and the benchmark last.
    pub fn series(&self) -> impl Iterator<Item = &ReturnSeries> {
        self.strategies
            .iter()
            .map(|strategy| &strategy.returns)
            .chain(std::iter::once(&self.benchmark))
    }
}

/// Backtesting engine.
#[derive(Debug, Default)]
pub struct Backtest {
    /// Configuration
    config: BacktestConfig,
}

impl Backtest {
    /// Create a new backtest with configuration.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use rotation_eval::Backtest;
    /// use rotation_traits::BacktestConfig;
    ///
    /// let backtest = Backtest::new(BacktestConfig::default());
    /// ```
    pub const fn new(config: BacktestConfig) -> Self {
        Self { config }
    }

    /// Configuration in use.
    pub const fn config(&self) -> &BacktestConfig {
        &self.config
    }

    /// Run every configured strategy and the benchmark.
    ///
    /// # Errors
    ///
    /// Returns [`RotationError::BenchmarkUnavailable`] if the benchmark is
    /// not a column of `monthly`.
    pub fn run(&self, monthly: &MonthlyPriceTable) -> Result<BacktestResult> {
        let returns = monthly_returns(monthly);
        let benchmark = self.benchmark(&returns)?;

        let selector = TopNSelector::with_top_n(self.config.top_n);
        let strategies = self
            .config
            .lookbacks
            .iter()
            .map(|&lookback| self.run_strategy(lookback, &selector, monthly, &returns))
            .collect::<Result<Vec<_>>>()?;

        let summary = strategies
            .iter()
            .map(|strategy| &strategy.returns)
            .chain(std::iter::once(&benchmark))
            .map(|series| SummaryRow::compute(series, self.config.risk_free_annual))
            .collect();

        Ok(BacktestResult {
            returns,
            strategies,
            benchmark,
            summary,
        })
    }

    fn run_strategy(
        &self,
        lookback: usize,
        selector: &TopNSelector,
        monthly: &MonthlyPriceTable,
        returns: &ReturnTable,
    ) -> Result<StrategyResult> {
        let signal = TrailingMomentum::with_lookback(lookback);
        let scores = signal.scores(monthly);
        let weights = selector.weights(&scores)?;
        let series = simulate(format!("Momentum {}", signal.label()), &weights, returns)?;

        info!(
            signal = signal.name(),
            lookback = signal.lookback(),
            months = series.len(),
            top_n = selector.top_n(),
            "strategy simulated"
        );

        Ok(StrategyResult {
            lookback,
            scores,
            weights,
            returns: series,
        })
    }

    fn benchmark(&self, returns: &ReturnTable) -> Result<ReturnSeries> {
        let ticker = &self.config.benchmark;
        let values = returns
            .column(ticker)
            .ok_or_else(|| RotationError::BenchmarkUnavailable(ticker.clone()))?;
        ReturnSeries::new(
            format!("Buy-and-Hold {ticker}"),
            returns.dates().to_vec(),
            values,
        )
    }
}
