//! Top-N equal-weight portfolio selection.
//!
//! Each month the tickers with a defined score are ranked from highest to
//! lowest; the first `k = min(top_n, defined)` are held with weight `1/k`.
//! Equal scores are ordered by ticker name so the selection is deterministic.

use std::cmp::Ordering;

use rotation_traits::{Panel, Result, Ticker};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Portfolio weights per month and ticker.
///
/// Each row sums to 1.0, or to 0.0 when no ticker could be ranked.
pub type WeightTable = Panel;

/// Configuration for top-N selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopNConfig {
    /// Maximum number of tickers held each month
    pub top_n: usize,
}

impl Default for TopNConfig {
    fn default() -> Self {
        Self { top_n: 3 }
    }
}

/// Builds equal-weight long-only portfolios from score tables.
#[derive(Debug, Clone, Default)]
pub struct TopNSelector {
    config: TopNConfig,
}

impl TopNSelector {
    /// Create a selector with the given configuration.
    pub const fn new(config: TopNConfig) -> Self {
        Self { config }
    }

    /// Shorthand for a selector holding `top_n` tickers.
    pub const fn with_top_n(top_n: usize) -> Self {
        Self::new(TopNConfig { top_n })
    }

    /// Maximum number of holdings.
    pub const fn top_n(&self) -> usize {
        self.config.top_n
    }

    /// Column indices of the selected tickers, best first.
    ///
    /// Non-finite scores are never selected. Ties on score are broken by
    /// ticker name ascending.
    pub fn select(&self, scores: &[f64], tickers: &[Ticker]) -> Vec<usize> {
        let mut ranked: Vec<usize> = (0..scores.len().min(tickers.len()))
            .filter(|&i| scores[i].is_finite())
            .collect();

        ranked.sort_by(|&a, &b| match scores[b].total_cmp(&scores[a]) {
            Ordering::Equal => tickers[a].cmp(&tickers[b]),
            other => other,
        });
        ranked.truncate(self.config.top_n);
        ranked
    }

    /// Weights for one month of scores.
    ///
    /// Selected tickers share the book equally; when fewer than `top_n`
    /// tickers are ranked, the available ones split it without leaving cash.
    pub fn row_weights(&self, scores: &[f64], tickers: &[Ticker]) -> Vec<f64> {
        let mut weights = vec![0.0; tickers.len()];
        let selected = self.select(scores, tickers);
        if selected.is_empty() {
            return weights;
        }

        let weight = 1.0 / selected.len() as f64;
        for idx in selected {
            weights[idx] = weight;
        }
        weights
    }

    /// Weights for every month of a score table.
    ///
    /// # Errors
    ///
    /// Returns an error only if the score table is malformed.
    pub fn weights(&self, scores: &Panel) -> Result<WeightTable> {
        let tickers = scores.tickers();
        let values: Vec<Vec<f64>> = scores
            .rows()
            .map(|(_, row)| self.row_weights(row, tickers))
            .collect();

        let invested = values
            .iter()
            .filter(|row| row.iter().any(|&w| w > 0.0))
            .count();
        debug!(
            months = values.len(),
            invested,
            top_n = self.config.top_n,
            "built weight table"
        );

        WeightTable::new(scores.dates().to_vec(), tickers.to_vec(), values)
    }
}
