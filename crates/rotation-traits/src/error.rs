//! Error types for the rotation backtester.
//!
//! Per-ticker fetch failures and degenerate statistics are absorbed by the
//! pipeline; the variants here are the faults that callers see.

use thiserror::Error;

/// The main error type for rotation operations.
#[derive(Debug, Error)]
pub enum RotationError {
    /// The configuration is unusable; raised before any I/O happens.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Error due to invalid or malformed data.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Error when a required column is missing from the data.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Error reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error when a date is out of range or invalid.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Error fetching data from external sources.
    #[error("Data fetch error: {0}")]
    DataFetch(String),

    /// The benchmark ticker has no price history after loading.
    #[error("Benchmark {0} has no price data")]
    BenchmarkUnavailable(String),

    /// Every configured ticker failed to load.
    #[error("No price data could be loaded for any ticker")]
    NoData,

    /// Error rendering a chart.
    #[error("Chart rendering failed: {0}")]
    Render(String),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

impl From<String> for RotationError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for RotationError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

/// A specialized Result type for rotation operations.
pub type Result<T> = std::result::Result<T, RotationError>;
