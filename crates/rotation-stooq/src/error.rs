//! Error types for the Stooq client.

use thiserror::Error;

/// Errors that can occur when downloading prices from Stooq.
#[derive(Debug, Error)]
pub enum StooqError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// CSV parsing failed.
    #[error("Failed to parse CSV response: {0}")]
    Parse(#[from] polars::error::PolarsError),

    /// Stooq answered with something other than price data.
    #[error("Stooq API error: {0}")]
    Api(String),

    /// Symbol not found.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// No data available.
    #[error("No data available for {0}")]
    NoData(String),

    /// A row carried a date that could not be parsed.
    #[error("Invalid date in response: {0}")]
    InvalidDate(String),

    /// Environment variable error.
    #[error("Environment error: {0}")]
    Env(#[from] dotenvy::Error),
}
