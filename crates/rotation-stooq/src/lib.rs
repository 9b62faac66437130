//! [Stooq](https://stooq.com/) end-of-day price client for rotation.
//!
//! Stooq serves free daily OHLCV history as CSV. This crate downloads it,
//! parses it into [`DailyBar`]s and exposes the closing prices through the
//! [`PriceSource`](rotation_traits::PriceSource) trait.
//!
//! # Usage
//!
//! ```rust,ignore
//! use rotation_stooq::StooqClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = StooqClient::from_env()?;
//!     let start = chrono::NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
//!     let end = chrono::NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
//!
//!     let bars = client.daily_bars("SPY", start, end).await?;
//!     println!("{} bars", bars.len());
//!     Ok(())
//! }
//! ```
//!
//! # Environment Variables
//!
//! `STOOQ_BASE_URL` (optionally from a `.env` file) overrides the download
//! endpoint, e.g. to point at a caching proxy:
//!
//! ```bash
//! STOOQ_BASE_URL=http://localhost:8080/q/d/l/
//! ```

mod client;
mod error;
mod types;

pub use client::StooqClient;
pub use error::StooqError;
pub use types::*;

/// Result type for Stooq operations.
pub type Result<T> = std::result::Result<T, StooqError>;
