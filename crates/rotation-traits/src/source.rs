//! Historical price sources.
//!
//! The pipeline only needs daily closing prices per ticker. A [`PriceSource`]
//! hides where they come from (an HTTP API, a frozen CSV, an in-memory test
//! fixture).

use std::future::Future;

use crate::{Date, PriceSeries, Result};

/// A provider of end-of-day closing prices.
///
/// Implementations should be cheap to share; the loader issues one request
/// per ticker concurrently.
///
/// # Example
///
/// ```no_run
/// use rotation_traits::{Date, PriceSeries, PriceSource, Result};
///
/// struct Flat;
///
/// impl PriceSource for Flat {
///     fn name(&self) -> &str {
///         "flat"
///     }
///
///     async fn fetch_closes(&self, ticker: &str, start: Date, _end: Date) -> Result<PriceSeries> {
///         Ok(PriceSeries::new(ticker, vec![(start, 100.0)]))
///     }
/// }
/// ```
pub trait PriceSource: Send + Sync {
    /// Short name of the provider, used in log output.
    fn name(&self) -> &str;

    /// Fetch daily closes for `ticker` between `start` and `end` inclusive.
    ///
    /// # Errors
    ///
    /// Returns an error on any retrieval fault: network failure, unknown
    /// symbol or malformed response. The loader treats every error as a
    /// per-ticker failure.
    fn fetch_closes(
        &self,
        ticker: &str,
        start: Date,
        end: Date,
    ) -> impl Future<Output = Result<PriceSeries>> + Send;
}
