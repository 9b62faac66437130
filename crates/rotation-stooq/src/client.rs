//! Stooq client implementation.

use crate::{
    Result,
    error::StooqError,
    types::{DailyBar, stooq_symbol},
};
use chrono::NaiveDate;
use reqwest::Client;
use rotation_traits::{PriceSeries, PriceSource, RotationError};
use tracing::debug;

/// Base URL for Stooq's CSV download endpoint.
const STOOQ_BASE_URL: &str = "https://stooq.com/q/d/l/";

/// Stooq end-of-day price client.
#[derive(Debug, Clone)]
pub struct StooqClient {
    client: Client,
    base_url: String,
}

impl Default for StooqClient {
    fn default() -> Self {
        Self::new()
    }
}

impl StooqClient {
    /// Create a client for the public Stooq endpoint.
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(STOOQ_BASE_URL)
    }

    /// Create a client for a custom endpoint.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Create a client honouring the `STOOQ_BASE_URL` environment variable.
    ///
    /// This will also load from a `.env` file if present. Without the
    /// variable the public endpoint is used.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is set but not valid unicode.
    pub fn from_env() -> Result<Self> {
        // Try to load .env file (ignore errors if not found)
        let _ = dotenvy::dotenv();

        match dotenvy::var("STOOQ_BASE_URL") {
            Ok(url) => Ok(Self::with_base_url(url)),
            Err(dotenvy::Error::EnvVar(std::env::VarError::NotPresent)) => Ok(Self::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// The endpoint this client downloads from.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the daily-history download URL for a symbol.
    fn url(&self, symbol: &str, from: NaiveDate, to: NaiveDate) -> String {
        format!(
            "{}?s={symbol}&d1={}&d2={}&i=d",
            self.base_url,
            from.format("%Y%m%d"),
            to.format("%Y%m%d")
        )
    }

    /// Make a GET request and return the raw body.
    async fn get(&self, url: &str, symbol: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(StooqError::SymbolNotFound(symbol.to_string()));
        }

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(StooqError::Api(format!("HTTP {status}: {text}")));
        }

        Ok(response.bytes().await?.to_vec())
    }

    /// Get daily OHLCV bars for a ticker.
    ///
    /// # Arguments
    ///
    /// * `ticker` - Ticker symbol (e.g., "SPY"); bare tickers are treated as US listings
    /// * `from` - First date (inclusive)
    /// * `to` - Last date (inclusive)
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response holds no prices.
    pub async fn daily_bars(
        &self,
        ticker: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DailyBar>> {
        let symbol = stooq_symbol(ticker);
        let url = self.url(&symbol, from, to);
        debug!(%symbol, %url, "requesting daily history");

        let body = self.get(&url, &symbol).await?;
        DailyBar::parse_csv(&body, &symbol)
    }

    /// Get daily closing prices for a ticker.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response holds no prices.
    pub async fn closes(&self, ticker: &str, from: NaiveDate, to: NaiveDate) -> Result<PriceSeries> {
        let bars = self.daily_bars(ticker, from, to).await?;
        let observations = bars.into_iter().map(|bar| (bar.date, bar.close)).collect();
        Ok(PriceSeries::new(ticker, observations))
    }
}

impl PriceSource for StooqClient {
    fn name(&self) -> &str {
        "stooq"
    }

    async fn fetch_closes(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> rotation_traits::Result<PriceSeries> {
        self.closes(ticker, start, end)
            .await
            .map_err(|e| RotationError::DataFetch(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_building() {
        let client = StooqClient::new();
        let from = NaiveDate::from_ymd_opt(2010, 1, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        assert_eq!(
            client.url("spy.us", from, to),
            "https://stooq.com/q/d/l/?s=spy.us&d1=20100101&d2=20240630&i=d"
        );
    }

    #[test]
    fn test_custom_base_url() {
        let client = StooqClient::with_base_url("http://localhost:9000/q/d/l/");
        assert_eq!(client.base_url(), "http://localhost:9000/q/d/l/");
        let day = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert!(client.url("efa.us", day, day).starts_with("http://localhost:9000/"));
    }

    #[test]
    fn test_source_name() {
        assert_eq!(StooqClient::default().name(), "stooq");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_fetch_error() {
        // Port 9 (discard) on localhost is not an HTTP server.
        let client = StooqClient::with_base_url("http://127.0.0.1:9/q/d/l/");
        let day = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let result = client.fetch_closes("SPY", day, day).await;
        assert!(matches!(result, Err(RotationError::DataFetch(_))));
    }
}
