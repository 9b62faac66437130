//! Data types for Stooq CSV responses.

use std::io::Cursor;

use chrono::NaiveDate;
use polars::prelude::*;

use crate::{Result, error::StooqError};

/// Exchange suffix Stooq expects for bare US tickers.
pub const DEFAULT_MARKET_SUFFIX: &str = "us";

/// Map a ticker to the symbol Stooq expects.
///
/// Bare tickers get the US market suffix ("SPY" → "spy.us"); tickers that
/// already carry a suffix ("VOD.UK") are only lowercased.
#[must_use]
pub fn stooq_symbol(ticker: &str) -> String {
    let ticker = ticker.trim().to_lowercase();
    if ticker.contains('.') {
        ticker
    } else {
        format!("{ticker}.{DEFAULT_MARKET_SUFFIX}")
    }
}

/// One trading day of OHLCV data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyBar {
    /// Trading date.
    pub date: NaiveDate,
    /// Open price.
    pub open: Option<f64>,
    /// High price.
    pub high: Option<f64>,
    /// Low price.
    pub low: Option<f64>,
    /// Close price.
    pub close: f64,
    /// Volume.
    pub volume: Option<f64>,
}

impl DailyBar {
    /// Parse a Stooq daily CSV body (`Date,Open,High,Low,Close,Volume`).
    ///
    /// Rows without a close are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`StooqError::NoData`] when Stooq reports no data for
    /// `symbol`, [`StooqError::Api`] when the body is not price CSV, and
    /// [`StooqError::InvalidDate`] when a row's date cannot be parsed.
    pub fn parse_csv(body: &[u8], symbol: &str) -> Result<Vec<Self>> {
        let text = String::from_utf8_lossy(body);
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed.starts_with("No data") {
            return Err(StooqError::NoData(symbol.to_string()));
        }
        if !trimmed.starts_with("Date,") {
            let snippet: String = trimmed.chars().take(80).collect();
            return Err(StooqError::Api(format!(
                "unexpected response for {symbol}: {snippet}"
            )));
        }

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .into_reader_with_file_handle(Cursor::new(body.to_vec()))
            .finish()?;

        let dates = df.column("Date")?.cast(&DataType::String)?;
        let dates = dates.as_materialized_series().str()?;
        let close = float_column(&df, "Close")?
            .ok_or_else(|| StooqError::Api(format!("response for {symbol} has no Close")))?;
        let open = float_column(&df, "Open")?;
        let high = float_column(&df, "High")?;
        let low = float_column(&df, "Low")?;
        let volume = float_column(&df, "Volume")?;

        let field = |col: &Option<Vec<Option<f64>>>, i: usize| col.as_ref().and_then(|c| c[i]);

        let mut bars = Vec::with_capacity(df.height());
        for (i, raw_date) in dates.into_iter().enumerate() {
            let Some(close) = close[i] else {
                continue;
            };
            let raw_date = raw_date.ok_or_else(|| StooqError::InvalidDate("null".to_string()))?;
            let date = NaiveDate::parse_from_str(raw_date.trim(), "%Y-%m-%d")
                .map_err(|e| StooqError::InvalidDate(format!("{raw_date}: {e}")))?;

            bars.push(Self {
                date,
                open: field(&open, i),
                high: field(&high, i),
                low: field(&low, i),
                close,
                volume: field(&volume, i),
            });
        }

        if bars.is_empty() {
            return Err(StooqError::NoData(symbol.to_string()));
        }

        Ok(bars)
    }
}

/// Read an optional column as `f64` values.
fn float_column(df: &DataFrame, name: &str) -> Result<Option<Vec<Option<f64>>>> {
    let Ok(column) = df.column(name) else {
        return Ok(None);
    };
    let cast = column.cast(&DataType::Float64)?;
    let values = cast.as_materialized_series().f64()?.into_iter().collect();
    Ok(Some(values))
}
