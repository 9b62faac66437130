//! Price loading.
//!
//! Every configured ticker is requested concurrently. A failed ticker is
//! logged once and left out; it never aborts the run. The surviving series
//! are outer-joined on date into a [`PriceTable`].

use std::collections::BTreeMap;

use futures::future::join_all;
use rotation_traits::{
    BacktestConfig, Date, PriceSeries, PriceSource, PriceTable, Result, RotationError, Ticker,
};
use tracing::{info, warn};

/// A ticker that contributed no prices, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    /// The ticker that failed
    pub ticker: Ticker,
    /// Human-readable failure reason
    pub reason: String,
}

/// Result of loading prices for the configured universe.
#[derive(Debug, Clone)]
pub struct LoadedPrices {
    /// Daily closes of every ticker that loaded, in configured order
    pub table: PriceTable,
    /// Tickers that were skipped, in configured order
    pub failures: Vec<FetchFailure>,
}

/// Fetch closes for every configured ticker and join them into a price table.
///
/// Fetches run concurrently; results are consumed in configured ticker
/// order, so column order and log output are deterministic. Observations
/// outside `[config.start, config.end]` are discarded.
///
/// # Errors
///
/// Returns [`RotationError::NoData`] if no ticker produced any prices.
pub async fn load_prices<S: PriceSource>(
    source: &S,
    config: &BacktestConfig,
) -> Result<LoadedPrices> {
    let requests = config
        .tickers
        .iter()
        .map(|ticker| source.fetch_closes(ticker, config.start, config.end));
    let results = join_all(requests).await;

    let mut series = Vec::with_capacity(config.tickers.len());
    let mut failures = Vec::new();

    for (ticker, result) in config.tickers.iter().zip(results) {
        let outcome = result.map(|s| {
            let in_range = s
                .observations()
                .iter()
                .copied()
                .filter(|(d, _)| *d >= config.start && *d <= config.end)
                .collect();
            PriceSeries::new(ticker.as_str(), in_range)
        });

        let reason = match outcome {
            Ok(s) if !s.is_empty() => {
                series.push(s);
                continue;
            }
            Ok(_) => "no prices in the requested range".to_string(),
            Err(e) => e.to_string(),
        };

        warn!(ticker = %ticker, source = source.name(), %reason, "skipping ticker");
        failures.push(FetchFailure {
            ticker: ticker.clone(),
            reason,
        });
    }

    if series.is_empty() {
        return Err(RotationError::NoData);
    }

    let table = join_series(&series)?;
    info!(
        tickers = table.width(),
        rows = table.height(),
        failed = failures.len(),
        "loaded daily prices"
    );

    Ok(LoadedPrices { table, failures })
}

/// Outer-join price series on date.
///
/// Columns follow the order of `series`. Dates where every ticker is missing
/// are dropped; dates with partial data are kept with `NaN` for the gaps.
///
/// # Errors
///
/// Returns an error if two series share a ticker.
pub fn join_series(series: &[PriceSeries]) -> Result<PriceTable> {
    let tickers: Vec<Ticker> = series.iter().map(|s| s.ticker().to_string()).collect();
    let width = tickers.len();

    let mut rows: BTreeMap<Date, Vec<f64>> = BTreeMap::new();
    for (j, s) in series.iter().enumerate() {
        for &(date, price) in s.observations() {
            rows.entry(date).or_insert_with(|| vec![f64::NAN; width])[j] = price;
        }
    }
    rows.retain(|_, row| row.iter().any(|v| !v.is_nan()));

    let (dates, values): (Vec<Date>, Vec<Vec<f64>>) = rows.into_iter().unzip();
    PriceTable::new(dates, tickers, values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        collections::HashMap,
        io,
        sync::{Arc, Mutex},
    };
    use tracing_subscriber::fmt::MakeWriter;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd_opt(y, m, day).unwrap()
    }

    /// In-memory source; tickers absent from the map fail.
    struct MapSource(HashMap<String, Vec<(Date, f64)>>);

    impl PriceSource for MapSource {
        fn name(&self) -> &str {
            "memory"
        }

        async fn fetch_closes(&self, ticker: &str, _start: Date, _end: Date) -> Result<PriceSeries> {
            self.0
                .get(ticker)
                .map(|obs| PriceSeries::new(ticker, obs.clone()))
                .ok_or_else(|| RotationError::DataFetch(format!("unknown symbol {ticker}")))
        }
    }

    fn config(tickers: &[&str]) -> BacktestConfig {
        BacktestConfig {
            tickers: tickers.iter().map(|t| t.to_string()).collect(),
            benchmark: tickers[0].to_string(),
            start: d(2024, 1, 1),
            end: d(2024, 12, 31),
            top_n: 1,
            ..Default::default()
        }
    }

    #[test]
    fn test_join_series_outer_join() {
        let a = PriceSeries::new("A", vec![(d(2024, 1, 2), 1.0), (d(2024, 1, 3), 2.0)]);
        let b = PriceSeries::new("B", vec![(d(2024, 1, 3), 10.0), (d(2024, 1, 4), 11.0)]);
        let table = join_series(&[a, b]).unwrap();

        assert_eq!(table.tickers(), &["A".to_string(), "B".to_string()]);
        assert_eq!(table.dates(), &[d(2024, 1, 2), d(2024, 1, 3), d(2024, 1, 4)]);
        assert_eq!(table.value(0, 1), None);
        assert_eq!(table.value(1, 1), Some(10.0));
        assert_eq!(table.value(2, 0), None);
    }

    #[test]
    fn test_join_series_duplicate_ticker() {
        let a = PriceSeries::new("A", vec![(d(2024, 1, 2), 1.0)]);
        assert!(join_series(&[a.clone(), a]).is_err());
    }

    #[tokio::test]
    async fn test_load_prices_skips_failed_ticker() {
        let source = MapSource(HashMap::from([
            ("A".to_string(), vec![(d(2024, 1, 2), 1.0), (d(2024, 2, 1), 1.1)]),
            ("C".to_string(), vec![(d(2024, 1, 2), 5.0)]),
        ]));

        let loaded = load_prices(&source, &config(&["A", "B", "C"])).await.unwrap();
        assert_eq!(loaded.table.tickers(), &["A".to_string(), "C".to_string()]);
        assert_eq!(loaded.failures.len(), 1);
        assert_eq!(loaded.failures[0].ticker, "B");
        assert!(loaded.failures[0].reason.contains("unknown symbol B"));
    }

    /// Log sink shared between the subscriber and the test.
    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl CapturedLog {
        fn lines(&self) -> Vec<String> {
            String::from_utf8_lossy(&self.0.lock().unwrap())
                .lines()
                .map(str::to_string)
                .collect()
        }
    }

    impl io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLog {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[tokio::test]
    async fn test_load_prices_logs_one_line_per_failure() {
        let log = CapturedLog::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(log.clone())
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let source = MapSource(HashMap::from([(
            "A".to_string(),
            vec![(d(2024, 1, 2), 1.0)],
        )]));
        let loaded = load_prices(&source, &config(&["A", "X", "Y"])).await.unwrap();
        assert_eq!(loaded.failures.len(), 2);

        let lines = log.lines();
        assert_eq!(lines.len(), 2, "{lines:?}");
        assert!(lines[0].contains("skipping ticker") && lines[0].contains("ticker=X"));
        assert!(lines[1].contains("skipping ticker") && lines[1].contains("ticker=Y"));
    }

    #[tokio::test]
    async fn test_load_prices_clips_to_range() {
        let source = MapSource(HashMap::from([(
            "A".to_string(),
            vec![(d(2023, 12, 29), 0.9), (d(2024, 1, 2), 1.0)],
        )]));

        let loaded = load_prices(&source, &config(&["A"])).await.unwrap();
        assert_eq!(loaded.table.dates(), &[d(2024, 1, 2)]);
    }

    #[tokio::test]
    async fn test_load_prices_out_of_range_is_failure() {
        let source = MapSource(HashMap::from([
            ("A".to_string(), vec![(d(2024, 1, 2), 1.0)]),
            ("B".to_string(), vec![(d(2020, 1, 2), 1.0)]),
        ]));

        let loaded = load_prices(&source, &config(&["A", "B"])).await.unwrap();
        assert_eq!(loaded.failures.len(), 1);
        assert_eq!(loaded.failures[0].ticker, "B");
    }

    #[tokio::test]
    async fn test_load_prices_all_failed() {
        let source = MapSource(HashMap::new());
        let result = load_prices(&source, &config(&["A", "B"])).await;
        assert!(matches!(result, Err(RotationError::NoData)));
    }
}
