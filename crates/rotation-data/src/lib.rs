//! Price loading and resampling for rotation.
//!
//! This crate covers the first two stages of the backtest:
//! - Loading: fetch closes for every configured ticker from a
//!   [`PriceSource`](rotation_traits::PriceSource), tolerate per-ticker
//!   failures and outer-join the survivors into a daily price table
//! - Resampling: collapse daily prices to month-end prices and derive
//!   monthly simple returns
//!
//! It also reads and writes price tables as CSV so a download can be frozen
//! and replayed offline.
//!
//! # Example
//!
//! ```rust,ignore
//! use rotation_data::{load_prices, monthly_returns, to_monthly};
//!
//! let loaded = load_prices(&client, &config).await?;
//! let monthly = to_monthly(&loaded.table)?;
//! let returns = monthly_returns(&monthly);
//! ```

pub mod io;
pub mod loader;
pub mod resample;

// Re-export main types
pub use io::{FrozenPrices, read_price_csv, write_price_csv};
pub use loader::{FetchFailure, LoadedPrices, join_series, load_prices};
pub use resample::{month_end, monthly_returns, to_monthly};
