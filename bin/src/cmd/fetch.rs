//! Fetch command implementation.

use std::path::Path;

use anyhow::Result;
use rotation_data::{load_prices, write_price_csv};
use rotation_stooq::StooqClient;
use rotation_traits::BacktestConfig;

/// Download the configured tickers and save the joined daily closes.
pub(crate) async fn fetch_prices(config: BacktestConfig, output: &Path) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                       Fetching Prices                        ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("Tickers: {}", config.tickers.join(", "));
    println!("Period:  {} to {}", config.start, config.end);
    println!();

    let client = StooqClient::from_env()?;
    let loaded = load_prices(&client, &config).await?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    write_price_csv(&loaded.table, output)?;

    println!(
        "Saved {} days x {} tickers to {}",
        loaded.table.height(),
        loaded.table.width(),
        output.display()
    );
    Ok(())
}
