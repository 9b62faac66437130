//! Run command implementation.

use std::path::PathBuf;

use anyhow::Result;
use rotation::{Pipeline, RunOutcome};
use rotation_data::FrozenPrices;
use rotation_report::{format_table, to_json};
use rotation_stooq::StooqClient;
use rotation_traits::{BacktestConfig, PriceSource};

use crate::OutputFormat;

/// Run the backtest, print the summary and write every report file.
pub(crate) async fn run_backtest(
    config: BacktestConfig,
    prices: Option<PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    let text = format == OutputFormat::Text;

    if text {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                   Momentum Rotation Backtest                 ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");

        println!("Tickers:    {}", config.tickers.join(", "));
        println!("Benchmark:  {}", config.benchmark);
        println!("Period:     {} to {}", config.start, config.end);
        println!(
            "Lookbacks:  {}",
            config
                .lookbacks
                .iter()
                .map(|l| format!("{l}M"))
                .collect::<Vec<_>>()
                .join(", ")
        );
        println!("Top N:      {}", config.top_n);
        println!(
            "Risk-free:  {:.2}% ({:.4}% per month)",
            config.risk_free_annual * 100.0,
            config.risk_free_per_period() * 100.0
        );
        match &prices {
            Some(path) => println!("Prices:     {}", path.display()),
            None => println!("Prices:     stooq"),
        }
        println!();
    }

    let outcome = match &prices {
        Some(path) => execute(FrozenPrices::from_csv(path)?, config).await?,
        None => execute(StooqClient::from_env()?, config).await?,
    };

    if text {
        println!(
            "Loaded {} trading days, {} months for {} tickers",
            outcome.prices.height(),
            outcome.monthly.height(),
            outcome.prices.width()
        );
        println!();
        println!("Performance Summary:");
        print!("{}", format_table(&outcome.result.summary));
        println!();
    } else {
        println!("{}", to_json(&outcome.result.summary)?);
    }

    let written = outcome.write_reports()?;
    if text {
        println!("Output files:");
        for path in &written {
            println!("  {}", path.display());
        }
        println!();
        println!("Backtest complete.");
    }

    Ok(())
}

async fn execute<S: PriceSource>(source: S, config: BacktestConfig) -> Result<RunOutcome> {
    Ok(Pipeline::new(source, config)?.run().await?)
}
