//! Rotation CLI binary.
//!
//! Provides the command-line interface for the momentum rotation backtester.

mod cmd;
mod config;

use std::{path::PathBuf, process};

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::config::ConfigArgs;

#[derive(Parser)]
#[command(name = "rotation")]
#[command(about = "Cross-sectional momentum rotation backtester", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the momentum backtest and write reports
    Run {
        #[command(flatten)]
        config: ConfigArgs,

        /// Replay prices from a CSV written by `fetch` instead of downloading
        #[arg(long)]
        prices: Option<PathBuf>,

        /// Console summary format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Download daily closes and save them as a price CSV
    Fetch {
        #[command(flatten)]
        config: ConfigArgs,

        /// Destination file
        #[arg(short, long, default_value = "prices.csv")]
        output: PathBuf,
    },
}

/// Console summary format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Aligned text table
    Text,
    /// JSON array of summary rows
    Json,
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "rotation=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            prices,
            format,
        } => {
            cmd::run::run_backtest(config.resolve()?, prices, format).await?;
        }
        Commands::Fetch { config, output } => {
            cmd::fetch::fetch_prices(config.resolve()?, &output).await?;
        }
    }

    Ok(())
}
