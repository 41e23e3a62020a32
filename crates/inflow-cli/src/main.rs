//! Inflow CLI - Income trends analyzer
//!
//! Usage:
//!   inflow analyze --file records.csv     Full trends analysis
//!   inflow sources --file records.csv     Per-source statistics

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Analyze {
            start_date,
            end_date,
            source,
            min_confidence,
            json,
        } => {
            commands::cmd_analyze(
                &cli.file,
                start_date.as_deref(),
                end_date.as_deref(),
                source,
                min_confidence,
                json,
            )
            .await
        }
        Commands::Sources => commands::cmd_sources(&cli.file).await,
    }
}
