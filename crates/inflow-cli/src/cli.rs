//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Inflow - Understand and anticipate your income
#[derive(Parser)]
#[command(name = "inflow")]
#[command(about = "Income trends analyzer for personal financial planning", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Income records CSV file (source,date,amount rows with a header)
    #[arg(long, default_value = "records.csv", global = true)]
    pub file: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a full income trends analysis
    Analyze {
        /// Only analyze records on or after this date (YYYY-MM-DD)
        #[arg(long)]
        start_date: Option<String>,

        /// Only analyze records on or before this date (YYYY-MM-DD)
        #[arg(long)]
        end_date: Option<String>,

        /// Restrict the analysis to one income source
        #[arg(short, long)]
        source: Option<String>,

        /// Minimum pattern confidence to report (irregular always shown)
        #[arg(long, default_value_t = inflow_core::DEFAULT_MIN_CONFIDENCE)]
        min_confidence: f64,

        /// Print the analysis as JSON instead of the text report
        #[arg(long)]
        json: bool,
    },

    /// Show per-source statistics for the record file
    Sources,
}
