//! CLI argument parsing using clap.
//!
//! This module defines the command-line interface for PairSight,
//! including all subcommands and their arguments.

mod config;

pub use config::{AnalyzeConfig, CliConfigError, CustomConfig};

use clap::{Parser, Subcommand};

/// PairSight - Statistical Arbitrage Pair Analysis
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Set the verbosity level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub verbose: String,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Find the best cointegrated pair in the universe and analyze it
    Analyze {
        /// Directory of per-symbol close-price CSV files
        #[arg(long, default_value = "data")]
        data_dir: String,
        /// Rolling window for spread statistics
        #[arg(long, default_value_t = 20)]
        window: usize,
        /// Minimum Pearson correlation for candidate pairs
        #[arg(long, default_value_t = 0.0)]
        min_correlation: f64,
        /// Output path for the JSON report
        #[arg(long, default_value = "report.json")]
        output: String,
        /// Optional output path for the CSV trade log
        #[arg(long)]
        trade_log: Option<String>,
    },

    /// Analyze a chosen subset of symbols anchored to one of them
    Custom {
        /// Directory of per-symbol close-price CSV files
        #[arg(long, default_value = "data")]
        data_dir: String,
        /// Rolling window for spread statistics
        #[arg(long, default_value_t = 20)]
        window: usize,
        /// Symbol the reported pair must be built around
        #[arg(long)]
        anchor: String,
        /// Symbols to search within (comma-separated, must include the anchor)
        #[arg(long)]
        symbols: String,
        /// Output path for the JSON report
        #[arg(long, default_value = "report.json")]
        output: String,
        /// Optional output path for the CSV trade log
        #[arg(long)]
        trade_log: Option<String>,
    },
}
