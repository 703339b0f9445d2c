//! CLI configuration structs bridging CLI arguments to domain types.
//!
//! These structs decouple the CLI parsing layer from the analysis
//! pipeline, allowing command handlers to work with validated, typed
//! configurations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when validating CLI arguments.
#[derive(Debug, Error)]
pub enum CliConfigError {
    #[error("At least two symbols are required, got {0}")]
    TooFewSymbols(usize),

    #[error("Rolling window must be at least 2, got {0}")]
    WindowTooSmall(usize),
}

/// Configuration for the automatic analysis command.
#[derive(Debug, Clone)]
pub struct AnalyzeConfig {
    /// Directory holding per-symbol close-price CSVs
    pub data_dir: PathBuf,
    /// Rolling window for spread statistics
    pub window: usize,
    /// Minimum Pearson correlation for candidate pairs
    pub min_correlation: f64,
    /// Destination for the JSON report
    pub output: PathBuf,
    /// Optional destination for the CSV trade log
    pub trade_log: Option<PathBuf>,
}

impl AnalyzeConfig {
    pub fn new(
        data_dir: String,
        window: usize,
        min_correlation: f64,
        output: String,
        trade_log: Option<String>,
    ) -> Result<Self, CliConfigError> {
        if window < 2 {
            return Err(CliConfigError::WindowTooSmall(window));
        }
        Ok(Self {
            data_dir: PathBuf::from(data_dir),
            window,
            min_correlation,
            output: PathBuf::from(output),
            trade_log: trade_log.map(PathBuf::from),
        })
    }
}

/// Configuration for the anchored (custom) analysis command.
#[derive(Debug, Clone)]
pub struct CustomConfig {
    pub data_dir: PathBuf,
    pub window: usize,
    /// Symbol every reported pair must be built around
    pub anchor: String,
    /// User-selected subset to search within
    pub symbols: Vec<String>,
    pub output: PathBuf,
    pub trade_log: Option<PathBuf>,
}

impl CustomConfig {
    pub fn new(
        data_dir: String,
        window: usize,
        anchor: String,
        symbols_arg: &str,
        output: String,
        trade_log: Option<String>,
    ) -> Result<Self, CliConfigError> {
        if window < 2 {
            return Err(CliConfigError::WindowTooSmall(window));
        }

        let symbols: Vec<String> = symbols_arg
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if symbols.len() < 2 {
            return Err(CliConfigError::TooFewSymbols(symbols.len()));
        }

        Ok(Self {
            data_dir: PathBuf::from(data_dir),
            window,
            anchor,
            symbols,
            output: PathBuf::from(output),
            trade_log: trade_log.map(PathBuf::from),
        })
    }
}
