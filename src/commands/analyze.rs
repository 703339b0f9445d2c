//! Automatic analysis command handler.
//!
//! Loads the price universe, screens every pair for cointegration, and
//! reports on the best one.

use super::print_summary;
use crate::cli::AnalyzeConfig;
use crate::data;
use crate::discovery::{self, DiscoveryConfig};
use crate::report::{self, AnalysisMode};
use tracing::info;

/// Run the automatic (whole-universe) analysis pipeline.
///
/// # Errors
/// Returns an error if the universe cannot be loaded, no viable pair
/// exists, or the report cannot be written.
pub fn run_analyze(config: AnalyzeConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!("--- PairSight: Automatic Pair Analysis ---");

    let universe = data::load_universe(&config.data_dir)?;
    info!(
        symbols = universe.symbol_count(),
        dates = universe.len(),
        "Universe loaded"
    );

    let discovery_config = DiscoveryConfig {
        min_correlation: config.min_correlation,
        ..Default::default()
    };
    let selected = discovery::select_automatic(&universe, &discovery_config)?;

    let series = universe.pair_series(&selected.symbol_a, &selected.symbol_b)?;
    let analysis = report::assemble(AnalysisMode::Automatic, &selected, &series, config.window)?;

    print_summary(&analysis);
    report::write_json(&analysis, &config.output)?;
    if let Some(path) = &config.trade_log {
        report::write_trade_log(&analysis.backtest.trades, path)?;
    }

    Ok(())
}
