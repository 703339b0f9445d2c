//! Anchored (custom) analysis command handler.
//!
//! The user picks a subset of symbols and an anchor; the pipeline finds
//! the anchor's best partner within that subset and reports on the pair.

use super::print_summary;
use crate::cli::CustomConfig;
use crate::data;
use crate::discovery::{self, DiscoveryConfig};
use crate::report::{self, AnalysisMode};
use tracing::info;

/// Run the anchored-subset analysis pipeline.
///
/// # Errors
/// Returns an error if the universe cannot be loaded, the selection is
/// invalid, or the report cannot be written.
pub fn run_custom(config: CustomConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!(anchor = %config.anchor, "--- PairSight: Anchored Pair Analysis ---");

    let universe = data::load_universe(&config.data_dir)?;
    info!(
        symbols = universe.symbol_count(),
        dates = universe.len(),
        "Universe loaded"
    );

    let selected = discovery::select_anchored(
        &universe,
        &config.symbols,
        &config.anchor,
        &DiscoveryConfig::default(),
    )?;

    let series = universe.pair_series(&selected.symbol_a, &selected.symbol_b)?;
    let analysis = report::assemble(
        AnalysisMode::Anchored {
            anchor: config.anchor.clone(),
        },
        &selected,
        &series,
        config.window,
    )?;

    print_summary(&analysis);
    report::write_json(&analysis, &config.output)?;
    if let Some(path) = &config.trade_log {
        report::write_trade_log(&analysis.backtest.trades, path)?;
    }

    Ok(())
}
