//! CLI command handlers.
//!
//! This module contains the implementation for each CLI subcommand,
//! delegating to the data, discovery and report pipeline.

mod analyze;
mod custom;

pub use analyze::run_analyze;
pub use custom::run_custom;

use crate::report::AnalysisReport;

/// Print the human-readable result summary to stdout.
fn print_summary(report: &AnalysisReport) {
    let pair = &report.pair;
    println!(
        "\nPair: {} / {}  (hedge ratio {:.4}, correlation {:.3})",
        pair.symbol_a, pair.symbol_b, pair.hedge_ratio, pair.correlation
    );
    if let Some(adf) = pair.adf_statistic {
        println!("ADF statistic: {adf:.2}  (selection: {:?})", pair.selection);
    }

    let rec = &report.recommendation;
    match rec.mean_recent_zscore {
        Some(z) => println!(
            "Recommendation: {} {} / {} {}  (mean recent z-score {:.2})",
            rec.action_a, pair.symbol_a, rec.action_b, pair.symbol_b, z
        ),
        None => println!("Recommendation: HOLD (no recent z-scores)"),
    }

    let summary = &report.backtest.summary;
    println!(
        "Backtest: {} trades, {} winners, win rate {:.0}%, net PnL {}",
        summary.total_trades,
        summary.winning_trades,
        summary.win_rate * 100.0,
        summary.net_pnl
    );
}
