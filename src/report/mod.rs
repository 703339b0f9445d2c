//! Analysis report assembly and output.
//!
//! Pulls the pipeline together for one selected pair: derives the
//! statistic bundle, aligns and classifies it, replays the spread
//! backtest, and wraps everything in a single serializable report for
//! both analysis modes.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::analytics::{self, AnalyticsError};
use crate::backtest::{self, BacktestResult, SpreadSignal, SpreadTrade};
use crate::data::PairSeries;
use crate::discovery::{SelectedPair, SelectionSource};
use crate::signal::{self, AlignedRecord};
use crate::types::Action;

/// Mean recent z-score beyond which a headline recommendation is issued.
pub const RECOMMENDATION_THRESHOLD: f64 = 1.2;

/// Number of trailing dates the recommendation averages over.
pub const RECOMMENDATION_WINDOW: usize = 5;

/// Which selection path produced this report.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AnalysisMode {
    /// Best pair across the whole universe
    Automatic,
    /// User-selected subset anchored to one symbol
    Anchored { anchor: String },
}

/// The selected pair and its headline statistics.
#[derive(Debug, Clone, Serialize)]
pub struct PairSummary {
    pub symbol_a: String,
    pub symbol_b: String,
    pub hedge_ratio: f64,
    pub correlation: f64,
    pub adf_statistic: Option<f64>,
    pub selection: SelectionSource,
}

/// Headline per-leg recommendation from the recent z-score level.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub action_a: Action,
    pub action_b: Action,
    /// Mean of the finite z-scores in the trailing window, if any
    pub mean_recent_zscore: Option<f64>,
}

/// Complete result of one analysis run.
#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    #[serde(flatten)]
    pub mode: AnalysisMode,
    pub pair: PairSummary,
    pub recommendation: Recommendation,
    pub latest_signal: Option<SpreadSignal>,
    pub records: Vec<AlignedRecord>,
    pub backtest: BacktestResult,
}

/// Run analytics, alignment, classification and the backtest for the
/// selected pair, and assemble the report.
pub fn assemble(
    mode: AnalysisMode,
    selected: &SelectedPair,
    series: &PairSeries,
    window: usize,
) -> Result<AnalysisReport, AnalyticsError> {
    let analytics = analytics::build_bundle(series, window)?;
    let records = sanitize(signal::align(&analytics.bundle));

    let signals = backtest::generate_signals(&analytics.bundle.zscore);
    let latest_signal = signals.last().copied().flatten();
    let backtest = backtest::simulate(&signals, series);

    Ok(AnalysisReport {
        mode,
        pair: PairSummary {
            symbol_a: selected.symbol_a.clone(),
            symbol_b: selected.symbol_b.clone(),
            hedge_ratio: analytics.hedge_ratio,
            correlation: selected.correlation,
            adf_statistic: selected.adf_statistic,
            selection: selected.source,
        },
        recommendation: recommend(&analytics.bundle.zscore),
        latest_signal,
        records,
        backtest,
    })
}

/// Headline recommendation from the mean of the trailing finite z-scores.
pub fn recommend(zscore: &[f64]) -> Recommendation {
    let tail = &zscore[zscore.len().saturating_sub(RECOMMENDATION_WINDOW)..];
    let finite: Vec<f64> = tail.iter().copied().filter(|z| z.is_finite()).collect();

    let mean = (!finite.is_empty()).then(|| finite.iter().sum::<f64>() / finite.len() as f64);
    let (action_a, action_b) = match mean {
        Some(m) if m > RECOMMENDATION_THRESHOLD => (Action::Sell, Action::Buy),
        Some(m) if m < -RECOMMENDATION_THRESHOLD => (Action::Buy, Action::Sell),
        _ => (Action::Hold, Action::Hold),
    };

    Recommendation {
        action_a,
        action_b,
        mean_recent_zscore: mean,
    }
}

/// JSON cannot carry NaN/inf, so non-finite statistics become missing at
/// this boundary. The actions were already classified from the raw values.
fn sanitize(mut records: Vec<AlignedRecord>) -> Vec<AlignedRecord> {
    let finite = |v: Option<f64>| v.filter(|x| x.is_finite());
    for record in &mut records {
        record.price_a = finite(record.price_a);
        record.price_b = finite(record.price_b);
        record.spread = finite(record.spread);
        record.rolling_mean = finite(record.rolling_mean);
        record.correlation = finite(record.correlation);
        record.zscore = finite(record.zscore);
    }
    records
}

/// Write the report as pretty-printed JSON.
pub fn write_json(report: &AnalysisReport, path: &Path) -> Result<(), std::io::Error> {
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)?;
    info!(path = %path.display(), records = report.records.len(), "Report written");
    Ok(())
}

/// Write the closed trades as a CSV trade log.
pub fn write_trade_log(trades: &[SpreadTrade], path: &Path) -> Result<(), std::io::Error> {
    let mut file = fs::File::create(path)?;
    writeln!(file, "{}", SpreadTrade::csv_header())?;
    for trade in trades {
        writeln!(file, "{}", trade.to_csv_line())?;
    }
    info!(path = %path.display(), trades = trades.len(), "Trade log written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommend_sell_buy_on_high_mean() {
        let z = vec![0.0, 0.0, 1.5, 1.5, 1.5, 1.5, 1.5];
        let rec = recommend(&z);
        assert_eq!(rec.action_a, Action::Sell);
        assert_eq!(rec.action_b, Action::Buy);
        assert!((rec.mean_recent_zscore.unwrap() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_recommend_buy_sell_on_low_mean() {
        let rec = recommend(&[-1.3, -1.4, -1.5]);
        assert_eq!(rec.action_a, Action::Buy);
        assert_eq!(rec.action_b, Action::Sell);
    }

    #[test]
    fn test_recommend_hold_in_band() {
        let rec = recommend(&[1.0, -1.0, 0.5]);
        assert_eq!(rec.action_a, Action::Hold);
        assert_eq!(rec.action_b, Action::Hold);
    }

    #[test]
    fn test_recommend_skips_non_finite() {
        let rec = recommend(&[f64::NAN, 1.5, f64::INFINITY, 1.5, f64::NAN]);
        assert!((rec.mean_recent_zscore.unwrap() - 1.5).abs() < 1e-12);
        assert_eq!(rec.action_a, Action::Sell);
    }

    #[test]
    fn test_recommend_holds_without_finite_values() {
        let rec = recommend(&[f64::NAN, f64::NAN]);
        assert_eq!(rec.mean_recent_zscore, None);
        assert_eq!(rec.action_a, Action::Hold);

        let rec = recommend(&[]);
        assert_eq!(rec.mean_recent_zscore, None);
    }

    #[test]
    fn test_sanitize_drops_non_finite_statistics() {
        let bundle = crate::signal::RawSeriesBundle {
            dates: vec!["d1".to_string(), "d2".to_string()],
            zscore: vec![f64::NAN, 1.0],
            spread: vec![f64::INFINITY, 2.0],
            ..Default::default()
        };
        let records = sanitize(crate::signal::align(&bundle));
        assert_eq!(records[0].zscore, None);
        assert_eq!(records[0].spread, None);
        assert_eq!(records[1].zscore, Some(1.0));
        assert_eq!(records[1].spread, Some(2.0));
    }
}
