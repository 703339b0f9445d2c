//! Spread backtest: stateful entry/exit signals replayed over the pair's
//! price history.
//!
//! Unlike the per-date classifier in [`crate::signal`], the generator here
//! carries a position across dates, so a stretched spread produces one
//! entry signal rather than one on every date it stays stretched, and an
//! explicit exit when the spread reverts toward its mean.

use crate::data::PairSeries;
use crate::signal::ENTRY_THRESHOLD;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Z-score magnitude below which an open position is closed.
pub const EXIT_THRESHOLD: f64 = 0.5;

/// A position-changing event on the spread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpreadSignal {
    /// Sell leg A, buy leg B (spread stretched high)
    ShortSpread,
    /// Buy leg A, sell leg B (spread stretched low)
    LongSpread,
    /// Close whichever position is open
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Held {
    Short,
    Long,
}

/// Walk the z-score series and emit position-changing signals.
///
/// Entries fire on a strict +/-2.0 breach when not already positioned that
/// way; the exit fires when a position is open and the z-score magnitude
/// falls below 0.5. Non-finite z-scores emit nothing (NaN fails every
/// comparison).
pub fn generate_signals(zscore: &[f64]) -> Vec<Option<SpreadSignal>> {
    let mut held: Option<Held> = None;

    zscore
        .iter()
        .map(|&z| {
            if z > ENTRY_THRESHOLD && held != Some(Held::Short) {
                held = Some(Held::Short);
                Some(SpreadSignal::ShortSpread)
            } else if z < -ENTRY_THRESHOLD && held != Some(Held::Long) {
                held = Some(Held::Long);
                Some(SpreadSignal::LongSpread)
            } else if held.is_some() && z.abs() < EXIT_THRESHOLD {
                held = None;
                Some(SpreadSignal::Exit)
            } else {
                None
            }
        })
        .collect()
}

/// One closed round trip on the spread.
#[derive(Debug, Clone, Serialize)]
pub struct SpreadTrade {
    pub entry_date: String,
    pub exit_date: String,
    pub buy_symbol: String,
    pub sell_symbol: String,
    pub entry_a: f64,
    pub entry_b: f64,
    pub exit_a: f64,
    pub exit_b: f64,
    pub pnl: f64,
}

impl SpreadTrade {
    /// Header for the trade-log CSV.
    pub fn csv_header() -> &'static str {
        "entry_date,exit_date,buy_symbol,sell_symbol,entry_a,entry_b,exit_a,exit_b,pnl"
    }

    /// Format as one trade-log CSV line.
    pub fn to_csv_line(&self) -> String {
        format!(
            "{},{},{},{},{},{},{},{},{}",
            self.entry_date,
            self.exit_date,
            self.buy_symbol,
            self.sell_symbol,
            self.entry_a,
            self.entry_b,
            self.exit_a,
            self.exit_b,
            self.pnl,
        )
    }
}

/// Aggregate outcome of a simulated run.
#[derive(Debug, Clone, Serialize)]
pub struct BacktestSummary {
    pub total_trades: u32,
    pub winning_trades: u32,
    pub losing_trades: u32,
    pub win_rate: f64,
    pub net_pnl: Decimal,
}

/// Closed trades plus their summary.
#[derive(Debug, Clone, Serialize)]
pub struct BacktestResult {
    pub trades: Vec<SpreadTrade>,
    pub summary: BacktestSummary,
}

/// Replay a signal sequence over the pair's joined history.
///
/// Entries are taken only when flat; a signal that would flip an open
/// position is ignored until the exit closes it. Long spread books
/// `(exit_a - entry_a) - (exit_b - entry_b)`, short spread the negation.
pub fn simulate(signals: &[Option<SpreadSignal>], series: &PairSeries) -> BacktestResult {
    let mut trades = Vec::new();
    let mut open: Option<(Held, usize)> = None;

    let n = signals
        .len()
        .min(series.price_a.len())
        .min(series.price_b.len())
        .min(series.dates.len());

    for i in 0..n {
        match signals[i] {
            Some(SpreadSignal::LongSpread) if open.is_none() => {
                open = Some((Held::Long, i));
            }
            Some(SpreadSignal::ShortSpread) if open.is_none() => {
                open = Some((Held::Short, i));
            }
            Some(SpreadSignal::Exit) => {
                if let Some((held, entry)) = open.take() {
                    trades.push(close_trade(series, held, entry, i));
                }
            }
            _ => {}
        }
    }

    let winning = trades.iter().filter(|t| t.pnl > 0.0).count() as u32;
    let total = trades.len() as u32;
    let net_pnl = trades
        .iter()
        .map(|t| Decimal::from_f64(t.pnl).unwrap_or_default())
        .sum();

    debug!(trades = total, winning, "Backtest complete");

    BacktestResult {
        summary: BacktestSummary {
            total_trades: total,
            winning_trades: winning,
            losing_trades: total - winning,
            win_rate: if total > 0 {
                f64::from(winning) / f64::from(total)
            } else {
                0.0
            },
            net_pnl,
        },
        trades,
    }
}

fn close_trade(series: &PairSeries, held: Held, entry: usize, exit: usize) -> SpreadTrade {
    let (entry_a, entry_b) = (series.price_a[entry], series.price_b[entry]);
    let (exit_a, exit_b) = (series.price_a[exit], series.price_b[exit]);

    let (pnl, buy_symbol, sell_symbol) = match held {
        Held::Long => (
            (exit_a - entry_a) - (exit_b - entry_b),
            series.symbol_a.clone(),
            series.symbol_b.clone(),
        ),
        Held::Short => (
            (entry_a - exit_a) + (entry_b - exit_b),
            series.symbol_b.clone(),
            series.symbol_a.clone(),
        ),
    };

    SpreadTrade {
        entry_date: series.dates[entry].clone(),
        exit_date: series.dates[exit].clone(),
        buy_symbol,
        sell_symbol,
        entry_a,
        entry_b,
        exit_a,
        exit_b,
        pnl,
    }
}
