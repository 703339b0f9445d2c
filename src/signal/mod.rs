//! Signal Derivation & Series Alignment
//!
//! Turns the raw statistic series computed for a pair into a single
//! time-aligned table of per-date records, and classifies each date into a
//! per-leg BUY/SELL/HOLD action from its z-score.
//!
//! Both operations are pure: no I/O, no shared state, and identical input
//! always yields identical output. Missing data is the common case here
//! (rolling statistics are shorter than the raw history by construction)
//! and is never an error.

mod align;
mod classify;

pub use align::align;
pub use classify::{classify, ENTRY_THRESHOLD};

use crate::types::Action;
use serde::{Deserialize, Serialize};

/// Raw, possibly-ragged statistic series for one analyzed pair.
///
/// `dates` is the authoritative time axis; every other array is aligned to
/// it by position only. An array may be shorter than `dates` (missing past
/// its length) or empty (missing everywhere). Values beyond the date axis
/// are ignored. Date labels are opaque: they are never parsed or re-sorted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSeriesBundle {
    pub dates: Vec<String>,
    #[serde(default)]
    pub price_a: Vec<f64>,
    #[serde(default)]
    pub price_b: Vec<f64>,
    #[serde(default)]
    pub spread: Vec<f64>,
    #[serde(default)]
    pub rolling_mean: Vec<f64>,
    #[serde(default)]
    pub correlation: Vec<f64>,
    #[serde(default)]
    pub zscore: Vec<f64>,
}

/// One row of the aligned signal table.
///
/// `None` marks a value missing at this date; it is never coerced to zero.
/// The actions are derived solely from `zscore` at the same index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedRecord {
    pub date: String,
    pub price_a: Option<f64>,
    pub price_b: Option<f64>,
    pub spread: Option<f64>,
    pub rolling_mean: Option<f64>,
    pub correlation: Option<f64>,
    pub zscore: Option<f64>,
    pub action_a: Action,
    pub action_b: Action,
}
