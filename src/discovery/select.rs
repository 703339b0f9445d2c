//! Pair selection over the loaded universe.
//!
//! Engle-Granger style screen: for every unique symbol pair, regress one
//! leg on the other, take the residual spread, and test it for
//! stationarity with the ADF statistic. Stationary pairs are ranked by
//! `|correlation| * (-ADF t-statistic)` so that strong co-movement and
//! strong mean reversion both push a pair up the list.

use super::error::DiscoveryError;
use super::stats::{adf_statistic, correlation, ADF_CRITICAL_10PCT, ADF_CRITICAL_5PCT};
use crate::analytics;
use crate::data::PriceUniverse;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Configuration for the pair screen.
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Minimum Pearson correlation for a candidate pair
    pub min_correlation: f64,
    /// ADF critical value below which a spread counts as stationary
    pub adf_critical: f64,
    /// Minimum overlapping rows required to judge a pair
    pub min_overlap: usize,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            min_correlation: 0.0,
            adf_critical: ADF_CRITICAL_5PCT,
            min_overlap: super::stats::MIN_ADF_SAMPLES,
        }
    }
}

/// How the reported pair was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionSource {
    /// The pair passed the cointegration screen
    Cointegrated,
    /// Best cointegrated pair in the subset; none contained the anchor
    SubsetBest,
    /// Highest-correlation partner of the anchor; nothing cointegrated
    CorrelationFallback,
}

/// One screened pair with its selection statistics.
#[derive(Debug, Clone)]
pub struct CandidatePair {
    pub symbol_a: String,
    pub symbol_b: String,
    pub correlation: f64,
    pub adf_statistic: Option<f64>,
    pub score: f64,
    pub stationary: bool,
}

/// The pair chosen for analysis.
#[derive(Debug, Clone, Serialize)]
pub struct SelectedPair {
    pub symbol_a: String,
    pub symbol_b: String,
    pub correlation: f64,
    pub adf_statistic: Option<f64>,
    pub score: f64,
    pub source: SelectionSource,
}

/// Screen every unique pair among `symbols`.
pub fn scan_pairs(
    universe: &PriceUniverse,
    symbols: &[String],
    config: &DiscoveryConfig,
) -> Vec<CandidatePair> {
    let mut candidates = Vec::new();

    for i in 0..symbols.len() {
        for j in (i + 1)..symbols.len() {
            let sym_a = &symbols[i];
            let sym_b = &symbols[j];

            let pair = match universe.pair_series(sym_a, sym_b) {
                Ok(pair) => pair,
                Err(e) => {
                    warn!(a = %sym_a, b = %sym_b, error = %e, "Skipping pair");
                    continue;
                }
            };
            if pair.len() < config.min_overlap {
                debug!(a = %sym_a, b = %sym_b, rows = pair.len(), "Overlap too short");
                continue;
            }

            let Some(corr) = correlation(&pair.price_a, &pair.price_b) else {
                continue;
            };
            if corr < config.min_correlation {
                debug!(a = %sym_a, b = %sym_b, corr, "Correlation below threshold");
                continue;
            }

            // Residual spread of the OLS fit carries the cointegration signal.
            let adf = analytics::hedge_ratio(&pair.price_a, &pair.price_b)
                .ok()
                .map(|beta| analytics::spread(&pair.price_a, &pair.price_b, beta))
                .and_then(|spread| adf_statistic(&spread));

            let stationary = adf.is_some_and(|t| t < config.adf_critical);
            let score = adf.map_or(f64::MIN, |t| corr.abs() * -t);

            debug!(
                pair = format!("{}-{}", sym_a, sym_b),
                corr = format!("{:.3}", corr),
                adf = ?adf,
                stationary,
                "Pair screened"
            );

            candidates.push(CandidatePair {
                symbol_a: sym_a.clone(),
                symbol_b: sym_b.clone(),
                correlation: corr,
                adf_statistic: adf,
                score,
                stationary,
            });
        }
    }

    candidates
}

/// Pick the best cointegrated pair across the whole universe.
pub fn select_automatic(
    universe: &PriceUniverse,
    config: &DiscoveryConfig,
) -> Result<SelectedPair, DiscoveryError> {
    let symbols: Vec<String> = universe.symbols().iter().map(|s| s.to_string()).collect();
    if symbols.len() < 2 {
        return Err(DiscoveryError::NotEnoughSymbols(symbols.len()));
    }

    info!(candidates = symbols.len(), "Scanning universe for cointegrated pairs");
    let candidates = scan_pairs(universe, &symbols, config);

    let best = candidates
        .iter()
        .filter(|c| c.stationary)
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .ok_or(DiscoveryError::NoViablePair {
            candidates: symbols.len(),
        })?;

    info!(
        pair = format!("{}-{}", best.symbol_a, best.symbol_b),
        corr = format!("{:.3}", best.correlation),
        adf = ?best.adf_statistic,
        "Best pair selected"
    );

    Ok(selected_from(best, SelectionSource::Cointegrated))
}

/// Pick a partner for `anchor` within a user-selected subset.
///
/// Preference order: best cointegrated pair containing the anchor, then the
/// best cointegrated pair anywhere in the subset, then the subset symbol
/// most correlated with the anchor. The anchor is always reported as leg A.
pub fn select_anchored(
    universe: &PriceUniverse,
    selected: &[String],
    anchor: &str,
    config: &DiscoveryConfig,
) -> Result<SelectedPair, DiscoveryError> {
    if selected.len() < 2 {
        return Err(DiscoveryError::NotEnoughSymbols(selected.len()));
    }
    if !selected.iter().any(|s| *s == anchor) {
        return Err(DiscoveryError::AnchorNotSelected(anchor.to_string()));
    }

    let missing: Vec<String> = selected
        .iter()
        .filter(|s| !universe.contains(s))
        .cloned()
        .collect();
    if missing.iter().any(|s| *s == anchor) {
        return Err(DiscoveryError::UnknownSymbols(missing));
    }
    let available: Vec<String> = selected
        .iter()
        .filter(|s| universe.contains(s))
        .cloned()
        .collect();
    if available.len() < 2 {
        return Err(if missing.is_empty() {
            DiscoveryError::NotEnoughSymbols(available.len())
        } else {
            DiscoveryError::UnknownSymbols(missing)
        });
    }

    // The subset screen is looser than the universe-wide one.
    let subset_config = DiscoveryConfig {
        adf_critical: config.adf_critical.max(ADF_CRITICAL_10PCT),
        ..config.clone()
    };
    info!(
        anchor = %anchor,
        subset = available.len(),
        "Scanning anchored subset"
    );
    let candidates = scan_pairs(universe, &available, &subset_config);

    let best_with_anchor = candidates
        .iter()
        .filter(|c| c.stationary && (c.symbol_a == anchor || c.symbol_b == anchor))
        .max_by(|a, b| a.score.total_cmp(&b.score));
    if let Some(best) = best_with_anchor {
        return Ok(anchored_from(best, anchor, SelectionSource::Cointegrated));
    }

    let best_subset = candidates
        .iter()
        .filter(|c| c.stationary)
        .max_by(|a, b| a.score.total_cmp(&b.score));
    if let Some(best) = best_subset {
        warn!(anchor = %anchor, "No cointegrated pair contains the anchor, using subset best");
        return Ok(anchored_from(best, anchor, SelectionSource::SubsetBest));
    }

    // Last resort: co-movement only.
    let fallback = candidates
        .iter()
        .filter(|c| c.symbol_a == anchor || c.symbol_b == anchor)
        .max_by(|a, b| a.correlation.total_cmp(&b.correlation));
    match fallback {
        Some(best) => {
            warn!(anchor = %anchor, "Nothing cointegrated in subset, falling back to correlation");
            Ok(anchored_from(
                best,
                anchor,
                SelectionSource::CorrelationFallback,
            ))
        }
        None => Err(DiscoveryError::NoViablePair {
            candidates: available.len(),
        }),
    }
}

fn selected_from(candidate: &CandidatePair, source: SelectionSource) -> SelectedPair {
    SelectedPair {
        symbol_a: candidate.symbol_a.clone(),
        symbol_b: candidate.symbol_b.clone(),
        correlation: candidate.correlation,
        adf_statistic: candidate.adf_statistic,
        score: candidate.score,
        source,
    }
}

fn anchored_from(candidate: &CandidatePair, anchor: &str, source: SelectionSource) -> SelectedPair {
    let partner = if candidate.symbol_a == anchor {
        candidate.symbol_b.clone()
    } else {
        candidate.symbol_a.clone()
    };
    SelectedPair {
        symbol_a: anchor.to_string(),
        symbol_b: partner,
        correlation: candidate.correlation,
        adf_statistic: candidate.adf_statistic,
        score: candidate.score,
        source,
    }
}
