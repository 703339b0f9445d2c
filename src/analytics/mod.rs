//! Pair analytics: hedge relationship and rolling statistics.
//!
//! Produces the [`RawSeriesBundle`] consumed by the alignment core from a
//! pair's joined price history. All statistics are plain `f64` loops; NaN
//! values flow downstream unmodified, where alignment and classification
//! resolve them.

pub mod rolling;

use crate::data::PairSeries;
use crate::signal::RawSeriesBundle;
use thiserror::Error;
use tracing::debug;

/// Rolling window used for the spread statistics and correlation.
pub const DEFAULT_WINDOW: usize = 20;

/// Errors raised while deriving pair analytics.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("Insufficient data: expected at least {expected} data points, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    #[error("Degenerate series: {0}")]
    DegenerateSeries(String),
}

/// Derived analytics for one pair: the hedge ratio and the raw statistic
/// bundle ready for alignment.
#[derive(Debug, Clone)]
pub struct PairAnalytics {
    pub hedge_ratio: f64,
    pub bundle: RawSeriesBundle,
}

/// OLS hedge ratio: slope of `y` regressed on `x` with an intercept.
pub fn hedge_ratio(y: &[f64], x: &[f64]) -> Result<f64, AnalyticsError> {
    let n = y.len().min(x.len());
    if n < 2 {
        return Err(AnalyticsError::InsufficientData {
            expected: 2,
            actual: n,
        });
    }

    let mean_x = x[..n].iter().sum::<f64>() / n as f64;
    let mean_y = y[..n].iter().sum::<f64>() / n as f64;

    let mut covariance = 0.0;
    let mut var_x = 0.0;
    for (yi, xi) in y[..n].iter().zip(&x[..n]) {
        let dx = xi - mean_x;
        covariance += dx * (yi - mean_y);
        var_x += dx * dx;
    }

    if var_x == 0.0 {
        return Err(AnalyticsError::DegenerateSeries(
            "independent leg has zero variance".to_string(),
        ));
    }
    Ok(covariance / var_x)
}

/// Spread `y - beta * x`, elementwise.
pub fn spread(y: &[f64], x: &[f64], beta: f64) -> Vec<f64> {
    y.iter().zip(x).map(|(yi, xi)| yi - beta * xi).collect()
}

/// Z-score of the spread against its rolling mean and standard deviation.
///
/// Where the rolling std is NaN or zero the z-score is non-finite; that is
/// intentional and handled by the classifier, never masked here.
pub fn zscore(spread: &[f64], rolling_mean: &[f64], rolling_std: &[f64]) -> Vec<f64> {
    spread
        .iter()
        .zip(rolling_mean)
        .zip(rolling_std)
        .map(|((s, m), sd)| (s - m) / sd)
        .collect()
}

/// Derive the full statistic bundle for a pair.
pub fn build_bundle(series: &PairSeries, window: usize) -> Result<PairAnalytics, AnalyticsError> {
    let beta = hedge_ratio(&series.price_a, &series.price_b)?;
    let spread = spread(&series.price_a, &series.price_b, beta);
    let rolling_mean = rolling::mean(&spread, window);
    let rolling_std = rolling::std_dev(&spread, window);
    let zscore = zscore(&spread, &rolling_mean, &rolling_std);
    let correlation = rolling::correlation(&series.price_a, &series.price_b, window);

    debug!(
        pair = format!("{}/{}", series.symbol_a, series.symbol_b),
        rows = series.len(),
        beta = format!("{:.4}", beta),
        window,
        "Pair analytics derived"
    );

    Ok(PairAnalytics {
        hedge_ratio: beta,
        bundle: RawSeriesBundle {
            dates: series.dates.clone(),
            price_a: series.price_a.clone(),
            price_b: series.price_b.clone(),
            spread,
            rolling_mean,
            correlation,
            zscore,
        },
    })
}
