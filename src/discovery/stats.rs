//! Statistical screens behind pair selection.
//!
//! A candidate pair is judged by two numbers: the Pearson correlation of
//! the raw close series, and the Augmented Dickey-Fuller t-statistic of
//! the OLS-residual spread. A sufficiently negative ADF statistic rejects
//! the unit root, meaning the spread mean-reverts and the pair trades.

/// ADF critical value at 5% significance (MacKinnon, 1994), n > 100.
pub const ADF_CRITICAL_5PCT: f64 = -2.86;

/// ADF critical value at 10% significance, used for the looser
/// anchored-subset screen.
pub const ADF_CRITICAL_10PCT: f64 = -2.57;

/// Minimum observations for a meaningful ADF regression.
pub const MIN_ADF_SAMPLES: usize = 20;

/// Pearson correlation coefficient between two equal-length series.
///
/// Returns None for fewer than two points, zero-variance legs, or a
/// non-finite result.
pub fn correlation(a: &[f64], b: &[f64]) -> Option<f64> {
    if a.len() != b.len() || a.len() < 2 {
        return None;
    }

    let n = a.len() as f64;
    let mean_a = a.iter().sum::<f64>() / n;
    let mean_b = b.iter().sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        covariance += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    if var_a == 0.0 || var_b == 0.0 {
        return None;
    }
    let r = covariance / (var_a.sqrt() * var_b.sqrt());
    r.is_finite().then_some(r)
}

/// Augmented Dickey-Fuller t-statistic for a spread series.
///
/// Regresses the first difference on the lagged level and returns the
/// t-statistic of the slope. More negative means more stationary; compare
/// against [`ADF_CRITICAL_5PCT`] to decide. Returns None when the series
/// is too short or degenerate for the regression.
pub fn adf_statistic(spread: &[f64]) -> Option<f64> {
    if spread.len() < MIN_ADF_SAMPLES {
        return None;
    }

    let n = spread.len() - 1;
    let n_f = n as f64;

    let lag_mean = spread[..n].iter().sum::<f64>() / n_f;
    let diff_mean = spread.windows(2).map(|w| w[1] - w[0]).sum::<f64>() / n_f;

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for i in 0..n {
        let lag_c = spread[i] - lag_mean;
        let diff_c = (spread[i + 1] - spread[i]) - diff_mean;
        numerator += lag_c * diff_c;
        denominator += lag_c * lag_c;
    }
    if denominator.abs() < f64::EPSILON {
        return None;
    }
    let gamma = numerator / denominator;

    let mut sse = 0.0;
    for i in 0..n {
        let predicted = gamma * (spread[i] - lag_mean) + diff_mean;
        let residual = (spread[i + 1] - spread[i]) - predicted;
        sse += residual * residual;
    }
    let mse = sse / (n_f - 1.0);
    let se_gamma = (mse / denominator).sqrt();
    if se_gamma.abs() < f64::EPSILON {
        return None;
    }

    let t = gamma / se_gamma;
    t.is_finite().then_some(t)
}
