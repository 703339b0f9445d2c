use crate::types::Action;

/// Entry threshold in spread standard deviations.
pub const ENTRY_THRESHOLD: f64 = 2.0;

/// Classify one date's z-score into actions for both legs.
///
/// A z-score above +2.0 means leg A is overextended against its pair: short
/// A, buy B. Below -2.0 is the symmetric case. A missing or non-finite
/// z-score holds both legs. Comparisons are strict, so exactly +/-2.0 holds.
pub fn classify(zscore: Option<f64>) -> (Action, Action) {
    match zscore {
        Some(z) if z.is_finite() && z > ENTRY_THRESHOLD => (Action::Sell, Action::Buy),
        Some(z) if z.is_finite() && z < -ENTRY_THRESHOLD => (Action::Buy, Action::Sell),
        _ => (Action::Hold, Action::Hold),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_holds() {
        assert_eq!(classify(None), (Action::Hold, Action::Hold));
    }

    #[test]
    fn test_non_finite_holds() {
        assert_eq!(classify(Some(f64::NAN)), (Action::Hold, Action::Hold));
        assert_eq!(classify(Some(f64::INFINITY)), (Action::Hold, Action::Hold));
        assert_eq!(
            classify(Some(f64::NEG_INFINITY)),
            (Action::Hold, Action::Hold)
        );
    }

    #[test]
    fn test_positive_stretch_shorts_leg_a() {
        assert_eq!(classify(Some(2.5)), (Action::Sell, Action::Buy));
        assert_eq!(classify(Some(2.0001)), (Action::Sell, Action::Buy));
    }

    #[test]
    fn test_negative_stretch_buys_leg_a() {
        assert_eq!(classify(Some(-2.5)), (Action::Buy, Action::Sell));
        assert_eq!(classify(Some(-2.0001)), (Action::Buy, Action::Sell));
    }

    #[test]
    fn test_boundary_is_strict() {
        assert_eq!(classify(Some(2.0)), (Action::Hold, Action::Hold));
        assert_eq!(classify(Some(-2.0)), (Action::Hold, Action::Hold));
    }

    #[test]
    fn test_neutral_band_holds() {
        assert_eq!(classify(Some(0.0)), (Action::Hold, Action::Hold));
        assert_eq!(classify(Some(1.99)), (Action::Hold, Action::Hold));
        assert_eq!(classify(Some(-1.99)), (Action::Hold, Action::Hold));
    }
}
