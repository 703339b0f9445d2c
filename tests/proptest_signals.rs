//! Property-based tests for the alignment and classification core.
//!
//! These verify the invariants across many random inputs: totality of the
//! classifier, and the length/order/missing-value guarantees of alignment.

use pairsight::signal::{align, classify, RawSeriesBundle};
use pairsight::types::Action;
use proptest::prelude::*;

/// Finite, boundary, and pathological z-scores.
fn any_zscore() -> impl Strategy<Value = f64> {
    prop_oneof![
        -10.0f64..10.0f64,
        Just(2.0),
        Just(-2.0),
        Just(f64::NAN),
        Just(f64::INFINITY),
        Just(f64::NEG_INFINITY),
    ]
}

proptest! {
    /// Classification always returns one of the three defined action pairs.
    #[test]
    fn classify_is_total(z in any_zscore()) {
        let pair = classify(Some(z));
        let allowed = [
            (Action::Hold, Action::Hold),
            (Action::Sell, Action::Buy),
            (Action::Buy, Action::Sell),
        ];
        prop_assert!(allowed.contains(&pair));
    }

    /// Negating the z-score swaps the legs.
    #[test]
    fn classify_is_antisymmetric(z in -10.0f64..10.0f64) {
        let (a, b) = classify(Some(z));
        let (na, nb) = classify(Some(-z));
        prop_assert_eq!((a, b), (nb, na));
    }

    /// The neutral band, boundaries included, always holds.
    #[test]
    fn classify_holds_inside_band(z in -2.0f64..=2.0f64) {
        prop_assert_eq!(classify(Some(z)), (Action::Hold, Action::Hold));
    }

    /// Output length and date order always match the date axis, whatever
    /// the statistic array lengths.
    #[test]
    fn align_preserves_length_and_order(
        dates in prop::collection::vec("[a-z0-9-]{1,10}", 0..30),
        zscore in prop::collection::vec(-5.0f64..5.0f64, 0..40),
        spread in prop::collection::vec(-5.0f64..5.0f64, 0..40),
        price_a in prop::collection::vec(1.0f64..1000.0f64, 0..40),
    ) {
        let bundle = RawSeriesBundle {
            dates: dates.clone(),
            zscore,
            spread,
            price_a,
            ..Default::default()
        };
        let records = align(&bundle);
        prop_assert_eq!(records.len(), dates.len());
        for (record, date) in records.iter().zip(&dates) {
            prop_assert_eq!(&record.date, date);
        }
    }

    /// A value is present exactly when its index is inside the array.
    #[test]
    fn align_marks_out_of_range_as_missing(
        len in 0usize..25,
        zscore in prop::collection::vec(-5.0f64..5.0f64, 0..25),
    ) {
        let bundle = RawSeriesBundle {
            dates: (0..len).map(|i| format!("d{i}")).collect(),
            zscore: zscore.clone(),
            ..Default::default()
        };
        for (i, record) in align(&bundle).iter().enumerate() {
            prop_assert_eq!(record.zscore, zscore.get(i).copied());
            prop_assert_eq!(record.price_a, None);
        }
    }

    /// Aligning the same bundle twice yields value-equal output.
    #[test]
    fn align_is_deterministic(
        dates in prop::collection::vec("[a-z0-9]{1,8}", 0..20),
        zscore in prop::collection::vec(-5.0f64..5.0f64, 0..20),
    ) {
        let bundle = RawSeriesBundle {
            dates,
            zscore,
            ..Default::default()
        };
        prop_assert_eq!(align(&bundle), align(&bundle));
    }

    /// Every aligned record's actions agree with classifying its z-score.
    #[test]
    fn aligned_actions_match_classifier(
        len in 0usize..25,
        zscore in prop::collection::vec(any_zscore(), 0..25),
    ) {
        let bundle = RawSeriesBundle {
            dates: (0..len).map(|i| format!("d{i}")).collect(),
            zscore: zscore.clone(),
            ..Default::default()
        };
        for (i, record) in align(&bundle).iter().enumerate() {
            let expected = classify(zscore.get(i).copied());
            prop_assert_eq!((record.action_a, record.action_b), expected);
        }
    }
}
