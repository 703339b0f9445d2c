use super::classify::classify;
use super::{AlignedRecord, RawSeriesBundle};

/// Merge the bundle's series into one record per date.
///
/// Alignment is a positional zip over the date axis: index `i` of every
/// statistic array belongs to `dates[i]`, a read past an array's end is a
/// missing value, and values past the end of the date axis are dropped. The
/// output always has exactly one record per date, in date-axis order.
/// Non-finite values pass through unchanged; classification resolves them.
pub fn align(bundle: &RawSeriesBundle) -> Vec<AlignedRecord> {
    let at = |series: &[f64], i: usize| series.get(i).copied();

    bundle
        .dates
        .iter()
        .enumerate()
        .map(|(i, date)| {
            let zscore = at(&bundle.zscore, i);
            let (action_a, action_b) = classify(zscore);
            AlignedRecord {
                date: date.clone(),
                price_a: at(&bundle.price_a, i),
                price_b: at(&bundle.price_b, i),
                spread: at(&bundle.spread, i),
                rolling_mean: at(&bundle.rolling_mean, i),
                correlation: at(&bundle.correlation, i),
                zscore,
                action_a,
                action_b,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Action;

    fn dates(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_length_and_order_match_dates() {
        let bundle = RawSeriesBundle {
            dates: dates(&["d1", "d2", "d3"]),
            price_a: vec![10.0, 11.0, 12.0],
            zscore: vec![0.1, 0.2, 0.3],
            ..Default::default()
        };

        let records = align(&bundle);
        assert_eq!(records.len(), 3);
        for (record, date) in records.iter().zip(&bundle.dates) {
            assert_eq!(&record.date, date);
        }
    }

    #[test]
    fn test_short_array_is_missing_past_its_length() {
        let bundle = RawSeriesBundle {
            dates: dates(&["d1", "d2", "d3"]),
            zscore: vec![1.0],
            ..Default::default()
        };

        let records = align(&bundle);
        assert_eq!(records[0].zscore, Some(1.0));
        assert_eq!(records[1].zscore, None);
        assert_eq!(records[2].zscore, None);
        // Entirely absent series are missing everywhere.
        assert!(records.iter().all(|r| r.spread.is_none()));
    }

    #[test]
    fn test_overlong_array_is_truncated() {
        let bundle = RawSeriesBundle {
            dates: dates(&["d1"]),
            zscore: vec![0.5, 9.9, 9.9],
            ..Default::default()
        };

        let records = align(&bundle);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].zscore, Some(0.5));
    }

    #[test]
    fn test_empty_dates_yields_empty_output() {
        let bundle = RawSeriesBundle {
            zscore: vec![1.0, 2.0],
            ..Default::default()
        };
        assert!(align(&bundle).is_empty());
    }

    #[test]
    fn test_non_finite_values_pass_through() {
        let bundle = RawSeriesBundle {
            dates: dates(&["d1", "d2"]),
            zscore: vec![f64::NAN, f64::INFINITY],
            ..Default::default()
        };

        let records = align(&bundle);
        assert!(records[0].zscore.unwrap().is_nan());
        assert_eq!(records[1].zscore, Some(f64::INFINITY));
        // Non-finite z-scores classify as HOLD on both legs.
        assert_eq!(records[0].action_a, Action::Hold);
        assert_eq!(records[1].action_a, Action::Hold);
    }

    #[test]
    fn test_align_is_deterministic() {
        let bundle = RawSeriesBundle {
            dates: dates(&["d1", "d2", "d3"]),
            price_a: vec![10.0, 11.0],
            price_b: vec![20.0],
            zscore: vec![2.5, -2.5, 0.0],
            ..Default::default()
        };
        assert_eq!(align(&bundle), align(&bundle));
    }

    #[test]
    fn test_end_to_end_classification() {
        let bundle = RawSeriesBundle {
            dates: dates(&["2024-01-01", "2024-01-02", "2024-01-03"]),
            zscore: vec![2.5, -2.5, 0.0],
            ..Default::default()
        };

        let actions: Vec<_> = align(&bundle)
            .iter()
            .map(|r| (r.action_a, r.action_b))
            .collect();
        assert_eq!(
            actions,
            vec![
                (Action::Sell, Action::Buy),
                (Action::Buy, Action::Sell),
                (Action::Hold, Action::Hold),
            ]
        );
    }
}
