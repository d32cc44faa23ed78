//! Median reduction of trial batches.

use crate::Cell;

/// Median of the `position`-th measurement across all vectors in the batch
/// that report one, rounded to 3 fractional digits.
///
/// Even sample counts take the arithmetic mean of the two central values so
/// the result is deterministic for any trial count. An empty sample set
/// (no trial succeeded, or none reported this position) yields the sentinel.
pub fn median_at(batch: &[Vec<f64>], position: usize) -> Cell {
    let mut samples: Vec<f64> = batch
        .iter()
        .filter_map(|runtimes| runtimes.get(position).copied())
        .collect();

    if samples.is_empty() {
        return Cell::Unmeasured;
    }

    samples.sort_by(|a, b| a.total_cmp(b));
    let mid = samples.len() / 2;
    let median = if samples.len() % 2 == 0 {
        (samples[mid - 1] + samples[mid]) / 2.0
    } else {
        samples[mid]
    };

    Cell::Measured(round3(median))
}

pub fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_single_sample() {
        assert_eq!(median_at(&[vec![5.0]], 0), Cell::Measured(5.0));
    }

    #[test]
    fn test_median_even_count_averages_central_pair() {
        assert_eq!(median_at(&[vec![4.0], vec![6.0]], 0), Cell::Measured(5.0));
    }

    #[test]
    fn test_median_odd_count_takes_central_value() {
        let batch = vec![vec![1.0], vec![9.0], vec![5.0]];
        assert_eq!(median_at(&batch, 0), Cell::Measured(5.0));
    }

    #[test]
    fn test_median_is_order_independent() {
        let batch = vec![vec![3.0], vec![1.0], vec![2.0], vec![4.0]];
        assert_eq!(median_at(&batch, 0), Cell::Measured(2.5));
    }

    #[test]
    fn test_empty_batch_yields_sentinel() {
        assert_eq!(median_at(&[], 0), Cell::Unmeasured);
    }

    #[test]
    fn test_missing_position_yields_sentinel() {
        let batch = vec![vec![1.0, 2.0], vec![1.5]];
        assert_eq!(median_at(&batch, 2), Cell::Unmeasured);
    }

    #[test]
    fn test_short_vectors_are_skipped_not_counted() {
        // only the two full vectors report position 1
        let batch = vec![vec![1.0, 10.0], vec![1.0], vec![1.0, 20.0]];
        assert_eq!(median_at(&batch, 1), Cell::Measured(15.0));
    }

    #[test]
    fn test_median_rounds_to_three_digits() {
        let batch = vec![vec![0.12345], vec![0.12355], vec![0.12349]];
        assert_eq!(median_at(&batch, 0), Cell::Measured(0.123));
    }

    #[test]
    fn test_positions_aggregate_independently() {
        let batch = vec![vec![1.0, 10.0, 100.0], vec![3.0, 30.0, 300.0]];
        assert_eq!(median_at(&batch, 0), Cell::Measured(2.0));
        assert_eq!(median_at(&batch, 1), Cell::Measured(20.0));
        assert_eq!(median_at(&batch, 2), Cell::Measured(200.0));
    }
}
