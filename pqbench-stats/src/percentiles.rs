//! Percentile Computation
//!
//! Uses the zero-indexed rank `p / 100 * (n - 1)` and interpolates linearly
//! between the two order statistics that bracket it.

use tracing::warn;

/// Percentiles reported for every operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Percentiles {
    /// 50th percentile (median)
    pub p50: f64,
    /// 95th percentile
    pub p95: f64,
    /// 99th percentile
    pub p99: f64,
}

/// Compute a single percentile, sorting `samples` in place.
///
/// Returns 0 for an empty slice. A percentile outside `[0, 100]` is an
/// input error: it is logged and yields 0.
///
/// # Examples
///
/// ```
/// # use pqbench_stats::compute_percentile;
/// let mut samples = vec![5, 1, 4, 2, 3];
/// assert_eq!(compute_percentile(&mut samples, 50.0), 3.0);
/// assert_eq!(samples, vec![1, 2, 3, 4, 5]);
/// ```
pub fn compute_percentile(samples: &mut [u64], percentile: f64) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }

    if !(0.0..=100.0).contains(&percentile) {
        warn!(percentile, "Invalid percentile: must be within [0, 100]");
        return 0.0;
    }

    samples.sort_unstable();
    interpolate_sorted(samples, percentile)
}

/// Compute the reported percentiles with a single sort
pub fn compute_percentiles(samples: &mut [u64]) -> Percentiles {
    samples.sort_unstable();
    Percentiles {
        p50: interpolate_sorted(samples, 50.0),
        p95: interpolate_sorted(samples, 95.0),
        p99: interpolate_sorted(samples, 99.0),
    }
}

/// Interpolate on already-sorted data. `percentile` must be in `[0, 100]`.
pub(crate) fn interpolate_sorted(sorted: &[u64], percentile: f64) -> f64 {
    let n = sorted.len();
    match n {
        0 => return 0.0,
        1 => return sorted[0] as f64,
        _ => {}
    }

    let rank = percentile / 100.0 * (n - 1) as f64;
    let lower_idx = (rank.floor() as usize).min(n - 1);
    let upper_idx = (rank.ceil() as usize).min(n - 1);
    let fraction = rank - lower_idx as f64;

    let lower = sorted[lower_idx] as f64;
    let upper = sorted[upper_idx] as f64;
    lower + fraction * (upper - lower)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_to_thousand() -> Vec<u64> {
        (1..=1000).rev().collect()
    }

    #[test]
    fn test_median_odd() {
        let mut samples = vec![3, 1, 5, 2, 4];
        assert!((compute_percentile(&mut samples, 50.0) - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_median_even_interpolates() {
        let mut samples = vec![4, 1, 3, 2];
        assert!((compute_percentile(&mut samples, 50.0) - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_one_to_thousand() {
        let mut samples = one_to_thousand();
        assert!((compute_percentile(&mut samples, 50.0) - 500.5).abs() < 1e-9);
        assert!((compute_percentile(&mut samples, 95.0) - 950.05).abs() < 1e-9);
        assert!((compute_percentile(&mut samples, 99.0) - 990.01).abs() < 1e-9);
    }

    #[test]
    fn test_bounds_are_min_and_max() {
        let mut samples = vec![42, 7, 19, 1000, 3];
        assert!((compute_percentile(&mut samples, 0.0) - 3.0).abs() < f64::EPSILON);
        assert!((compute_percentile(&mut samples, 100.0) - 1000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sorts_in_place() {
        let mut samples = vec![9, 3, 7, 1];
        compute_percentile(&mut samples, 25.0);
        assert_eq!(samples, vec![1, 3, 7, 9]);
    }

    #[test]
    fn test_single_sample() {
        let mut samples = vec![42];
        assert!((compute_percentile(&mut samples, 99.0) - 42.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_samples() {
        let mut samples: Vec<u64> = Vec::new();
        assert!((compute_percentile(&mut samples, 50.0) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_out_of_range_percentile() {
        let mut samples = vec![5, 1, 3];
        assert_eq!(compute_percentile(&mut samples, -1.0), 0.0);
        assert_eq!(compute_percentile(&mut samples, 100.5), 0.0);
        assert_eq!(compute_percentile(&mut samples, f64::NAN), 0.0);
        // Rejected input leaves the data untouched
        assert_eq!(samples, vec![5, 1, 3]);
    }

    #[test]
    fn test_compute_percentiles() {
        let mut samples = one_to_thousand();
        let percentiles = compute_percentiles(&mut samples);

        assert!((percentiles.p50 - 500.5).abs() < 1e-9);
        assert!((percentiles.p95 - 950.05).abs() < 1e-9);
        assert!((percentiles.p99 - 990.01).abs() < 1e-9);
    }
}
