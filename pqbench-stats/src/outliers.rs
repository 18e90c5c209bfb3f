//! Outlier Filtering
//!
//! Tukey fences over the interquartile range: samples outside
//! `[Q1 - k*IQR, Q3 + k*IQR]` are dropped. Bounds are closed, so a sample
//! sitting exactly on a fence is kept.

use crate::MIN_OUTLIER_SAMPLES;
use crate::percentiles::interpolate_sorted;
use tracing::{debug, info, warn};

/// Fences derived from the interquartile range of a sample set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlierBounds {
    /// First quartile (25th percentile)
    pub q1: f64,
    /// Third quartile (75th percentile)
    pub q3: f64,
    /// Interquartile range, `q3 - q1`
    pub iqr: f64,
    /// Lower fence, inclusive
    pub lower: f64,
    /// Upper fence, inclusive
    pub upper: f64,
}

impl OutlierBounds {
    /// Whether `value` lies inside the closed fences
    pub fn contains(&self, value: u64) -> bool {
        let value = value as f64;
        value >= self.lower && value <= self.upper
    }
}

/// Compute IQR fences without touching `samples`.
///
/// Returns `None` when fewer than [`MIN_OUTLIER_SAMPLES`] samples are given.
pub fn compute_iqr_bounds(samples: &[u64], multiplier: f64) -> Option<OutlierBounds> {
    if samples.len() < MIN_OUTLIER_SAMPLES {
        return None;
    }

    let mut sorted = samples.to_vec();
    sorted.sort_unstable();

    let q1 = interpolate_sorted(&sorted, 25.0);
    let q3 = interpolate_sorted(&sorted, 75.0);
    let iqr = q3 - q1;

    Some(OutlierBounds {
        q1,
        q3,
        iqr,
        lower: q1 - multiplier * iqr,
        upper: q3 + multiplier * iqr,
    })
}

/// Drop samples outside the IQR fences, compacting `samples` in place.
///
/// Retained samples keep their relative order. Returns the new length.
/// With fewer than [`MIN_OUTLIER_SAMPLES`] samples this is a no-op.
///
/// # Examples
///
/// ```
/// # use pqbench_stats::remove_outliers;
/// let mut samples = vec![1, 2, 3, 4, 5, 100];
/// assert_eq!(remove_outliers(&mut samples, 1.5), 5);
/// assert_eq!(samples, vec![1, 2, 3, 4, 5]);
/// ```
pub fn remove_outliers(samples: &mut Vec<u64>, multiplier: f64) -> usize {
    let original = samples.len();

    if !(multiplier > 0.0 && multiplier.is_finite()) {
        warn!(multiplier, "Outlier multiplier must be positive, skipping filter");
        return original;
    }

    let Some(bounds) = compute_iqr_bounds(samples, multiplier) else {
        return original;
    };

    debug!(
        "IQR outlier detection: Q1={:.2} Q3={:.2} IQR={:.2} bounds=[{:.2}, {:.2}]",
        bounds.q1, bounds.q3, bounds.iqr, bounds.lower, bounds.upper
    );

    samples.retain(|&sample| bounds.contains(sample));

    let kept = samples.len();
    let removed = original - kept;
    info!(
        "Removed {} outliers ({:.1}%), kept {} values",
        removed,
        removed as f64 / original as f64 * 100.0,
        kept
    );

    kept
}
