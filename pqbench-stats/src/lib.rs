#![warn(missing_docs)]
//! pqbench Statistical Engine
//!
//! Pure functions over `u64` nanosecond samples:
//! - Percentiles by linear interpolation between bracketing order statistics
//! - IQR-based outlier filtering
//! - Mean, sample standard deviation and a composed summary
//!
//! Functions that need ordered data sort the caller's slice in place.
//! Callers that care about invocation order must copy first.

mod outliers;
mod percentiles;
mod summary;

pub use outliers::{OutlierBounds, compute_iqr_bounds, remove_outliers};
pub use percentiles::{Percentiles, compute_percentile, compute_percentiles};
pub use summary::{SummaryStatistics, compute_mean, compute_std_dev, compute_summary};

/// Minimum sample count for a meaningful interquartile range
pub const MIN_OUTLIER_SAMPLES: usize = 4;

/// Conventional Tukey fence multiplier
pub const DEFAULT_OUTLIER_MULTIPLIER: f64 = 1.5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(MIN_OUTLIER_SAMPLES, 4);
        assert!((DEFAULT_OUTLIER_MULTIPLIER - 1.5).abs() < f64::EPSILON);
    }
}
