//! Summary Statistics
//!
//! Mean, sample standard deviation and the composed per-operation summary.
//! All values are in the unit of the input samples (nanoseconds).

use crate::percentiles::compute_percentiles;

/// Immutable summary of one operation's samples
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SummaryStatistics {
    /// Smallest sample
    pub min: u64,
    /// Largest sample
    pub max: u64,
    /// Arithmetic mean
    pub mean: f64,
    /// 50th percentile
    pub median: f64,
    /// Sample standard deviation (n - 1 divisor)
    pub std_dev: f64,
    /// 95th percentile
    pub p95: f64,
    /// 99th percentile
    pub p99: f64,
    /// Number of samples summarized
    pub sample_count: usize,
}

/// Arithmetic mean; 0 for an empty slice
pub fn compute_mean(samples: &[u64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: u128 = samples.iter().map(|&s| s as u128).sum();
    sum as f64 / samples.len() as f64
}

/// Sample standard deviation using the `n - 1` divisor.
///
/// Pass `Some(mean)` when it is already known; `None` computes it.
/// Fewer than two samples yield 0.
pub fn compute_std_dev(samples: &[u64], mean: Option<f64>) -> f64 {
    if samples.len() < 2 {
        return 0.0;
    }

    let mean = mean.unwrap_or_else(|| compute_mean(samples));
    let sum_sq: f64 = samples
        .iter()
        .map(|&s| {
            let d = s as f64 - mean;
            d * d
        })
        .sum();

    (sum_sq / (samples.len() - 1) as f64).sqrt()
}

/// Summarize `samples`, sorting them in place.
///
/// An empty slice yields an all-zero summary.
pub fn compute_summary(samples: &mut [u64]) -> SummaryStatistics {
    if samples.is_empty() {
        return SummaryStatistics::default();
    }

    let percentiles = compute_percentiles(samples);
    let mean = compute_mean(samples);
    SummaryStatistics {
        min: samples[0],
        max: samples[samples.len() - 1],
        mean,
        median: percentiles.p50,
        std_dev: compute_std_dev(samples, Some(mean)),
        p95: percentiles.p95,
        p99: percentiles.p99,
        sample_count: samples.len(),
    }
}
