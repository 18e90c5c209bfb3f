//! Benchmark configuration

use crate::error::BenchError;
use serde::{Deserialize, Serialize};

/// Default timed invocations per operation
pub const DEFAULT_ITERATIONS: usize = 1000;
/// Default untimed invocations before measurement
pub const DEFAULT_WARMUP_ITERATIONS: usize = 100;
/// Default message signed by `sign` and checked by `verify`
pub const DEFAULT_MESSAGE: &str = "Test message for signing";

/// Options for one benchmark run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    /// Timed invocations per operation, must be > 0
    pub iterations: usize,
    /// Untimed invocations executed first
    pub warmup_iterations: usize,
    /// Apply IQR outlier filtering before summarizing
    pub remove_outliers: bool,
    /// IQR multiplier, must be > 0 when `remove_outliers` is set
    pub outlier_multiplier: f64,
    /// Log a summary line per operation
    pub verbose: bool,
    /// Message used by `sign` and `verify`
    pub message: String,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            warmup_iterations: DEFAULT_WARMUP_ITERATIONS,
            remove_outliers: false,
            outlier_multiplier: pqbench_stats::DEFAULT_OUTLIER_MULTIPLIER,
            verbose: false,
            message: DEFAULT_MESSAGE.to_string(),
        }
    }
}

impl BenchmarkConfig {
    /// Reject configurations the engine cannot run
    pub fn validate(&self) -> Result<(), BenchError> {
        if self.iterations == 0 {
            return Err(BenchError::InvalidConfiguration(
                "iterations must be greater than zero".to_string(),
            ));
        }
        if self.remove_outliers
            && !(self.outlier_multiplier > 0.0 && self.outlier_multiplier.is_finite())
        {
            return Err(BenchError::InvalidConfiguration(format!(
                "outlier multiplier must be a positive number, got {}",
                self.outlier_multiplier
            )));
        }
        Ok(())
    }
}
