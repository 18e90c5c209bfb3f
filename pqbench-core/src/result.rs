//! Measurement results

use crate::algorithm::{Operation, display_name};
use pqbench_stats::{SummaryStatistics, compute_summary};

/// One operation's samples and their summary
#[derive(Debug, Clone, PartialEq)]
pub struct OperationResult {
    algorithm: String,
    operation: Operation,
    architecture: String,
    samples: Vec<u64>,
    summary: SummaryStatistics,
}

impl OperationResult {
    /// Summarize `samples` (nanoseconds, invocation order).
    ///
    /// The summary is computed on a sorted copy, so `samples()` keeps the
    /// order in which the measurements were taken.
    pub fn from_samples(
        algorithm: impl Into<String>,
        operation: Operation,
        architecture: impl Into<String>,
        samples: Vec<u64>,
    ) -> Self {
        let mut working = samples.clone();
        let summary = compute_summary(&mut working);
        Self {
            algorithm: algorithm.into(),
            operation,
            architecture: architecture.into(),
            samples,
            summary,
        }
    }

    /// Algorithm name
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// Operation measured
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Architecture tag
    pub fn architecture(&self) -> &str {
        &self.architecture
    }

    /// Samples kept after filtering, in invocation order
    pub fn samples(&self) -> &[u64] {
        &self.samples
    }

    /// Summary statistics in nanoseconds
    pub fn summary(&self) -> &SummaryStatistics {
        &self.summary
    }
}

/// All operation results for one algorithm run
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    algorithm: String,
    architecture: String,
    results: Vec<OperationResult>,
}

impl ResultSet {
    /// Assemble a result set
    pub fn new(
        algorithm: impl Into<String>,
        architecture: impl Into<String>,
        results: Vec<OperationResult>,
    ) -> Self {
        Self {
            algorithm: algorithm.into(),
            architecture: architecture.into(),
            results,
        }
    }

    /// Algorithm name
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// Human-readable algorithm name
    pub fn display_name(&self) -> String {
        display_name(&self.algorithm)
    }

    /// Architecture tag
    pub fn architecture(&self) -> &str {
        &self.architecture
    }

    /// Results in run order
    pub fn results(&self) -> &[OperationResult] {
        &self.results
    }

    /// Operations in run order
    pub fn operations(&self) -> Vec<Operation> {
        self.results.iter().map(|r| r.operation).collect()
    }

    /// Number of operation results
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
