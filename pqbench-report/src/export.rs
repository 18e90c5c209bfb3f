//! JSON and CSV export of a result set
//!
//! Timing fields are microseconds rounded to two decimals.

use pqbench_core::{BenchError, OperationResult, ResultSet};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// CSV header row
pub const CSV_HEADER: [&str; 11] = [
    "algorithm",
    "architecture",
    "operation",
    "num_samples",
    "mean_us",
    "median_us",
    "stddev_us",
    "min_us",
    "max_us",
    "p95_us",
    "p99_us",
];

/// JSON document for one algorithm run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSetReport {
    /// Algorithm name
    pub algorithm: String,
    /// Architecture tag
    pub architecture: String,
    /// One entry per operation, in run order
    pub results: Vec<OperationReport>,
}

/// Per-operation entry of [`ResultSetReport`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationReport {
    /// keygen, encaps, decaps, sign or verify
    pub operation: String,
    /// Samples kept after filtering
    pub num_samples: usize,
    /// Mean (µs)
    pub mean_us: f64,
    /// Median (µs)
    pub median_us: f64,
    /// Sample standard deviation (µs)
    pub stddev_us: f64,
    /// Fastest sample (µs)
    pub min_us: f64,
    /// Slowest sample (µs)
    pub max_us: f64,
    /// 95th percentile (µs)
    pub p95_us: f64,
    /// 99th percentile (µs)
    pub p99_us: f64,
}

fn micros(nanos: f64) -> f64 {
    (nanos / 10.0).round() / 100.0
}

impl From<&OperationResult> for OperationReport {
    fn from(result: &OperationResult) -> Self {
        let s = result.summary();
        Self {
            operation: result.operation().as_str().to_string(),
            num_samples: s.sample_count,
            mean_us: micros(s.mean),
            median_us: micros(s.median),
            stddev_us: micros(s.std_dev),
            min_us: micros(s.min as f64),
            max_us: micros(s.max as f64),
            p95_us: micros(s.p95),
            p99_us: micros(s.p99),
        }
    }
}

impl From<&ResultSet> for ResultSetReport {
    fn from(set: &ResultSet) -> Self {
        Self {
            algorithm: set.algorithm().to_string(),
            architecture: set.architecture().to_string(),
            results: set.results().iter().map(OperationReport::from).collect(),
        }
    }
}

/// Generate a prettified JSON document for `set`
pub fn generate_json_report(set: &ResultSet) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&ResultSetReport::from(set))
}

/// Generate CSV text (header plus one row per operation) for `set`
pub fn generate_csv_report(set: &ResultSet) -> Result<String, csv::Error> {
    let mut wtr = csv::WriterBuilder::new().from_writer(Vec::new());
    wtr.write_record(CSV_HEADER)?;

    // Same rounded values as the JSON report, printed with two decimals
    let report = ResultSetReport::from(set);
    for op in &report.results {
        let us = |value: f64| format!("{:.2}", value);
        wtr.write_record([
            report.algorithm.clone(),
            report.architecture.clone(),
            op.operation.clone(),
            op.num_samples.to_string(),
            us(op.mean_us),
            us(op.median_us),
            us(op.stddev_us),
            us(op.min_us),
            us(op.max_us),
            us(op.p95_us),
            us(op.p99_us),
        ])?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Write the JSON document for `set` to `path`
pub fn write_json(set: &ResultSet, path: &Path) -> Result<(), BenchError> {
    let json = generate_json_report(set).map_err(|e| BenchError::io(path, e.into()))?;
    std::fs::write(path, json + "\n").map_err(|e| BenchError::io(path, e))?;
    info!("Wrote JSON results to {}", path.display());
    Ok(())
}

/// Write the CSV rows for `set` to `path`
pub fn write_csv(set: &ResultSet, path: &Path) -> Result<(), BenchError> {
    let csv = generate_csv_report(set).map_err(|e| BenchError::io(path, e.into()))?;
    std::fs::write(path, csv).map_err(|e| BenchError::io(path, e))?;
    info!("Wrote CSV results to {}", path.display());
    Ok(())
}
