//! Benchmark Driver
//!
//! Runs the selected algorithms one after another. A failing algorithm is
//! recorded and the driver moves on to the next one.

use indicatif::{ProgressBar, ProgressStyle};
use pqbench_core::{
    AlgorithmDescriptor, BenchError, BenchmarkConfig, BenchmarkEngine, Family, ResultSet, Scheme,
    Session,
};
use pqbench_report::{format_human_output, per_algorithm_path, write_csv, write_json};
use regex::Regex;
use std::path::PathBuf;
use tracing::{error, info};

/// What to run and where to write it
#[derive(Debug, Clone)]
pub struct RunPlan {
    /// Algorithm names, in run order
    pub algorithms: Vec<String>,
    /// Engine options
    pub config: BenchmarkConfig,
    /// JSON base path, prefixed per algorithm
    pub json: Option<PathBuf>,
    /// CSV base path, prefixed per algorithm
    pub csv: Option<PathBuf>,
    /// Print a result table after each algorithm
    pub print_tables: bool,
}

/// Outcome of a driver run
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Result sets of the algorithms that completed
    pub completed: Vec<ResultSet>,
    /// Algorithms that failed, with the error that stopped them
    pub failures: Vec<(String, BenchError)>,
}

impl RunSummary {
    /// Number of failed algorithms
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Every algorithm completed
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Pick the algorithms to run.
///
/// Explicit names win, then configured names, then everything the session
/// lists (narrowed to `family` when given). The regex filter applies last.
pub fn select_algorithms(
    session: &Session<'_>,
    requested: &[String],
    configured: &[String],
    family: Option<Family>,
    filter: Option<&Regex>,
) -> Vec<String> {
    let mut names = if !requested.is_empty() {
        requested.to_vec()
    } else {
        let mut names = if configured.is_empty() {
            session.list_algorithms()
        } else {
            configured.to_vec()
        };
        if let Some(family) = family {
            names.retain(|name| match session.create_algorithm(name) {
                Ok(handle) => handle.family() == family,
                // Unknown names stay so the run reports them
                Err(_) => true,
            });
        }
        names
    };

    if let Some(re) = filter {
        names.retain(|name| re.is_match(name));
    }
    names
}

/// Benchmark every algorithm in `plan` within `session`
pub fn run_plan(session: &Session<'_>, plan: &RunPlan) -> RunSummary {
    let mut engine = BenchmarkEngine::new();
    let mut summary = RunSummary::default();

    let pb = ProgressBar::new(plan.algorithms.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    for name in &plan.algorithms {
        pb.set_message(name.clone());
        match benchmark_algorithm(session, &mut engine, name, plan, &pb) {
            Ok(set) => summary.completed.push(set),
            Err(err) => {
                error!("Benchmark failed for {}: {}", name, err);
                summary.failures.push((name.clone(), err));
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    if summary.is_success() {
        info!("All benchmarks completed successfully");
    } else {
        error!("{} benchmark(s) failed", summary.failed());
    }
    summary
}

fn benchmark_algorithm(
    session: &Session<'_>,
    engine: &mut BenchmarkEngine,
    name: &str,
    plan: &RunPlan,
    pb: &ProgressBar,
) -> Result<ResultSet, BenchError> {
    info!("Starting benchmark: {}", name);
    let handle = session.create_algorithm(name)?;
    log_sizes(&handle);

    let set = engine.run_algorithm(&handle, &plan.config)?;

    if plan.print_tables {
        pb.suspend(|| print!("{}", format_human_output(&set)));
    }

    // Export failures are logged; the benchmark itself succeeded
    if let Some(base) = &plan.json {
        let path = per_algorithm_path(base, handle.name());
        if let Err(err) = write_json(&set, &path) {
            error!("Failed to write JSON results: {}", err);
        }
    }
    if let Some(base) = &plan.csv {
        let path = per_algorithm_path(base, handle.name());
        if let Err(err) = write_csv(&set, &path) {
            error!("Failed to write CSV results: {}", err);
        }
    }

    Ok(set)
}

fn log_sizes(descriptor: &AlgorithmDescriptor) {
    info!("Algorithm: {}", descriptor.display_name());
    info!("Public key size: {} bytes", descriptor.public_key_len());
    info!("Secret key size: {} bytes", descriptor.secret_key_len());
    match descriptor.scheme() {
        Scheme::KeyEncapsulation { sizes, .. } => {
            info!("Ciphertext size: {} bytes", sizes.ciphertext);
            info!("Shared secret size: {} bytes", sizes.shared_secret);
        }
        Scheme::Signature { sizes, .. } => {
            info!("Signature size: {} bytes", sizes.signature);
        }
    }
}
