#![warn(missing_docs)]
//! pqbench CLI Library
//!
//! This module provides the CLI infrastructure for the benchmark binaries.
//! `pqbench` runs every algorithm the provider offers; `bench-mlkem` and
//! `bench-mldsa` call [`run_family`] to preselect one family.
//!
//! # Example
//!
//! ```ignore
//! fn main() -> anyhow::Result<()> {
//!     pqbench_cli::run_family(pqbench_core::Family::KeyEncapsulation)
//! }
//! ```

mod config;
mod driver;

pub use config::*;
pub use driver::{RunPlan, RunSummary, run_plan, select_algorithms};

use anyhow::{Context, anyhow};
use clap::{Args, Parser, Subcommand};
use pqbench_core::{BenchmarkConfig, Family, MonotonicClock, ProviderRegistry, Scheme, Session};
use pqbench_fips::FipsProvider;
use pqbench_report::{
    DsaSizeEntry, KemSizeEntry, SizeReport, format_size_tables, per_algorithm_path,
    write_size_report_csv, write_size_report_json,
};
use regex::Regex;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// pqbench CLI arguments
#[derive(Parser, Debug)]
#[command(name = "pqbench")]
#[command(author, version, about = "pqbench - post-quantum primitive benchmarks")]
pub struct Cli {
    /// Optional subcommand (Run, List, Sizes, Init); defaults to Run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Run options, also accepted after `run`
    #[command(flatten)]
    pub run: RunArgs,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write JSON results (one file per algorithm, prefixed with its name)
    #[arg(short, long, global = true)]
    pub json: Option<PathBuf>,

    /// Write CSV results (one file per algorithm, prefixed with its name)
    #[arg(short, long, global = true)]
    pub csv: Option<PathBuf>,

    /// Configuration file (default: discover pqbench.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Only run algorithms whose name matches this regex
    #[arg(long, global = true)]
    pub filter: Option<String>,

    /// Provider to load algorithms from
    #[arg(long, global = true)]
    pub provider: Option<String>,
}

/// Options controlling a benchmark run
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct RunArgs {
    /// Algorithms to benchmark (default: everything the provider offers)
    pub algorithms: Vec<String>,

    /// Timed iterations per operation
    #[arg(short, long)]
    pub iterations: Option<usize>,

    /// Warmup iterations per operation
    #[arg(short, long)]
    pub warmup: Option<usize>,

    /// Remove IQR outliers before summarizing
    #[arg(short = 'r', long)]
    pub remove_outliers: bool,

    /// IQR multiplier used with --remove-outliers
    #[arg(short = 'm', long)]
    pub outlier_multiplier: Option<f64>,

    /// Message signed by signature benchmarks
    #[arg(long)]
    pub message: Option<String>,
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Run benchmarks (default)
    Run(RunArgs),
    /// List available algorithms with their sizes
    List,
    /// Report key, ciphertext and signature sizes
    Sizes {
        /// Message length recorded for signature schemes
        #[arg(long, default_value_t = 32)]
        message_size: usize,
        /// Skip the terminal table
        #[arg(long)]
        no_table: bool,
    },
    /// Print a default pqbench.toml
    Init,
}

impl Cli {
    /// Run options from `run` when given, otherwise from the top level
    pub fn run_args(&self) -> &RunArgs {
        match &self.command {
            Some(Commands::Run(args)) => args,
            _ => &self.run,
        }
    }
}

/// Run the pqbench CLI with the process arguments
pub fn run() -> anyhow::Result<()> {
    run_with_cli(Cli::parse(), None)
}

/// Run the CLI with one algorithm family preselected
pub fn run_family(family: Family) -> anyhow::Result<()> {
    run_with_cli(Cli::parse(), Some(family))
}

/// Run the pqbench CLI with pre-parsed arguments.
///
/// Exits the process with status 1 when any benchmark failed.
pub fn run_with_cli(cli: Cli, family: Option<Family>) -> anyhow::Result<()> {
    if cli.command == Some(Commands::Init) {
        print!("{}", PqBenchConfig::default_toml());
        return Ok(());
    }

    // Initialize logging; RUST_LOG takes precedence
    let default_filter = if cli.verbose {
        "pqbench=debug"
    } else {
        "pqbench=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    // Discover pqbench.toml configuration (CLI flags override)
    let config = match &cli.config {
        Some(path) => PqBenchConfig::load(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => PqBenchConfig::discover().unwrap_or_default(),
    };

    let registry = default_registry()?;
    let provider_name = cli.provider.as_deref().unwrap_or(&config.provider.name);
    let provider = registry.find(provider_name).ok_or_else(|| {
        anyhow!(
            "Unknown provider '{}'. Available: {}",
            provider_name,
            registry.names().join(", ")
        )
    })?;

    let failed = {
        let session = Session::open(provider)?;
        match &cli.command {
            Some(Commands::List) => {
                list_algorithms(&session, family);
                0
            }
            Some(Commands::Sizes {
                message_size,
                no_table,
            }) => {
                report_sizes(&cli, &session, family, *message_size, !*no_table)?;
                0
            }
            Some(Commands::Run(_)) | Some(Commands::Init) | None => {
                run_benchmarks(&cli, &config, &session, family)?.failed()
            }
        }
    };

    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

/// Registry holding every built-in provider
pub fn default_registry() -> anyhow::Result<ProviderRegistry> {
    let mut registry = ProviderRegistry::new();
    registry.register(Box::new(FipsProvider::new()))?;
    Ok(registry)
}

/// Layer engine options: pqbench.toml, then CLI flags
pub fn resolve_benchmark_config(cli: &Cli, config: &PqBenchConfig) -> BenchmarkConfig {
    let args = cli.run_args();
    let mut bench = config.benchmark_config();
    if let Some(iterations) = args.iterations {
        bench.iterations = iterations;
    }
    if let Some(warmup) = args.warmup {
        bench.warmup_iterations = warmup;
    }
    if args.remove_outliers {
        bench.remove_outliers = true;
    }
    if let Some(multiplier) = args.outlier_multiplier {
        bench.outlier_multiplier = multiplier;
    }
    if let Some(message) = &args.message {
        bench.message = message.clone();
    }
    bench.verbose = cli.verbose;
    bench
}

fn compile_filter(cli: &Cli) -> anyhow::Result<Option<Regex>> {
    cli.filter
        .as_deref()
        .map(|pattern| Regex::new(pattern).with_context(|| format!("Invalid filter: {}", pattern)))
        .transpose()
}

fn run_benchmarks(
    cli: &Cli,
    config: &PqBenchConfig,
    session: &Session<'_>,
    family: Option<Family>,
) -> anyhow::Result<RunSummary> {
    let bench = resolve_benchmark_config(cli, config);
    bench.validate()?;

    let filter = compile_filter(cli)?;
    let algorithms = select_algorithms(
        session,
        &cli.run_args().algorithms,
        &config.provider.algorithms,
        family,
        filter.as_ref(),
    );
    if algorithms.is_empty() {
        println!("No algorithms selected.");
        return Ok(RunSummary::default());
    }

    let json = cli.json.clone().or_else(|| config.json_path());
    let csv = cli.csv.clone().or_else(|| config.csv_path());
    for path in json.iter().chain(csv.iter()) {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
    }

    println!(
        "Running {} algorithm(s) with {} iterations ({} warmup) on {}",
        algorithms.len(),
        bench.iterations,
        bench.warmup_iterations,
        pqbench_core::architecture_tag()
    );
    debug!("Clock resolution: {} ns", MonotonicClock.resolution_ns());

    let plan = RunPlan {
        algorithms,
        config: bench,
        json,
        csv,
        print_tables: true,
    };
    Ok(run_plan(session, &plan))
}

fn list_algorithms(session: &Session<'_>, family: Option<Family>) {
    let provider = session.provider();
    println!("pqbench algorithms ({} {}):", provider.name(), provider.version());

    let mut total = 0;
    for name in session.list_algorithms() {
        let Ok(handle) = session.create_algorithm(&name) else {
            println!("├── {} (unavailable)", name);
            continue;
        };
        if family.is_some_and(|f| f != handle.family()) {
            continue;
        }
        let sizes = match handle.scheme() {
            Scheme::KeyEncapsulation { sizes, .. } => format!(
                "pk={} sk={} ct={} ss={}",
                sizes.public_key, sizes.secret_key, sizes.ciphertext, sizes.shared_secret
            ),
            Scheme::Signature { sizes, .. } => format!(
                "pk={} sk={} sig={}",
                sizes.public_key, sizes.secret_key, sizes.signature
            ),
        };
        println!(
            "├── {:<10} {:<12} {:<9} {}",
            name,
            handle.display_name(),
            handle.family().as_str(),
            sizes
        );
        total += 1;
    }

    println!("{} algorithms found.", total);
}

fn report_sizes(
    cli: &Cli,
    session: &Session<'_>,
    family: Option<Family>,
    message_size: usize,
    print_table: bool,
) -> anyhow::Result<()> {
    let filter = compile_filter(cli)?;
    let names = select_algorithms(session, &cli.run.algorithms, &[], family, filter.as_ref());

    let mut kem = Vec::new();
    let mut dsa = Vec::new();
    for name in &names {
        let handle = session.create_algorithm(name)?;
        if let Some(entry) = KemSizeEntry::from_descriptor(&handle) {
            kem.push(entry);
        } else if let Some(entry) = DsaSizeEntry::from_descriptor(&handle, message_size) {
            dsa.push(entry);
        }
    }

    if print_table {
        print!("{}", format_size_tables(&kem, &dsa));
    }

    let kem = SizeReport::kem(kem);
    let dsa = SizeReport::dsa(dsa);
    if let Some(base) = &cli.json {
        if !kem.is_empty() {
            write_size_report_json(&kem, &per_algorithm_path(base, "kem"))?;
        }
        if !dsa.is_empty() {
            write_size_report_json(&dsa, &per_algorithm_path(base, "dsa"))?;
        }
    }
    if let Some(base) = &cli.csv {
        if !kem.is_empty() {
            write_size_report_csv(&kem, &per_algorithm_path(base, "kem"))?;
        }
        if !dsa.is_empty() {
            write_size_report_csv(&dsa, &per_algorithm_path(base, "dsa"))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "pqbench", "-i", "500", "-w", "10", "-r", "-m", "3.0", "-v", "-j", "out.json",
            "mlkem768",
        ])
        .unwrap();

        assert_eq!(cli.run.iterations, Some(500));
        assert_eq!(cli.run.warmup, Some(10));
        assert!(cli.run.remove_outliers);
        assert_eq!(cli.run.outlier_multiplier, Some(3.0));
        assert!(cli.verbose);
        assert_eq!(cli.json, Some(PathBuf::from("out.json")));
        assert_eq!(cli.run.algorithms, vec!["mlkem768"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_subcommands() {
        let cli = Cli::try_parse_from(["pqbench", "sizes", "--message-size", "1024"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Sizes {
                message_size: 1024,
                no_table: false
            })
        );

        let cli = Cli::try_parse_from(["pqbench", "list"]).unwrap();
        assert_eq!(cli.command, Some(Commands::List));
    }

    #[test]
    fn test_run_subcommand_accepts_run_options() {
        let cli = Cli::try_parse_from(["pqbench", "run", "-i", "10", "-w", "3", "-r", "mlkem512"])
            .unwrap();
        let Some(Commands::Run(args)) = &cli.command else {
            panic!("expected run subcommand");
        };
        assert_eq!(args.algorithms, vec!["mlkem512"]);
        assert_eq!(cli.run_args(), args);

        let bench = resolve_benchmark_config(&cli, &PqBenchConfig::default());
        assert_eq!(bench.iterations, 10);
        assert_eq!(bench.warmup_iterations, 3);
        assert!(bench.remove_outliers);

        let top_level = Cli::try_parse_from(["pqbench", "-i", "10", "mlkem512"]).unwrap();
        assert_eq!(top_level.run_args().iterations, Some(10));
        assert_eq!(top_level.run_args().algorithms, vec!["mlkem512"]);
    }

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::try_parse_from(["pqbench", "-i", "42", "-r"]).unwrap();
        let mut config = PqBenchConfig::default();
        config.runner.warmup_iterations = 7;
        config.runner.outlier_multiplier = 2.0;

        let bench = resolve_benchmark_config(&cli, &config);
        assert_eq!(bench.iterations, 42);
        assert_eq!(bench.warmup_iterations, 7);
        assert!(bench.remove_outliers);
        assert!((bench.outlier_multiplier - 2.0).abs() < f64::EPSILON);
        assert!(!bench.verbose);
    }

    #[test]
    fn test_default_registry() {
        let registry = default_registry().unwrap();
        assert_eq!(registry.names(), vec!["fips"]);
        assert!(registry.find("fips").is_some());
    }

    #[test]
    fn test_invalid_filter_rejected() {
        let cli = Cli::try_parse_from(["pqbench", "--filter", "("]).unwrap();
        assert!(compile_filter(&cli).is_err());
    }

    #[test]
    fn test_size_report_files() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("sizes.json");
        let csv = dir.path().join("sizes.csv");
        let cli = Cli::try_parse_from([
            "pqbench".into(),
            "sizes".into(),
            "-j".into(),
            json.clone().into_os_string(),
            "-c".into(),
            csv.clone().into_os_string(),
        ])
        .unwrap();

        let provider = FipsProvider::new();
        let session = Session::open(&provider).unwrap();
        report_sizes(&cli, &session, None, 32, false).unwrap();

        assert!(dir.path().join("kem_sizes.json").exists());
        assert!(dir.path().join("dsa_sizes.json").exists());
        let kem_csv = std::fs::read_to_string(dir.path().join("kem_sizes.csv")).unwrap();
        assert_eq!(kem_csv.lines().count(), 4);
        assert!(kem_csv.contains("ML-KEM,1024,1568,3168,1568,32"));
    }
}
