//! Configuration loading from pqbench.toml
//!
//! pqbench configuration can be specified in a `pqbench.toml` file in the project root.
//! The configuration is automatically discovered by walking up from the current directory.

use pqbench_core::{BenchmarkConfig, DEFAULT_ITERATIONS, DEFAULT_MESSAGE, DEFAULT_WARMUP_ITERATIONS};
use pqbench_report::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name searched for by [`PqBenchConfig::discover`]
pub const CONFIG_FILE_NAME: &str = "pqbench.toml";

/// pqbench configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PqBenchConfig {
    /// Runner configuration
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
    /// Provider selection
    #[serde(default)]
    pub provider: ProviderConfig,
}

/// Runner configuration for benchmark execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Timed invocations per operation
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    /// Untimed invocations before measurement
    #[serde(default = "default_warmup_iterations")]
    pub warmup_iterations: usize,
    /// Apply IQR outlier filtering
    #[serde(default)]
    pub remove_outliers: bool,
    /// IQR multiplier
    #[serde(default = "default_outlier_multiplier")]
    pub outlier_multiplier: f64,
    /// Message signed during signature benchmarks
    #[serde(default = "default_message")]
    pub message: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            warmup_iterations: default_warmup_iterations(),
            remove_outliers: false,
            outlier_multiplier: default_outlier_multiplier(),
            message: default_message(),
        }
    }
}

fn default_iterations() -> usize {
    DEFAULT_ITERATIONS
}
fn default_warmup_iterations() -> usize {
    DEFAULT_WARMUP_ITERATIONS
}
fn default_outlier_multiplier() -> f64 {
    1.5
}
fn default_message() -> String {
    DEFAULT_MESSAGE.to_string()
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format: "human", "json", "csv" or "both"
    #[serde(default = "default_format")]
    pub format: String,
    /// Output directory for result files
    #[serde(default = "default_output_dir")]
    pub directory: String,
    /// JSON file name, prefixed per algorithm
    #[serde(default = "default_json_name")]
    pub json: String,
    /// CSV file name, prefixed per algorithm
    #[serde(default = "default_csv_name")]
    pub csv: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            directory: default_output_dir(),
            json: default_json_name(),
            csv: default_csv_name(),
        }
    }
}

fn default_format() -> String {
    "human".to_string()
}
fn default_output_dir() -> String {
    "results".to_string()
}
fn default_json_name() -> String {
    "results.json".to_string()
}
fn default_csv_name() -> String {
    "results.csv".to_string()
}

/// Provider selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Registered provider name
    #[serde(default = "default_provider")]
    pub name: String,
    /// Algorithms to run; empty means everything the provider lists
    #[serde(default)]
    pub algorithms: Vec<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: default_provider(),
            algorithms: Vec::new(),
        }
    }
}

fn default_provider() -> String {
    pqbench_fips::PROVIDER_NAME.to_string()
}

impl PqBenchConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Self> {
        let dir = std::env::current_dir().ok()?;
        Self::discover_from(dir)
    }

    /// Walk up from `dir` looking for `pqbench.toml`
    pub fn discover_from(mut dir: PathBuf) -> Option<Self> {
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Self::load(&config_path).ok();
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Engine options from the `[runner]` section
    pub fn benchmark_config(&self) -> BenchmarkConfig {
        BenchmarkConfig {
            iterations: self.runner.iterations,
            warmup_iterations: self.runner.warmup_iterations,
            remove_outliers: self.runner.remove_outliers,
            outlier_multiplier: self.runner.outlier_multiplier,
            verbose: false,
            message: self.runner.message.clone(),
        }
    }

    /// Parsed output format; unknown values fall back to human output
    pub fn output_format(&self) -> OutputFormat {
        self.output.format.parse().unwrap_or_default()
    }

    /// JSON target when the configured format writes JSON
    pub fn json_path(&self) -> Option<PathBuf> {
        self.output_format()
            .writes_json()
            .then(|| Path::new(&self.output.directory).join(&self.output.json))
    }

    /// CSV target when the configured format writes CSV
    pub fn csv_path(&self) -> Option<PathBuf> {
        self.output_format()
            .writes_csv()
            .then(|| Path::new(&self.output.directory).join(&self.output.csv))
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# pqbench Configuration

[runner]
# Timed invocations per operation
iterations = 1000
# Untimed invocations before measurement
warmup_iterations = 100
# Drop samples outside [Q1 - k*IQR, Q3 + k*IQR]
remove_outliers = false
# IQR multiplier k
outlier_multiplier = 1.5
# Message signed by ML-DSA benchmarks
message = "Test message for signing"

[output]
# Output format: human, json, csv, both
format = "human"
# Output directory for result files
directory = "results"
# File names, prefixed with the algorithm (mlkem512_results.json, ...)
json = "results.json"
csv = "results.csv"

[provider]
# Registered provider
name = "fips"
# Algorithms to run (empty = all the provider offers)
# algorithms = ["mlkem768", "mldsa65"]
algorithms = []
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PqBenchConfig::default();
        assert_eq!(config.runner.iterations, 1000);
        assert_eq!(config.runner.warmup_iterations, 100);
        assert!(!config.runner.remove_outliers);
        assert_eq!(config.provider.name, "fips");
        assert_eq!(config.output_format(), OutputFormat::Human);
        assert!(config.json_path().is_none());
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
            [runner]
            iterations = 250
            remove_outliers = true

            [output]
            format = "both"
            directory = "out"
        "#;

        let config: PqBenchConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.runner.iterations, 250);
        assert!(config.runner.remove_outliers);
        // Defaults should still apply
        assert_eq!(config.runner.warmup_iterations, 100);
        assert_eq!(config.json_path(), Some(PathBuf::from("out/results.json")));
        assert_eq!(config.csv_path(), Some(PathBuf::from("out/results.csv")));

        let bench = config.benchmark_config();
        assert_eq!(bench.iterations, 250);
        assert!(bench.remove_outliers);
        assert_eq!(bench.message, "Test message for signing");
    }

    #[test]
    fn test_default_toml_parses() {
        let config: PqBenchConfig = toml::from_str(&PqBenchConfig::default_toml()).unwrap();
        assert_eq!(config.runner.iterations, 1000);
        assert!((config.runner.outlier_multiplier - 1.5).abs() < f64::EPSILON);
        assert!(config.provider.algorithms.is_empty());
        assert_eq!(config.output.directory, "results");
    }

    #[test]
    fn test_discover_walks_up() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(
            root.path().join(CONFIG_FILE_NAME),
            "[runner]\niterations = 7\n",
        )
        .unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let config = PqBenchConfig::discover_from(nested).unwrap();
        assert_eq!(config.runner.iterations, 7);
    }
}
