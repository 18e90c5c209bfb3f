#![warn(missing_docs)]
//! # pqbench
//!
//! Latency benchmarks for post-quantum primitives.
//!
//! - **Providers** hand out algorithm descriptors: sizes plus entry points for
//!   keygen/encaps/decaps (KEMs) or keygen/sign/verify (signatures)
//! - **The engine** runs untimed setup and warmup, then times each invocation
//!   on a monotonic nanosecond clock
//! - **Statistics** cover mean, median, standard deviation, percentiles and
//!   optional IQR outlier removal
//! - **Reports** are written as JSON, CSV or terminal tables
//!
//! ## Quick Start
//!
//! ```ignore
//! use pqbench::prelude::*;
//!
//! let provider = FipsProvider::new();
//! let session = Session::open(&provider)?;
//! let mlkem = session.create_algorithm("mlkem768")?;
//!
//! let config = BenchmarkConfig { iterations: 500, ..Default::default() };
//! let results = BenchmarkEngine::new().run_algorithm(&mlkem, &config)?;
//! println!("{}", format_human_output(&results));
//! ```

// Re-export core types
pub use pqbench_core::{
    AlgorithmDescriptor, AlgorithmHandle, BenchError, BenchmarkConfig, BenchmarkEngine, ErrorKind,
    Family, KemOperations, KemSizes, MonotonicClock, Operation, OperationResult, PrimitiveError,
    PrimitiveResult, Provider, ProviderRegistry, ResultSet, RunPhase, Scheme, Session,
    SessionState, SignatureOperations, SignatureSizes, TimingSource, architecture_tag,
};

// Re-export the bundled provider
pub use pqbench_fips::FipsProvider;

// Re-export reporting
pub use pqbench_report::{
    OutputFormat, format_human_output, format_size_tables, generate_csv_report,
    generate_json_report, per_algorithm_path, write_csv, write_json,
};

// Re-export stats
pub use pqbench_stats::{SummaryStatistics, compute_summary, remove_outliers};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        BenchmarkConfig, BenchmarkEngine, FipsProvider, Operation, ResultSet, Session,
        format_human_output, write_csv, write_json,
    };
}
