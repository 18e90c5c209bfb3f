#![warn(missing_docs)]
//! pqbench Core - Measurement Runtime
//!
//! This crate provides the pieces a benchmark run is made of:
//! - Algorithm descriptors with family-checked operation entry points
//! - The provider contract, with RAII sessions and algorithm handles
//! - A monotonic timing source
//! - The benchmark engine (setup, warmup, measurement, summary)

mod algorithm;
mod buffers;
mod config;
mod engine;
mod error;
mod measure;
mod platform;
mod provider;
mod result;

pub use algorithm::{
    AlgorithmDescriptor, DecapsulateFn, EncapsulateFn, Family, KemOperations, KemSizes, KeygenFn,
    Operation, PrimitiveResult, Scheme, SignFn, SignatureOperations, SignatureSizes, VerifyFn,
    display_name,
};
pub use buffers::{OperationBuffer, acquire, acquire_samples};
pub use config::{BenchmarkConfig, DEFAULT_ITERATIONS, DEFAULT_MESSAGE, DEFAULT_WARMUP_ITERATIONS};
pub use engine::{BenchmarkEngine, RunPhase};
pub use error::{BenchError, ErrorKind, PrimitiveError};
pub use measure::{Instant, MonotonicClock, TimingSource};
pub use platform::architecture_tag;
pub use provider::{AlgorithmHandle, Provider, ProviderRegistry, Session, SessionState};
pub use result::{OperationResult, ResultSet};

/// Result alias used throughout pqbench
pub type Result<T> = std::result::Result<T, BenchError>;
