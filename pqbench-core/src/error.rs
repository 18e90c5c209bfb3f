//! Error types shared by the engine, providers and exporters

use crate::algorithm::Operation;
use crate::engine::RunPhase;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while configuring, running or exporting a benchmark
#[derive(Debug, Error)]
pub enum BenchError {
    /// Malformed benchmark configuration
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Descriptor violates its family's contract
    #[error("invalid algorithm '{algorithm}': {reason}")]
    InvalidAlgorithm {
        /// Algorithm name as declared by the descriptor
        algorithm: String,
        /// Which rule was broken
        reason: String,
    },

    /// A working buffer could not be acquired
    #[error("failed to allocate {bytes} bytes for {role}")]
    MemoryAllocation {
        /// Buffer role (public key, ciphertext, samples, ...)
        role: &'static str,
        /// Requested size
        bytes: usize,
    },

    /// Provider has no algorithm by that name
    #[error("algorithm not found: {0}")]
    AlgorithmNotFound(String),

    /// Provider session could not be opened
    #[error("provider '{provider}' failed to initialize: {reason}")]
    ProviderInitFailed {
        /// Provider name
        provider: String,
        /// Failure reported by the provider
        reason: String,
    },

    /// A primitive returned failure during setup or measurement
    #[error("{operation} failed for {algorithm} during {phase}: {reason}")]
    OperationFailed {
        /// Algorithm name
        algorithm: String,
        /// Operation being benchmarked
        operation: Operation,
        /// Phase the failure occurred in
        phase: RunPhase,
        /// 1-based measured iteration, when the failure was timed
        iteration: Option<usize>,
        /// Failure reported by the primitive
        reason: String,
    },

    /// Operation is outside the algorithm's family
    #[error("{algorithm} does not support {operation}")]
    NotSupported {
        /// Algorithm name
        algorithm: String,
        /// Requested operation
        operation: Operation,
    },

    /// Export write failure
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// File being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Call made in a state that does not allow it
    #[error("invalid state: {0}")]
    InvalidState(String),
}

/// Coarse error categories with stable numeric codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad configuration or descriptor
    InvalidParameter,
    /// Buffer acquisition failed
    MemoryAllocation,
    /// Provider session could not be opened
    ProviderInitFailed,
    /// Unknown algorithm
    AlgorithmNotFound,
    /// Primitive reported failure
    OperationFailed,
    /// File I/O failed
    IoFailure,
    /// Misordered call
    InvalidState,
    /// Operation outside the algorithm family
    NotSupported,
}

impl ErrorKind {
    /// Stable numeric code. 0 is reserved for success.
    pub fn code(self) -> i32 {
        match self {
            ErrorKind::InvalidParameter => -1,
            ErrorKind::MemoryAllocation => -2,
            ErrorKind::ProviderInitFailed => -3,
            ErrorKind::AlgorithmNotFound => -4,
            ErrorKind::OperationFailed => -5,
            ErrorKind::IoFailure => -6,
            ErrorKind::InvalidState => -9,
            ErrorKind::NotSupported => -10,
        }
    }

    /// Short human-readable description
    pub fn description(self) -> &'static str {
        match self {
            ErrorKind::InvalidParameter => "Invalid parameter",
            ErrorKind::MemoryAllocation => "Memory allocation failed",
            ErrorKind::ProviderInitFailed => "Provider initialization failed",
            ErrorKind::AlgorithmNotFound => "Algorithm not found",
            ErrorKind::OperationFailed => "Operation failed",
            ErrorKind::IoFailure => "I/O error",
            ErrorKind::InvalidState => "Invalid state",
            ErrorKind::NotSupported => "Operation not supported",
        }
    }
}

impl BenchError {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            BenchError::InvalidConfiguration(_) | BenchError::InvalidAlgorithm { .. } => {
                ErrorKind::InvalidParameter
            }
            BenchError::MemoryAllocation { .. } => ErrorKind::MemoryAllocation,
            BenchError::AlgorithmNotFound(_) => ErrorKind::AlgorithmNotFound,
            BenchError::ProviderInitFailed { .. } => ErrorKind::ProviderInitFailed,
            BenchError::OperationFailed { .. } => ErrorKind::OperationFailed,
            BenchError::NotSupported { .. } => ErrorKind::NotSupported,
            BenchError::Io { .. } => ErrorKind::IoFailure,
            BenchError::InvalidState(_) => ErrorKind::InvalidState,
        }
    }

    /// Wrap an I/O error with the path it concerns
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BenchError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Failure reported by a cryptographic primitive
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct PrimitiveError(pub String);

impl PrimitiveError {
    /// Build from any message
    pub fn new(message: impl Into<String>) -> Self {
        PrimitiveError(message.into())
    }
}

impl From<&str> for PrimitiveError {
    fn from(message: &str) -> Self {
        PrimitiveError(message.to_string())
    }
}
