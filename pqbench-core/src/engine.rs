//! Benchmark Engine
//!
//! Runs one operation (setup, warmup, timed measurement, summary) or every
//! operation of an algorithm in family order. Setup and warmup are untimed.
//! Any failure during setup or measurement aborts the run and discards the
//! samples collected so far; working buffers are released on every path.

use crate::algorithm::{
    AlgorithmDescriptor, KemOperations, KemSizes, Operation, PrimitiveResult, Scheme,
    SignatureOperations, SignatureSizes,
};
use crate::buffers::{acquire, acquire_samples};
use crate::config::BenchmarkConfig;
use crate::error::{BenchError, PrimitiveError};
use crate::measure::{MonotonicClock, TimingSource};
use crate::platform::architecture_tag;
use crate::result::{OperationResult, ResultSet};
use pqbench_stats::remove_outliers;
use std::fmt;
use std::hint::black_box;
use tracing::{debug, error, info, trace};

/// Phase of a benchmark run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunPhase {
    /// Nothing running
    Idle,
    /// Checking descriptor and configuration
    Validating,
    /// Producing inputs for the measured operation (untimed)
    Setup,
    /// Untimed invocations
    Warmup,
    /// Timed invocations
    Measuring,
    /// Filtering and computing statistics
    Summarizing,
    /// Run finished successfully
    Complete,
    /// Run aborted
    Failed,
}

impl RunPhase {
    /// Lowercase phase name
    pub fn as_str(self) -> &'static str {
        match self {
            RunPhase::Idle => "idle",
            RunPhase::Validating => "validating",
            RunPhase::Setup => "setup",
            RunPhase::Warmup => "warmup",
            RunPhase::Measuring => "measuring",
            RunPhase::Summarizing => "summarizing",
            RunPhase::Complete => "complete",
            RunPhase::Failed => "failed",
        }
    }

    /// Whether the run has ended
    pub fn is_terminal(self) -> bool {
        matches!(self, RunPhase::Complete | RunPhase::Failed)
    }
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Drives warmup and measurement over algorithm descriptors
pub struct BenchmarkEngine<C: TimingSource = MonotonicClock> {
    clock: C,
    architecture: String,
    phase: RunPhase,
}

impl BenchmarkEngine<MonotonicClock> {
    /// Engine on the system monotonic clock, tagged with the host architecture
    pub fn new() -> Self {
        Self::with_clock(MonotonicClock)
    }
}

impl Default for BenchmarkEngine<MonotonicClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: TimingSource> BenchmarkEngine<C> {
    /// Engine on a custom timing source
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            architecture: architecture_tag().to_string(),
            phase: RunPhase::Idle,
        }
    }

    /// Override the architecture tag recorded in results
    pub fn with_architecture(mut self, architecture: impl Into<String>) -> Self {
        self.architecture = architecture.into();
        self
    }

    /// Architecture tag recorded in results
    pub fn architecture(&self) -> &str {
        &self.architecture
    }

    /// Phase of the current or most recent run
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Benchmark a single operation of `descriptor`
    pub fn run_operation(
        &mut self,
        descriptor: &AlgorithmDescriptor,
        operation: Operation,
        config: &BenchmarkConfig,
    ) -> Result<OperationResult, BenchError> {
        self.transition(RunPhase::Validating);
        let outcome = self
            .validate(descriptor, config)
            .and_then(|()| self.check_supported(descriptor, operation))
            .and_then(|()| self.measure_operation(descriptor, operation, config));
        self.finish(outcome)
    }

    /// Benchmark an operation given by name (`keygen`, `encaps`, `decaps`, `sign`, `verify`)
    pub fn run_operation_named(
        &mut self,
        descriptor: &AlgorithmDescriptor,
        operation: &str,
        config: &BenchmarkConfig,
    ) -> Result<OperationResult, BenchError> {
        let operation: Operation = operation.parse()?;
        self.run_operation(descriptor, operation, config)
    }

    /// Benchmark every operation of the descriptor's family, in family order.
    ///
    /// The first failure aborts the run; no partial result set is returned.
    pub fn run_algorithm(
        &mut self,
        descriptor: &AlgorithmDescriptor,
        config: &BenchmarkConfig,
    ) -> Result<ResultSet, BenchError> {
        info!(
            "Benchmarking {} ({})",
            descriptor.display_name(),
            descriptor.variant()
        );

        self.transition(RunPhase::Validating);
        let outcome = self.validate(descriptor, config).and_then(|()| {
            let operations = descriptor.family().operations();
            let mut results = Vec::with_capacity(operations.len());
            for &operation in operations {
                results.push(self.measure_operation(descriptor, operation, config)?);
            }
            Ok(ResultSet::new(
                descriptor.name(),
                self.architecture.clone(),
                results,
            ))
        });
        self.finish(outcome)
    }

    fn validate(
        &self,
        descriptor: &AlgorithmDescriptor,
        config: &BenchmarkConfig,
    ) -> Result<(), BenchError> {
        config.validate()?;
        descriptor.validate()
    }

    fn check_supported(
        &self,
        descriptor: &AlgorithmDescriptor,
        operation: Operation,
    ) -> Result<(), BenchError> {
        if operation.belongs_to(descriptor.family()) {
            Ok(())
        } else {
            Err(BenchError::NotSupported {
                algorithm: descriptor.name().to_string(),
                operation,
            })
        }
    }

    fn finish<T>(&mut self, outcome: Result<T, BenchError>) -> Result<T, BenchError> {
        match &outcome {
            Ok(_) => self.transition(RunPhase::Complete),
            Err(_) => self.transition(RunPhase::Failed),
        }
        outcome
    }

    fn transition(&mut self, next: RunPhase) {
        trace!(from = %self.phase, to = %next, "Run phase");
        if next.is_terminal() {
            debug!("Run {}", next);
        }
        self.phase = next;
    }

    fn measure_operation(
        &mut self,
        descriptor: &AlgorithmDescriptor,
        operation: Operation,
        config: &BenchmarkConfig,
    ) -> Result<OperationResult, BenchError> {
        self.transition(RunPhase::Setup);
        let algorithm = descriptor.name();
        let mut samples = match descriptor.scheme() {
            Scheme::KeyEncapsulation { sizes, operations } => {
                self.measure_kem(algorithm, sizes, operations, operation, config)?
            }
            Scheme::Signature { sizes, operations } => {
                self.measure_signature(algorithm, sizes, operations, operation, config)?
            }
        };

        self.transition(RunPhase::Summarizing);
        if config.remove_outliers {
            remove_outliers(&mut samples, config.outlier_multiplier);
        }

        let result =
            OperationResult::from_samples(algorithm, operation, self.architecture.clone(), samples);

        if config.verbose {
            let summary = result.summary();
            info!(
                "{} {}: mean={:.2} µs, median={:.2} µs, stddev={:.2} µs",
                descriptor.display_name(),
                operation,
                summary.mean / 1000.0,
                summary.median / 1000.0,
                summary.std_dev / 1000.0
            );
        }

        Ok(result)
    }

    fn measure_kem(
        &mut self,
        algorithm: &str,
        sizes: &KemSizes,
        ops: &KemOperations,
        operation: Operation,
        config: &BenchmarkConfig,
    ) -> Result<Vec<u64>, BenchError> {
        let keygen = required(&ops.keygen, algorithm, Operation::Keygen)?;
        let mut pk = acquire("public key", sizes.public_key)?;
        let mut sk = acquire("secret key", sizes.secret_key)?;

        match operation {
            Operation::Keygen => self.sample(algorithm, operation, config, || {
                keygen(pk.as_mut_slice(), sk.as_mut_slice())
            }),
            Operation::Encapsulate => {
                let encapsulate = required(&ops.encapsulate, algorithm, operation)?;
                let mut ct = acquire("ciphertext", sizes.ciphertext)?;
                let mut ss = acquire("shared secret", sizes.shared_secret)?;

                setup(algorithm, operation, keygen(pk.as_mut_slice(), sk.as_mut_slice()))?;

                self.sample(algorithm, operation, config, || {
                    encapsulate(pk.as_slice(), ct.as_mut_slice(), ss.as_mut_slice())
                })
            }
            Operation::Decapsulate => {
                let encapsulate = required(&ops.encapsulate, algorithm, Operation::Encapsulate)?;
                let decapsulate = required(&ops.decapsulate, algorithm, operation)?;
                let mut ct = acquire("ciphertext", sizes.ciphertext)?;
                let mut ss = acquire("shared secret", sizes.shared_secret)?;
                let mut recovered = acquire("shared secret", sizes.shared_secret)?;

                setup(algorithm, operation, keygen(pk.as_mut_slice(), sk.as_mut_slice()))?;
                setup(
                    algorithm,
                    operation,
                    encapsulate(pk.as_slice(), ct.as_mut_slice(), ss.as_mut_slice()),
                )?;

                self.sample(algorithm, operation, config, || {
                    decapsulate(ct.as_slice(), sk.as_slice(), recovered.as_mut_slice())
                })
            }
            Operation::Sign | Operation::Verify => Err(BenchError::NotSupported {
                algorithm: algorithm.to_string(),
                operation,
            }),
        }
    }

    fn measure_signature(
        &mut self,
        algorithm: &str,
        sizes: &SignatureSizes,
        ops: &SignatureOperations,
        operation: Operation,
        config: &BenchmarkConfig,
    ) -> Result<Vec<u64>, BenchError> {
        let keygen = required(&ops.keygen, algorithm, Operation::Keygen)?;
        let mut pk = acquire("public key", sizes.public_key)?;
        let mut sk = acquire("secret key", sizes.secret_key)?;
        let message = config.message.as_bytes();

        match operation {
            Operation::Keygen => self.sample(algorithm, operation, config, || {
                keygen(pk.as_mut_slice(), sk.as_mut_slice())
            }),
            Operation::Sign => {
                let sign = required(&ops.sign, algorithm, operation)?;
                let mut sig = acquire("signature", sizes.signature)?;
                let capacity = sig.len();

                setup(algorithm, operation, keygen(pk.as_mut_slice(), sk.as_mut_slice()))?;

                self.sample(algorithm, operation, config, || {
                    sign(message, sk.as_slice(), sig.as_mut_slice())
                        .and_then(|len| signature_len(len, capacity))
                        .map(|_| ())
                })
            }
            Operation::Verify => {
                let sign = required(&ops.sign, algorithm, Operation::Sign)?;
                let verify = required(&ops.verify, algorithm, operation)?;
                let mut sig = acquire("signature", sizes.signature)?;
                let capacity = sig.len();

                setup(algorithm, operation, keygen(pk.as_mut_slice(), sk.as_mut_slice()))?;
                let len = setup(
                    algorithm,
                    operation,
                    sign(message, sk.as_slice(), sig.as_mut_slice())
                        .and_then(|len| signature_len(len, capacity)),
                )?;

                let signature = &sig[..len];
                self.sample(algorithm, operation, config, || {
                    verify(message, signature, pk.as_slice())
                })
            }
            Operation::Encapsulate | Operation::Decapsulate => Err(BenchError::NotSupported {
                algorithm: algorithm.to_string(),
                operation,
            }),
        }
    }

    /// Warmup, then exactly `config.iterations` timed invocations
    fn sample<F>(
        &mut self,
        algorithm: &str,
        operation: Operation,
        config: &BenchmarkConfig,
        mut invoke: F,
    ) -> Result<Vec<u64>, BenchError>
    where
        F: FnMut() -> PrimitiveResult,
    {
        let mut samples = acquire_samples(config.iterations)?;

        self.transition(RunPhase::Warmup);
        debug!(
            algorithm,
            %operation,
            iterations = config.warmup_iterations,
            "Starting warmup"
        );
        for _ in 0..config.warmup_iterations {
            // Warmup only stabilizes CPU state; its status is irrelevant
            let _ = black_box(invoke());
        }

        self.transition(RunPhase::Measuring);
        debug!(
            algorithm,
            %operation,
            iterations = config.iterations,
            "Starting measurement"
        );
        for iteration in 1..=config.iterations {
            let start = self.clock.now();
            let status = black_box(invoke());
            let end = self.clock.now();

            if let Err(PrimitiveError(reason)) = status {
                error!("{} failed at iteration {}", operation.title(), iteration);
                return Err(BenchError::OperationFailed {
                    algorithm: algorithm.to_string(),
                    operation,
                    phase: RunPhase::Measuring,
                    iteration: Some(iteration),
                    reason,
                });
            }
            samples.push(self.clock.elapsed(start, end));
        }

        Ok(samples)
    }
}

fn required<'a, T>(
    entry: &'a Option<T>,
    algorithm: &str,
    operation: Operation,
) -> Result<&'a T, BenchError> {
    entry.as_ref().ok_or_else(|| BenchError::InvalidAlgorithm {
        algorithm: algorithm.to_string(),
        reason: format!("missing required operation '{}'", operation),
    })
}

/// Map an untimed prerequisite call's failure to `OperationFailed`
fn setup<T>(
    algorithm: &str,
    operation: Operation,
    status: PrimitiveResult<T>,
) -> Result<T, BenchError> {
    status.map_err(|PrimitiveError(reason)| {
        error!("Setup for {} {} failed: {}", algorithm, operation, reason);
        BenchError::OperationFailed {
            algorithm: algorithm.to_string(),
            operation,
            phase: RunPhase::Setup,
            iteration: None,
            reason,
        }
    })
}

fn signature_len(len: usize, capacity: usize) -> PrimitiveResult<usize> {
    if len > capacity {
        Err(PrimitiveError(format!(
            "signature length {} exceeds declared maximum {}",
            len, capacity
        )))
    } else {
        Ok(len)
    }
}
