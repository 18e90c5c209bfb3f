#![warn(missing_docs)]
//! pqbench FIPS Provider
//!
//! Serves ML-KEM-512/768/1024 and ML-DSA-44/65/87 through the
//! [`Provider`] contract, using the pure-Rust `fips203` and `fips204` crates.

mod bytes;
mod mldsa;
mod mlkem;

pub use mlkem::SHARED_SECRET_LEN;

use pqbench_core::{AlgorithmDescriptor, BenchError, Provider, SessionState};
use std::cell::Cell;
use tracing::{debug, warn};

/// ML-KEM parameter sets, in security-level order
pub const KEM_ALGORITHMS: &[&str] = &["mlkem512", "mlkem768", "mlkem1024"];

/// ML-DSA parameter sets, in security-level order
pub const SIGNATURE_ALGORITHMS: &[&str] = &["mldsa44", "mldsa65", "mldsa87"];

/// Provider name used in configuration
pub const PROVIDER_NAME: &str = "fips";

/// Normalize user-facing spellings (`ML-KEM-768`, `ml_dsa_65`) to provider
/// names (`mlkem768`, `mldsa65`)
pub fn canonical_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Provider backed by `fips203` / `fips204`
#[derive(Debug, Default, Clone, Copy)]
pub struct FipsProvider;

impl FipsProvider {
    /// Create the provider
    pub fn new() -> Self {
        Self
    }
}

/// Per-session bookkeeping
struct FipsSession {
    live: Cell<usize>,
}

fn session(state: &SessionState) -> Result<&FipsSession, BenchError> {
    state.downcast_ref::<FipsSession>().ok_or_else(|| {
        BenchError::InvalidState("session was not opened by the fips provider".to_string())
    })
}

impl Provider for FipsProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    fn initialize(&self) -> Result<SessionState, BenchError> {
        debug!("Opening fips provider session");
        Ok(Box::new(FipsSession {
            live: Cell::new(0),
        }))
    }

    fn finalize(&self, state: SessionState) {
        if let Ok(session) = session(&state) {
            let live = session.live.get();
            if live > 0 {
                warn!("Closing fips session with {} live algorithm(s)", live);
            }
        }
        debug!("Closed fips provider session");
    }

    fn create_algorithm(
        &self,
        state: &SessionState,
        name: &str,
    ) -> Result<AlgorithmDescriptor, BenchError> {
        let session = session(state)?;
        let canonical = canonical_name(name);
        let descriptor = mlkem::descriptor(&canonical)
            .or_else(|| mldsa::descriptor(&canonical))
            .ok_or_else(|| BenchError::AlgorithmNotFound(name.to_string()))?;

        session.live.set(session.live.get() + 1);
        debug!(algorithm = %canonical, "Created algorithm");
        Ok(descriptor)
    }

    fn destroy_algorithm(&self, state: &SessionState, algorithm: AlgorithmDescriptor) {
        if let Ok(session) = session(state) {
            session.live.set(session.live.get().saturating_sub(1));
        }
        debug!(algorithm = %algorithm.name(), "Destroyed algorithm");
    }

    fn list_algorithms(&self, _state: &SessionState) -> Vec<String> {
        KEM_ALGORITHMS
            .iter()
            .chain(SIGNATURE_ALGORITHMS)
            .map(|name| name.to_string())
            .collect()
    }

    fn supports_algorithm(&self, _state: &SessionState, name: &str) -> Option<bool> {
        let canonical = canonical_name(name);
        Some(
            KEM_ALGORITHMS.contains(&canonical.as_str())
                || SIGNATURE_ALGORITHMS.contains(&canonical.as_str()),
        )
    }
}
