//! Key, ciphertext and signature size reports

use pqbench_core::{AlgorithmDescriptor, BenchError, Scheme};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Size measurements for one algorithm family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeReport<T> {
    /// Always `sizes`
    pub measurement_type: String,
    /// `KEM` or `DSA`
    pub algorithm_family: String,
    /// One entry per parameter set
    pub measurements: Vec<T>,
}

/// Sizes of one KEM parameter set, in bytes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KemSizeEntry {
    /// Scheme name without the level, e.g. `ML-KEM`
    pub algorithm: String,
    /// Parameter set, e.g. `768`
    pub variant: String,
    /// Encapsulation key
    pub public_key_bytes: usize,
    /// Decapsulation key
    pub secret_key_bytes: usize,
    /// Ciphertext
    pub ciphertext_bytes: usize,
    /// Shared secret
    pub shared_secret_bytes: usize,
}

/// Sizes of one signature parameter set, in bytes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DsaSizeEntry {
    /// Scheme name without the level, e.g. `ML-DSA`
    pub algorithm: String,
    /// Parameter set, e.g. `65`
    pub variant: String,
    /// Verification key
    pub public_key_bytes: usize,
    /// Signing key
    pub secret_key_bytes: usize,
    /// Largest signature the scheme produces
    pub signature_max_bytes: usize,
    /// Message length used when signing
    pub message_bytes: usize,
}

fn scheme_name(descriptor: &AlgorithmDescriptor) -> String {
    let display = descriptor.display_name();
    let suffix = format!("-{}", descriptor.variant());
    display
        .strip_suffix(&suffix)
        .map(str::to_string)
        .unwrap_or(display)
}

impl KemSizeEntry {
    /// Sizes of a KEM descriptor; `None` for signature schemes
    pub fn from_descriptor(descriptor: &AlgorithmDescriptor) -> Option<Self> {
        let Scheme::KeyEncapsulation { sizes, .. } = descriptor.scheme() else {
            return None;
        };
        Some(Self {
            algorithm: scheme_name(descriptor),
            variant: descriptor.variant().to_string(),
            public_key_bytes: sizes.public_key,
            secret_key_bytes: sizes.secret_key,
            ciphertext_bytes: sizes.ciphertext,
            shared_secret_bytes: sizes.shared_secret,
        })
    }
}

impl DsaSizeEntry {
    /// Sizes of a signature descriptor; `None` for KEMs
    pub fn from_descriptor(descriptor: &AlgorithmDescriptor, message_bytes: usize) -> Option<Self> {
        let Scheme::Signature { sizes, .. } = descriptor.scheme() else {
            return None;
        };
        Some(Self {
            algorithm: scheme_name(descriptor),
            variant: descriptor.variant().to_string(),
            public_key_bytes: sizes.public_key,
            secret_key_bytes: sizes.secret_key,
            signature_max_bytes: sizes.signature,
            message_bytes,
        })
    }
}

impl SizeReport<KemSizeEntry> {
    /// KEM size report
    pub fn kem(measurements: Vec<KemSizeEntry>) -> Self {
        Self::new("KEM", measurements)
    }
}

impl SizeReport<DsaSizeEntry> {
    /// Signature size report
    pub fn dsa(measurements: Vec<DsaSizeEntry>) -> Self {
        Self::new("DSA", measurements)
    }
}

impl<T> SizeReport<T> {
    fn new(family: &str, measurements: Vec<T>) -> Self {
        Self {
            measurement_type: "sizes".to_string(),
            algorithm_family: family.to_string(),
            measurements,
        }
    }

    /// No measurements collected
    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }
}

/// Write a size report as JSON
pub fn write_size_report_json<T: Serialize>(
    report: &SizeReport<T>,
    path: &Path,
) -> Result<(), BenchError> {
    let json = serde_json::to_string_pretty(report).map_err(|e| BenchError::io(path, e.into()))?;
    std::fs::write(path, json + "\n").map_err(|e| BenchError::io(path, e))?;
    info!(
        "Exported {} size data to {}",
        report.algorithm_family,
        path.display()
    );
    Ok(())
}

/// Write a size report as CSV, one row per measurement
pub fn write_size_report_csv<T: Serialize>(
    report: &SizeReport<T>,
    path: &Path,
) -> Result<(), BenchError> {
    let mut wtr = csv::Writer::from_path(path).map_err(|e| BenchError::io(path, e.into()))?;
    for entry in &report.measurements {
        wtr.serialize(entry)
            .map_err(|e| BenchError::io(path, e.into()))?;
    }
    wtr.flush().map_err(|e| BenchError::io(path, e))?;
    info!(
        "Exported {} size data to {}",
        report.algorithm_family,
        path.display()
    );
    Ok(())
}
