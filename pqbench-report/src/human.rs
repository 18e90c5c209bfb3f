//! Terminal Formatting
//!
//! Banner-framed tables for result sets and size reports.

use crate::sizes::{DsaSizeEntry, KemSizeEntry};
use chrono::Utc;
use pqbench_core::ResultSet;

/// Format a result set for terminal display, one block per operation
pub fn format_human_output(set: &ResultSet) -> String {
    let mut output = String::new();

    output.push('\n');
    output.push_str(&"=".repeat(60));
    output.push('\n');
    output.push_str(&format!("Benchmark Results: {}\n", set.display_name()));
    output.push_str(&format!("Architecture: {}\n", set.architecture()));
    output.push_str(&format!(
        "Generated: {}\n",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    output.push_str(&"=".repeat(60));
    output.push_str("\n\n");

    for result in set.results() {
        let s = result.summary();
        let us = |nanos: f64| nanos / 1000.0;

        output.push_str(&format!("Operation: {}\n", result.operation()));
        output.push_str(&format!("  Samples:  {}\n", s.sample_count));
        output.push_str(&format!("  Mean:     {:.2} µs\n", us(s.mean)));
        output.push_str(&format!("  Median:   {:.2} µs\n", us(s.median)));
        output.push_str(&format!("  Std Dev:  {:.2} µs\n", us(s.std_dev)));
        output.push_str(&format!("  Min:      {:.2} µs\n", us(s.min as f64)));
        output.push_str(&format!("  Max:      {:.2} µs\n", us(s.max as f64)));
        output.push_str(&format!("  P95:      {:.2} µs\n", us(s.p95)));
        output.push_str(&format!("  P99:      {:.2} µs\n", us(s.p99)));
        output.push('\n');
    }

    output.push_str(&"=".repeat(60));
    output.push('\n');
    output
}

/// Format KEM and signature size tables; empty sections are skipped
pub fn format_size_tables(kem: &[KemSizeEntry], dsa: &[DsaSizeEntry]) -> String {
    let mut output = String::new();

    if !kem.is_empty() {
        output.push('\n');
        output.push_str("Artifact Sizes: ML-KEM\n");
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<8} {:>12} {:>12} {:>12} {:>12}\n",
            "Variant", "PK (bytes)", "SK (bytes)", "CT (bytes)", "SS (bytes)"
        ));
        output.push_str(&"-".repeat(60));
        output.push('\n');
        for entry in kem {
            output.push_str(&format!(
                "{:<8} {:>12} {:>12} {:>12} {:>12}\n",
                entry.variant,
                entry.public_key_bytes,
                entry.secret_key_bytes,
                entry.ciphertext_bytes,
                entry.shared_secret_bytes
            ));
        }
        output.push_str(&"=".repeat(60));
        output.push('\n');
    }

    if !dsa.is_empty() {
        output.push('\n');
        output.push_str("Artifact Sizes: ML-DSA\n");
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<8} {:>12} {:>12} {:>12} {:>12}\n",
            "Variant", "PK (bytes)", "SK (bytes)", "SIG (bytes)", "MSG (bytes)"
        ));
        output.push_str(&"-".repeat(60));
        output.push('\n');
        for entry in dsa {
            output.push_str(&format!(
                "{:<8} {:>12} {:>12} {:>12} {:>12}\n",
                entry.variant,
                entry.public_key_bytes,
                entry.secret_key_bytes,
                entry.signature_max_bytes,
                entry.message_bytes
            ));
        }
        output.push_str(&"=".repeat(60));
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use pqbench_core::{Operation, OperationResult};

    #[test]
    fn test_human_output() {
        let results = vec![
            OperationResult::from_samples("mldsa44", Operation::Keygen, "arm64", vec![2_000; 4]),
            OperationResult::from_samples("mldsa44", Operation::Sign, "arm64", vec![9_990; 4]),
        ];
        let set = ResultSet::new("mldsa44", "arm64", results);
        let output = format_human_output(&set);

        assert!(output.contains("Benchmark Results: ML-DSA-44"));
        assert!(output.contains("Architecture: arm64"));
        assert!(output.contains("Operation: keygen"));
        assert!(output.contains("Operation: sign"));
        assert!(output.contains("  Mean:     2.00 µs"));
        assert!(output.contains("  P99:      9.99 µs"));
        assert!(output.contains("Generated: "));
        assert_eq!(output.matches("Samples:  4").count(), 2);
    }

    #[test]
    fn test_size_tables() {
        let kem = vec![KemSizeEntry {
            algorithm: "ML-KEM".to_string(),
            variant: "512".to_string(),
            public_key_bytes: 800,
            secret_key_bytes: 1632,
            ciphertext_bytes: 768,
            shared_secret_bytes: 32,
        }];
        let output = format_size_tables(&kem, &[]);

        assert!(output.contains("Artifact Sizes: ML-KEM"));
        assert!(!output.contains("ML-DSA"));
        let row = output.lines().find(|l| l.starts_with("512")).unwrap();
        let cells: Vec<&str> = row.split_whitespace().collect();
        assert_eq!(cells, vec!["512", "800", "1632", "768", "32"]);
    }
}
