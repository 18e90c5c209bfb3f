//! Per-algorithm output file names

use std::path::{Path, PathBuf};

/// Prefix the file name of `base` with the algorithm name, keeping its
/// directory: `out/results.json` becomes `out/mlkem512_results.json`.
pub fn per_algorithm_path(base: &Path, algorithm: &str) -> PathBuf {
    match base.file_name() {
        Some(name) => base.with_file_name(format!("{}_{}", algorithm, name.to_string_lossy())),
        None => PathBuf::from(format!("{}_{}", algorithm, base.display())),
    }
}
