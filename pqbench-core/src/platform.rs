//! Architecture tag recorded alongside results

/// Coarse platform identifier: `arm64`, `riscv64`, `native` (x86_64) or `unknown`
pub fn architecture_tag() -> &'static str {
    if cfg!(target_arch = "aarch64") {
        "arm64"
    } else if cfg!(target_arch = "riscv64") {
        "riscv64"
    } else if cfg!(target_arch = "x86_64") {
        "native"
    } else {
        "unknown"
    }
}
