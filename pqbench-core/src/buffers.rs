//! Scoped working buffers
//!
//! Buffers are zeroed on drop, so secret keys and shared secrets do not
//! outlive the operation that produced them on any exit path.

use crate::error::BenchError;
use zeroize::Zeroizing;

/// Owned byte buffer, wiped when dropped
pub type OperationBuffer = Zeroizing<Vec<u8>>;

/// Acquire a zero-filled buffer of exactly `len` bytes
pub fn acquire(role: &'static str, len: usize) -> Result<OperationBuffer, BenchError> {
    let mut bytes = Vec::new();
    bytes
        .try_reserve_exact(len)
        .map_err(|_| BenchError::MemoryAllocation { role, bytes: len })?;
    bytes.resize(len, 0);
    Ok(Zeroizing::new(bytes))
}

/// Reserve room for `count` timing samples up front, outside the hot loop
pub fn acquire_samples(count: usize) -> Result<Vec<u64>, BenchError> {
    let mut samples = Vec::new();
    samples
        .try_reserve_exact(count)
        .map_err(|_| BenchError::MemoryAllocation {
            role: "samples",
            bytes: count.saturating_mul(std::mem::size_of::<u64>()),
        })?;
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_zeroed() {
        let buf = acquire("public key", 64).unwrap();
        assert_eq!(buf.len(), 64);
        assert!(buf.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_acquire_samples_capacity() {
        let samples = acquire_samples(1000).unwrap();
        assert!(samples.is_empty());
        assert!(samples.capacity() >= 1000);
    }

    #[test]
    fn test_impossible_allocation() {
        let err = acquire("ciphertext", usize::MAX).unwrap_err();
        assert!(matches!(
            err,
            BenchError::MemoryAllocation {
                role: "ciphertext",
                ..
            }
        ));
    }
}
