//! Copying between caller buffers and the fixed-size arrays the backends use

use pqbench_core::{PrimitiveError, PrimitiveResult};

/// Borrow `bytes` as an `N`-byte array, failing on any other length
pub(crate) fn fixed<const N: usize>(role: &str, bytes: &[u8]) -> PrimitiveResult<[u8; N]> {
    bytes.try_into().map_err(|_| {
        PrimitiveError(format!(
            "{} must be {} bytes, got {}",
            role,
            N,
            bytes.len()
        ))
    })
}

/// Copy `bytes` to the front of `out`
pub(crate) fn write_into(role: &str, out: &mut [u8], bytes: &[u8]) -> PrimitiveResult {
    let Some(dest) = out.get_mut(..bytes.len()) else {
        return Err(PrimitiveError(format!(
            "{} buffer holds {} bytes, need {}",
            role,
            out.len(),
            bytes.len()
        )));
    };
    dest.copy_from_slice(bytes);
    Ok(())
}
