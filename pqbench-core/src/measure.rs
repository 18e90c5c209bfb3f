//! Monotonic Timing
//!
//! Reads `CLOCK_MONOTONIC` through `clock_gettime` on unix, with a
//! `std::time::Instant` fallback elsewhere. A failed clock read is logged and
//! produces a timestamp that measures as zero elapsed time.

use tracing::error;

// ─── TimingSource ────────────────────────────────────────────────────────────

/// Source of monotonic timestamps for the measurement loop
pub trait TimingSource {
    /// Opaque point in time
    type Timestamp: Copy;

    /// Capture the current time
    fn now(&self) -> Self::Timestamp;

    /// Nanoseconds between `start` and `end`.
    ///
    /// `end` must have been captured no earlier than `start`.
    fn elapsed(&self, start: Self::Timestamp, end: Self::Timestamp) -> u64;
}

/// Timestamp from [`MonotonicClock`]; `None` marks a failed clock read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instant(Option<u64>);

/// System monotonic clock, immune to wall-clock adjustments
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl TimingSource for MonotonicClock {
    type Timestamp = Instant;

    #[inline(always)]
    fn now(&self) -> Instant {
        match read_monotonic() {
            Ok(nanos) => Instant(Some(nanos)),
            Err(err) => {
                error!("Failed to read monotonic clock: {}", err);
                Instant(None)
            }
        }
    }

    #[inline(always)]
    fn elapsed(&self, start: Instant, end: Instant) -> u64 {
        match (start.0, end.0) {
            (Some(start), Some(end)) => end.saturating_sub(start),
            _ => 0,
        }
    }
}

impl MonotonicClock {
    /// Clock resolution in nanoseconds; 1 if it cannot be queried
    pub fn resolution_ns(&self) -> u64 {
        read_resolution().unwrap_or(1).max(1)
    }
}

#[cfg(unix)]
#[inline(always)]
fn read_monotonic() -> std::io::Result<u64> {
    let mut ts = libc::timespec {
        tv_sec: 0,
        tv_nsec: 0,
    };
    // SAFETY: `ts` is a valid, writable timespec for the duration of the call.
    let rc = unsafe { libc::clock_gettime(libc::CLOCK_MONOTONIC, &mut ts) };
    if rc != 0 {
        return Err(std::io::Error::last_os_error());
    }
    Ok(timespec_nanos(&ts))
}

#[cfg(unix)]
fn read_resolution() -> Option<u64> {
    let mut ts = libc::timespec {
        tv_sec: 0,
        tv_nsec: 0,
    };
    // SAFETY: `ts` is a valid, writable timespec for the duration of the call.
    let rc = unsafe { libc::clock_getres(libc::CLOCK_MONOTONIC, &mut ts) };
    (rc == 0).then(|| timespec_nanos(&ts))
}

#[cfg(unix)]
#[inline(always)]
fn timespec_nanos(ts: &libc::timespec) -> u64 {
    (ts.tv_sec as u64)
        .saturating_mul(1_000_000_000)
        .saturating_add(ts.tv_nsec as u64)
}

#[cfg(not(unix))]
#[inline(always)]
fn read_monotonic() -> std::io::Result<u64> {
    use std::sync::OnceLock;
    static ORIGIN: OnceLock<std::time::Instant> = OnceLock::new();
    let origin = ORIGIN.get_or_init(std::time::Instant::now);
    Ok(origin.elapsed().as_nanos() as u64)
}

#[cfg(not(unix))]
fn read_resolution() -> Option<u64> {
    None
}
