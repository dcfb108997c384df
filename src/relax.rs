//! # Relax strategies
//!
//! What a blocking acquisition does between two failed attempts. This is the
//! "yield axis" of the lock family: it trades latency against throughput
//! under contention and never changes what a lock guarantees.
//!
//! - [`Spin`] retries immediately, hinting the CPU that it is in a busy loop.
//! - [`Yield`] hands the rest of the time slice back to the OS scheduler
//!   (requires the `std` feature).
//! - [`BackOff`](crate::BackOff) spins for an exponentially growing number of
//!   iterations, see [`backoff`](crate::backoff).

/// A waiting policy applied after each failed lock attempt.
///
/// A fresh value is created with [`Relax::new`] for every blocking
/// acquisition, so implementations may keep per-acquisition state.
pub trait Relax {
    /// Creates the state for a new acquisition.
    fn new() -> Self;

    /// Called once after every failed attempt, before retrying.
    fn relax(&mut self);
}

/// Busy-waits without ever leaving the calling thread.
///
/// # Example
/// ```
/// use spinlock_kit::relax::{Relax, Spin};
///
/// let mut spin = Spin::new();
/// spin.relax();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Spin;

impl Relax for Spin {
    #[inline(always)]
    fn new() -> Self {
        Spin
    }

    #[inline(always)]
    fn relax(&mut self) {
        core::hint::spin_loop();
    }
}

/// Yields the remaining scheduling quantum with [`std::thread::yield_now`].
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct Yield;

#[cfg(feature = "std")]
impl Relax for Yield {
    #[inline(always)]
    fn new() -> Self {
        Yield
    }

    #[inline]
    fn relax(&mut self) {
        std::thread::yield_now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relax_n<R: Relax>(n: usize) {
        let mut r = R::new();
        for _ in 0..n {
            r.relax();
        }
    }

    #[test]
    fn spin_relax_returns() {
        relax_n::<Spin>(1_000);
    }

    #[cfg(feature = "std")]
    #[test]
    fn yield_relax_returns() {
        relax_n::<Yield>(100);
    }

    #[test]
    fn strategies_are_zero_sized() {
        assert_eq!(core::mem::size_of::<Spin>(), 0);
        #[cfg(feature = "std")]
        assert_eq!(core::mem::size_of::<Yield>(), 0);
    }
}
