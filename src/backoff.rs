//! # BackOff
//!
//! Exponential backoff for contended spin loops.
//!
//! Each call to [`BackOff::wait`] spins for the current count of
//! [`core::hint::spin_loop`] iterations and then doubles it, capped at
//! `2^22`. With the `std` feature the thread also yields once the count has
//! grown past `2^10`, so long waits stop burning a whole core.
//!
//! `BackOff` implements [`Relax`], so it can be plugged into any lock of this
//! crate in place of [`Spin`](crate::relax::Spin):
//!
//! ```rust
//! use spinlock_kit::{BackOff, RawSpinLock, SeqCst};
//!
//! let lock = RawSpinLock::<BackOff, SeqCst>::new();
//! lock.lock();
//! assert!(!lock.try_lock());
//! unsafe { lock.unlock() };
//! ```
//!
//! It is also usable on its own around any retry loop:
//!
//! ```rust
//! use spinlock_kit::BackOff;
//!
//! let backoff = BackOff::new();
//! let mut attempts = 0;
//! while attempts < 3 {
//!     attempts += 1;
//!     backoff.wait();
//! }
//! assert!(backoff.current() > 32);
//! ```

use core::{cell::Cell, hint::spin_loop};

use crate::relax::Relax;

/// Maximum spin iteration limit.
const MAX_SPIN: u32 = 1 << 22;

/// Default starting spin count.
const START_VALUE: u32 = 1 << 5;

#[cfg(feature = "std")]
const YIELD_THRESHOLD: u32 = 1 << 10;

/// Bit shift applied by [`BackOff::decay`].
const RELAX_DIV_BIT_VAL: u32 = 1;

/// Exponential backoff state.
///
/// Not `Sync`: one instance belongs to one waiting thread.
#[derive(Debug)]
pub struct BackOff {
    spin: Cell<u32>,
}

impl BackOff {
    /// Creates a new [`BackOff`] starting at 32 spins.
    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            spin: Cell::new(START_VALUE),
        }
    }

    /// Creates a new [`BackOff`] with a custom starting spin count.
    ///
    /// # Examples
    /// ```
    /// use spinlock_kit::BackOff;
    /// let b = BackOff::new_with(128);
    /// assert_eq!(b.current(), 128);
    /// ```
    #[inline(always)]
    pub const fn new_with(start: u32) -> Self {
        Self {
            spin: Cell::new(start),
        }
    }

    /// Spins for the current count, then doubles it (up to `2^22`).
    #[inline(always)]
    pub fn wait(&self) {
        let end = self.spin.get();

        for _ in 0..end {
            spin_loop();
        }

        // Doubling from zero would stay at zero forever.
        self.spin.set((end << 1).clamp(1, MAX_SPIN));

        #[cfg(feature = "std")]
        if end > YIELD_THRESHOLD {
            std::thread::yield_now();
        }
    }

    /// Halves the current spin count.
    ///
    /// Not to be confused with [`Relax::relax`], which waits and doubles it.
    #[inline(always)]
    pub fn decay(&self) {
        let c_spin = self.spin.get();
        self.spin.set(c_spin >> RELAX_DIV_BIT_VAL);
    }

    /// Returns the current spin iteration count.
    #[inline(always)]
    pub fn current(&self) -> u32 {
        self.spin.get()
    }

    /// Resets the spin count to the default starting value.
    #[inline(always)]
    pub fn reset(&self) {
        self.spin.set(START_VALUE);
    }

    /// Resets the spin count to `spin`.
    #[inline(always)]
    pub fn reset_to(&self, spin: u32) {
        self.spin.set(spin);
    }

    /// Yields the current thread.
    #[cfg(feature = "std")]
    #[inline]
    pub fn yield_now(&self) {
        std::thread::yield_now();
    }
}

impl Default for BackOff {
    fn default() -> Self {
        Self::new()
    }
}

impl Relax for BackOff {
    #[inline(always)]
    fn new() -> Self {
        BackOff::new()
    }

    /// Waits, then doubles the spin count. See [`BackOff::wait`].
    #[inline(always)]
    fn relax(&mut self) {
        self.wait();
    }
}
