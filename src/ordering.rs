//! # Memory-ordering policies
//!
//! The "memory-order axis" of the exclusive lock family. A policy names the
//! [`Ordering`] used for each kind of atomic access a lock performs.
//!
//! - [`SeqCst`]: every access is sequentially consistent. Simplest to reason
//!   about, slightly more synchronization on weakly ordered hardware.
//! - [`AcqRel`]: acquire on successful acquisition, release on unlock. The
//!   weakest pair that still publishes a critical section's writes to the
//!   next holder.

use core::sync::atomic::Ordering;

/// Orderings used by a lock's atomic accesses.
pub trait MemoryOrdering {
    /// Read-modify-write that acquires the lock.
    const ACQUIRE: Ordering;
    /// Store that releases the lock.
    const RELEASE: Ordering;
    /// Plain load used to observe lock state.
    const LOAD: Ordering;
}

/// Sequential consistency on every access.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeqCst;

impl MemoryOrdering for SeqCst {
    const ACQUIRE: Ordering = Ordering::SeqCst;
    const RELEASE: Ordering = Ordering::SeqCst;
    const LOAD: Ordering = Ordering::SeqCst;
}

/// Acquire on lock, release on unlock.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcqRel;

impl MemoryOrdering for AcqRel {
    const ACQUIRE: Ordering = Ordering::Acquire;
    const RELEASE: Ordering = Ordering::Release;
    const LOAD: Ordering = Ordering::Acquire;
}

#[cfg(test)]
mod tests {
    use super::*;

    // `store` rejects Acquire/AcqRel and `load` rejects Release/AcqRel at
    // runtime, so the constants must stay within what each access accepts.
    fn valid<O: MemoryOrdering>() -> bool {
        !matches!(O::RELEASE, Ordering::Acquire | Ordering::AcqRel)
            && !matches!(O::LOAD, Ordering::Release | Ordering::AcqRel)
    }

    #[test]
    fn policies_use_valid_orderings() {
        assert!(valid::<SeqCst>());
        assert!(valid::<AcqRel>());
    }

    #[test]
    fn acq_rel_is_minimal_pair() {
        assert_eq!(AcqRel::ACQUIRE, Ordering::Acquire);
        assert_eq!(AcqRel::RELEASE, Ordering::Release);
        assert_eq!(SeqCst::ACQUIRE, Ordering::SeqCst);
    }
}
