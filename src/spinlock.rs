//! # SpinLock
//!
//! A one-byte exclusive spinlock, generic over how it waits ([`Relax`]) and
//! how strongly it orders its atomics ([`MemoryOrdering`]).
//!
//! Acquisition is a test-and-set loop: swap the flag to `true`, and if it was
//! already `true`, relax and retry. `try_lock` is a single swap. `unlock`
//! stores `false`. The four classic variants are aliases of one type:
//!
//! | alias                        | relax     | ordering   |
//! |------------------------------|-----------|------------|
//! | [`SpinLock`]                 | [`Spin`]  | [`SeqCst`] |
//! | [`SpinLockYield`]            | [`Yield`] | [`SeqCst`] |
//! | [`SpinLockMemoryOrder`]      | [`Spin`]  | [`AcqRel`] |
//! | [`SpinLockMemoryOrderYield`] | [`Yield`] | [`AcqRel`] |
//!
//! The lock protects no data by itself. Wrap it in
//! [`Mutex`](crate::sync::Mutex) for a guarded value, or drive it directly:
//!
//! ```rust
//! use spinlock_kit::SpinLockMemoryOrder;
//!
//! static LOCK: SpinLockMemoryOrder = SpinLockMemoryOrder::new();
//!
//! LOCK.lock();
//! assert!(!LOCK.try_lock());
//! // SAFETY: this thread holds the lock.
//! unsafe { LOCK.unlock() };
//! assert!(LOCK.try_lock());
//! unsafe { LOCK.unlock() };
//! ```
//!
//! ## Caveats
//! - Not fair and not reentrant: locking twice from one thread spins forever.
//! - No owner is recorded; unlocking a lock you do not hold breaks mutual
//!   exclusion for whoever does, which is why [`RawSpinLock::unlock`] is
//!   `unsafe`.
//! - The lock's address is its identity. It is neither `Clone` nor `Copy`,
//!   and the borrow checker forbids moving it while any thread borrows it.
//!
//! [`Spin`]: crate::relax::Spin
//! [`Yield`]: crate::relax::Yield
//! [`SeqCst`]: crate::ordering::SeqCst
//! [`AcqRel`]: crate::ordering::AcqRel

use core::fmt;
use core::marker::PhantomData;
use core::sync::atomic::AtomicBool;

use lock_api::{GuardSend, RawMutex};

use crate::ordering::{AcqRel, MemoryOrdering, SeqCst};
use crate::relax::{Relax, Spin};
#[cfg(feature = "std")]
use crate::relax::Yield;

/// Exclusive test-and-set spinlock.
pub struct RawSpinLock<R, O> {
    locked: AtomicBool,
    // fn pointer keeps the lock Send + Sync whatever the policy types are.
    _policy: PhantomData<fn() -> (R, O)>,
}

/// No yield, sequentially consistent.
pub type SpinLock = RawSpinLock<Spin, SeqCst>;

/// Yields between attempts, sequentially consistent.
#[cfg(feature = "std")]
pub type SpinLockYield = RawSpinLock<Yield, SeqCst>;

/// No yield, acquire/release.
pub type SpinLockMemoryOrder = RawSpinLock<Spin, AcqRel>;

/// Yields between attempts, acquire/release.
#[cfg(feature = "std")]
pub type SpinLockMemoryOrderYield = RawSpinLock<Yield, AcqRel>;

impl<R, O> RawSpinLock<R, O>
where
    R: Relax,
    O: MemoryOrdering,
{
    /// Creates an unlocked lock.
    #[inline(always)]
    pub const fn new() -> Self {
        RawSpinLock {
            locked: AtomicBool::new(false),
            _policy: PhantomData,
        }
    }

    /// Spins until the flag goes from unset to set.
    #[inline]
    pub fn lock(&self) {
        let mut relax = R::new();
        while self.locked.swap(true, O::ACQUIRE) {
            relax.relax();
        }
    }

    /// Makes exactly one attempt to take the lock.
    #[inline]
    pub fn try_lock(&self) -> bool {
        !self.locked.swap(true, O::ACQUIRE)
    }

    /// Clears the flag.
    ///
    /// # Safety
    /// The calling thread must hold the lock, acquired through
    /// [`lock`](Self::lock) or a successful [`try_lock`](Self::try_lock).
    #[inline]
    pub unsafe fn unlock(&self) {
        self.locked.store(false, O::RELEASE);
    }

    /// Returns whether some thread holds the lock right now.
    ///
    /// The answer may be stale by the time it is used.
    #[inline(always)]
    pub fn is_locked(&self) -> bool {
        self.locked.load(O::LOAD)
    }
}

impl<R, O> Default for RawSpinLock<R, O>
where
    R: Relax,
    O: MemoryOrdering,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<R, O> fmt::Debug for RawSpinLock<R, O>
where
    R: Relax,
    O: MemoryOrdering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawSpinLock")
            .field("locked", &self.is_locked())
            .finish()
    }
}

unsafe impl<R, O> RawMutex for RawSpinLock<R, O>
where
    R: Relax,
    O: MemoryOrdering,
{
    #[allow(clippy::declare_interior_mutable_const)]
    const INIT: Self = Self::new();

    type GuardMarker = GuardSend;

    #[inline]
    fn lock(&self) {
        RawSpinLock::lock(self);
    }

    #[inline]
    fn try_lock(&self) -> bool {
        RawSpinLock::try_lock(self)
    }

    #[inline]
    unsafe fn unlock(&self) {
        RawSpinLock::unlock(self);
    }

    #[inline]
    fn is_locked(&self) -> bool {
        RawSpinLock::is_locked(self)
    }
}
