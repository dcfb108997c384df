//! # SharedSpinLock
//!
//! A reader/writer spinlock: any number of shared holders, or exactly one
//! exclusive holder, never both.
//!
//! State is an exclusive gate (`AtomicBool`) and a reader count
//! (`AtomicU16`), four bytes in total.
//!
//! - **Exclusive** acquisition wins the gate with a swap, then waits for the
//!   readers already inside to drain. No new reader can complete its
//!   acquisition while the gate is set.
//! - **Shared** acquisition is optimistic: wait for the gate to clear,
//!   increment the reader count, then look at the gate again. If a writer
//!   slipped in between, back the increment out and start over. The writer
//!   either sees the increment and waits for it, or the reader sees the gate
//!   and retreats; it is never both inside.
//!
//! There is no fairness. A steady stream of readers can starve a writer that
//! is waiting for the count to reach zero, and back-to-back writers can
//! starve readers.
//!
//! ```rust
//! use spinlock_kit::SharedSpinLock;
//!
//! let lock = SharedSpinLock::new();
//!
//! lock.lock_shared();
//! assert!(lock.try_lock_shared());
//! assert!(!lock.try_lock(), "readers keep writers out");
//! unsafe {
//!     lock.unlock_shared();
//!     lock.unlock_shared();
//! }
//!
//! lock.lock();
//! assert!(!lock.try_lock_shared(), "a writer keeps readers out");
//! unsafe { lock.unlock() };
//! ```

use core::fmt;
use core::marker::PhantomData;
use core::sync::atomic::{AtomicBool, AtomicU16, Ordering::SeqCst};

use lock_api::{GuardSend, RawRwLock};

#[cfg(feature = "std")]
use crate::relax::Yield;
use crate::relax::{Relax, Spin};

// Every access is SeqCst. Writer: swap(gate) then load(readers). Reader:
// fetch_add(readers) then load(gate). That store->load pair on two
// different atomics needs a single total order; acquire/release alone lets
// both sides read stale values and enter together.

/// Reader/writer spinlock.
pub struct RawSharedSpinLock<R = Spin> {
    locked: AtomicBool,
    readers: AtomicU16,
    _relax: PhantomData<fn() -> R>,
}

/// Shared spinlock that busy-waits.
pub type SharedSpinLock = RawSharedSpinLock<Spin>;

/// Shared spinlock that yields between attempts.
#[cfg(feature = "std")]
pub type SharedSpinLockYield = RawSharedSpinLock<Yield>;

impl<R: Relax> RawSharedSpinLock<R> {
    /// Creates an unlocked lock with no readers.
    #[inline(always)]
    pub const fn new() -> Self {
        RawSharedSpinLock {
            locked: AtomicBool::new(false),
            readers: AtomicU16::new(0),
            _relax: PhantomData,
        }
    }

    /// Takes the gate, then waits until every reader has left.
    #[inline]
    pub fn lock(&self) {
        let mut relax = R::new();
        while self.locked.swap(true, SeqCst) {
            relax.relax();
        }
        while self.readers.load(SeqCst) != 0 {
            relax.relax();
        }
    }

    /// One attempt at exclusive ownership. Fails, without waiting, if the
    /// gate is taken or any reader is inside.
    #[inline]
    pub fn try_lock(&self) -> bool {
        if self.locked.swap(true, SeqCst) {
            return false;
        }
        if self.readers.load(SeqCst) != 0 {
            self.locked.store(false, SeqCst);
            return false;
        }
        true
    }

    /// Releases exclusive ownership.
    ///
    /// # Safety
    /// The calling thread must hold the lock exclusively.
    #[inline]
    pub unsafe fn unlock(&self) {
        self.locked.store(false, SeqCst);
    }

    /// Registers the calling thread as a reader, retrying until no writer
    /// holds or is acquiring the gate.
    #[inline]
    pub fn lock_shared(&self) {
        let mut relax = R::new();
        loop {
            while self.locked.load(SeqCst) {
                relax.relax();
            }
            if self.enter_shared() {
                return;
            }
            relax.relax();
        }
    }

    /// One attempt at shared ownership. Fails if a writer holds or is
    /// acquiring the gate.
    #[inline]
    pub fn try_lock_shared(&self) -> bool {
        if self.locked.load(SeqCst) {
            return false;
        }
        self.enter_shared()
    }

    /// Releases one shared registration.
    ///
    /// # Safety
    /// The calling thread must hold a shared registration that it has not
    /// already released.
    #[inline]
    pub unsafe fn unlock_shared(&self) {
        let prev = self.readers.fetch_sub(1, SeqCst);
        debug_assert_ne!(prev, 0, "unlock_shared without a shared holder");
    }

    /// Returns whether the lock is held in any mode.
    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked.load(SeqCst) || self.readers.load(SeqCst) != 0
    }

    /// Returns whether the exclusive gate is set.
    ///
    /// This is also true while a writer is still waiting for readers to
    /// drain, or during a failing `try_lock`.
    #[inline]
    pub fn is_locked_exclusive(&self) -> bool {
        self.locked.load(SeqCst)
    }

    /// Current reader count. Includes readers that are about to back out.
    #[inline]
    pub fn readers(&self) -> u16 {
        self.readers.load(SeqCst)
    }

    // Optimistic increment followed by a re-check of the gate. A full count
    // refuses the increment: wrapping to zero would let a writer in.
    #[inline(always)]
    fn enter_shared(&self) -> bool {
        if self
            .readers
            .fetch_update(SeqCst, SeqCst, |n| n.checked_add(1))
            .is_err()
        {
            return false;
        }
        if self.locked.load(SeqCst) {
            self.readers.fetch_sub(1, SeqCst);
            return false;
        }
        true
    }
}

impl<R: Relax> Default for RawSharedSpinLock<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Relax> fmt::Debug for RawSharedSpinLock<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawSharedSpinLock")
            .field("locked", &self.is_locked_exclusive())
            .field("readers", &self.readers())
            .finish()
    }
}

unsafe impl<R: Relax> RawRwLock for RawSharedSpinLock<R> {
    #[allow(clippy::declare_interior_mutable_const)]
    const INIT: Self = Self::new();

    type GuardMarker = GuardSend;

    #[inline]
    fn lock_shared(&self) {
        RawSharedSpinLock::lock_shared(self);
    }

    #[inline]
    fn try_lock_shared(&self) -> bool {
        RawSharedSpinLock::try_lock_shared(self)
    }

    #[inline]
    unsafe fn unlock_shared(&self) {
        RawSharedSpinLock::unlock_shared(self);
    }

    #[inline]
    fn lock_exclusive(&self) {
        RawSharedSpinLock::lock(self);
    }

    #[inline]
    fn try_lock_exclusive(&self) -> bool {
        RawSharedSpinLock::try_lock(self)
    }

    #[inline]
    unsafe fn unlock_exclusive(&self) {
        RawSharedSpinLock::unlock(self);
    }

    #[inline]
    fn is_locked(&self) -> bool {
        RawSharedSpinLock::is_locked(self)
    }

    #[inline]
    fn is_locked_exclusive(&self) -> bool {
        RawSharedSpinLock::is_locked_exclusive(self)
    }
}
