//! # spinlock-kit 🌀
//!
//! Busy-wait locks for short critical sections with modest thread counts.
//! Nothing here parks a thread: waiting means polling an atomic on the
//! calling thread, optionally yielding to the OS scheduler between polls.
//!
//! The crate includes:
//!
//! - [`RawSpinLock`]: a one-byte exclusive lock, generic over a [`Relax`]
//!   strategy and a [`MemoryOrdering`] policy, with the four classic
//!   variants as aliases ([`SpinLock`], [`SpinLockYield`],
//!   [`SpinLockMemoryOrder`], [`SpinLockMemoryOrderYield`]).
//! - [`RawSharedSpinLock`]: a four-byte reader/writer lock
//!   ([`SharedSpinLock`]).
//! - [`sync`]: [`lock_api`] `Mutex`/`RwLock` wrappers with RAII guards.
//! - [`BackOff`]: exponential backoff, usable as a [`Relax`] strategy.
//!
//! All locks implement [`lock_api::RawMutex`] or [`lock_api::RawRwLock`], so
//! they drop into any code generic over those traits.
//!
//! ## 🚀 Quick Example
//!
//! ```rust
//! use spinlock_kit::sync::{Mutex, RwLock};
//! use spinlock_kit::{SpinLockMemoryOrderYield, SharedSpinLock};
//!
//! let counter: Mutex<u64, SpinLockMemoryOrderYield> = Mutex::new(0);
//! *counter.lock() += 1;
//! assert_eq!(*counter.lock(), 1);
//!
//! let config: RwLock<&str, SharedSpinLock> = RwLock::new("fast");
//! assert_eq!(*config.read(), "fast");
//! ```
//!
//! ## ⚠️ Usage Notes
//!
//! - No lock is fair. The shared lock in particular lets a steady stream of
//!   readers starve a writer.
//! - No lock is reentrant; locking twice from one thread spins forever.
//! - Raw `unlock` calls are `unsafe`: no owner is tracked, so releasing a
//!   lock you do not hold breaks exclusion for the thread that does.
//! - Lock and unlock never allocate.
//!
//! ## Feature flags
//!
//! - **`std`** (default): enables [`Yield`](relax::Yield) and the yielding
//!   variants. Without it the crate is `no_std`.
//! - **`bench`**: builds the `spinlock-bench` contention binary.

#![cfg_attr(not(any(feature = "std", test)), no_std)]

pub mod backoff;
pub mod ordering;
pub mod relax;
pub mod shared;
pub mod spinlock;
pub mod sync;

pub use backoff::BackOff;
pub use ordering::{AcqRel, MemoryOrdering, SeqCst};
pub use relax::Relax;
pub use shared::{RawSharedSpinLock, SharedSpinLock};
pub use spinlock::{RawSpinLock, SpinLock, SpinLockMemoryOrder};

#[cfg(feature = "std")]
pub use shared::SharedSpinLockYield;
#[cfg(feature = "std")]
pub use spinlock::{SpinLockMemoryOrderYield, SpinLockYield};
