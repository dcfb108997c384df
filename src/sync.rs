//! # Scoped locking
//!
//! [`lock_api`] wrappers that pair a lock from this crate with the data it
//! protects. The guards release the lock when dropped, so every exit path
//! out of the scope that locked it unlocks it: falling off the end, an early
//! `return`, `?` propagation, or a panic unwinding through.
//!
//! ```rust
//! use spinlock_kit::sync::{Mutex, RwLock};
//!
//! let counter: Mutex<u32> = Mutex::new(0);
//! *counter.lock() += 1;
//! assert_eq!(*counter.lock(), 1);
//!
//! let table: RwLock<Vec<u32>> = RwLock::new(vec![1, 2]);
//! {
//!     let a = table.read();
//!     let b = table.read();
//!     assert_eq!(a.len() + b.len(), 4);
//!     assert!(table.try_write().is_none());
//! }
//! table.write().push(3);
//! assert_eq!(table.read().len(), 3);
//! ```
//!
//! A lock that guards no data is `Mutex<(), L>` or `RwLock<(), L>`.
//!
//! The lock type parameter picks the variant:
//!
//! ```rust
//! use spinlock_kit::sync::Mutex;
//! use spinlock_kit::SpinLock;
//!
//! let strict: Mutex<i64, SpinLock> = Mutex::new(-1);
//! assert_eq!(*strict.lock(), -1);
//! ```

use crate::shared::SharedSpinLock;
use crate::spinlock::SpinLockMemoryOrder;

/// Exclusive lock around a `T`. Defaults to [`SpinLockMemoryOrder`].
pub type Mutex<T, L = SpinLockMemoryOrder> = lock_api::Mutex<L, T>;

/// RAII guard of a [`Mutex`].
pub type MutexGuard<'a, T, L = SpinLockMemoryOrder> = lock_api::MutexGuard<'a, L, T>;

/// Reader/writer lock around a `T`. Defaults to [`SharedSpinLock`].
pub type RwLock<T, L = SharedSpinLock> = lock_api::RwLock<L, T>;

/// RAII shared guard of a [`RwLock`].
pub type RwLockReadGuard<'a, T, L = SharedSpinLock> = lock_api::RwLockReadGuard<'a, L, T>;

/// RAII exclusive guard of a [`RwLock`].
pub type RwLockWriteGuard<'a, T, L = SharedSpinLock> = lock_api::RwLockWriteGuard<'a, L, T>;
