//! Exclusive-lock contract, run against every lock in the crate.
//!
//! Each lock gets its own module so a failure names the variant.

#![cfg(feature = "std")]

use lock_api::RawMutex;
use spinlock_kit::sync::Mutex;

fn lock_unlock<L: RawMutex>() {
    let lock = L::INIT;
    lock.lock();
    unsafe { lock.unlock() };
}

fn try_lock<L: RawMutex>() {
    let lock = L::INIT;
    assert!(lock.try_lock());
    unsafe { lock.unlock() };
}

fn fail_try_lock<L: RawMutex>() {
    let lock = L::INIT;
    lock.lock();
    assert!(!lock.try_lock());
    assert!(lock.is_locked(), "failed try_lock must not change state");
    unsafe { lock.unlock() };
}

fn scoped_guard<L: RawMutex>() {
    let m: Mutex<(), L> = Mutex::new(());
    {
        let _guard = m.lock();
        assert!(m.try_lock().is_none());
    }
    assert!(m.try_lock().is_some());
}

fn round_trip<L: RawMutex>() {
    let lock = L::INIT;
    for _ in 0..100 {
        lock.lock();
        unsafe { lock.unlock() };
        assert!(lock.try_lock());
        unsafe { lock.unlock() };
    }
    assert!(!lock.is_locked());
    assert!(lock.try_lock(), "net-zero sequence must leave the lock fresh");
    unsafe { lock.unlock() };
}

fn high_contention<L: RawMutex + Sync>() {
    const THREADS: usize = 4;
    const ITERATIONS: usize = 50_000;

    let counter: Mutex<i32, L> = Mutex::new(0);
    std::thread::scope(|s| {
        for _ in 0..THREADS {
            s.spawn(|| {
                for _ in 0..ITERATIONS {
                    let mut guard = counter.lock();
                    *guard += 1;
                }
            });
        }
    });

    assert_eq!(counter.into_inner(), (THREADS * ITERATIONS) as i32);
}

macro_rules! lockable_tests {
    ($($name:ident => $lock:ty),* $(,)?) => {
        $(
            mod $name {
                #[test]
                fn lock() {
                    super::lock_unlock::<$lock>();
                }

                #[test]
                fn try_lock() {
                    super::try_lock::<$lock>();
                }

                #[test]
                fn fail_try_lock() {
                    super::fail_try_lock::<$lock>();
                }

                #[test]
                fn lock_guard() {
                    super::scoped_guard::<$lock>();
                }

                #[test]
                fn round_trip() {
                    super::round_trip::<$lock>();
                }

                #[test]
                fn high_contention() {
                    super::high_contention::<$lock>();
                }
            }
        )*
    };
}

lockable_tests! {
    spin_lock => spinlock_kit::SpinLock,
    spin_lock_yield => spinlock_kit::SpinLockYield,
    spin_lock_memory_order => spinlock_kit::SpinLockMemoryOrder,
    spin_lock_memory_order_yield => spinlock_kit::SpinLockMemoryOrderYield,
    spin_lock_backoff => spinlock_kit::RawSpinLock<spinlock_kit::BackOff, spinlock_kit::AcqRel>,
}

// The shared lock's exclusive side obeys the same contract.
mod shared_as_exclusive {
    use lock_api::RawRwLock;
    use spinlock_kit::sync::RwLock;
    use spinlock_kit::SharedSpinLock;

    #[test]
    fn lock() {
        let lock = SharedSpinLock::INIT;
        lock.lock_exclusive();
        unsafe { lock.unlock_exclusive() };
    }

    #[test]
    fn fail_try_lock() {
        let lock = SharedSpinLock::new();
        lock.lock();
        assert!(!lock.try_lock());
        unsafe { lock.unlock() };
        assert!(lock.try_lock());
        unsafe { lock.unlock() };
    }

    #[test]
    fn high_contention() {
        const THREADS: usize = 4;
        const ITERATIONS: usize = 50_000;

        let counter: RwLock<i32, SharedSpinLock> = RwLock::new(0);
        std::thread::scope(|s| {
            for _ in 0..THREADS {
                s.spawn(|| {
                    for _ in 0..ITERATIONS {
                        *counter.write() += 1;
                    }
                });
            }
        });

        assert_eq!(counter.into_inner(), (THREADS * ITERATIONS) as i32);
    }
}

#[test]
fn exclusive_layout_is_one_byte() {
    use core::mem::size_of;
    assert_eq!(size_of::<spinlock_kit::SpinLock>(), 1);
    assert_eq!(size_of::<spinlock_kit::SpinLockYield>(), 1);
    assert_eq!(size_of::<spinlock_kit::SpinLockMemoryOrder>(), 1);
    assert_eq!(size_of::<spinlock_kit::SpinLockMemoryOrderYield>(), 1);
}
