//! Contention benchmark for the locks in `spinlock-kit`.
//!
//! Exclusive variants run `threads` workers that each increment a shared
//! counter `iterations` times under the lock. The shared variants run the
//! same writers through `RwLock::write` while `readers` extra threads keep
//! taking read guards and checking they never see a half-written pair.
//!
//! Exits non-zero if any update was lost or any torn read was observed.

use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use clap::{value_parser, Arg, ArgMatches, Command};
use lock_api::{RawMutex, RawRwLock};
use log::*;

use spinlock_kit::sync::{Mutex, RwLock};
use spinlock_kit::{
    BackOff, RawSpinLock, SeqCst, SharedSpinLock, SharedSpinLockYield, SpinLock,
    SpinLockMemoryOrder, SpinLockMemoryOrderYield, SpinLockYield,
};

const VARIANTS: [&str; 7] = [
    "spin",
    "yield",
    "memory-order",
    "memory-order-yield",
    "backoff",
    "shared",
    "shared-yield",
];

fn setup_logger() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "spinlock_bench=info");
    }
    env_logger::init();
}

fn cli() -> Command {
    Command::new("spinlock-bench")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Hammers a spinlock variant and checks that no update is lost")
        .arg(
            Arg::new("variant")
                .long("variant")
                .short('v')
                .value_parser(VARIANTS)
                .default_value("memory-order")
                .help("Lock variant to exercise"),
        )
        .arg(
            Arg::new("threads")
                .long("threads")
                .short('t')
                .value_parser(value_parser!(usize))
                .default_value("4")
                .help("Number of writer threads"),
        )
        .arg(
            Arg::new("iterations")
                .long("iterations")
                .short('n')
                .value_parser(value_parser!(u64))
                .default_value("100000")
                .help("Critical sections per writer thread"),
        )
        .arg(
            Arg::new("readers")
                .long("readers")
                .short('r')
                .value_parser(value_parser!(usize))
                .default_value("4")
                .help("Reader threads (shared variants only)"),
        )
}

struct Workload {
    threads: usize,
    iterations: u64,
    readers: usize,
}

impl Workload {
    fn from_matches(m: &ArgMatches) -> Self {
        Workload {
            threads: m.get_one::<usize>("threads").copied().unwrap_or(4),
            iterations: m.get_one::<u64>("iterations").copied().unwrap_or(100_000),
            readers: m.get_one::<usize>("readers").copied().unwrap_or(4),
        }
    }

    fn expected(&self) -> u64 {
        self.threads as u64 * self.iterations
    }
}

struct Outcome {
    counter: u64,
    torn_reads: u64,
    read_sections: u64,
    elapsed: Duration,
}

fn run_exclusive<L>(w: &Workload) -> Outcome
where
    L: RawMutex + Sync,
{
    let counter: Mutex<u64, L> = Mutex::new(0);
    let start = Instant::now();

    thread::scope(|s| {
        for _ in 0..w.threads {
            s.spawn(|| {
                for _ in 0..w.iterations {
                    *counter.lock() += 1;
                }
            });
        }
    });

    Outcome {
        counter: counter.into_inner(),
        torn_reads: 0,
        read_sections: 0,
        elapsed: start.elapsed(),
    }
}

fn run_shared<L>(w: &Workload) -> Outcome
where
    L: RawRwLock + Sync,
{
    // Writers keep both halves equal; readers must never see them differ.
    let pair: RwLock<(u64, u64), L> = RwLock::new((0, 0));
    let writers_done = AtomicBool::new(false);
    let torn = AtomicU64::new(0);
    let reads = AtomicU64::new(0);
    let start = Instant::now();

    thread::scope(|s| {
        for _ in 0..w.readers {
            s.spawn(|| {
                while !writers_done.load(Ordering::Relaxed) {
                    let g = pair.read();
                    if g.0 != g.1 {
                        torn.fetch_add(1, Ordering::Relaxed);
                    }
                    drop(g);
                    reads.fetch_add(1, Ordering::Relaxed);
                }
            });
        }

        let writers: Vec<_> = (0..w.threads)
            .map(|_| {
                s.spawn(|| {
                    for _ in 0..w.iterations {
                        let mut g = pair.write();
                        g.0 += 1;
                        g.1 += 1;
                    }
                })
            })
            .collect();
        for h in writers {
            if h.join().is_err() {
                error!("writer thread panicked");
            }
        }
        writers_done.store(true, Ordering::Relaxed);
    });

    let (a, b) = pair.into_inner();
    if a != b {
        torn.fetch_add(1, Ordering::Relaxed);
    }

    Outcome {
        counter: a,
        torn_reads: torn.into_inner(),
        read_sections: reads.into_inner(),
        elapsed: start.elapsed(),
    }
}

fn run(variant: &str, w: &Workload) -> Outcome {
    match variant {
        "spin" => run_exclusive::<SpinLock>(w),
        "memory-order" => run_exclusive::<SpinLockMemoryOrder>(w),
        "yield" => run_exclusive::<SpinLockYield>(w),
        "memory-order-yield" => run_exclusive::<SpinLockMemoryOrderYield>(w),
        "backoff" => run_exclusive::<RawSpinLock<BackOff, SeqCst>>(w),
        "shared" => run_shared::<SharedSpinLock>(w),
        "shared-yield" => run_shared::<SharedSpinLockYield>(w),
        other => unreachable!("clap admitted unknown variant {other}"),
    }
}

fn main() -> ExitCode {
    setup_logger();

    let matches = cli().get_matches();
    let variant = matches
        .get_one::<String>("variant")
        .map(String::as_str)
        .unwrap_or("memory-order");
    let workload = Workload::from_matches(&matches);

    info!(
        "variant={} threads={} iterations={} readers={}",
        variant, workload.threads, workload.iterations, workload.readers
    );

    let outcome = run(variant, &workload);
    let expected = workload.expected();
    let per_section = outcome
        .elapsed
        .checked_div(u32::try_from(expected.max(1)).unwrap_or(u32::MAX))
        .unwrap_or_default();

    info!(
        "finished in {:?} ({:?} per write section), {} read sections",
        outcome.elapsed, per_section, outcome.read_sections
    );

    let mut ok = true;
    if outcome.counter != expected {
        error!(
            "lost updates: counter={} expected={}",
            outcome.counter, expected
        );
        ok = false;
    }
    if outcome.torn_reads != 0 {
        error!("{} readers observed a partial write", outcome.torn_reads);
        ok = false;
    }

    println!("Final counter value: {}", outcome.counter);
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
