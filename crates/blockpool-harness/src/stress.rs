//! Multithreaded stress run.
//!
//! Worker threads compete for the blocks of one pool. Each worker allocates
//! with a bounded fixed-delay retry on exhaustion, claims the address in a
//! shared ledger, scribbles its own pattern over the payload with random
//! pauses in between, reads it back and releases the block. A second claim of
//! a held address means the pool handed one block to two workers.

use std::collections::HashSet;
use std::ops::RangeInclusive;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use blockpool_core::{Address, Pool, PoolError};

use crate::cancel::CancellationToken;
use crate::error::HarnessError;
use crate::observer::{StressEvent, StressObserver};
use crate::pattern;
use crate::report::StressReport;

/// Parameters of a stress run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StressConfig {
    /// Number of worker threads.
    pub threads: usize,
    /// Allocate/verify/release cycles per worker.
    pub rounds: usize,
    /// Exhausted attempts a worker retries before giving up.
    pub retry_limit: u32,
    /// Pause between retries.
    pub retry_wait: Duration,
    /// Range of each random pause while a block is held, in milliseconds.
    pub hold_ms: RangeInclusive<u64>,
    /// Seed for the hold-time generator; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            threads: 20,
            rounds: 1,
            retry_limit: 100,
            retry_wait: Duration::from_millis(5),
            hold_ms: 1..=20,
            seed: None,
        }
    }
}

impl StressConfig {
    /// Reject parameters the run cannot work with.
    pub fn validate(&self) -> Result<(), HarnessError> {
        if self.threads == 0 {
            return Err(HarnessError::Config(
                "threads must be greater than zero".into(),
            ));
        }
        if self.rounds == 0 {
            return Err(HarnessError::Config(
                "rounds must be greater than zero".into(),
            ));
        }
        if self.hold_ms.start() > self.hold_ms.end() {
            return Err(HarnessError::Config(format!(
                "hold range {}..={} ms is empty",
                self.hold_ms.start(),
                self.hold_ms.end()
            )));
        }
        Ok(())
    }
}

/// What one worker did.
#[derive(Debug, Default)]
struct Tally {
    allocations: u64,
    releases: u64,
    retries: u64,
    violations: u64,
    corruptions: u64,
    unexpected_errors: u64,
    starved: bool,
    passed: bool,
}

enum Acquire {
    Got(Address),
    Starved,
    Cancelled,
    Failed(PoolError),
}

struct Worker<'a> {
    index: usize,
    pool: &'a Pool,
    config: &'a StressConfig,
    cancel: &'a CancellationToken,
    observer: &'a dyn StressObserver,
    ledger: &'a Mutex<HashSet<Address>>,
    rng: StdRng,
    tally: Tally,
}

impl Worker<'_> {
    fn run(mut self) -> Tally {
        let mut clean = true;
        let mut completed = 0;
        for _ in 0..self.config.rounds {
            if self.cancel.is_cancelled() {
                break;
            }
            match self.acquire() {
                Acquire::Got(address) => {
                    clean &= self.exercise(address);
                    completed += 1;
                }
                Acquire::Starved => {
                    warn!(
                        worker = self.index,
                        retry_limit = self.config.retry_limit,
                        "worker gave up waiting for a block"
                    );
                    self.tally.starved = true;
                    self.observer
                        .on_event(&StressEvent::Starved { worker: self.index });
                    break;
                }
                Acquire::Cancelled => break,
                Acquire::Failed(err) => {
                    warn!(worker = self.index, error = %err, "allocation failed");
                    self.tally.unexpected_errors += 1;
                    clean = false;
                    break;
                }
            }
        }
        self.tally.passed = clean && completed == self.config.rounds;
        self.observer.on_event(&StressEvent::Finished {
            worker: self.index,
            passed: self.tally.passed,
        });
        self.tally
    }

    /// Allocate, retrying on exhaustion up to the configured limit.
    fn acquire(&mut self) -> Acquire {
        let mut retries = 0u32;
        loop {
            match self.pool.allocate() {
                Ok(address) => {
                    self.tally.allocations += 1;
                    self.observer.on_event(&StressEvent::Acquired {
                        worker: self.index,
                        address,
                        retries,
                    });
                    return Acquire::Got(address);
                }
                Err(err) if err.is_exhausted() => {
                    if retries >= self.config.retry_limit {
                        return Acquire::Starved;
                    }
                    retries += 1;
                    self.tally.retries += 1;
                    self.observer.on_event(&StressEvent::Retried {
                        worker: self.index,
                        attempt: retries,
                    });
                    if !self.cancel.pause(self.config.retry_wait) {
                        return Acquire::Cancelled;
                    }
                }
                Err(err) => return Acquire::Failed(err),
            }
        }
    }

    /// One round on a held block; returns whether it went cleanly.
    fn exercise(&mut self, address: Address) -> bool {
        // Only the first holder's claim is ours to remove.
        let claimed = self.ledger.lock().insert(address);
        if !claimed {
            warn!(worker = self.index, %address, "block handed out while still held");
            self.tally.violations += 1;
        }

        let clean = match self.scribble(address) {
            Ok(intact) => intact,
            Err(err) => {
                warn!(worker = self.index, %address, error = %err, "payload access failed");
                self.tally.unexpected_errors += 1;
                false
            }
        };

        if claimed {
            self.ledger.lock().remove(&address);
        }
        match self.pool.release(address) {
            Ok(()) => {
                self.tally.releases += 1;
                self.observer.on_event(&StressEvent::Released {
                    worker: self.index,
                    address,
                });
                clean
            }
            Err(err) => {
                warn!(worker = self.index, %address, error = %err, "release failed");
                self.tally.unexpected_errors += 1;
                false
            }
        }
    }

    /// Zero the payload, write this worker's pattern, read it back.
    fn scribble(&mut self, address: Address) -> Result<bool, PoolError> {
        let block_size = self.pool.block_size();
        let expected = pattern::tagged(block_size, self.tag());
        let mut readback = vec![0u8; block_size];

        self.hold();
        self.pool.fill(address, 0)?;
        self.hold();
        self.pool.write(address, 0, &expected)?;
        self.hold();
        self.pool.read(address, 0, &mut readback)?;

        if readback != expected {
            warn!(worker = self.index, %address, "payload read-back mismatch");
            self.tally.corruptions += 1;
            return Ok(false);
        }
        Ok(true)
    }

    /// Random pause with the block held; cut short on cancellation.
    fn hold(&mut self) {
        let millis = self.rng.random_range(self.config.hold_ms.clone());
        self.cancel.pause(Duration::from_millis(millis));
    }

    fn tag(&self) -> u8 {
        // Never zero, so no worker writes the plain reference pattern.
        u8::try_from(self.index % 255 + 1).unwrap_or(u8::MAX)
    }
}

/// Run the stress scenario against an initialized `pool`.
///
/// The run always waits for every worker; cancellation makes workers stop at
/// their next check and is reflected in [`StressReport::cancelled`].
pub fn run(
    pool: &Pool,
    config: &StressConfig,
    cancel: &CancellationToken,
    observer: &dyn StressObserver,
) -> Result<StressReport, HarnessError> {
    config.validate()?;
    if !pool.is_initialized() {
        return Err(PoolError::NotInitialized.into());
    }

    info!(
        threads = config.threads,
        rounds = config.rounds,
        capacity = pool.capacity(),
        block_size = pool.block_size(),
        "stress run starting"
    );

    let ledger = Mutex::new(HashSet::with_capacity(pool.capacity()));
    let start = Instant::now();

    let joined = crossbeam::scope(|scope| {
        let handles: Vec<_> = (0..config.threads)
            .map(|index| {
                let rng = match config.seed {
                    Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(index as u64)),
                    None => StdRng::from_os_rng(),
                };
                let worker = Worker {
                    index,
                    pool,
                    config,
                    cancel,
                    observer,
                    ledger: &ledger,
                    rng,
                    tally: Tally::default(),
                };
                scope.spawn(move |_| worker.run())
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join())
            .collect::<Vec<_>>()
    })
    .map_err(|_| HarnessError::WorkerPanicked)?;

    let mut report = StressReport {
        threads: config.threads,
        rounds: config.rounds,
        capacity: pool.capacity(),
        ..StressReport::default()
    };
    for outcome in joined {
        let tally = outcome.map_err(|_| HarnessError::WorkerPanicked)?;
        report.allocations += tally.allocations;
        report.releases += tally.releases;
        report.retries += tally.retries;
        report.violations += tally.violations;
        report.corruptions += tally.corruptions;
        report.unexpected_errors += tally.unexpected_errors;
        report.passed_threads += usize::from(tally.passed);
        report.starved_threads += usize::from(tally.starved);
    }
    report.cancelled = cancel.is_cancelled();
    report.elapsed = start.elapsed();
    report.stats = pool.stats();

    info!(
        passed_threads = report.passed_threads,
        starved_threads = report.starved_threads,
        retries = report.retries,
        elapsed_ms = report.elapsed.as_millis(),
        passed = report.verdict().passed,
        "stress run finished"
    );
    Ok(report)
}
