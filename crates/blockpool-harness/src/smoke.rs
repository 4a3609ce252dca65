//! Single-threaded smoke scenario.
//!
//! Walks a fresh pool through exhaustion, foreign releases, a full reverse
//! drain, a double release, a second initialize and LIFO reuse, recording
//! whether each step behaved as the pool contract promises.

use tracing::{debug, info};

use blockpool_core::{Address, Pool, PoolConfig, PoolError};

use crate::error::HarnessError;
use crate::pattern;
use crate::report::{SmokeReport, SmokeStep};

struct Recorder {
    steps: Vec<SmokeStep>,
}

impl Recorder {
    fn record(&mut self, name: &'static str, passed: bool, detail: impl Into<String>) {
        let detail = detail.into();
        debug!(step = name, passed, %detail, "smoke step");
        self.steps.push(SmokeStep {
            name,
            passed,
            detail,
        });
    }

    /// Record an operation that must fail with exactly `expected`.
    fn expect_err<T: std::fmt::Debug>(
        &mut self,
        name: &'static str,
        outcome: Result<T, PoolError>,
        expected: impl Fn(&PoolError) -> bool,
    ) {
        match outcome {
            Err(err) if expected(&err) => self.record(name, true, err.to_string()),
            Err(err) => self.record(name, false, format!("unexpected error: {err}")),
            Ok(value) => self.record(name, false, format!("succeeded with {value:?}")),
        }
    }
}

/// Run the smoke scenario against a new pool built from `config`.
///
/// Fails only when the configuration itself is rejected; pool misbehaviour
/// is reported as failed steps.
pub fn run(config: PoolConfig) -> Result<SmokeReport, HarnessError> {
    let pool = Pool::new(config)?;
    let mut rec = Recorder { steps: Vec::new() };

    if let Err(err) = pool.initialize() {
        rec.record("initialize", false, err.to_string());
        return Ok(finish(&pool, rec));
    }
    let (first, last) = pool
        .payload_range()
        .ok_or(PoolError::NotInitialized)?;
    rec.record(
        "initialize",
        true,
        format!("{} blocks of {} bytes, {first}..={last}", pool.capacity(), pool.block_size()),
    );

    let held = allocate_all(&pool, &mut rec);
    if held.len() != pool.capacity() {
        return Ok(finish(&pool, rec));
    }

    rec.expect_err("overbook", pool.allocate(), PoolError::is_exhausted);

    let above = last.byte_add(pool.stride());
    rec.expect_err("release above range", pool.release(above), |err| {
        matches!(err, PoolError::NotOwned { .. })
    });

    let mut drained = 0;
    for address in held.iter().rev() {
        match pool.release(*address) {
            Ok(()) => drained += 1,
            Err(err) => {
                rec.record("release all", false, format!("{address}: {err}"));
                break;
            }
        }
    }
    if drained == held.len() {
        rec.record("release all", true, format!("{drained} blocks, last to first"));
    }

    let below = first.byte_sub(pool.stride());
    rec.expect_err("release below range", pool.release(below), |err| {
        matches!(err, PoolError::NotOwned { .. })
    });

    rec.expect_err("double free", pool.release(first), |err| {
        matches!(err, PoolError::DoubleFree { .. })
    });

    rec.expect_err("initialize again", pool.initialize(), |err| {
        *err == PoolError::AlreadyInitialized
    });

    lifo_reuse(&pool, first, &mut rec);
    free_list_intact(&pool, &mut rec);

    Ok(finish(&pool, rec))
}

/// Allocate every block, writing and verifying the reference pattern.
fn allocate_all(pool: &Pool, rec: &mut Recorder) -> Vec<Address> {
    let expected = pattern::reference(pool.block_size());
    let mut held = Vec::with_capacity(pool.capacity());
    let mut readback = vec![0u8; pool.block_size()];

    for _ in 0..pool.capacity() {
        let outcome = pool.allocate().and_then(|address| {
            held.push(address);
            pool.write(address, 0, &expected)?;
            pool.read(address, 0, &mut readback)?;
            Ok(address)
        });
        match outcome {
            Ok(address) if readback != expected => {
                rec.record("allocate all", false, format!("pattern mismatch at {address}"));
                return held;
            }
            Ok(_) => {}
            Err(err) => {
                rec.record("allocate all", false, format!("block {}: {err}", held.len()));
                return held;
            }
        }
    }
    rec.record(
        "allocate all",
        true,
        format!("{} blocks hold the test pattern", held.len()),
    );
    held
}

fn lifo_reuse(pool: &Pool, expected: Address, rec: &mut Recorder) {
    match pool.allocate() {
        Ok(address) => {
            rec.record(
                "lifo reuse",
                address == expected,
                format!("got {address}, expected {expected}"),
            );
            if let Err(err) = pool.release(address) {
                rec.record("lifo reuse", false, format!("release failed: {err}"));
            }
        }
        Err(err) => rec.record("lifo reuse", false, err.to_string()),
    }
}

fn free_list_intact(pool: &Pool, rec: &mut Recorder) {
    match pool.free_list() {
        Ok(free) => rec.record(
            "free list",
            free.len() == pool.capacity(),
            format!("{}/{} blocks free", free.len(), pool.capacity()),
        ),
        Err(err) => rec.record("free list", false, err.to_string()),
    }
}

fn finish(pool: &Pool, rec: Recorder) -> SmokeReport {
    let report = SmokeReport {
        config: *pool.config(),
        steps: rec.steps,
        stats: pool.stats(),
    };
    info!(passed = report.verdict().passed, steps = report.steps.len(), "smoke run finished");
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pool_passes() {
        let report = run(PoolConfig::default()).unwrap();
        let names: Vec<&str> = report.steps.iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            vec![
                "initialize",
                "allocate all",
                "overbook",
                "release above range",
                "release all",
                "release below range",
                "double free",
                "initialize again",
                "lifo reuse",
                "free list",
            ]
        );
        assert!(report.verdict().passed, "{:?}", report.verdict().reasons);
    }

    #[test]
    fn odd_shapes_pass() {
        for (block_size, capacity) in [(1, 1), (3, 7), (64, 2), (40, 5)] {
            let report = run(PoolConfig::new(block_size, capacity)).unwrap();
            assert!(
                report.verdict().passed,
                "{block_size}x{capacity}: {:?}",
                report.verdict().reasons
            );
        }
    }

    #[test]
    fn stats_reflect_the_scenario() {
        let report = run(PoolConfig::new(20, 4)).unwrap();
        assert_eq!(report.stats.allocations, 5);
        assert_eq!(report.stats.releases, 5);
        assert_eq!(report.stats.exhausted, 1);
        assert_eq!(report.stats.rejected, 3);
        assert_eq!(report.stats.peak_in_use, 4);
    }

    #[test]
    fn invalid_config_is_an_error() {
        assert!(matches!(
            run(PoolConfig::new(0, 4)),
            Err(HarnessError::Pool(PoolError::InvalidConfig(_)))
        ));
    }

    #[test]
    fn unreservable_region_fails_first_step() {
        let report = run(PoolConfig::new(usize::MAX / 4, 3)).unwrap();
        assert_eq!(report.steps.len(), 1);
        assert!(!report.verdict().passed);
    }
}
