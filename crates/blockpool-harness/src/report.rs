//! Smoke and stress run reports.

use std::time::Duration;

use serde::Serialize;

use blockpool_core::{PoolConfig, PoolStats};

/// Outcome of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    /// Whether the run passed.
    pub passed: bool,
    /// Human-readable reasons for a failure; empty on success.
    pub reasons: Vec<String>,
}

impl Verdict {
    fn from_reasons(reasons: Vec<String>) -> Self {
        Self {
            passed: reasons.is_empty(),
            reasons,
        }
    }
}

/// One checked step of the smoke scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SmokeStep {
    /// Short step name.
    pub name: &'static str,
    /// Whether the pool behaved as expected.
    pub passed: bool,
    /// What was observed.
    pub detail: String,
}

/// Result of the single-threaded smoke scenario.
#[derive(Debug, Clone, Serialize)]
pub struct SmokeReport {
    /// Pool shape under test.
    pub config: PoolConfig,
    /// Steps in execution order.
    pub steps: Vec<SmokeStep>,
    /// Pool counters at the end of the run.
    pub stats: PoolStats,
}

impl SmokeReport {
    /// Pass iff every step passed.
    #[must_use]
    pub fn verdict(&self) -> Verdict {
        Verdict::from_reasons(
            self.steps
                .iter()
                .filter(|step| !step.passed)
                .map(|step| format!("{}: {}", step.name, step.detail))
                .collect(),
        )
    }
}

/// Result of a multithreaded stress run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StressReport {
    /// Worker threads started.
    pub threads: usize,
    /// Rounds each worker attempted.
    pub rounds: usize,
    /// Blocks in the pool.
    pub capacity: usize,
    /// Workers that completed every round.
    pub passed_threads: usize,
    /// Workers that gave up waiting for a block.
    pub starved_threads: usize,
    /// Successful allocations across all workers.
    pub allocations: u64,
    /// Successful releases across all workers.
    pub releases: u64,
    /// Exhausted attempts that were retried.
    pub retries: u64,
    /// Times an address was handed to a worker while another still held it.
    pub violations: u64,
    /// Read-backs that did not match what the worker wrote.
    pub corruptions: u64,
    /// Pool errors other than exhaustion.
    pub unexpected_errors: u64,
    /// Whether the run was cancelled before all workers finished.
    pub cancelled: bool,
    /// Wall-clock duration.
    pub elapsed: Duration,
    /// Pool counters at the end of the run.
    pub stats: PoolStats,
}

impl StressReport {
    /// Pass iff the pool kept blocks exclusive and intact and at least half
    /// of the workers got through.
    #[must_use]
    pub fn verdict(&self) -> Verdict {
        let mut reasons = Vec::new();
        if self.cancelled {
            reasons.push("run was cancelled".to_string());
        }
        if self.violations > 0 {
            reasons.push(format!(
                "{} block(s) handed to two workers at once",
                self.violations
            ));
        }
        if self.corruptions > 0 {
            reasons.push(format!("{} payload read-back mismatch(es)", self.corruptions));
        }
        if self.unexpected_errors > 0 {
            reasons.push(format!("{} unexpected pool error(s)", self.unexpected_errors));
        }
        if self.allocations > self.releases + self.capacity as u64 {
            reasons.push(format!(
                "{} allocations exceed {} releases plus capacity {}",
                self.allocations, self.releases, self.capacity
            ));
        }
        if self.passed_threads < self.threads / 2 {
            reasons.push(format!(
                "only {}/{} workers completed; grow the pool or the retry budget",
                self.passed_threads, self.threads
            ));
        }
        Verdict::from_reasons(reasons)
    }
}
