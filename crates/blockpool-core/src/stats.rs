//! Atomic pool statistics for lock-free usage tracking.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use serde::Serialize;

/// Statistics for pool usage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PoolStats {
    /// Number of successful allocations.
    pub allocations: u64,
    /// Number of successful releases.
    pub releases: u64,
    /// Allocations refused because every block was in use.
    pub exhausted: u64,
    /// Releases refused as not owned or double free.
    pub rejected: u64,
    /// Highest number of blocks handed out at once.
    pub peak_in_use: usize,
}

impl PoolStats {
    /// Blocks allocated and not yet released according to the counters.
    #[must_use]
    pub fn outstanding(&self) -> u64 {
        self.allocations.saturating_sub(self.releases)
    }
}

/// Atomic pool statistics for lock-free updates.
pub struct AtomicPoolStats {
    allocations: AtomicU64,
    releases: AtomicU64,
    exhausted: AtomicU64,
    rejected: AtomicU64,
    peak_in_use: AtomicUsize,
}

impl AtomicPoolStats {
    /// Create new zeroed stats.
    pub fn new() -> Self {
        Self {
            allocations: AtomicU64::new(0),
            releases: AtomicU64::new(0),
            exhausted: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
            peak_in_use: AtomicUsize::new(0),
        }
    }

    /// Take a snapshot of current stats.
    pub fn snapshot(&self) -> PoolStats {
        PoolStats {
            allocations: self.allocations.load(Ordering::Relaxed),
            releases: self.releases.load(Ordering::Relaxed),
            exhausted: self.exhausted.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            peak_in_use: self.peak_in_use.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters.
    pub fn reset(&self) {
        self.allocations.store(0, Ordering::Relaxed);
        self.releases.store(0, Ordering::Relaxed);
        self.exhausted.store(0, Ordering::Relaxed);
        self.rejected.store(0, Ordering::Relaxed);
        self.peak_in_use.store(0, Ordering::Relaxed);
    }

    /// Count an allocation that left `in_use` blocks handed out.
    pub fn record_allocation(&self, in_use: usize) {
        self.allocations.fetch_add(1, Ordering::Relaxed);
        self.peak_in_use.fetch_max(in_use, Ordering::Relaxed);
    }

    /// Increment release counter.
    pub fn record_release(&self) {
        self.releases.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment exhaustion counter.
    pub fn record_exhausted(&self) {
        self.exhausted.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment rejected-release counter.
    pub fn record_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }
}

impl Default for AtomicPoolStats {
    fn default() -> Self {
        Self::new()
    }
}
