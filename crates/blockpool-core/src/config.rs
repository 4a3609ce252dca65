//! Pool configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_BLOCK_SIZE, DEFAULT_POOL_SIZE, LINK_WIDTH, MAX_CAPACITY};
use crate::error::PoolError;

/// When payload bytes are cleared.
///
/// With [`ScrubPolicy::Never`] a block handed out again still carries
/// whatever the previous holder wrote; callers must not assume zeroed memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScrubPolicy {
    /// Payload bytes are never touched by the pool.
    #[default]
    Never,
    /// Payload is zeroed before a block is handed out.
    OnAllocate,
    /// Payload is zeroed when a block returns to the free list.
    OnRelease,
}

/// Shape of a pool: payload size and number of blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Payload bytes handed to the caller per block.
    pub block_size: usize,
    /// Number of blocks in the region.
    pub capacity: usize,
    /// Payload clearing policy.
    #[serde(default)]
    pub scrub: ScrubPolicy,
}

impl PoolConfig {
    /// Pool of `capacity` blocks of `block_size` bytes.
    #[must_use]
    pub fn new(block_size: usize, capacity: usize) -> Self {
        Self {
            block_size,
            capacity,
            scrub: ScrubPolicy::Never,
        }
    }

    /// Pool sized by total payload bytes: `capacity = pool_size / block_size`.
    ///
    /// A zero `block_size` yields a zero capacity, which `validate` rejects.
    #[must_use]
    pub fn from_pool_size(block_size: usize, pool_size: usize) -> Self {
        let capacity = pool_size.checked_div(block_size).unwrap_or(0);
        Self::new(block_size, capacity)
    }

    /// Replace the scrub policy.
    #[must_use]
    pub fn with_scrub(mut self, scrub: ScrubPolicy) -> Self {
        self.scrub = scrub;
        self
    }

    /// Distance between consecutive blocks in the region.
    #[must_use]
    pub fn stride(&self) -> usize {
        self.block_size.saturating_add(LINK_WIDTH)
    }

    /// Region length in bytes, or `None` if it does not fit in `usize`.
    #[must_use]
    pub fn region_len(&self) -> Option<usize> {
        self.block_size
            .checked_add(LINK_WIDTH)?
            .checked_mul(self.capacity)
    }

    /// Total payload bytes across all blocks (saturating).
    #[must_use]
    pub fn pool_size(&self) -> usize {
        self.block_size.saturating_mul(self.capacity)
    }

    /// Check that the configuration describes at least one usable block.
    pub fn validate(&self) -> Result<(), PoolError> {
        if self.block_size == 0 {
            return Err(PoolError::InvalidConfig(
                "block size must be greater than zero".into(),
            ));
        }
        if self.capacity == 0 {
            return Err(PoolError::InvalidConfig(
                "pool must hold at least one block".into(),
            ));
        }
        if self.capacity > MAX_CAPACITY {
            return Err(PoolError::InvalidConfig(format!(
                "capacity {} exceeds the maximum of {MAX_CAPACITY}",
                self.capacity
            )));
        }
        Ok(())
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::from_pool_size(DEFAULT_BLOCK_SIZE, DEFAULT_POOL_SIZE)
    }
}
