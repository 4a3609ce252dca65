//! Pool error taxonomy.

use serde::Serialize;

use crate::grid::Address;

/// Why an allocation could not be satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MemoryShortfall {
    /// The backing region of `bytes` bytes could not be reserved.
    Region {
        /// Requested region size (saturated on overflow).
        bytes: usize,
    },
    /// Every block of the pool is currently handed out.
    Exhausted {
        /// Number of blocks in the pool.
        capacity: usize,
    },
}

impl std::fmt::Display for MemoryShortfall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Region { bytes } => write!(f, "cannot reserve a region of {bytes} bytes"),
            Self::Exhausted { capacity } => write!(f, "all {capacity} blocks are in use"),
        }
    }
}

/// Errors returned by [`Pool`](crate::Pool) operations.
///
/// A failed operation never mutates the pool: the free list, the block tags
/// and the statistics of successful operations are exactly as they were.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// `initialize` was called on a pool that already owns its region.
    #[error("pool is already initialized")]
    AlreadyInitialized,

    /// An operation was attempted before a successful `initialize`.
    #[error("pool is not initialized")]
    NotInitialized,

    /// The region could not be reserved, or the free list is empty.
    #[error("out of memory: {0}")]
    OutOfMemory(MemoryShortfall),

    /// The address is outside this pool's block grid or not on a block boundary.
    #[error("address {address} does not belong to this pool")]
    NotOwned {
        /// Offending address.
        address: Address,
    },

    /// The block at this address is not currently allocated.
    #[error("block at {address} is already free")]
    DoubleFree {
        /// Offending address.
        address: Address,
    },

    /// Payload access to a block that is on the free list.
    #[error("block at {address} is not allocated")]
    NotAllocated {
        /// Offending address.
        address: Address,
    },

    /// Payload access past the end of the block.
    #[error("payload access of {len} bytes at offset {offset} exceeds block size {block_size}")]
    PayloadBounds {
        /// Start offset within the payload.
        offset: usize,
        /// Number of bytes requested.
        len: usize,
        /// Payload size of the pool.
        block_size: usize,
    },

    /// The pool configuration cannot describe a usable pool.
    #[error("invalid pool configuration: {0}")]
    InvalidConfig(String),

    /// The free list links point outside the pool or form a cycle.
    #[error("free list is corrupt at block {index}")]
    CorruptFreeList {
        /// Index of the block holding the bad link.
        index: usize,
    },
}

impl PoolError {
    /// Whether the error reports caller misuse of an address.
    #[must_use]
    pub fn is_misuse(&self) -> bool {
        matches!(
            self,
            Self::NotOwned { .. } | Self::DoubleFree { .. } | Self::NotAllocated { .. }
        )
    }

    /// Whether the error means the free list is currently empty.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::OutOfMemory(MemoryShortfall::Exhausted { .. }))
    }
}
