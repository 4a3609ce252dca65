//! Block geometry: mapping between payload addresses and block indices.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::constants::LINK_WIDTH;
use crate::error::PoolError;

/// Numeric address of a block payload handed out by a pool.
///
/// Addresses are opaque tokens: they are never dereferenced, only compared
/// against the grid of the pool that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(usize);

impl Address {
    /// Wrap a raw address value.
    #[must_use]
    pub const fn new(raw: usize) -> Self {
        Self(raw)
    }

    /// Raw address value.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }

    /// Address `bytes` further up (wrapping).
    #[must_use]
    pub const fn byte_add(self, bytes: usize) -> Self {
        Self(self.0.wrapping_add(bytes))
    }

    /// Address `bytes` further down (wrapping).
    #[must_use]
    pub const fn byte_sub(self, bytes: usize) -> Self {
        Self(self.0.wrapping_sub(bytes))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:016x}", self.0)
    }
}

impl fmt::LowerHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

/// Geometry of an initialized region.
///
/// Pure arithmetic over the region base; holds no reference to the region
/// itself, so ownership checks can run without the pool lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockGrid {
    base: usize,
    block_size: usize,
    capacity: usize,
}

impl BlockGrid {
    /// Describe `capacity` blocks of `block_size` payload bytes starting at `base`.
    #[must_use]
    pub const fn new(base: usize, block_size: usize, capacity: usize) -> Self {
        Self {
            base,
            block_size,
            capacity,
        }
    }

    /// Distance between consecutive blocks.
    #[must_use]
    pub const fn stride(&self) -> usize {
        self.block_size + LINK_WIDTH
    }

    /// Payload bytes per block.
    #[must_use]
    pub const fn block_size(&self) -> usize {
        self.block_size
    }

    /// Number of blocks.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total region length in bytes.
    #[must_use]
    pub const fn region_len(&self) -> usize {
        self.capacity * self.stride()
    }

    /// Lowest valid payload address.
    #[must_use]
    pub const fn first_payload(&self) -> Address {
        Address(self.base + LINK_WIDTH)
    }

    /// Highest valid payload address (`base + region_len - block_size`).
    #[must_use]
    pub const fn last_payload(&self) -> Address {
        Address(self.base + self.region_len() - self.block_size)
    }

    /// Payload address of the block at `index`.
    #[must_use]
    pub const fn payload_of(&self, index: usize) -> Address {
        Address(self.base + index * self.stride() + LINK_WIDTH)
    }

    /// Map a payload address back to its block index.
    ///
    /// The address must lie in `[first_payload, last_payload]` and sit an
    /// exact number of strides above `first_payload`.
    pub fn index_of(&self, address: Address) -> Result<usize, PoolError> {
        let first = self.first_payload().get();
        let last = self.last_payload().get();
        let raw = address.get();
        if raw < first || raw > last {
            return Err(PoolError::NotOwned { address });
        }
        let delta = raw - first;
        if delta % self.stride() != 0 {
            return Err(PoolError::NotOwned { address });
        }
        Ok(delta / self.stride())
    }

    /// Whether `address` is a payload address of this grid.
    #[must_use]
    pub fn owns(&self, address: Address) -> bool {
        self.index_of(address).is_ok()
    }

    /// Region byte range of the link slot of block `index`.
    #[must_use]
    pub const fn link_range(&self, index: usize) -> Range<usize> {
        let start = index * self.stride();
        start..start + LINK_WIDTH
    }

    /// Region byte range of the payload of block `index`.
    #[must_use]
    pub const fn payload_range(&self, index: usize) -> Range<usize> {
        let start = index * self.stride() + LINK_WIDTH;
        start..start + self.block_size
    }
}
