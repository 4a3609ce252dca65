//! Block link encoding and diagnostic dumps.
//!
//! Nothing here is part of the allocation contract; dumps are snapshots for
//! humans and must not drive control flow.

use serde::Serialize;

use crate::constants::{LINK_ALLOCATED, LINK_END};
use crate::grid::Address;

/// Allocation state of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockState {
    /// On the free list.
    Free,
    /// Handed out to a caller.
    Allocated,
}

/// Decoded content of a link slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "index", rename_all = "snake_case")]
pub enum Link {
    /// Free block followed by the free block at this index.
    Next(usize),
    /// Last block of the free list.
    End,
    /// Block handed out to a caller.
    Allocated,
}

impl Link {
    /// Decode a raw link value.
    #[must_use]
    pub const fn decode(raw: usize) -> Self {
        match raw {
            LINK_END => Self::End,
            LINK_ALLOCATED => Self::Allocated,
            index => Self::Next(index),
        }
    }

    /// Raw value stored in the link slot.
    #[must_use]
    pub const fn encode(self) -> usize {
        match self {
            Self::Next(index) => index,
            Self::End => LINK_END,
            Self::Allocated => LINK_ALLOCATED,
        }
    }

    /// Link pointing at `head`, or the tail marker when the list is empty.
    #[must_use]
    pub const fn to(head: Option<usize>) -> Self {
        match head {
            Some(index) => Self::Next(index),
            None => Self::End,
        }
    }
}

/// Snapshot of one block taken under the pool lock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockDump {
    /// Block index in address order.
    pub index: usize,
    /// Payload address.
    pub address: Address,
    /// Decoded link slot.
    pub link: Link,
    /// Raw link slot value.
    pub raw_link: usize,
    /// Allocation tag.
    pub state: BlockState,
    /// Copy of the payload bytes.
    pub payload: Vec<u8>,
}
