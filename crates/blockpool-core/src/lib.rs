//! # blockpool-core
//!
//! A fixed-block-size memory pool.
//!
//! One contiguous region is reserved up front and carved into `capacity`
//! equal blocks. Each block starts with a pointer-width link slot followed by
//! `block_size` payload bytes. Free blocks are chained through their link
//! slots into a singly-linked free list; allocation pops the head and release
//! pushes onto it, both under a single lock.
//!
//! ```text
//!   region (capacity × (LINK_WIDTH + block_size) bytes)
//!   ┌──────┬──────────────┬──────┬──────────────┬─────┬──────┬──────────────┐
//!   │ link │   payload    │ link │   payload    │ ... │ link │   payload    │
//!   └──────┴──────────────┴──────┴──────────────┴─────┴──────┴──────────────┘
//!          ▲ first payload address                           ▲ last payload address
//! ```
//!
//! Link slots hold block indices rather than raw addresses, and an explicit
//! per-block tag records whether a block is handed out, so a double release
//! is always detected.
//!
//! ```
//! use blockpool_core::{Pool, PoolConfig, PoolError};
//!
//! let pool = Pool::new(PoolConfig::new(20, 4)).unwrap();
//! pool.initialize().unwrap();
//!
//! let first = pool.allocate().unwrap();
//! pool.write(first, 0, b"hello").unwrap();
//! pool.release(first).unwrap();
//! assert!(matches!(pool.release(first), Err(PoolError::DoubleFree { .. })));
//! ```
#![warn(missing_docs)]

pub mod config;
pub mod constants;
pub mod error;
pub mod grid;
pub mod inspect;
pub mod lease;
pub mod pool;
pub mod stats;

pub use config::{PoolConfig, ScrubPolicy};
pub use error::{MemoryShortfall, PoolError};
pub use grid::{Address, BlockGrid};
pub use inspect::{BlockDump, BlockState, Link};
pub use lease::BlockLease;
pub use pool::Pool;
pub use stats::PoolStats;
