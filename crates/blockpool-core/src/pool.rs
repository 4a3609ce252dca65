//! Fixed-block-size pool with an index-linked free list behind one lock.

use std::fmt;
use std::ops::Range;
use std::sync::OnceLock;

use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use crate::config::{PoolConfig, ScrubPolicy};
use crate::constants::LINK_WIDTH;
use crate::error::{MemoryShortfall, PoolError};
use crate::grid::{Address, BlockGrid};
use crate::inspect::{BlockDump, BlockState, Link};
use crate::lease::BlockLease;
use crate::stats::{AtomicPoolStats, PoolStats};

/// Initialized pool storage: the region plus free-list bookkeeping.
struct Arena {
    region: Box<[u8]>,
    grid: BlockGrid,
    tags: Vec<BlockState>,
    head: Option<usize>,
    available: usize,
}

impl Arena {
    /// Reserve and format a region for `config`.
    ///
    /// Reservation is fallible; on failure nothing is retained.
    fn reserve(config: &PoolConfig) -> Result<Self, PoolError> {
        let region_len = config.region_len().ok_or(PoolError::OutOfMemory(
            MemoryShortfall::Region { bytes: usize::MAX },
        ))?;
        let shortfall = PoolError::OutOfMemory(MemoryShortfall::Region { bytes: region_len });

        let mut region = Vec::new();
        region
            .try_reserve_exact(region_len)
            .map_err(|_| shortfall.clone())?;
        // Touches every page; see `Pool::initialize`.
        region.resize(region_len, 0u8);
        let region = region.into_boxed_slice();

        let mut tags = Vec::new();
        tags.try_reserve_exact(config.capacity)
            .map_err(|_| shortfall)?;
        tags.resize(config.capacity, BlockState::Free);

        let grid = BlockGrid::new(region.as_ptr() as usize, config.block_size, config.capacity);
        let mut arena = Self {
            region,
            grid,
            tags,
            head: None,
            available: 0,
        };
        arena.format();
        Ok(arena)
    }

    /// Chain every block into the free list in ascending address order.
    fn format(&mut self) {
        let capacity = self.grid.capacity();
        for index in 0..capacity {
            let next = if index + 1 < capacity {
                Link::Next(index + 1)
            } else {
                Link::End
            };
            self.write_link(index, next);
            self.tags[index] = BlockState::Free;
        }
        self.head = Some(0);
        self.available = capacity;
    }

    fn read_link(&self, index: usize) -> usize {
        let mut raw = [0u8; LINK_WIDTH];
        raw.copy_from_slice(&self.region[self.grid.link_range(index)]);
        usize::from_le_bytes(raw)
    }

    fn write_link(&mut self, index: usize, link: Link) {
        let range = self.grid.link_range(index);
        self.region[range].copy_from_slice(&link.encode().to_le_bytes());
    }

    /// Successor of a free block, validated against the grid.
    fn successor(&self, index: usize) -> Result<Option<usize>, PoolError> {
        match Link::decode(self.read_link(index)) {
            Link::Next(next) if next < self.grid.capacity() => Ok(Some(next)),
            Link::End => Ok(None),
            Link::Next(_) | Link::Allocated => Err(PoolError::CorruptFreeList { index }),
        }
    }

    /// Detach the head of the free list.
    fn pop(&mut self) -> Result<Option<usize>, PoolError> {
        let Some(index) = self.head else {
            return Ok(None);
        };
        let next = self.successor(index)?;
        self.head = next;
        self.write_link(index, Link::Allocated);
        self.tags[index] = BlockState::Allocated;
        self.available -= 1;
        Ok(Some(index))
    }

    /// Push an allocated block onto the head of the free list.
    fn push(&mut self, index: usize) {
        self.write_link(index, Link::to(self.head));
        self.tags[index] = BlockState::Free;
        self.head = Some(index);
        self.available += 1;
    }

    fn in_use(&self) -> usize {
        self.grid.capacity() - self.available
    }

    fn scrub(&mut self, index: usize) {
        let range = self.grid.payload_range(index);
        self.region[range].fill(0);
    }

    /// Region range for `len` payload bytes at `offset` of an allocated block.
    fn payload_window(
        &self,
        address: Address,
        offset: usize,
        len: usize,
    ) -> Result<Range<usize>, PoolError> {
        let index = self.grid.index_of(address)?;
        if self.tags[index] != BlockState::Allocated {
            return Err(PoolError::NotAllocated { address });
        }
        let block_size = self.grid.block_size();
        let end = offset
            .checked_add(len)
            .filter(|&end| end <= block_size)
            .ok_or(PoolError::PayloadBounds {
                offset,
                len,
                block_size,
            })?;
        let payload = self.grid.payload_range(index);
        Ok(payload.start + offset..payload.start + end)
    }

    /// Free block indices from head to tail.
    fn free_indices(&self) -> Result<Vec<usize>, PoolError> {
        let mut chain = Vec::with_capacity(self.available);
        let mut cursor = self.head;
        while let Some(index) = cursor {
            if chain.len() == self.grid.capacity() || self.tags[index] != BlockState::Free {
                return Err(PoolError::CorruptFreeList { index });
            }
            chain.push(index);
            cursor = self.successor(index)?;
        }
        Ok(chain)
    }

    fn dump(&self, index: usize) -> BlockDump {
        let raw_link = self.read_link(index);
        BlockDump {
            index,
            address: self.grid.payload_of(index),
            link: Link::decode(raw_link),
            raw_link,
            state: self.tags[index],
            payload: self.region[self.grid.payload_range(index)].to_vec(),
        }
    }
}

/// A pool of `capacity` blocks of `block_size` payload bytes.
///
/// A pool is created empty and becomes usable after one successful
/// [`initialize`](Self::initialize). All operations take `&self` and may be
/// called concurrently; free-list updates are serialized by a single mutex
/// held only for the O(1) detach or attach. The region is released when the
/// pool is dropped.
pub struct Pool {
    config: PoolConfig,
    arena: Mutex<Option<Arena>>,
    grid: OnceLock<BlockGrid>,
    stats: AtomicPoolStats,
}

impl Pool {
    /// Create an uninitialized pool after validating `config`.
    pub fn new(config: PoolConfig) -> Result<Self, PoolError> {
        config.validate()?;
        Ok(Self {
            config,
            arena: Mutex::new(None),
            grid: OnceLock::new(),
            stats: AtomicPoolStats::new(),
        })
    }

    /// Create and initialize a pool in one step.
    pub fn with_config(config: PoolConfig) -> Result<Self, PoolError> {
        let pool = Self::new(config)?;
        pool.initialize()?;
        Ok(pool)
    }

    /// Reserve the region and chain all blocks into the free list.
    ///
    /// Fails with [`PoolError::AlreadyInitialized`] on a second call, leaving
    /// the existing region untouched. On [`PoolError::OutOfMemory`] the pool
    /// stays uninitialized and may be initialized again later.
    ///
    /// The whole region is zero-filled before the free list is chained, so
    /// every page is committed here. On hosts that overcommit memory a
    /// reservation can succeed and the process still be killed while the
    /// region is touched; [`PoolError::OutOfMemory`] covers only refusals
    /// the allocator reports.
    pub fn initialize(&self) -> Result<(), PoolError> {
        let mut slot = self.arena.lock();
        if slot.is_some() {
            warn!("initialize called on an initialized pool");
            return Err(PoolError::AlreadyInitialized);
        }

        let arena = Arena::reserve(&self.config).inspect_err(|err| {
            warn!(
                block_size = self.config.block_size,
                capacity = self.config.capacity,
                error = %err,
                "pool region reservation failed"
            );
        })?;

        let grid = arena.grid;
        *slot = Some(arena);
        // Only ever set here, under the lock, while the slot was empty.
        let _ = self.grid.set(grid);

        debug!(
            block_size = grid.block_size(),
            capacity = grid.capacity(),
            region_len = grid.region_len(),
            first = %grid.first_payload(),
            last = %grid.last_payload(),
            "pool initialized"
        );
        Ok(())
    }

    /// Run `f` on the arena under the lock, rejecting an uninitialized pool.
    fn with_arena<R>(
        &self,
        f: impl FnOnce(&mut Arena) -> Result<R, PoolError>,
    ) -> Result<R, PoolError> {
        let mut slot = self.arena.lock();
        let arena = slot.as_mut().ok_or(PoolError::NotInitialized)?;
        f(arena)
    }

    /// Hand out the block at the head of the free list.
    ///
    /// Blocks come back in LIFO order: the most recently released block is
    /// returned first; right after initialization that is ascending address
    /// order. Payload bytes are not cleared unless the scrub policy says so.
    pub fn allocate(&self) -> Result<Address, PoolError> {
        self.with_arena(|arena| {
            let Some(index) = arena.pop()? else {
                self.stats.record_exhausted();
                trace!(capacity = arena.grid.capacity(), "pool exhausted");
                return Err(PoolError::OutOfMemory(MemoryShortfall::Exhausted {
                    capacity: arena.grid.capacity(),
                }));
            };
            if self.config.scrub == ScrubPolicy::OnAllocate {
                arena.scrub(index);
            }
            self.stats.record_allocation(arena.in_use());
            let address = arena.grid.payload_of(index);
            trace!(%address, index, available = arena.available, "block allocated");
            Ok(address)
        })
    }

    /// Return a block to the head of the free list.
    ///
    /// The address must be a payload address of this pool that is currently
    /// allocated; otherwise [`PoolError::NotOwned`] or
    /// [`PoolError::DoubleFree`] is returned and nothing changes.
    pub fn release(&self, address: Address) -> Result<(), PoolError> {
        self.with_arena(|arena| {
            let index = match arena.grid.index_of(address) {
                Ok(index) => index,
                Err(err) => {
                    self.stats.record_rejected();
                    warn!(%address, "release of an address outside the pool");
                    return Err(err);
                }
            };
            if arena.tags[index] != BlockState::Allocated {
                self.stats.record_rejected();
                warn!(%address, index, "release of a block that is already free");
                return Err(PoolError::DoubleFree { address });
            }
            if self.config.scrub == ScrubPolicy::OnRelease {
                arena.scrub(index);
            }
            arena.push(index);
            self.stats.record_release();
            trace!(%address, index, available = arena.available, "block released");
            Ok(())
        })
    }

    /// Allocate a block that is released automatically when the lease drops.
    pub fn lease(&self) -> Result<BlockLease<'_>, PoolError> {
        let address = self.allocate()?;
        Ok(BlockLease::new(self, address))
    }

    /// Copy `bytes` into the payload of an allocated block at `offset`.
    pub fn write(&self, address: Address, offset: usize, bytes: &[u8]) -> Result<(), PoolError> {
        self.with_arena(|arena| {
            let window = arena.payload_window(address, offset, bytes.len())?;
            arena.region[window].copy_from_slice(bytes);
            Ok(())
        })
    }

    /// Copy payload bytes of an allocated block starting at `offset` into `buf`.
    pub fn read(&self, address: Address, offset: usize, buf: &mut [u8]) -> Result<(), PoolError> {
        self.with_arena(|arena| {
            let window = arena.payload_window(address, offset, buf.len())?;
            buf.copy_from_slice(&arena.region[window]);
            Ok(())
        })
    }

    /// Set every payload byte of an allocated block to `byte`.
    pub fn fill(&self, address: Address, byte: u8) -> Result<(), PoolError> {
        self.with_arena(|arena| {
            let window = arena.payload_window(address, 0, arena.grid.block_size())?;
            arena.region[window].fill(byte);
            Ok(())
        })
    }

    /// Copy of the whole payload of an allocated block.
    pub fn payload(&self, address: Address) -> Result<Vec<u8>, PoolError> {
        self.with_arena(|arena| {
            let window = arena.payload_window(address, 0, arena.grid.block_size())?;
            Ok(arena.region[window].to_vec())
        })
    }

    /// Whether `address` is a payload address of this pool.
    ///
    /// Lock-free and side-effect free; the answer says nothing about whether
    /// the block is currently allocated. Always `false` before initialization.
    pub fn owns(&self, address: Address) -> bool {
        self.grid.get().is_some_and(|grid| grid.owns(address))
    }

    /// Lowest and highest valid payload addresses, once initialized.
    pub fn payload_range(&self) -> Option<(Address, Address)> {
        self.grid
            .get()
            .map(|grid| (grid.first_payload(), grid.last_payload()))
    }

    /// Geometry of the region, once initialized.
    pub fn grid(&self) -> Option<BlockGrid> {
        self.grid.get().copied()
    }

    /// Whether the region has been reserved and formatted.
    pub fn is_initialized(&self) -> bool {
        self.grid.get().is_some()
    }

    /// Configuration the pool was built from.
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Payload bytes per block.
    pub fn block_size(&self) -> usize {
        self.config.block_size
    }

    /// Number of blocks.
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Distance in bytes between consecutive payload addresses.
    pub fn stride(&self) -> usize {
        self.config.stride()
    }

    /// Region length in bytes, once initialized.
    pub fn region_len(&self) -> Option<usize> {
        self.grid.get().map(BlockGrid::region_len)
    }

    /// Blocks currently on the free list (zero before initialization).
    pub fn available(&self) -> usize {
        self.arena.lock().as_ref().map_or(0, |arena| arena.available)
    }

    /// Blocks currently handed out (zero before initialization).
    pub fn in_use(&self) -> usize {
        self.arena.lock().as_ref().map_or(0, Arena::in_use)
    }

    /// Free-list addresses from head (next to be allocated) to tail.
    pub fn free_list(&self) -> Result<Vec<Address>, PoolError> {
        self.with_arena(|arena| {
            let indices = arena.free_indices()?;
            Ok(indices
                .into_iter()
                .map(|index| arena.grid.payload_of(index))
                .collect())
        })
    }

    /// Snapshot every block in address order. Debug aid only.
    pub fn inspect(&self) -> Result<Vec<BlockDump>, PoolError> {
        self.with_arena(|arena| Ok((0..arena.grid.capacity()).map(|i| arena.dump(i)).collect()))
    }

    /// Get a snapshot of pool statistics.
    pub fn stats(&self) -> PoolStats {
        self.stats.snapshot()
    }

    /// Reset pool statistics counters.
    pub fn reset_stats(&self) {
        self.stats.reset();
    }
}

impl fmt::Debug for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("config", &self.config)
            .field("grid", &self.grid.get())
            .field("available", &self.available())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready(block_size: usize, capacity: usize) -> Pool {
        Pool::with_config(PoolConfig::new(block_size, capacity)).unwrap()
    }

    #[test]
    fn new_pool_is_uninitialized() {
        let pool = Pool::new(PoolConfig::new(20, 4)).unwrap();
        assert!(!pool.is_initialized());
        assert_eq!(pool.available(), 0);
        assert_eq!(pool.payload_range(), None);
        assert_eq!(pool.region_len(), None);
    }

    #[test]
    fn new_rejects_invalid_config() {
        assert!(matches!(
            Pool::new(PoolConfig::new(0, 4)),
            Err(PoolError::InvalidConfig(_))
        ));
    }

    #[test]
    fn operations_before_initialize() {
        let pool = Pool::new(PoolConfig::new(20, 4)).unwrap();
        let address = Address::new(0x1000);
        assert_eq!(pool.allocate(), Err(PoolError::NotInitialized));
        assert_eq!(pool.release(address), Err(PoolError::NotInitialized));
        assert_eq!(pool.write(address, 0, &[1]), Err(PoolError::NotInitialized));
        assert_eq!(pool.free_list(), Err(PoolError::NotInitialized));
        assert_eq!(pool.inspect(), Err(PoolError::NotInitialized));
        assert!(!pool.owns(address));
    }

    #[test]
    fn initialize_formats_ascending_free_list() {
        let pool = ready(20, 4);
        let grid = pool.grid().unwrap();
        let expected: Vec<Address> = (0..4).map(|i| grid.payload_of(i)).collect();
        assert_eq!(pool.free_list().unwrap(), expected);
        assert_eq!(pool.available(), 4);
        assert_eq!(pool.region_len(), Some(4 * (20 + LINK_WIDTH)));
    }

    #[test]
    fn initialize_twice_keeps_region() {
        let pool = ready(20, 4);
        let first = pool.allocate().unwrap();
        let range = pool.payload_range();

        assert_eq!(pool.initialize(), Err(PoolError::AlreadyInitialized));
        assert_eq!(pool.payload_range(), range);
        assert_eq!(pool.in_use(), 1);
        assert_eq!(pool.free_list().unwrap().len(), 3);
        pool.release(first).unwrap();
    }

    #[test]
    fn fresh_region_is_zero_filled() {
        let pool = ready(12, 3);
        let inspected = pool.inspect().unwrap();
        assert_eq!(inspected.len(), 3);
        for block in &inspected {
            assert!(block.payload.iter().all(|&b| b == 0), "block {}", block.index);
        }
    }

    #[test]
    fn region_overflow_leaves_pool_uninitialized() {
        let pool = Pool::new(PoolConfig::new(usize::MAX / 2, 3)).unwrap();
        assert!(matches!(
            pool.initialize(),
            Err(PoolError::OutOfMemory(MemoryShortfall::Region { .. }))
        ));
        assert!(!pool.is_initialized());
        assert_eq!(pool.allocate(), Err(PoolError::NotInitialized));
    }

    #[test]
    fn unreservable_region_leaves_pool_uninitialized() {
        // Larger than isize::MAX, which no allocator can satisfy.
        let block_size = usize::MAX / 4;
        let pool = Pool::new(PoolConfig::new(block_size, 3)).unwrap();
        assert!(matches!(
            pool.initialize(),
            Err(PoolError::OutOfMemory(MemoryShortfall::Region { .. }))
        ));
        assert!(!pool.is_initialized());
    }

    #[test]
    fn allocate_walks_ascending_then_exhausts() {
        let pool = ready(20, 4);
        let grid = pool.grid().unwrap();
        for index in 0..4 {
            assert_eq!(pool.allocate().unwrap(), grid.payload_of(index));
        }
        assert_eq!(
            pool.allocate(),
            Err(PoolError::OutOfMemory(MemoryShortfall::Exhausted {
                capacity: 4
            }))
        );
        assert_eq!(pool.stats().exhausted, 1);
        assert!(pool.free_list().unwrap().is_empty());
    }

    #[test]
    fn release_is_lifo() {
        let pool = ready(20, 4);
        let blocks: Vec<Address> = (0..4).map(|_| pool.allocate().unwrap()).collect();
        pool.release(blocks[1]).unwrap();
        pool.release(blocks[3]).unwrap();
        assert_eq!(pool.free_list().unwrap(), vec![blocks[3], blocks[1]]);
        assert_eq!(pool.allocate().unwrap(), blocks[3]);
        assert_eq!(pool.allocate().unwrap(), blocks[1]);
    }

    #[test]
    fn double_free_is_detected() {
        let pool = ready(20, 4);
        let address = pool.allocate().unwrap();
        assert_eq!(pool.release(address), Ok(()));
        assert_eq!(pool.release(address), Err(PoolError::DoubleFree { address }));
        assert_eq!(pool.free_list().unwrap().len(), 4);
    }

    #[test]
    fn never_allocated_block_is_double_free() {
        let pool = ready(20, 4);
        let (first, _) = pool.payload_range().unwrap();
        assert_eq!(
            pool.release(first),
            Err(PoolError::DoubleFree { address: first })
        );
    }

    #[test]
    fn foreign_addresses_are_not_owned() {
        let pool = ready(20, 4);
        let _held = pool.allocate().unwrap();
        let (first, last) = pool.payload_range().unwrap();
        let before = pool.free_list().unwrap();

        for address in [
            first.byte_sub(pool.stride()),
            last.byte_add(pool.stride()),
            first.byte_add(1),
            first.byte_sub(LINK_WIDTH),
            Address::new(0),
        ] {
            assert_eq!(pool.release(address), Err(PoolError::NotOwned { address }));
        }
        assert_eq!(pool.free_list().unwrap(), before);
        assert_eq!(pool.stats().rejected, 5);
    }

    #[test]
    fn addresses_of_another_pool_are_not_owned() {
        let a = ready(20, 4);
        let b = ready(20, 4);
        let address = b.allocate().unwrap();
        assert!(!a.owns(address));
        assert_eq!(a.release(address), Err(PoolError::NotOwned { address }));
        b.release(address).unwrap();
    }

    #[test]
    fn allocated_link_slot_holds_sentinel() {
        let pool = ready(8, 3);
        let address = pool.allocate().unwrap();
        let dump = pool.inspect().unwrap();
        assert_eq!(dump[0].address, address);
        assert_eq!(dump[0].link, Link::Allocated);
        assert_eq!(dump[0].state, BlockState::Allocated);
        assert_eq!(dump[1].link, Link::Next(2));
        assert_eq!(dump[2].link, Link::End);
        assert_eq!(dump[2].raw_link, usize::MAX);
    }

    #[test]
    fn payload_round_trip() {
        let pool = ready(20, 2);
        let address = pool.allocate().unwrap();
        pool.write(address, 4, b"pool").unwrap();
        let mut buf = [0u8; 4];
        pool.read(address, 4, &mut buf).unwrap();
        assert_eq!(&buf, b"pool");
        pool.fill(address, 0xAB).unwrap();
        assert_eq!(pool.payload(address).unwrap(), vec![0xAB; 20]);
    }

    #[test]
    fn payload_writes_do_not_touch_links() {
        let pool = ready(8, 2);
        let a = pool.allocate().unwrap();
        pool.fill(a, 0xFF).unwrap();
        let dump = pool.inspect().unwrap();
        assert_eq!(dump[0].link, Link::Allocated);
        assert_eq!(dump[1].link, Link::End);
        pool.release(a).unwrap();
        assert_eq!(pool.free_list().unwrap().len(), 2);
    }

    #[test]
    fn payload_access_checks() {
        let pool = ready(8, 2);
        let address = pool.allocate().unwrap();
        assert_eq!(
            pool.write(address, 6, &[0; 4]),
            Err(PoolError::PayloadBounds {
                offset: 6,
                len: 4,
                block_size: 8
            })
        );
        assert!(matches!(
            pool.read(address, usize::MAX, &mut [0; 2]),
            Err(PoolError::PayloadBounds { .. })
        ));
        let stray = address.byte_add(1);
        assert_eq!(pool.fill(stray, 0), Err(PoolError::NotOwned { address: stray }));

        pool.release(address).unwrap();
        assert_eq!(
            pool.payload(address),
            Err(PoolError::NotAllocated { address })
        );
    }

    #[test]
    fn stale_payload_survives_reuse_by_default() {
        let pool = ready(4, 1);
        let address = pool.allocate().unwrap();
        pool.write(address, 0, &[1, 2, 3, 4]).unwrap();
        pool.release(address).unwrap();
        let again = pool.allocate().unwrap();
        assert_eq!(again, address);
        assert_eq!(pool.payload(again).unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn scrub_on_allocate_zeroes_payload() {
        let pool =
            Pool::with_config(PoolConfig::new(4, 1).with_scrub(ScrubPolicy::OnAllocate)).unwrap();
        let address = pool.allocate().unwrap();
        pool.fill(address, 9).unwrap();
        pool.release(address).unwrap();
        assert_eq!(pool.inspect().unwrap()[0].payload, vec![9; 4]);
        let again = pool.allocate().unwrap();
        assert_eq!(pool.payload(again).unwrap(), vec![0; 4]);
    }

    #[test]
    fn scrub_on_release_zeroes_payload() {
        let pool =
            Pool::with_config(PoolConfig::new(4, 1).with_scrub(ScrubPolicy::OnRelease)).unwrap();
        let address = pool.allocate().unwrap();
        pool.fill(address, 9).unwrap();
        pool.release(address).unwrap();
        assert_eq!(pool.inspect().unwrap()[0].payload, vec![0; 4]);
    }

    #[test]
    fn stats_track_usage() {
        let pool = ready(8, 2);
        let a = pool.allocate().unwrap();
        let b = pool.allocate().unwrap();
        let _ = pool.allocate();
        pool.release(a).unwrap();
        let _ = pool.release(a);
        let stats = pool.stats();
        assert_eq!(stats.allocations, 2);
        assert_eq!(stats.releases, 1);
        assert_eq!(stats.exhausted, 1);
        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.peak_in_use, 2);
        pool.release(b).unwrap();
        pool.reset_stats();
        assert_eq!(pool.stats(), PoolStats::default());
    }

    #[test]
    fn single_block_pool() {
        let pool = ready(1, 1);
        let (first, last) = pool.payload_range().unwrap();
        assert_eq!(first, last);
        let address = pool.allocate().unwrap();
        assert_eq!(address, first);
        assert!(pool.allocate().unwrap_err().is_exhausted());
        pool.release(address).unwrap();
        assert_eq!(pool.allocate().unwrap(), address);
    }

    #[test]
    fn debug_output_names_pool() {
        let pool = ready(8, 2);
        assert!(format!("{pool:?}").starts_with("Pool"));
    }
}
