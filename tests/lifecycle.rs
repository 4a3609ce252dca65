//! Pool lifecycle across initialization, misuse and reuse.

use blockpool_core::constants::TEST_PATTERN;
use blockpool_core::{Address, BlockState, Link, MemoryShortfall, Pool, PoolConfig, PoolError};

/// The reference scenario: 20-byte blocks, 200 bytes of payload.
#[test]
fn reference_scenario() {
    let pool = Pool::new(PoolConfig::default()).unwrap();
    pool.initialize().unwrap();
    assert_eq!(pool.capacity(), 10);

    let held: Vec<Address> = (0..10)
        .map(|_| {
            let address = pool.allocate().unwrap();
            pool.write(address, 0, &TEST_PATTERN).unwrap();
            address
        })
        .collect();
    for address in &held {
        assert_eq!(pool.payload(*address).unwrap(), TEST_PATTERN.to_vec());
    }

    assert_eq!(
        pool.allocate(),
        Err(PoolError::OutOfMemory(MemoryShortfall::Exhausted { capacity: 10 }))
    );

    let (first, last) = pool.payload_range().unwrap();
    let above = last.byte_add(pool.stride());
    assert_eq!(pool.release(above), Err(PoolError::NotOwned { address: above }));

    for address in held.iter().rev() {
        pool.release(*address).unwrap();
    }

    let below = first.byte_sub(pool.stride());
    assert_eq!(pool.release(below), Err(PoolError::NotOwned { address: below }));
    assert_eq!(pool.release(first), Err(PoolError::DoubleFree { address: first }));
    assert_eq!(pool.initialize(), Err(PoolError::AlreadyInitialized));

    // Released last to first, so the first block heads the list again.
    assert_eq!(pool.free_list().unwrap(), held);
}

#[test]
fn failed_operations_change_nothing() {
    let pool = Pool::with_config(PoolConfig::new(16, 3)).unwrap();
    let a = pool.allocate().unwrap();
    let before = pool.inspect().unwrap();
    let stats_before = pool.stats();

    let stray = a.byte_add(3);
    assert!(pool.release(stray).unwrap_err().is_misuse());
    let free = pool.free_list().unwrap()[0];
    assert!(pool.release(free).unwrap_err().is_misuse());
    assert!(pool.write(a, 10, &[0; 7]).is_err());
    assert_eq!(pool.initialize(), Err(PoolError::AlreadyInitialized));

    assert_eq!(pool.inspect().unwrap(), before);
    let stats = pool.stats();
    assert_eq!(stats.allocations, stats_before.allocations);
    assert_eq!(stats.releases, stats_before.releases);
    assert_eq!(stats.rejected, stats_before.rejected + 2);
}

#[test]
fn dump_tracks_free_list_links() {
    let pool = Pool::with_config(PoolConfig::new(8, 4)).unwrap();
    let blocks: Vec<Address> = (0..4).map(|_| pool.allocate().unwrap()).collect();
    pool.release(blocks[2]).unwrap();
    pool.release(blocks[0]).unwrap();

    let dump = pool.inspect().unwrap();
    assert_eq!(dump[0].link, Link::Next(2));
    assert_eq!(dump[2].link, Link::End);
    assert_eq!(dump[1].state, BlockState::Allocated);
    assert_eq!(dump[3].link, Link::Allocated);
    assert_eq!(pool.free_list().unwrap(), vec![blocks[0], blocks[2]]);
}

#[test]
fn lease_and_manual_release_interleave() {
    let pool = Pool::with_config(PoolConfig::new(8, 2)).unwrap();
    let manual = pool.allocate().unwrap();
    {
        let lease = pool.lease().unwrap();
        lease.write(0, b"leased!!").unwrap();
        assert!(pool.allocate().unwrap_err().is_exhausted());
    }
    pool.release(manual).unwrap();
    assert_eq!(pool.available(), 2);
    assert_eq!(pool.stats().outstanding(), 0);
}

#[test]
fn pools_are_independent() {
    let small = Pool::with_config(PoolConfig::new(4, 1)).unwrap();
    let large = Pool::with_config(PoolConfig::new(64, 8)).unwrap();
    let a = small.allocate().unwrap();
    let b = large.allocate().unwrap();
    assert!(small.owns(a) && !small.owns(b));
    assert!(large.owns(b) && !large.owns(a));
    assert_eq!(large.release(a), Err(PoolError::NotOwned { address: a }));
    small.release(a).unwrap();
    large.release(b).unwrap();
}
