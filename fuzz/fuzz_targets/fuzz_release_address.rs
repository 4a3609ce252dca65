#![no_main]

use libfuzzer_sys::fuzz_target;

use blockpool_core::{Address, Pool, PoolConfig, PoolError};

fuzz_target!(|data: &[u8]| {
    if data.len() < 8 {
        return;
    }
    let pool = Pool::with_config(PoolConfig::new(20, 10)).unwrap();
    let held = pool.allocate().unwrap();

    // Arbitrary addresses, near and far from the region.
    let raw = usize::from_le_bytes(data[..8].try_into().unwrap_or([0; 8]));
    let (first, _) = pool.payload_range().unwrap();
    for address in [Address::new(raw), first.byte_add(raw % 512)] {
        let owned = pool.owns(address);
        match pool.release(address) {
            Ok(()) => assert_eq!(address, held),
            Err(PoolError::NotOwned { .. }) => assert!(!owned),
            Err(PoolError::DoubleFree { .. }) => assert!(owned),
            Err(other) => panic!("unexpected error {other}"),
        }
    }
    assert!(pool.free_list().unwrap().len() <= 10);
});
