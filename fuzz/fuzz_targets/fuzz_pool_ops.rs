#![no_main]

use libfuzzer_sys::fuzz_target;

use blockpool_core::{Address, Pool, PoolConfig, PoolError};

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    // Small shapes keep every run fast.
    let block_size = usize::from(data[0] % 64) + 1;
    let capacity = usize::from(data[1] % 16) + 1;
    let Ok(pool) = Pool::with_config(PoolConfig::new(block_size, capacity)) else {
        return;
    };
    let mut held: Vec<Address> = Vec::new();

    for &byte in &data[2..] {
        match byte % 4 {
            0 => match pool.allocate() {
                Ok(address) => {
                    assert!(!held.contains(&address));
                    held.push(address);
                }
                Err(err) => assert!(err.is_exhausted() && held.len() == capacity),
            },
            1 if !held.is_empty() => {
                let address = held.swap_remove(usize::from(byte) % held.len());
                assert_eq!(pool.release(address), Ok(()));
            }
            2 if !held.is_empty() => {
                let address = held[usize::from(byte) % held.len()];
                pool.fill(address, byte).unwrap();
                assert_eq!(pool.payload(address).unwrap(), vec![byte; block_size]);
            }
            3 => {
                let (first, _) = pool.payload_range().unwrap();
                let probe = first.byte_add(usize::from(byte));
                let outcome = pool.release(probe);
                if held.contains(&probe) {
                    assert_eq!(outcome, Ok(()));
                    held.retain(|a| *a != probe);
                } else {
                    assert!(matches!(
                        outcome,
                        Err(PoolError::NotOwned { .. } | PoolError::DoubleFree { .. })
                    ));
                }
            }
            _ => {}
        }
        assert_eq!(pool.in_use(), held.len());
        assert_eq!(pool.free_list().unwrap().len(), capacity - held.len());
    }
});
