//! Stage a pool and snapshot it for a human.

use serde::Serialize;

use blockpool_core::{Address, BlockDump, Pool, PoolConfig, PoolStats};

use crate::error::HarnessError;
use crate::pattern;

/// Snapshot of a staged pool.
#[derive(Debug, Clone, Serialize)]
pub struct Inspection {
    /// Pool shape.
    pub config: PoolConfig,
    /// Region length in bytes.
    pub region_len: usize,
    /// Blocks allocated while staging.
    pub allocated: usize,
    /// Of those, blocks released again.
    pub released: usize,
    /// Free list from head to tail.
    pub free_list: Vec<Address>,
    /// Every block in address order.
    pub blocks: Vec<BlockDump>,
    /// Pool counters after staging.
    pub stats: PoolStats,
}

/// Build a pool, allocate `allocate` blocks filled with the reference
/// pattern, release the first `release` of them and dump the result.
pub fn run(config: PoolConfig, allocate: usize, release: usize) -> Result<Inspection, HarnessError> {
    if allocate > config.capacity {
        return Err(HarnessError::Config(format!(
            "cannot allocate {allocate} of {} blocks",
            config.capacity
        )));
    }
    if release > allocate {
        return Err(HarnessError::Config(format!(
            "cannot release {release} of {allocate} allocated blocks"
        )));
    }

    let pool = Pool::with_config(config)?;
    let fill = pattern::reference(pool.block_size());
    let mut held = Vec::with_capacity(allocate);
    for _ in 0..allocate {
        let address = pool.allocate()?;
        pool.write(address, 0, &fill)?;
        held.push(address);
    }
    for address in held.iter().take(release) {
        pool.release(*address)?;
    }

    Ok(Inspection {
        config,
        region_len: pool.region_len().unwrap_or_default(),
        allocated: allocate,
        released: release,
        free_list: pool.free_list()?,
        blocks: pool.inspect()?,
        stats: pool.stats(),
    })
}
