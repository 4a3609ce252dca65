//! RAII handle for an allocated block.

use tracing::error;

use crate::error::PoolError;
use crate::grid::Address;
use crate::pool::Pool;

/// A block that returns to its pool when dropped.
///
/// Obtained from [`Pool::lease`]. Call [`detach`](Self::detach) to keep the
/// block allocated past the lease and release it by hand later.
#[derive(Debug)]
#[must_use = "dropping a lease releases the block immediately"]
pub struct BlockLease<'a> {
    pool: &'a Pool,
    address: Address,
    armed: bool,
}

impl<'a> BlockLease<'a> {
    pub(crate) fn new(pool: &'a Pool, address: Address) -> Self {
        Self {
            pool,
            address,
            armed: true,
        }
    }

    /// Payload address of the leased block.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Pool the block belongs to.
    pub fn pool(&self) -> &'a Pool {
        self.pool
    }

    /// Copy `bytes` into the payload at `offset`.
    pub fn write(&self, offset: usize, bytes: &[u8]) -> Result<(), PoolError> {
        self.pool.write(self.address, offset, bytes)
    }

    /// Copy payload bytes starting at `offset` into `buf`.
    pub fn read(&self, offset: usize, buf: &mut [u8]) -> Result<(), PoolError> {
        self.pool.read(self.address, offset, buf)
    }

    /// Set every payload byte to `byte`.
    pub fn fill(&self, byte: u8) -> Result<(), PoolError> {
        self.pool.fill(self.address, byte)
    }

    /// Copy of the whole payload.
    pub fn to_vec(&self) -> Result<Vec<u8>, PoolError> {
        self.pool.payload(self.address)
    }

    /// Stop managing the block and hand back its address; the block stays allocated.
    pub fn detach(mut self) -> Address {
        self.armed = false;
        self.address
    }
}

impl Drop for BlockLease<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Err(err) = self.pool.release(self.address) {
            error!(address = %self.address, error = %err, "leased block could not be released");
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Pool, PoolConfig};

    fn ready() -> Pool {
        Pool::with_config(PoolConfig::new(16, 2)).unwrap()
    }

    #[test]
    fn lease_releases_on_drop() {
        let pool = ready();
        {
            let lease = pool.lease().unwrap();
            lease.write(0, b"lease").unwrap();
            assert_eq!(pool.in_use(), 1);
        }
        assert_eq!(pool.in_use(), 0);
        assert_eq!(pool.stats().releases, 1);
    }

    #[test]
    fn dropped_lease_is_next_to_allocate() {
        let pool = ready();
        let address = pool.lease().unwrap().address();
        assert_eq!(pool.allocate().unwrap(), address);
    }

    #[test]
    fn detach_keeps_block_allocated() {
        let pool = ready();
        let address = pool.lease().unwrap().detach();
        assert_eq!(pool.in_use(), 1);
        pool.release(address).unwrap();
        assert_eq!(pool.in_use(), 0);
    }

    #[test]
    fn lease_payload_helpers() {
        let pool = ready();
        let lease = pool.lease().unwrap();
        lease.fill(0x11).unwrap();
        lease.write(2, &[0x22, 0x33]).unwrap();
        let mut buf = [0u8; 4];
        lease.read(0, &mut buf).unwrap();
        assert_eq!(buf, [0x11, 0x11, 0x22, 0x33]);
        assert_eq!(lease.to_vec().unwrap().len(), 16);
        assert!(std::ptr::eq(lease.pool(), &pool));
    }

    #[test]
    fn lease_from_exhausted_pool_fails() {
        let pool = ready();
        let _a = pool.lease().unwrap();
        let _b = pool.lease().unwrap();
        assert!(pool.lease().unwrap_err().is_exhausted());
    }

    #[test]
    fn drop_after_manual_release_logs_instead_of_panicking() {
        let pool = ready();
        let lease = pool.lease().unwrap();
        pool.release(lease.address()).unwrap();
        drop(lease);
        assert_eq!(pool.stats().rejected, 1);
        assert_eq!(pool.available(), 2);
    }
}
