//! Layout constants and defaults for the block pool.

/// Width of the link slot that precedes every payload (the pointer width).
pub const LINK_WIDTH: usize = std::mem::size_of::<usize>();

/// Raw link value marking the tail of the free list.
pub const LINK_END: usize = usize::MAX;

/// Raw link value marking a block that is handed out to a caller.
pub const LINK_ALLOCATED: usize = usize::MAX - 1;

/// Largest capacity whose block indices cannot collide with a sentinel.
pub const MAX_CAPACITY: usize = LINK_ALLOCATED;

/// Default payload size in bytes.
pub const DEFAULT_BLOCK_SIZE: usize = 20;

/// Default total payload bytes; divided by the block size to get the capacity.
pub const DEFAULT_POOL_SIZE: usize = 200;

/// Reference byte pattern written into blocks by the smoke and stress runs.
pub const TEST_PATTERN: [u8; 20] = [
    0xDE, 0xAD, 0xBE, 0xEF, 0xCA, 0xFE, 0xAD, 0xAD, 0x99, 0x88, 0x77, 0x66, 0x55, 0x44, 0x33, 0x22,
    0x11, 0x00, 0xAF, 0xCA,
];

/// Process exit codes used by the `blockpool` binary.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Generic error.
    pub const ERROR_GENERIC: i32 = 1;
    /// A smoke or stress run finished with a failing verdict.
    pub const ERROR_VERDICT: i32 = 3;
    /// Invalid configuration.
    pub const ERROR_CONFIG: i32 = 4;
    /// Run cancelled by user (Ctrl+C).
    pub const ERROR_CANCELED: i32 = 130;
}
