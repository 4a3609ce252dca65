//! Reference payload patterns.

use blockpool_core::constants::TEST_PATTERN;

/// Reference pattern cycled to `len` bytes and tagged with `tag`.
///
/// Tag zero yields the plain reference pattern; distinct tags give distinct
/// patterns, so a block written by one worker and read by another shows up
/// as a mismatch.
#[must_use]
pub fn tagged(len: usize, tag: u8) -> Vec<u8> {
    TEST_PATTERN
        .iter()
        .cycle()
        .take(len)
        .map(|byte| byte ^ tag)
        .collect()
}

/// Reference pattern cycled to `len` bytes.
#[must_use]
pub fn reference(len: usize) -> Vec<u8> {
    tagged(len, 0)
}
