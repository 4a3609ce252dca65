//! Version information.

/// Get the version string.
#[must_use]
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Version with the platform word size, which fixes the link slot width.
#[must_use]
pub fn full_version() -> String {
    format!(
        "blockpool {} ({}-bit links)",
        version(),
        usize::BITS
    )
}
