//! blockpool library: application logic for the `blockpool` binary.

pub mod app;
pub mod config;
pub mod errors;
pub mod version;
