//! Workspace-level integration tests for the block pool.
//!
//! The tests live in `tests/`; this crate carries no code of its own.
