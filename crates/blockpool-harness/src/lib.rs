//! # blockpool-harness
//!
//! Exercises a [`blockpool_core::Pool`] strictly through its public contract:
//! a single-threaded smoke scenario and a multithreaded stress run with
//! bounded retry on exhaustion. [`inspect`] stages a pool for a block dump.

pub mod cancel;
pub mod error;
pub mod inspect;
pub mod observer;
pub mod pattern;
pub mod report;
pub mod smoke;
pub mod stress;

pub use cancel::CancellationToken;
pub use error::HarnessError;
pub use inspect::Inspection;
pub use observer::{ChannelObserver, LoggingObserver, NoOpObserver, StressEvent, StressObserver};
pub use report::{SmokeReport, SmokeStep, StressReport, Verdict};
pub use stress::StressConfig;
