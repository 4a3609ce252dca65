//! Harness errors.

use blockpool_core::PoolError;

/// Errors that abort a smoke or stress run.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    /// The pool rejected the configuration or an operation the run depends on.
    #[error(transparent)]
    Pool(#[from] PoolError),

    /// The run parameters are unusable.
    #[error("invalid stress configuration: {0}")]
    Config(String),

    /// A worker thread panicked.
    #[error("worker thread panicked")]
    WorkerPanicked,
}
