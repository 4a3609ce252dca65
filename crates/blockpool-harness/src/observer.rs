//! Stress run observers.

use crossbeam_channel::Sender;
use serde::Serialize;
use tracing::{debug, info};

use blockpool_core::Address;

/// Something a stress worker did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StressEvent {
    /// The worker obtained a block after `retries` failed attempts.
    Acquired {
        /// Worker index.
        worker: usize,
        /// Block handed out.
        address: Address,
        /// Exhausted attempts before this one.
        retries: u32,
    },
    /// The pool was exhausted; the worker will wait and try again.
    Retried {
        /// Worker index.
        worker: usize,
        /// Attempt number, starting at one.
        attempt: u32,
    },
    /// The worker returned its block.
    Released {
        /// Worker index.
        worker: usize,
        /// Block returned.
        address: Address,
    },
    /// The worker ran out of retries and gave up.
    Starved {
        /// Worker index.
        worker: usize,
    },
    /// The worker thread is done.
    Finished {
        /// Worker index.
        worker: usize,
        /// Whether every round succeeded.
        passed: bool,
    },
}

/// Receiver of stress events; called from worker threads.
pub trait StressObserver: Send + Sync {
    /// Receive an event.
    fn on_event(&self, event: &StressEvent);
}

/// Null object pattern: discards every event.
pub struct NoOpObserver;

impl NoOpObserver {
    /// Create a new no-op observer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoOpObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl StressObserver for NoOpObserver {
    fn on_event(&self, _event: &StressEvent) {}
}

/// Observer that forwards events through a channel (non-blocking).
pub struct ChannelObserver {
    sender: Sender<StressEvent>,
}

impl ChannelObserver {
    /// Create a new channel observer.
    #[must_use]
    pub fn new(sender: Sender<StressEvent>) -> Self {
        Self { sender }
    }
}

impl StressObserver for ChannelObserver {
    fn on_event(&self, event: &StressEvent) {
        // A full or closed channel drops the event rather than stalling a worker.
        let _ = self.sender.try_send(event.clone());
    }
}

/// Observer that logs events through `tracing`.
pub struct LoggingObserver;

impl StressObserver for LoggingObserver {
    fn on_event(&self, event: &StressEvent) {
        match event {
            StressEvent::Acquired {
                worker,
                address,
                retries,
            } => debug!(worker, %address, retries, "block acquired"),
            StressEvent::Retried { worker, attempt } => {
                debug!(worker, attempt, "pool exhausted, retrying");
            }
            StressEvent::Released { worker, address } => debug!(worker, %address, "block released"),
            StressEvent::Starved { worker } => debug!(worker, "worker starved"),
            StressEvent::Finished { worker, passed } => info!(worker, passed, "worker finished"),
        }
    }
}
