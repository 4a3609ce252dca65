//! Cooperative cancellation for stress runs.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Longest uninterrupted sleep inside [`CancellationToken::pause`].
const PAUSE_SLICE: Duration = Duration::from_millis(10);

/// Shared stop flag. Clones observe the same flag, so a Ctrl+C handler can
/// stop workers that hold their own clone.
///
/// ```
/// use std::time::Duration;
/// use blockpool_harness::CancellationToken;
///
/// let token = CancellationToken::new();
/// assert!(token.pause(Duration::ZERO));
/// token.cancel();
/// assert!(!token.pause(Duration::from_secs(60)));
/// ```
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    stopped: Arc<AtomicBool>,
}

impl CancellationToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    /// Ask every holder of this token to stop.
    pub fn cancel(&self) {
        self.stopped.store(true, Ordering::Relaxed);
    }

    /// Sleep for `duration`, waking early on cancellation.
    ///
    /// Returns `false` if the token was cancelled before or during the wait.
    pub fn pause(&self, duration: Duration) -> bool {
        let deadline = Instant::now() + duration;
        loop {
            if self.is_cancelled() {
                return false;
            }
            let left = deadline.saturating_duration_since(Instant::now());
            if left.is_zero() {
                return true;
            }
            thread::sleep(left.min(PAUSE_SLICE));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let token = CancellationToken::new();
        let clone = token.clone();
        assert!(!token.is_cancelled());
        clone.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn pause_runs_to_completion() {
        let token = CancellationToken::new();
        let start = Instant::now();
        assert!(token.pause(Duration::from_millis(15)));
        assert!(start.elapsed() >= Duration::from_millis(15));
    }

    #[test]
    fn cancel_cuts_a_long_pause_short() {
        let token = CancellationToken::new();
        let canceller = token.clone();
        let start = Instant::now();
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            canceller.cancel();
        });
        assert!(!token.pause(Duration::from_secs(30)));
        assert!(start.elapsed() < Duration::from_secs(5));
        handle.join().unwrap();
    }
}
