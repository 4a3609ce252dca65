//! Progress bar for stress runs.

use std::sync::atomic::{AtomicU64, Ordering};

use indicatif::{ProgressBar, ProgressStyle};

use blockpool_harness::{StressEvent, StressObserver};

const TEMPLATE: &str = "{spinner} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} rounds {msg}";

/// Stress observer that drives an `indicatif` progress bar.
///
/// The bar counts completed rounds; the message tracks retries and starved
/// workers.
pub struct ProgressObserver {
    bar: ProgressBar,
    retries: AtomicU64,
    starved: AtomicU64,
}

impl ProgressObserver {
    /// Visible bar for `rounds` total rounds.
    #[must_use]
    pub fn new(rounds: u64) -> Self {
        let bar = ProgressBar::new(rounds);
        if let Ok(style) = ProgressStyle::with_template(TEMPLATE) {
            bar.set_style(style.progress_chars("=> "));
        }
        Self::with_bar(bar)
    }

    /// Bar that never draws, for quiet and JSON output.
    #[must_use]
    pub fn hidden(rounds: u64) -> Self {
        Self::with_bar(ProgressBar::hidden()).with_length(rounds)
    }

    fn with_bar(bar: ProgressBar) -> Self {
        Self {
            bar,
            retries: AtomicU64::new(0),
            starved: AtomicU64::new(0),
        }
    }

    fn with_length(self, rounds: u64) -> Self {
        self.bar.set_length(rounds);
        self
    }

    /// Rounds completed so far.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Remove the bar from the terminal.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    fn refresh_message(&self) {
        let retries = self.retries.load(Ordering::Relaxed);
        let starved = self.starved.load(Ordering::Relaxed);
        self.bar
            .set_message(format!("retries: {retries}, starved: {starved}"));
    }
}

impl StressObserver for ProgressObserver {
    fn on_event(&self, event: &StressEvent) {
        match event {
            StressEvent::Released { .. } => self.bar.inc(1),
            StressEvent::Retried { .. } => {
                self.retries.fetch_add(1, Ordering::Relaxed);
                self.refresh_message();
            }
            StressEvent::Starved { .. } => {
                self.starved.fetch_add(1, Ordering::Relaxed);
                self.refresh_message();
            }
            StressEvent::Acquired { .. } | StressEvent::Finished { .. } => {}
        }
    }
}
