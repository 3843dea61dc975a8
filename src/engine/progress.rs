//! Progress reporting during synthesis.

use std::time::Duration;

/// Snapshot emitted after each utterance finishes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressEvent {
    pub completed: usize,
    pub total: usize,
    /// Time since synthesis of the first utterance started.
    pub elapsed: Duration,
}

impl ProgressEvent {
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Completed share of the run, in `0.0..=1.0`.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.completed as f64 / self.total as f64
    }
}

/// Observer for [`ProgressEvent`]s. Purely observational.
#[cfg_attr(test, mockall::automock)]
pub trait ProgressSink {
    fn on_progress(&self, event: &ProgressEvent);
}

/// A sink that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_progress(&self, _event: &ProgressEvent) {}
}

impl<F> ProgressSink for F
where
    F: Fn(&ProgressEvent),
{
    fn on_progress(&self, event: &ProgressEvent) {
        self(event)
    }
}
