//! Stage progress for planning runs.
//!
//! `ShotPlanner` announces each stage before running it. The CLI draws a bar
//! from these calls; library callers get the no-op reporter.

use std::sync::Arc;

/// Receives stage announcements from the planner.
///
/// `current / total` is the finished fraction of the run. The message names
/// the stage about to start ("camera", "pacing", ...) or "done".
pub trait ProgressReporter: Send + Sync {
    /// Must not panic; a run never fails because of its reporter.
    fn report(&self, current: f64, total: f64, message: Option<String>);

    /// Announce stage `step` of `total_steps` (0-based, `total_steps` means done).
    fn step(&self, step: usize, total_steps: usize, message: &str) {
        let current = step as f64 / total_steps.max(1) as f64;
        self.report(current, 1.0, Some(message.to_string()));
    }
}

/// Discards every announcement.
pub struct NoopProgressReporter;

impl ProgressReporter for NoopProgressReporter {
    fn report(&self, _current: f64, _total: f64, _message: Option<String>) {}
}

pub fn noop_progress() -> Arc<dyn ProgressReporter> {
    Arc::new(NoopProgressReporter)
}
