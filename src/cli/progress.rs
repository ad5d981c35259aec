//! Terminal progress bar for pipeline runs.

use indicatif::{ProgressBar, ProgressStyle};

use crate::services::pipeline::TOTAL_STEPS;
use crate::services::ProgressReporter;

/// Draws stage progress on stderr.
pub struct BarReporter {
    bar: ProgressBar,
}

impl BarReporter {
    pub fn new() -> Self {
        let bar = ProgressBar::new(TOTAL_STEPS as u64);
        if let Ok(style) =
            ProgressStyle::with_template("{spinner:.green} [{bar:24.cyan/blue}] {pos}/{len} {msg}")
        {
            bar.set_style(style.progress_chars("=> "));
        }
        Self { bar }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for BarReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for BarReporter {
    fn report(&self, current: f64, total: f64, message: Option<String>) {
        let len = self.bar.length().unwrap_or(TOTAL_STEPS as u64);
        let fraction = if total > 0.0 { current / total } else { 0.0 };
        self.bar
            .set_position((fraction.clamp(0.0, 1.0) * len as f64).round() as u64);
        if let Some(msg) = message {
            self.bar.set_message(msg);
        }
    }
}
