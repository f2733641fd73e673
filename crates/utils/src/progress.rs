//! Progress reporting utilities

use std::time::{Duration, Instant};

/// Progress reporter that logs at fixed percentage steps
pub struct ProgressReporter {
    total: usize,
    current: usize,
    name: String,
    start_time: Instant,
    step_percent: u32,
    last_logged: Option<u32>,
}

impl ProgressReporter {
    /// Create a new progress reporter logging every 10%
    pub fn new(name: impl Into<String>, total: usize) -> Self {
        Self {
            total,
            current: 0,
            name: name.into(),
            start_time: Instant::now(),
            step_percent: 10,
            last_logged: None,
        }
    }

    /// Log every `step` percent instead of the default 10
    pub fn with_step(mut self, step: u32) -> Self {
        self.step_percent = step.clamp(1, 100);
        self
    }

    /// Increment progress
    pub fn inc(&mut self, delta: usize) {
        self.current = (self.current + delta).min(self.total);
        self.report();
    }

    /// Items processed so far
    pub fn current(&self) -> usize {
        self.current
    }

    /// Completed percentage
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 100;
        }
        (self.current as f64 / self.total as f64 * 100.0) as u32
    }

    /// Estimated time remaining
    pub fn eta(&self) -> Duration {
        if self.current == 0 {
            return Duration::ZERO;
        }
        let per_item = self.start_time.elapsed().as_secs_f64() / self.current as f64;
        let remaining = self.total.saturating_sub(self.current);
        Duration::from_secs_f64(per_item * remaining as f64)
    }

    fn report(&mut self) {
        let bucket = self.percent() / self.step_percent;
        if self.last_logged == Some(bucket) {
            return;
        }
        self.last_logged = Some(bucket);

        log::info!(
            "{}: {}/{} ({}%) ETA: {:.1}s",
            self.name,
            self.current,
            self.total,
            self.percent(),
            self.eta().as_secs_f64()
        );
    }

    /// Finish and log the elapsed time
    pub fn finish(mut self) {
        self.current = self.total;
        log::info!(
            "{}: done, {} items in {:.2}s",
            self.name,
            self.total,
            self.start_time.elapsed().as_secs_f64()
        );
    }
}
