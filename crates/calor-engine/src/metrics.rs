//! Per-run performance metrics.
//!
//! [`RunMetrics`] accumulates timing for the stepping loop and the time
//! spent inside samplers, so a slow consumer shows up separately from
//! the kernel.

use std::time::Duration;

/// Timing collected over one [`Simulator::run`](crate::Simulator::run).
///
/// All durations are in microseconds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunMetrics {
    /// Wall-clock time for the whole run, in microseconds.
    pub total_us: u64,
    /// Time spent inside the kernel, in microseconds.
    pub kernel_us: u64,
    /// Time spent copying snapshots and inside samplers, in microseconds.
    pub sampling_us: u64,
    /// Slowest single kernel step, in microseconds.
    pub max_step_us: u64,
    /// Number of kernel steps timed.
    pub steps: u64,
}

impl RunMetrics {
    /// Record one kernel step.
    pub fn record_step(&mut self, elapsed: Duration) {
        let us = as_micros(elapsed);
        self.kernel_us = self.kernel_us.saturating_add(us);
        self.max_step_us = self.max_step_us.max(us);
        self.steps += 1;
    }

    /// Record one snapshot handoff.
    pub fn record_sample(&mut self, elapsed: Duration) {
        self.sampling_us = self.sampling_us.saturating_add(as_micros(elapsed));
    }

    /// Mean kernel time per step in microseconds, or 0 before any step.
    pub fn mean_step_us(&self) -> f64 {
        if self.steps == 0 {
            0.0
        } else {
            self.kernel_us as f64 / self.steps as f64
        }
    }
}

fn as_micros(d: Duration) -> u64 {
    u64::try_from(d.as_micros()).unwrap_or(u64::MAX)
}
