use crate::Metrics;

use std::time::Instant;

/// Times one pipeline stage. Latency is recorded once, when dropped.
pub struct MetricsTimer {
    start: Instant,
    metrics: Metrics,
    stage: &'static str,
}

impl MetricsTimer {
    pub fn new(metrics: Metrics, stage: &'static str) -> Self {
        Self {
            start: Instant::now(),
            metrics,
            stage,
        }
    }

    /// Stop the timer now instead of at end of scope
    pub fn finish(self) {
        drop(self);
    }
}

impl Drop for MetricsTimer {
    fn drop(&mut self) {
        self.metrics.stage_latency(self.stage, self.start.elapsed());
    }
}
