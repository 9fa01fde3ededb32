use metrics::{counter, histogram};

/// Metrics collector for verification requests
#[derive(Clone)]
pub struct Metrics {
    prefix: &'static str,
}

impl Metrics {
    pub fn new() -> Self {
        Self { prefix: "idv" }
    }

    /// Record a finished request by HTTP status
    pub fn request_completed(&self, status: u16) {
        counter!(format!("{}.requests.total", self.prefix)).increment(1);
        counter!(format!("{}.requests.status.{}", self.prefix, status)).increment(1);
    }

    /// Record the outcome of one pipeline stage
    pub fn stage_outcome(&self, stage: &str, outcome: &str) {
        counter!(format!("{}.stages.{}.{}", self.prefix, stage, outcome)).increment(1);
    }

    /// Record stage latency
    pub fn stage_latency(&self, stage: &str, duration: std::time::Duration) {
        histogram!(format!("{}.stages.{}.latency_ms", self.prefix, stage))
            .record(duration.as_millis() as f64);
    }

    /// Record an unhandled failure (error or panic)
    pub fn unhandled_failure(&self, kind: &str) {
        counter!(format!("{}.errors.{}", self.prefix, kind)).increment(1);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
