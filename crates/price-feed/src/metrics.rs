//! Refresh metrics
//!
//! Recorded through the `metrics` facade; they are no-ops until an exporter
//! is installed (see `observability::init_metrics`).
//!
//! * `feed_refresh_total{job, outcome}` - refresh runs by outcome
//! * `feed_refresh_duration_seconds{job}` - refresh duration
//! * `feed_last_success_timestamp{job}` - unix time of the last success

use metrics::{counter, gauge, histogram};
use std::time::Duration;

/// Metric handles for one refresh job
#[derive(Debug, Clone)]
pub struct RefreshMetrics {
    job: String,
}

impl RefreshMetrics {
    pub fn new(job: impl Into<String>) -> Self {
        Self { job: job.into() }
    }

    /// Record a successful run
    pub fn success(&self, duration: Duration) {
        self.record("success", duration);
        gauge!("feed_last_success_timestamp", "job" => self.job.clone())
            .set(chrono::Utc::now().timestamp() as f64);
    }

    /// Record a failed run, labelled by failure kind
    pub fn failure(&self, kind: &'static str, duration: Duration) {
        self.record(kind, duration);
    }

    pub fn job(&self) -> &str {
        &self.job
    }

    fn record(&self, outcome: &'static str, duration: Duration) {
        counter!("feed_refresh_total", "job" => self.job.clone(), "outcome" => outcome)
            .increment(1);
        histogram!("feed_refresh_duration_seconds", "job" => self.job.clone())
            .record(duration.as_secs_f64());
    }
}
