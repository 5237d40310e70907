//! Prometheus metrics infrastructure
//!
//! Metrics are recorded through the `metrics` facade everywhere in the
//! workspace; nothing is exported until [`init_metrics`] installs the
//! Prometheus recorder.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Duration;

/// Install the Prometheus recorder and serve `/metrics` on `port`
pub fn init_metrics(port: u16) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("0.0.0.0:{}", port).parse()?;

    PrometheusBuilder::new().with_http_listener(addr).install()?;

    tracing::info!(%addr, "Metrics server listening");
    Ok(())
}

/// HTTP request metrics
///
/// * `http_requests_total{path, status}` - completed requests
/// * `http_request_duration_seconds{path}` - request latency
///
/// `path` should be the matched route template, not the raw URI, to keep
/// label cardinality bounded.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpMetrics;

impl HttpMetrics {
    /// Record a completed request
    pub fn record_request(&self, path: &str, status_code: u16, duration: Duration) {
        counter!(
            "http_requests_total",
            "path" => path.to_string(),
            "status" => status_code.to_string()
        )
        .increment(1);
        histogram!("http_request_duration_seconds", "path" => path.to_string())
            .record(duration.as_secs_f64());
    }
}
