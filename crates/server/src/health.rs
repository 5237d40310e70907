//! Health check endpoint

use axum::{extract::State, response::Json, routing::get, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

/// Reports the status of the data feed (e.g. `"success"`)
pub type StatusProbe = Arc<dyn Fn() -> String + Send + Sync>;

/// Health check body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: String,
    pub uptime_seconds: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feed_status: Option<String>,
}

/// Shared state for health checks
#[derive(Clone)]
pub struct HealthState {
    pub service_name: String,
    pub start_time: Instant,
    feed_probe: Option<StatusProbe>,
}

impl HealthState {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            start_time: Instant::now(),
            feed_probe: None,
        }
    }

    /// Report `feed_status` from `probe` on every health check
    pub fn with_feed_probe(mut self, probe: impl Fn() -> String + Send + Sync + 'static) -> Self {
        self.feed_probe = Some(Arc::new(probe));
        self
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Current health snapshot.
    ///
    /// The process is `ok` whenever it can answer; a failing feed shows up
    /// in `feed_status` only.
    pub fn snapshot(&self) -> HealthStatus {
        HealthStatus {
            status: "ok".to_string(),
            service: self.service_name.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now().to_rfc3339(),
            uptime_seconds: self.uptime_seconds(),
            feed_status: self.feed_probe.as_ref().map(|probe| probe()),
        }
    }
}

/// `GET /health`
pub async fn health_handler(State(state): State<Arc<HealthState>>) -> Json<HealthStatus> {
    Json(state.snapshot())
}

/// Router serving `/health`
pub fn health_routes(state: Arc<HealthState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(state)
}
