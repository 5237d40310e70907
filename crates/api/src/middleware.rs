//! Request metrics middleware

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;
use observability::HttpMetrics;
use std::time::Instant;
use tracing::debug;

/// Record `http_requests_total` and `http_request_duration_seconds` for
/// every request, labelled with the matched route.
pub async fn track_metrics(req: Request, next: Next) -> Response {
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());
    let method = req.method().clone();
    let started = Instant::now();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let elapsed = started.elapsed();
    HttpMetrics.record_request(&path, status, elapsed);
    debug!(%method, path = %path, status, elapsed_ms = elapsed.as_millis() as u64, "Request handled");

    response
}
