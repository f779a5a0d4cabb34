//! Metrics endpoint handlers.
//!
//! `/metrics` serves the aggregate request counters as JSON. The Prometheus
//! exposition (HTTP and operation metrics) lives at `/metrics/prometheus`.
//! Neither endpoint exposes PII or connection details.

use crate::models::MetricsResponse;
use crate::routes::AppState;
use crate::services::metrics_store::format_uptime;
use axum::{extract::State, response::IntoResponse, Json};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

/// Handler for GET /metrics
///
/// Reads one consistent snapshot; the counters never disagree with each
/// other within a single response.
#[tracing::instrument(skip_all, name = "registry.metrics.snapshot")]
pub async fn metrics_snapshot(State(state): State<Arc<AppState>>) -> Json<MetricsResponse> {
    let snapshot = state.metrics.snapshot();

    Json(MetricsResponse {
        total_requests: snapshot.total_requests,
        successful_requests: snapshot.successful_requests,
        failed_requests: snapshot.failed_requests,
        success_rate: snapshot.success_rate,
        average_latency_ms: snapshot.average_latency_ms,
        healthy: snapshot.healthy,
        uptime: format_uptime(snapshot.uptime),
    })
}

/// Handler for GET /metrics/prometheus
///
/// Returns Prometheus-formatted metrics for scraping:
/// ```text
/// # TYPE registry_operations_total counter
/// registry_operations_total{operation="write",status="success"} 42
/// ```
#[tracing::instrument(skip_all, name = "registry.metrics.scrape")]
pub async fn prometheus_metrics(State(handle): State<PrometheusHandle>) -> impl IntoResponse {
    handle.render()
}
