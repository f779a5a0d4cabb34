//! Prometheus metrics for the registry service.
//!
//! All metrics follow Prometheus naming conventions:
//! - `registry_` prefix
//! - `_total` suffix for counters
//! - `_seconds` suffix for duration histograms
//!
//! # Cardinality
//!
//! Labels are bounded:
//! - `method`: HTTP methods
//! - `endpoint`: the fixed route set, everything else is `/other`
//! - `status`: success, error, timeout (HTTP) or success, error,
//!   injected_fault, cancelled (operations)
//! - `operation`: read, write
//! - `store`: write, read

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

/// Initialize the Prometheus recorder and return the handle used to render
/// `/metrics/prometheus`.
///
/// # Errors
///
/// Returns error if the recorder fails to install (e.g., already installed).
pub fn init_metrics_recorder() -> Result<PrometheusHandle, String> {
    PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Prefix("registry_http_request".to_string()),
            &[
                0.005, 0.010, 0.025, 0.050, 0.100, 0.150, 0.200, 0.300, 0.500, 1.000, 2.000,
            ],
        )
        .map_err(|e| format!("Failed to set HTTP request buckets: {e}"))?
        .set_buckets_for_metric(
            Matcher::Prefix("registry_operation".to_string()),
            &[
                0.001, 0.002, 0.005, 0.010, 0.020, 0.050, 0.100, 0.250, 0.500, 1.000,
            ],
        )
        .map_err(|e| format!("Failed to set operation buckets: {e}"))?
        .install_recorder()
        .map_err(|e| format!("Failed to install Prometheus recorder: {e}"))
}

// ============================================================================
// HTTP Request Metrics
// ============================================================================

/// Record HTTP request completion
///
/// Metric: `registry_http_requests_total`, `registry_http_request_duration_seconds`
/// Labels: `method`, `endpoint`, `status` / `status_code`
pub fn record_http_request(method: &str, endpoint: &str, status_code: u16, duration: Duration) {
    let normalized_endpoint = normalize_endpoint(endpoint);
    let status = categorize_status_code(status_code);

    histogram!("registry_http_request_duration_seconds",
        "method" => method.to_string(),
        "endpoint" => normalized_endpoint,
        "status" => status
    )
    .record(duration.as_secs_f64());

    counter!("registry_http_requests_total",
        "method" => method.to_string(),
        "endpoint" => normalized_endpoint,
        "status_code" => status_code.to_string()
    )
    .increment(1);
}

/// Categorize HTTP status code into success/error/timeout
fn categorize_status_code(status_code: u16) -> &'static str {
    match status_code {
        200..=299 => "success",
        408 | 504 => "timeout",
        _ => "error",
    }
}

/// Map a request path to one of the known routes.
fn normalize_endpoint(path: &str) -> &'static str {
    match path {
        "/health" => "/health",
        "/ready" => "/ready",
        "/metrics" => "/metrics",
        "/metrics/prometheus" => "/metrics/prometheus",
        "/deployment-info" => "/deployment-info",
        "/version" => "/version",
        "/users" => "/users",
        "/admin/liveness" => "/admin/liveness",
        "/admin/fault-mode" => "/admin/fault-mode",
        _ => "/other",
    }
}

// ============================================================================
// Instrumented Operation Metrics
// ============================================================================

/// Record the terminal outcome of an instrumented business operation
///
/// Metric: `registry_operations_total`, `registry_operation_duration_seconds`
/// Labels: `operation`, `status`
pub fn record_operation(operation: &'static str, status: &'static str, duration: Duration) {
    histogram!("registry_operation_duration_seconds",
        "operation" => operation,
        "status" => status
    )
    .record(duration.as_secs_f64());

    counter!("registry_operations_total",
        "operation" => operation,
        "status" => status
    )
    .increment(1);
}

// ============================================================================
// Readiness Metrics
// ============================================================================

/// Record one store check performed by the readiness probe
///
/// Metric: `registry_readiness_checks_total`
/// Labels: `store`, `result`
pub fn record_readiness_check(store: &'static str, result: &'static str) {
    counter!("registry_readiness_checks_total",
        "store" => store,
        "result" => result
    )
    .increment(1);
}
