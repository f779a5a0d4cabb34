//! Liveness and readiness handlers.
//!
//! The two probes answer different questions and never consult each other:
//! `/health` reports the explicit liveness flag, `/ready` pings the write
//! primary and the read replica.

use crate::models::{HealthResponse, ReadinessResponse};
use crate::routes::AppState;
use crate::services::HealthStatus;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;
use tracing::{instrument, warn};

/// Liveness handler.
///
/// ## Response
///
/// - `200 {"status":"healthy","version":"v1","uptime":"2m5s"}`
/// - `503 {"status":"unhealthy","version":"v1","uptime":"2m5s","error":"..."}`
#[instrument(skip_all, name = "registry.health.check")]
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<HealthResponse>) {
    let report = state.health.status_report();

    let (code, error) = match report.status {
        HealthStatus::Healthy => (StatusCode::OK, None),
        HealthStatus::Unhealthy => (
            StatusCode::SERVICE_UNAVAILABLE,
            Some("Service marked unhealthy".to_string()),
        ),
    };

    (
        code,
        Json(HealthResponse {
            status: report.status.as_str().to_string(),
            version: report.version,
            uptime: report.uptime,
            error,
        }),
    )
}

/// Readiness handler.
///
/// Both stores are checked concurrently, each bounded by the configured
/// readiness timeout. The error message names the failing store but never
/// includes connection details.
#[instrument(skip_all, name = "registry.health.ready")]
pub async fn readiness_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let result = state
        .readiness
        .check_readiness(state.config.readiness_timeout())
        .await;

    let code = if result.is_ready() {
        StatusCode::OK
    } else {
        warn!(
            target: "registry.health",
            db_write = result.write.as_str(),
            db_read = result.read.as_str(),
            "Readiness check failed"
        );
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        code,
        Json(ReadinessResponse {
            ready: result.is_ready(),
            db_write: result.write.as_str(),
            db_read: result.read.as_str(),
            db_write_reason: result.write.reason().map(|r| r.as_str()),
            db_read_reason: result.read.reason().map(|r| r.as_str()),
            error: result.error_message(),
            version: state.metrics.version().to_string(),
        }),
    )
}
