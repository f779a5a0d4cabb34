//! Deployment identity handlers.

use crate::models::{DeploymentInfo, VersionResponse};
use crate::routes::AppState;
use axum::extract::State;
use axum::Json;
use chrono::Utc;
use std::sync::Arc;

/// Handler for GET /deployment-info
#[tracing::instrument(skip_all, name = "registry.deployment.info")]
pub async fn deployment_info(State(state): State<Arc<AppState>>) -> Json<DeploymentInfo> {
    Json(state.deployment.assemble())
}

/// Handler for GET /version
#[tracing::instrument(skip_all, name = "registry.deployment.version")]
pub async fn version(State(state): State<Arc<AppState>>) -> Json<VersionResponse> {
    Json(VersionResponse {
        version: state.metrics.version().to_string(),
        timestamp: Utc::now(),
    })
}
