//! Operator toggles.
//!
//! Routed only when `ADMIN_ENDPOINTS_ENABLED=true`. These drive the explicit
//! liveness flag and the runtime fault-injection switch.

use crate::errors::RegistryError;
use crate::models::{FaultModeToggle, LivenessToggle};
use crate::routes::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use std::sync::Arc;
use tracing::instrument;

/// Handler for PUT /admin/liveness
#[instrument(skip_all, name = "registry.admin.liveness")]
pub async fn set_liveness(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LivenessToggle>, JsonRejection>,
) -> Result<Json<LivenessToggle>, RegistryError> {
    let Json(toggle) = payload.map_err(|_| {
        RegistryError::BadRequest("Invalid request: 'healthy' must be a boolean".to_string())
    })?;

    if toggle.healthy {
        state.health.mark_healthy();
    } else {
        state.health.mark_unhealthy();
    }

    Ok(Json(LivenessToggle {
        healthy: state.health.is_healthy(),
    }))
}

/// Handler for PUT /admin/fault-mode
#[instrument(skip_all, name = "registry.admin.fault_mode")]
pub async fn set_fault_mode(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<FaultModeToggle>, JsonRejection>,
) -> Result<Json<FaultModeToggle>, RegistryError> {
    let Json(toggle) = payload.map_err(|_| {
        RegistryError::BadRequest("Invalid request: 'enabled' must be a boolean".to_string())
    })?;

    state.instrumentation.set_fault_mode(toggle.enabled);

    Ok(Json(FaultModeToggle {
        enabled: state.instrumentation.fault_mode(),
    }))
}
