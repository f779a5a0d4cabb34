//! Liveness evaluation.
//!
//! Liveness answers "should this process be restarted". It is driven only by
//! the explicit flag on `MetricsStore` (operator or fault-injection signal),
//! never by error rates or latency. Readiness is evaluated separately by
//! [`ReadinessProbe`](super::readiness::ReadinessProbe).

use super::metrics_store::{format_uptime, MetricsStore};
use std::sync::Arc;
use tracing::warn;

/// Liveness status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "healthy",
            HealthStatus::Unhealthy => "unhealthy",
        }
    }
}

/// Human-readable liveness report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub status: HealthStatus,
    pub version: String,
    pub uptime: String,
}

/// Derives liveness from the shared metrics store.
#[derive(Debug, Clone)]
pub struct HealthEvaluator {
    metrics: Arc<MetricsStore>,
}

impl HealthEvaluator {
    pub fn new(metrics: Arc<MetricsStore>) -> Self {
        Self { metrics }
    }

    pub fn is_healthy(&self) -> bool {
        self.metrics.is_healthy()
    }

    pub fn status_report(&self) -> StatusReport {
        let status = if self.is_healthy() {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        };

        StatusReport {
            status,
            version: self.metrics.version().to_string(),
            uptime: format_uptime(self.metrics.uptime()),
        }
    }

    /// Flag the process for restart. Readiness is not affected.
    pub fn mark_unhealthy(&self) {
        warn!(target: "registry.health", "Process marked unhealthy");
        self.metrics.set_healthy(false);
    }

    pub fn mark_healthy(&self) {
        tracing::info!(target: "registry.health", "Process marked healthy");
        self.metrics.set_healthy(true);
    }
}
