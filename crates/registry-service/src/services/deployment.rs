//! Deployment info assembly.

use super::metrics_store::{format_uptime, MetricsStore};
use crate::models::DeploymentInfo;
use chrono::Utc;
use std::sync::Arc;

/// Builds [`DeploymentInfo`] from one metrics snapshot plus static identity.
///
/// Read-only: never mutates the store.
#[derive(Debug, Clone)]
pub struct DeploymentInfoAssembler {
    metrics: Arc<MetricsStore>,
    environment: String,
}

impl DeploymentInfoAssembler {
    pub fn new(metrics: Arc<MetricsStore>, environment: impl Into<String>) -> Self {
        Self {
            metrics,
            environment: environment.into(),
        }
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn assemble(&self) -> DeploymentInfo {
        let snapshot = self.metrics.snapshot();

        DeploymentInfo {
            version: snapshot.version,
            environment: self.environment.clone(),
            healthy: snapshot.healthy,
            uptime: format_uptime(snapshot.uptime),
            total_requests: snapshot.total_requests,
            success_rate: snapshot.success_rate,
            average_latency_ms: snapshot.average_latency_ms,
            timestamp: Utc::now(),
        }
    }
}
