//! Registry service models.
//!
//! Request and response bodies for the HTTP API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// User Registry Models
// ============================================================================

/// A registered user (maps to the `users` table).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
}

/// Request body for `POST /users`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
}

// ============================================================================
// Operational Models
// ============================================================================

/// Liveness response returned by `/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "healthy" or "unhealthy".
    pub status: String,

    pub version: String,

    pub uptime: String,

    /// Present only when unhealthy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Readiness response returned by `/ready`.
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,

    /// Write primary status ("connected" or "unreachable").
    pub db_write: &'static str,

    /// Read replica status ("connected" or "unreachable").
    pub db_read: &'static str,

    /// Why the write primary is unreachable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_write_reason: Option<&'static str>,

    /// Why the read replica is unreachable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_read_reason: Option<&'static str>,

    /// Error message (names the store, no infrastructure details).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,

    pub version: String,
}

/// Aggregate request metrics returned by `/metrics`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsResponse {
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub success_rate: f64,
    pub average_latency_ms: f64,
    pub healthy: bool,
    pub uptime: String,
}

/// Point-in-time deployment report returned by `/deployment-info`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentInfo {
    pub version: String,
    pub environment: String,
    pub healthy: bool,
    pub uptime: String,
    pub total_requests: u64,
    pub success_rate: f64,
    pub average_latency_ms: f64,
    pub timestamp: DateTime<Utc>,
}

/// Response for `/version`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionResponse {
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

// ============================================================================
// Admin Models
// ============================================================================

/// Body for `PUT /admin/liveness` (request and response).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LivenessToggle {
    pub healthy: bool,
}

/// Body for `PUT /admin/fault-mode` (request and response).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FaultModeToggle {
    pub enabled: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_omits_error_when_healthy() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "v1".to_string(),
            uptime: "5s".to_string(),
            error: None,
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"healthy\""));
        assert!(!json.contains("\"error\""));
    }

    #[test]
    fn test_readiness_response_serialization() {
        let ready = ReadinessResponse {
            ready: true,
            db_write: "connected",
            db_read: "connected",
            db_write_reason: None,
            db_read_reason: None,
            error: None,
            version: "v1".to_string(),
        };

        let json = serde_json::to_value(&ready).unwrap();
        assert_eq!(json["ready"], true);
        assert_eq!(json["db_write"], "connected");
        assert_eq!(json["db_read"], "connected");
        assert_eq!(json["version"], "v1");
        assert!(json.get("error").is_none());
        assert!(json.get("db_write_reason").is_none());

        let not_ready = ReadinessResponse {
            ready: false,
            db_write: "unreachable",
            db_read: "connected",
            db_write_reason: Some("timeout"),
            db_read_reason: None,
            error: Some("Write database unreachable"),
            version: "v1".to_string(),
        };

        let json = serde_json::to_value(&not_ready).unwrap();
        assert_eq!(json["ready"], false);
        assert_eq!(json["db_write"], "unreachable");
        assert_eq!(json["db_write_reason"], "timeout");
        assert!(json.get("db_read_reason").is_none());
        assert_eq!(json["error"], "Write database unreachable");
    }

    #[test]
    fn test_create_user_request_requires_name() {
        let parsed: Result<CreateUserRequest, _> = serde_json::from_str(r#"{"nom":"x"}"#);
        assert!(parsed.is_err());

        let parsed: CreateUserRequest = serde_json::from_str(r#"{"name":"Ada"}"#).unwrap();
        assert_eq!(parsed.name, "Ada");
    }

    #[test]
    fn test_deployment_info_timestamp_is_rfc3339() {
        let info = DeploymentInfo {
            version: "v1".to_string(),
            environment: "development".to_string(),
            healthy: true,
            uptime: "1s".to_string(),
            total_requests: 0,
            success_rate: 0.0,
            average_latency_ms: 0.0,
            timestamp: Utc::now(),
        };

        let json = serde_json::to_value(&info).unwrap();
        let raw = json["timestamp"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(raw).is_ok());
    }
}
