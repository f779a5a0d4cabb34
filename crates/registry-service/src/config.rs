//! Registry service configuration.
//!
//! Configuration is loaded from environment variables. Database URLs carry
//! credentials and are held as `SecretString`, redacted in Debug output.

use secrecy::SecretString;
use std::collections::HashMap;
use std::env;
use std::fmt;
use thiserror::Error;

/// Default application version reported by `/health`, `/version` and friends.
pub const DEFAULT_APP_VERSION: &str = "v1";

/// Default deployment environment name.
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Default HTTP bind address.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Default per-store readiness probe timeout in milliseconds.
pub const DEFAULT_READINESS_TIMEOUT_MS: u64 = 2000;

/// Upper bound for the readiness probe timeout in milliseconds.
pub const MAX_READINESS_TIMEOUT_MS: u64 = 30_000;

/// Default drain period after a shutdown signal, in seconds.
pub const DEFAULT_DRAIN_SECONDS: u64 = 30;

/// Registry service configuration.
#[derive(Clone)]
pub struct Config {
    /// PostgreSQL URL of the write primary.
    pub write_database_url: SecretString,

    /// PostgreSQL URL of the read replica.
    pub read_database_url: SecretString,

    /// Application version, immutable for the life of the process.
    pub version: String,

    /// Deployment environment name (e.g., "production").
    pub environment: String,

    /// Fail every write through the instrumentation layer (initial value).
    pub fault_mode: bool,

    /// Server bind address (default: "0.0.0.0:8080").
    pub bind_address: String,

    /// Per-store readiness probe timeout in milliseconds.
    pub readiness_timeout_ms: u64,

    /// Route the `/admin/*` toggles (liveness flag, fault mode).
    pub admin_endpoints_enabled: bool,

    /// Seconds to keep serving after a shutdown signal while reporting not-ready.
    pub drain_seconds: u64,
}

/// Custom Debug implementation that redacts database URLs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("write_database_url", &"[REDACTED]")
            .field("read_database_url", &"[REDACTED]")
            .field("version", &self.version)
            .field("environment", &self.environment)
            .field("fault_mode", &self.fault_mode)
            .field("bind_address", &self.bind_address)
            .field("readiness_timeout_ms", &self.readiness_timeout_ms)
            .field("admin_endpoints_enabled", &self.admin_endpoints_enabled)
            .field("drain_seconds", &self.drain_seconds)
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid fault mode configuration: {0}")]
    InvalidFaultMode(String),

    #[error("Invalid admin endpoints configuration: {0}")]
    InvalidAdminEndpoints(String),

    #[error("Invalid readiness timeout configuration: {0}")]
    InvalidReadinessTimeout(String),

    #[error("Invalid drain period configuration: {0}")]
    InvalidDrainSeconds(String),
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let write_database_url = required(vars, "PG_URL_WRITE")?;
        let read_database_url = required(vars, "PG_URL_READ")?;

        let version = non_empty_or(vars, "APP_VERSION", DEFAULT_APP_VERSION);
        let environment = non_empty_or(vars, "ENVIRONMENT", DEFAULT_ENVIRONMENT);

        let fault_mode = match vars.get("FAULT_MODE") {
            Some(value) => parse_bool(value).ok_or_else(|| {
                ConfigError::InvalidFaultMode(format!(
                    "FAULT_MODE must be true or false, got '{}'",
                    value
                ))
            })?,
            None => false,
        };

        let admin_endpoints_enabled = match vars.get("ADMIN_ENDPOINTS_ENABLED") {
            Some(value) => parse_bool(value).ok_or_else(|| {
                ConfigError::InvalidAdminEndpoints(format!(
                    "ADMIN_ENDPOINTS_ENABLED must be true or false, got '{}'",
                    value
                ))
            })?,
            None => false,
        };

        let bind_address = vars
            .get("BIND_ADDRESS")
            .cloned()
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        // Parse readiness timeout with validation
        let readiness_timeout_ms = if let Some(value_str) = vars.get("READINESS_TIMEOUT_MS") {
            let value: u64 = value_str.parse().map_err(|e| {
                ConfigError::InvalidReadinessTimeout(format!(
                    "READINESS_TIMEOUT_MS must be a valid positive integer, got '{}': {}",
                    value_str, e
                ))
            })?;

            if value == 0 {
                return Err(ConfigError::InvalidReadinessTimeout(
                    "READINESS_TIMEOUT_MS must be greater than 0".to_string(),
                ));
            }

            if value > MAX_READINESS_TIMEOUT_MS {
                return Err(ConfigError::InvalidReadinessTimeout(format!(
                    "READINESS_TIMEOUT_MS must not exceed {}, got {}",
                    MAX_READINESS_TIMEOUT_MS, value
                )));
            }

            value
        } else {
            DEFAULT_READINESS_TIMEOUT_MS
        };

        let drain_seconds = if let Some(value_str) = vars.get("DRAIN_SECONDS") {
            value_str.parse().map_err(|e| {
                ConfigError::InvalidDrainSeconds(format!(
                    "DRAIN_SECONDS must be a valid non-negative integer, got '{}': {}",
                    value_str, e
                ))
            })?
        } else {
            DEFAULT_DRAIN_SECONDS
        };

        Ok(Config {
            write_database_url,
            read_database_url,
            version,
            environment,
            fault_mode,
            bind_address,
            readiness_timeout_ms,
            admin_endpoints_enabled,
            drain_seconds,
        })
    }

    /// Readiness probe timeout as a `Duration`.
    pub fn readiness_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.readiness_timeout_ms)
    }
}

fn required(vars: &HashMap<String, String>, name: &str) -> Result<SecretString, ConfigError> {
    vars.get(name)
        .filter(|value| !value.is_empty())
        .map(|value| SecretString::from(value.clone()))
        .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
}

fn non_empty_or(vars: &HashMap<String, String>, name: &str, default: &str) -> String {
    vars.get(name)
        .filter(|value| !value.is_empty())
        .cloned()
        .unwrap_or_else(|| default.to_string())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}
