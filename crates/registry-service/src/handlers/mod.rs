//! HTTP request handlers for the registry service.

pub mod admin;
pub mod deployment;
pub mod health;
pub mod metrics;
pub mod users;

pub use admin::{set_fault_mode, set_liveness};
pub use deployment::{deployment_info, version};
pub use health::{health_check, readiness_check};
pub use metrics::{metrics_snapshot, prometheus_metrics};
pub use users::{create_user, list_users};
