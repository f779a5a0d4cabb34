//! Health and metrics core of the registry service.
//!
//! # Components
//!
//! - `metrics_store` - Shared request counters and latency average
//! - `health` - Liveness evaluation from the explicit healthy flag
//! - `readiness` - Bounded reachability checks of the write and read stores
//! - `instrumentation` - Per-call wrapper recording outcomes, fault injection
//! - `deployment` - Deployment info snapshots

pub mod deployment;
pub mod health;
pub mod instrumentation;
pub mod metrics_store;
pub mod readiness;

pub use deployment::DeploymentInfoAssembler;
pub use health::{HealthEvaluator, HealthStatus, StatusReport};
pub use instrumentation::{OperationKind, RequestInstrumentation};
pub use metrics_store::{MetricsSnapshot, MetricsStore};
pub use readiness::mock::{MockBehavior, MockStoreProbe};
pub use readiness::{ReadinessProbe, ReadinessResult, StoreProbe, StoreStatus, UnreachableReason};
