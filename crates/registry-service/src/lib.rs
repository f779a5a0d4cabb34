//! Registry Service Library
//!
//! A small user registry whose real purpose is to carry an operational core:
//!
//! - Process-wide request metrics (counts, success rate, smoothed latency)
//! - Liveness driven by an explicit flag
//! - Readiness against a write primary and a read replica, with deadlines
//! - Runtime fault injection for write operations
//! - Deployment info snapshots
//!
//! # Architecture
//!
//! The service follows the Handler -> Service -> Repository pattern:
//!
//! ```text
//! routes/mod.rs -> handlers/*.rs -> services/*.rs -> repositories/*.rs
//! ```
//!
//! # Modules
//!
//! - `config` - Service configuration from environment
//! - `errors` - Error types with HTTP status code mapping
//! - `handlers` - HTTP request handlers
//! - `middleware` - HTTP metrics middleware
//! - `models` - Request and response bodies
//! - `observability` - Prometheus recorder and recording helpers
//! - `repositories` - SQL statements
//! - `routes` - Axum router setup and application state
//! - `services` - Metrics store, health, readiness, instrumentation

pub mod config;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod repositories;
pub mod routes;
pub mod services;
