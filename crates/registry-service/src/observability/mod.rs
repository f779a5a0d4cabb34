//! Observability for the registry service.
//!
//! Provides Prometheus metric definitions and recording helpers used by the
//! HTTP middleware, the instrumentation wrapper and the readiness probe.

pub mod metrics;
