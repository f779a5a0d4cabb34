//! Per-call request instrumentation.
//!
//! Every business operation runs through [`RequestInstrumentation::run`],
//! which applies one policy:
//!
//! 1. count the call as started (`increment_total`);
//! 2. if it is a write and fault mode is on, fail it without running it;
//! 3. otherwise run it, timing only the operation itself;
//! 4. record exactly one terminal outcome (success with latency, or failure).
//!
//! A call whose future is dropped mid-flight (client disconnect, request
//! timeout) is resolved as a failure by [`PendingCall`]'s `Drop`, so no
//! started call is ever left unresolved.

use super::metrics_store::MetricsStore;
use crate::errors::RegistryError;
use crate::observability::metrics::record_operation;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Which data path an operation uses. Fault injection applies to writes only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Read,
    Write,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Read => "read",
            OperationKind::Write => "write",
        }
    }
}

/// Wraps business operations and records their outcomes.
#[derive(Debug)]
pub struct RequestInstrumentation {
    metrics: Arc<MetricsStore>,
    fault_mode: AtomicBool,
}

impl RequestInstrumentation {
    pub fn new(metrics: Arc<MetricsStore>, fault_mode: bool) -> Self {
        Self {
            metrics,
            fault_mode: AtomicBool::new(fault_mode),
        }
    }

    pub fn metrics(&self) -> &Arc<MetricsStore> {
        &self.metrics
    }

    pub fn fault_mode(&self) -> bool {
        self.fault_mode.load(Ordering::SeqCst)
    }

    /// Toggle fault injection for subsequent write calls.
    pub fn set_fault_mode(&self, enabled: bool) {
        let previous = self.fault_mode.swap(enabled, Ordering::SeqCst);
        if previous != enabled {
            warn!(
                target: "registry.fault_injection",
                enabled,
                "Fault mode changed"
            );
        }
    }

    /// Run `op` under the instrumentation policy.
    pub async fn run<T, F, Fut>(&self, kind: OperationKind, op: F) -> Result<T, RegistryError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, RegistryError>>,
    {
        let call = PendingCall::start(&self.metrics, kind);

        if kind == OperationKind::Write && self.fault_mode() {
            warn!(
                target: "registry.fault_injection",
                operation = kind.as_str(),
                "Fault mode active, failing write without touching the store"
            );
            call.fail(Duration::ZERO, "injected_fault");
            return Err(RegistryError::InjectedFault);
        }

        let started = Instant::now();
        let result = op().await;
        let elapsed = started.elapsed();

        match &result {
            Ok(_) => call.succeed(elapsed),
            Err(e) => {
                debug!(
                    target: "registry.instrumentation",
                    operation = kind.as_str(),
                    error = %e,
                    "Operation failed"
                );
                call.fail(elapsed, "error");
            }
        }

        result
    }
}

/// A started call that has not yet recorded its outcome.
struct PendingCall<'a> {
    metrics: &'a MetricsStore,
    kind: OperationKind,
    resolved: bool,
}

impl<'a> PendingCall<'a> {
    fn start(metrics: &'a MetricsStore, kind: OperationKind) -> Self {
        metrics.increment_total();
        Self {
            metrics,
            kind,
            resolved: false,
        }
    }

    fn succeed(mut self, elapsed: Duration) {
        self.resolved = true;
        self.metrics.record_success(elapsed);
        record_operation(self.kind.as_str(), "success", elapsed);
    }

    fn fail(mut self, elapsed: Duration, status: &'static str) {
        self.resolved = true;
        self.metrics.record_failure();
        record_operation(self.kind.as_str(), status, elapsed);
    }
}

impl Drop for PendingCall<'_> {
    fn drop(&mut self) {
        if !self.resolved {
            warn!(
                target: "registry.instrumentation",
                operation = self.kind.as_str(),
                "Operation cancelled before completion, recording failure"
            );
            self.metrics.record_failure();
            record_operation(self.kind.as_str(), "cancelled", Duration::ZERO);
        }
    }
}
