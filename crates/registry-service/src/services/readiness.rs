//! Readiness probing of the write primary and the read replica.
//!
//! Each store is pinged concurrently and independently, bounded by the
//! caller's timeout. A timeout is reported exactly like a connection
//! failure (not reachable), with its own reason. No retries happen here;
//! the next `/ready` call is the retry.
//!
//! Once the process starts shutting down (the shutdown token is cancelled),
//! both stores report `ShuttingDown` so load balancers drain this instance
//! while in-flight requests complete.

use crate::observability::metrics::record_readiness_check;
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::warn;

/// Reachability check against one backing store.
#[async_trait]
pub trait StoreProbe: Send + Sync {
    /// Returns `Err` with a server-side diagnostic when the store does not answer.
    async fn ping(&self) -> Result<(), String>;
}

#[async_trait]
impl StoreProbe for PgPool {
    async fn ping(&self) -> Result<(), String> {
        sqlx::query("SELECT 1")
            .execute(self)
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}

/// Which backing store a check targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreRole {
    Write,
    Read,
}

impl StoreRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreRole::Write => "write",
            StoreRole::Read => "read",
        }
    }
}

/// Why a store was considered unreachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnreachableReason {
    /// No answer within the probe timeout.
    Timeout,
    /// The store answered with an error or refused the connection.
    ConnectionFailed,
    /// The process is draining.
    ShuttingDown,
}

impl UnreachableReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnreachableReason::Timeout => "timeout",
            UnreachableReason::ConnectionFailed => "connection_failed",
            UnreachableReason::ShuttingDown => "shutting_down",
        }
    }
}

/// Outcome of a single store check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreStatus {
    Reachable,
    Unreachable(UnreachableReason),
}

impl StoreStatus {
    pub fn is_reachable(&self) -> bool {
        matches!(self, StoreStatus::Reachable)
    }

    /// Connection label used in `/ready` responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreStatus::Reachable => "connected",
            StoreStatus::Unreachable(_) => "unreachable",
        }
    }

    pub fn reason(&self) -> Option<UnreachableReason> {
        match self {
            StoreStatus::Reachable => None,
            StoreStatus::Unreachable(reason) => Some(*reason),
        }
    }
}

/// Combined result of one readiness probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessResult {
    pub write: StoreStatus,
    pub read: StoreStatus,
}

impl ReadinessResult {
    /// Ready only when both stores answered.
    pub fn is_ready(&self) -> bool {
        self.write.is_reachable() && self.read.is_reachable()
    }

    /// Client-facing summary naming the unreachable store(s).
    pub fn error_message(&self) -> Option<&'static str> {
        match (self.write.is_reachable(), self.read.is_reachable()) {
            (true, true) => None,
            (false, true) => Some("Write database unreachable"),
            (true, false) => Some("Read database unreachable"),
            (false, false) => Some("Write and read databases unreachable"),
        }
    }
}

/// Probes both backing stores with a bounded timeout per store.
#[derive(Clone)]
pub struct ReadinessProbe {
    write: Arc<dyn StoreProbe>,
    read: Arc<dyn StoreProbe>,
    shutdown: CancellationToken,
}

impl ReadinessProbe {
    pub fn new(
        write: Arc<dyn StoreProbe>,
        read: Arc<dyn StoreProbe>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            write,
            read,
            shutdown,
        }
    }

    /// Check both stores concurrently. Never waits longer than `timeout`.
    pub async fn check_readiness(&self, timeout: Duration) -> ReadinessResult {
        let (write, read) = tokio::join!(
            self.check_store(StoreRole::Write, self.write.as_ref(), timeout),
            self.check_store(StoreRole::Read, self.read.as_ref(), timeout),
        );

        ReadinessResult { write, read }
    }

    async fn check_store(
        &self,
        role: StoreRole,
        probe: &dyn StoreProbe,
        timeout: Duration,
    ) -> StoreStatus {
        let status = if self.shutdown.is_cancelled() {
            StoreStatus::Unreachable(UnreachableReason::ShuttingDown)
        } else {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    StoreStatus::Unreachable(UnreachableReason::ShuttingDown)
                }
                // Dropping the timed-out ping releases its connection.
                result = tokio::time::timeout(timeout, probe.ping()) => match result {
                    Ok(Ok(())) => StoreStatus::Reachable,
                    Ok(Err(e)) => {
                        warn!(
                            target: "registry.readiness",
                            store = role.as_str(),
                            error = %e,
                            "Store ping failed"
                        );
                        StoreStatus::Unreachable(UnreachableReason::ConnectionFailed)
                    }
                    Err(_) => {
                        warn!(
                            target: "registry.readiness",
                            store = role.as_str(),
                            timeout_ms = timeout.as_millis() as u64,
                            "Store ping timed out"
                        );
                        StoreStatus::Unreachable(UnreachableReason::Timeout)
                    }
                }
            }
        };

        record_readiness_check(
            role.as_str(),
            status.reason().map_or("reachable", |r| r.as_str()),
        );

        status
    }
}

/// Mock store probes for tests.
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};

    const REACHABLE: u8 = 0;
    const FAILING: u8 = 1;
    const HANGING: u8 = 2;

    /// Scripted behaviour of a [`MockStoreProbe`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum MockBehavior {
        /// Answers immediately.
        Reachable,
        /// Answers immediately with an error.
        Failing,
        /// Never answers.
        Hanging,
    }

    impl MockBehavior {
        fn to_u8(self) -> u8 {
            match self {
                MockBehavior::Reachable => REACHABLE,
                MockBehavior::Failing => FAILING,
                MockBehavior::Hanging => HANGING,
            }
        }

        fn from_u8(value: u8) -> Self {
            match value {
                FAILING => MockBehavior::Failing,
                HANGING => MockBehavior::Hanging,
                _ => MockBehavior::Reachable,
            }
        }
    }

    /// Store probe whose behaviour can be switched at runtime.
    #[derive(Debug)]
    pub struct MockStoreProbe {
        behavior: AtomicU8,
        call_count: AtomicUsize,
    }

    impl MockStoreProbe {
        pub fn new(behavior: MockBehavior) -> Self {
            Self {
                behavior: AtomicU8::new(behavior.to_u8()),
                call_count: AtomicUsize::new(0),
            }
        }

        pub fn reachable() -> Self {
            Self::new(MockBehavior::Reachable)
        }

        pub fn failing() -> Self {
            Self::new(MockBehavior::Failing)
        }

        pub fn hanging() -> Self {
            Self::new(MockBehavior::Hanging)
        }

        pub fn set_behavior(&self, behavior: MockBehavior) {
            self.behavior.store(behavior.to_u8(), Ordering::SeqCst);
        }

        pub fn behavior(&self) -> MockBehavior {
            MockBehavior::from_u8(self.behavior.load(Ordering::SeqCst))
        }

        /// Number of pings received.
        pub fn call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl StoreProbe for MockStoreProbe {
        async fn ping(&self) -> Result<(), String> {
            self.call_count.fetch_add(1, Ordering::SeqCst);

            match self.behavior() {
                MockBehavior::Reachable => Ok(()),
                MockBehavior::Failing => Err("mock store refused connection".to_string()),
                MockBehavior::Hanging => std::future::pending().await,
            }
        }
    }
}
