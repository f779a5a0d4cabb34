//! Process-wide request metrics.
//!
//! `MetricsStore` is the only shared mutable state of the service. It is
//! constructed once in `main` (or once per test) and handed to every
//! component through `Arc`, never reached through a global.
//!
//! # Consistency
//!
//! Counters and the latency average live behind a single `RwLock`:
//! - mutations take the write lock, so `total == successful + failed`
//!   holds for every completed instrumented call;
//! - `snapshot()` takes the read lock, so all fields of one snapshot come
//!   from the same point in time.
//!
//! # Latency
//!
//! `average_latency_ms` is a recency-weighted smoothing recurrence,
//! `average = (average + d) / 2`, not an arithmetic mean. A sample taken
//! `k` successes ago contributes with weight `2^-(k+1)`.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::time::{Duration, Instant};

/// Mutable aggregate state guarded by the store lock.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct Counters {
    total_requests: u64,
    successful_requests: u64,
    failed_requests: u64,
    average_latency_ms: f64,
    healthy: bool,
}

/// Point-in-time copy of the metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSnapshot {
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub average_latency_ms: f64,
    /// Percentage in `0.0..=100.0`; `0.0` when no request has been counted.
    pub success_rate: f64,
    pub healthy: bool,
    pub version: String,
    pub started_at: DateTime<Utc>,
    pub uptime: Duration,
}

/// Concurrency-safe aggregate of request outcomes and liveness.
#[derive(Debug)]
pub struct MetricsStore {
    counters: RwLock<Counters>,
    version: String,
    start: Instant,
    started_at: DateTime<Utc>,
}

impl MetricsStore {
    /// Create a store that starts healthy with zeroed counters.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            counters: RwLock::new(Counters {
                healthy: true,
                ..Counters::default()
            }),
            version: version.into(),
            start: Instant::now(),
            started_at: Utc::now(),
        }
    }

    /// Count a unit of work as started.
    pub fn increment_total(&self) {
        let mut counters = self.counters.write();
        counters.total_requests = counters.total_requests.saturating_add(1);
    }

    /// Record a successful unit of work and fold its latency into the average.
    pub fn record_success(&self, duration: Duration) {
        let sample_ms = duration_to_ms(duration);
        let mut counters = self.counters.write();
        counters.successful_requests = counters.successful_requests.saturating_add(1);
        counters.average_latency_ms = (counters.average_latency_ms + sample_ms) / 2.0;
    }

    /// Record a failed unit of work. The latency average is left untouched.
    pub fn record_failure(&self) {
        let mut counters = self.counters.write();
        counters.failed_requests = counters.failed_requests.saturating_add(1);
    }

    /// Set the liveness flag.
    pub fn set_healthy(&self, healthy: bool) {
        self.counters.write().healthy = healthy;
    }

    pub fn is_healthy(&self) -> bool {
        self.counters.read().healthy
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn uptime(&self) -> Duration {
        self.start.elapsed()
    }

    /// Capture every metric under a single read lock.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let counters = *self.counters.read();

        MetricsSnapshot {
            total_requests: counters.total_requests,
            successful_requests: counters.successful_requests,
            failed_requests: counters.failed_requests,
            average_latency_ms: counters.average_latency_ms,
            success_rate: success_rate(counters.successful_requests, counters.total_requests),
            healthy: counters.healthy,
            version: self.version.clone(),
            started_at: self.started_at,
            uptime: self.uptime(),
        }
    }
}

/// Success percentage, defined as `0.0` when nothing has been counted.
pub fn success_rate(successful: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    successful as f64 / total as f64 * 100.0
}

/// Duration in whole milliseconds; sub-millisecond remainders are dropped.
fn duration_to_ms(duration: Duration) -> f64 {
    duration.as_millis() as f64
}

/// Render an uptime compactly: `350ms`, `45s`, `2m5s`, `1h0m5s`.
pub fn format_uptime(uptime: Duration) -> String {
    let total_secs = uptime.as_secs();
    if total_secs == 0 {
        return format!("{}ms", uptime.subsec_millis());
    }

    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{}h{}m{}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m{}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
