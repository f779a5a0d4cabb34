//! HTTP routes for the registry service.
//!
//! Defines the Axum router and application state.

use crate::config::Config;
use crate::handlers;
use crate::middleware::http_metrics_middleware;
use crate::services::{
    DeploymentInfoAssembler, HealthEvaluator, MetricsStore, ReadinessProbe,
    RequestInstrumentation, StoreProbe,
};
use axum::{
    middleware,
    routing::{get, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Write primary connection pool.
    pub write_pool: PgPool,

    /// Read replica connection pool.
    pub read_pool: PgPool,

    /// Service configuration.
    pub config: Config,

    /// Process-wide request metrics.
    pub metrics: Arc<MetricsStore>,

    /// Liveness evaluation.
    pub health: HealthEvaluator,

    /// Write/read store reachability checks.
    pub readiness: ReadinessProbe,

    /// Wrapper for every business operation.
    pub instrumentation: Arc<RequestInstrumentation>,

    /// Deployment info snapshots.
    pub deployment: DeploymentInfoAssembler,
}

impl AppState {
    /// Wire the core components around the two pools. Readiness pings the
    /// pools themselves.
    pub fn new(
        write_pool: PgPool,
        read_pool: PgPool,
        config: Config,
        shutdown: CancellationToken,
    ) -> Self {
        let write_probe: Arc<dyn StoreProbe> = Arc::new(write_pool.clone());
        let read_probe: Arc<dyn StoreProbe> = Arc::new(read_pool.clone());
        Self::with_probes(
            write_pool,
            read_pool,
            config,
            write_probe,
            read_probe,
            shutdown,
        )
    }

    /// Same as [`AppState::new`], with explicit readiness probes.
    pub fn with_probes(
        write_pool: PgPool,
        read_pool: PgPool,
        config: Config,
        write_probe: Arc<dyn StoreProbe>,
        read_probe: Arc<dyn StoreProbe>,
        shutdown: CancellationToken,
    ) -> Self {
        let metrics = Arc::new(MetricsStore::new(config.version.clone()));

        Self {
            write_pool,
            read_pool,
            health: HealthEvaluator::new(Arc::clone(&metrics)),
            readiness: ReadinessProbe::new(write_probe, read_probe, shutdown),
            instrumentation: Arc::new(RequestInstrumentation::new(
                Arc::clone(&metrics),
                config.fault_mode,
            )),
            deployment: DeploymentInfoAssembler::new(
                Arc::clone(&metrics),
                config.environment.clone(),
            ),
            metrics,
            config,
        }
    }
}

/// Build the application routes.
///
/// Creates an Axum router with:
/// - `/health` - Liveness (explicit healthy flag)
/// - `/ready` - Readiness (pings write primary and read replica)
/// - `/metrics` - Aggregate request metrics (JSON)
/// - `/metrics/prometheus` - Prometheus exposition
/// - `/deployment-info`, `/version` - Deployment identity
/// - `/users` - User registry (instrumented)
/// - `/admin/liveness`, `/admin/fault-mode` - Operator toggles, only when enabled
/// - TraceLayer for request logging
/// - HTTP metrics middleware
/// - 30 second request timeout
pub fn build_routes(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let admin_enabled = state.config.admin_endpoints_enabled;

    let operational_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_snapshot))
        .route("/deployment-info", get(handlers::deployment_info))
        .route("/version", get(handlers::version))
        .with_state(state.clone());

    let prometheus_routes = Router::new()
        .route("/metrics/prometheus", get(handlers::prometheus_metrics))
        .with_state(metrics_handle);

    let user_routes = Router::new()
        .route(
            "/users",
            get(handlers::list_users).post(handlers::create_user),
        )
        .with_state(state.clone());

    let mut app = operational_routes
        .merge(prometheus_routes)
        .merge(user_routes);

    if admin_enabled {
        let admin_routes = Router::new()
            .route("/admin/liveness", put(handlers::set_liveness))
            .route("/admin/fault-mode", put(handlers::set_fault_mode))
            .with_state(state);
        app = app.merge(admin_routes);
    }

    // Layer order (bottom-to-top execution):
    // 1. TimeoutLayer - Timeout the request (innermost)
    // 2. TraceLayer - Log request details
    // 3. http_metrics_middleware - Record ALL responses (outermost)
    app.layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(middleware::from_fn(http_metrics_middleware))
}
