//! HTTP metrics middleware.
//!
//! Records Prometheus metrics for every HTTP response, including responses
//! produced by the framework before a handler runs (404, 405, 415).
//!
//! These are transport-level metrics. The request counters behind `/metrics`
//! are maintained by `RequestInstrumentation` and only count business
//! operations.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

use crate::observability::metrics::record_http_request;

/// Middleware that records method, normalized path, status code and duration.
///
/// Applied as the outermost layer so that timeouts and routing errors are
/// captured too.
pub async fn http_metrics_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    record_http_request(&method, &path, response.status().as_u16(), start.elapsed());

    response
}
