//! Request instrumentation middleware.
//!
//! Install with `axum::middleware::from_fn_with_state(http_metrics, track_requests)`.
//!
//! Ordering per request:
//! 1. in-flight gauge +1 (guard acquired)
//! 2. monotonic start time
//! 3. await the downstream handler
//! 4. count `(method, path, status)` and observe `(method, path)` duration
//! 5. guard dropped: in-flight gauge -1
//!
//! A panic escaping the handler is counted with status `500` and then resumed
//! unchanged; the outer catch-panic layer owns turning it into a response.
//! `path` is the literal request path, not the route template.

use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use futures_util::FutureExt;

use crate::obs::HttpMetrics;

pub async fn track_requests(
    State(metrics): State<HttpMetrics>,
    req: Request,
    next: Next,
) -> Response {
    let _in_flight = metrics.track();
    let start = Instant::now();

    let method = req.method().as_str().to_owned();
    let path = req.uri().path().to_owned();

    match AssertUnwindSafe(next.run(req)).catch_unwind().await {
        Ok(response) => {
            let elapsed = start.elapsed();
            let status = response.status();
            metrics.record(&method, &path, status.as_str(), elapsed);
            tracing::debug!(%method, %path, status = status.as_u16(), ?elapsed, "request");
            response
        }
        Err(fault) => {
            let elapsed = start.elapsed();
            metrics.record(&method, &path, "500", elapsed);
            tracing::error!(%method, %path, ?elapsed, "handler panicked");
            panic::resume_unwind(fault)
        }
    }
}
