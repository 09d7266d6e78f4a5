//! HTTP request metrics.
//!
//! Three collectors obtained from the shared [`Registry`]: a request counter
//! labelled by method/path/status, a duration histogram labelled by
//! method/path, and an unlabelled in-flight gauge. Registration goes through
//! the registry's get-or-create, so building `HttpMetrics` twice against one
//! registry yields handles to the same objects.

use std::sync::Arc;
use std::time::Duration;

use promgate_core::error::Result;
use promgate_core::{CounterVec, Gauge, HistogramVec, Registry};

pub const HTTP_REQUESTS_TOTAL: &str = "http_requests_total";
pub const HTTP_REQUEST_DURATION_SECONDS: &str = "http_request_duration_seconds";
pub const HTTP_REQUESTS_IN_PROGRESS: &str = "http_requests_in_progress";

#[derive(Clone, Debug)]
pub struct HttpMetrics {
    requests_total: Arc<CounterVec>,
    request_duration: Arc<HistogramVec>,
    in_progress: Arc<Gauge>,
}

impl HttpMetrics {
    /// Get or create the HTTP collectors in `registry`.
    pub fn register(registry: &Registry, duration_buckets: &[f64]) -> Result<Self> {
        let requests_total = registry.counter(
            HTTP_REQUESTS_TOTAL,
            "Total number of HTTP requests",
            &["method", "path", "status"],
        )?;
        let request_duration = registry.histogram(
            HTTP_REQUEST_DURATION_SECONDS,
            "HTTP request duration in seconds",
            &["method", "path"],
            duration_buckets,
        )?;
        let in_progress = registry.gauge(
            HTTP_REQUESTS_IN_PROGRESS,
            "Number of HTTP requests currently being processed",
        )?;

        Ok(Self { requests_total, request_duration, in_progress })
    }

    /// Increment the in-flight gauge. It is decremented when the guard drops.
    pub fn track(&self) -> InFlight {
        self.in_progress.inc();
        InFlight { gauge: Arc::clone(&self.in_progress) }
    }

    /// Count one finished request and observe its duration.
    pub fn record(&self, method: &str, path: &str, status: &str, elapsed: Duration) {
        if let Err(e) = self.requests_total.inc(&[method, path, status]) {
            tracing::warn!(error = %e, "failed to count request");
        }
        if let Err(e) = self.request_duration.observe(&[method, path], elapsed) {
            tracing::warn!(error = %e, "failed to observe request duration");
        }
    }

    pub fn requests_total(&self) -> &Arc<CounterVec> {
        &self.requests_total
    }

    pub fn request_duration(&self) -> &Arc<HistogramVec> {
        &self.request_duration
    }

    pub fn in_progress(&self) -> &Arc<Gauge> {
        &self.in_progress
    }
}

/// Scoped in-flight marker. Dropping it decrements the gauge exactly once,
/// on return, unwind, or cancellation of the owning future.
#[must_use = "dropping the guard immediately ends the in-flight window"]
pub struct InFlight {
    gauge: Arc<Gauge>,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.gauge.dec();
    }
}
