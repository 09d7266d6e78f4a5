//! Observability: HTTP request metrics and the instrumentation middleware.
//!
//! Metrics live in a `promgate_core::Registry` owned by `AppState` and are
//! rendered by the `/metrics` handler.

pub mod metrics;
pub mod middleware;

pub use metrics::{HttpMetrics, InFlight};
pub use middleware::track_requests;
