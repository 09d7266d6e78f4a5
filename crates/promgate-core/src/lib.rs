//! promgate core: metric types, the metric registry, and the Prometheus text
//! exposition encoder.
//!
//! This crate carries no HTTP or runtime dependencies. The server crate owns
//! request instrumentation and routing; everything here is plain data plus
//! atomics so it can be reused from tests, other binaries, or other transports.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths surface as `PromgateError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod metrics;

/// Shared result type.
pub use error::{Result, PromgateError};
pub use metrics::{
    CounterVec, Gauge, HistogramVec, MetricHandle, MetricKind, MetricOpts, Registry,
    TEXT_FORMAT_CONTENT_TYPE,
};
