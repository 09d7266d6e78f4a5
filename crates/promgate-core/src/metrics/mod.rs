//! In-process metric types and registry.
//!
//! Counter and histogram families keep one series per distinct combination of
//! label values, stored in a `DashMap` keyed by the values in declared label
//! order. Updates are plain atomics; the only locking is the shard lock taken
//! while a series is created.

mod atomic;
mod counter;
mod encode;
mod gauge;
mod histogram;
mod registry;

pub use counter::CounterVec;
pub use encode::TEXT_FORMAT_CONTENT_TYPE;
pub use gauge::Gauge;
pub use histogram::HistogramVec;
pub use registry::{validate_buckets, MetricHandle, MetricOpts, Registry};

use crate::error::{PromgateError, Result};

/// Kind of a registered collector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Counter,
    Gauge,
    Histogram,
}

impl MetricKind {
    /// Exposition `# TYPE` token.
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
            MetricKind::Histogram => "histogram",
        }
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Owned series key; arity must match the declared label names.
fn series_key(name: &str, labels: &[String], values: &[&str]) -> Result<Vec<String>> {
    if values.len() != labels.len() {
        return Err(PromgateError::LabelMismatch {
            name: name.to_string(),
            expected: labels.len(),
            got: values.len(),
        });
    }
    Ok(values.iter().map(|v| v.to_string()).collect())
}
