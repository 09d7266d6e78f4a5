//! Name-keyed metric registry with idempotent get-or-create.
//!
//! A name maps to exactly one collector for the lifetime of the registry.
//! Asking for an existing name returns the existing collector; it never fails
//! with a duplicate-registration error. If the caller's options describe a
//! different shape (kind or label names) the existing collector still wins and
//! a warning is logged.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

use crate::error::{PromgateError, Result};

use super::{CounterVec, Gauge, HistogramVec, MetricKind};

/// Shared handle to a registered collector.
#[derive(Debug, Clone)]
pub enum MetricHandle {
    Counter(Arc<CounterVec>),
    Gauge(Arc<Gauge>),
    Histogram(Arc<HistogramVec>),
}

impl MetricHandle {
    pub fn kind(&self) -> MetricKind {
        match self {
            MetricHandle::Counter(_) => MetricKind::Counter,
            MetricHandle::Gauge(_) => MetricKind::Gauge,
            MetricHandle::Histogram(_) => MetricKind::Histogram,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            MetricHandle::Counter(c) => c.name(),
            MetricHandle::Gauge(g) => g.name(),
            MetricHandle::Histogram(h) => h.name(),
        }
    }

    /// Declared label names; empty for gauges.
    pub fn label_names(&self) -> &[String] {
        match self {
            MetricHandle::Counter(c) => c.label_names(),
            MetricHandle::Gauge(_) => &[],
            MetricHandle::Histogram(h) => h.label_names(),
        }
    }

    /// True when both handles point at the same collector object.
    pub fn same_as(&self, other: &MetricHandle) -> bool {
        match (self, other) {
            (MetricHandle::Counter(a), MetricHandle::Counter(b)) => Arc::ptr_eq(a, b),
            (MetricHandle::Gauge(a), MetricHandle::Gauge(b)) => Arc::ptr_eq(a, b),
            (MetricHandle::Histogram(a), MetricHandle::Histogram(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    pub fn as_counter(&self) -> Option<Arc<CounterVec>> {
        match self {
            MetricHandle::Counter(c) => Some(Arc::clone(c)),
            _ => None,
        }
    }

    pub fn as_gauge(&self) -> Option<Arc<Gauge>> {
        match self {
            MetricHandle::Gauge(g) => Some(Arc::clone(g)),
            _ => None,
        }
    }

    pub fn as_histogram(&self) -> Option<Arc<HistogramVec>> {
        match self {
            MetricHandle::Histogram(h) => Some(Arc::clone(h)),
            _ => None,
        }
    }

    fn render(&self, out: &mut String) {
        match self {
            MetricHandle::Counter(c) => c.render(out),
            MetricHandle::Gauge(g) => g.render(out),
            MetricHandle::Histogram(h) => h.render(out),
        }
    }
}

/// Options describing a collector to look up or create.
#[derive(Debug, Clone)]
pub struct MetricOpts {
    name: String,
    help: String,
    kind: MetricKind,
    labels: Vec<String>,
    buckets: Vec<f64>,
}

impl MetricOpts {
    pub fn counter(name: &str, help: &str, labels: &[&str]) -> Self {
        Self::with_shape(name, help, MetricKind::Counter, labels, Vec::new())
    }

    pub fn histogram(name: &str, help: &str, labels: &[&str], buckets: &[f64]) -> Self {
        Self::with_shape(name, help, MetricKind::Histogram, labels, buckets.to_vec())
    }

    pub fn gauge(name: &str, help: &str) -> Self {
        Self::with_shape(name, help, MetricKind::Gauge, &[], Vec::new())
    }

    fn with_shape(
        name: &str,
        help: &str,
        kind: MetricKind,
        labels: &[&str],
        buckets: Vec<f64>,
    ) -> Self {
        Self {
            name: name.to_string(),
            help: help.to_string(),
            kind,
            labels: labels.iter().map(|l| l.to_string()).collect(),
            buckets,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> MetricKind {
        self.kind
    }

    fn validate(&self) -> Result<()> {
        if !valid_metric_name(&self.name) {
            return Err(PromgateError::InvalidMetric(format!(
                "bad metric name: {:?}",
                self.name
            )));
        }
        for (i, l) in self.labels.iter().enumerate() {
            if !valid_label_name(l) {
                return Err(PromgateError::InvalidMetric(format!(
                    "{}: bad label name: {:?}",
                    self.name, l
                )));
            }
            if self.labels[..i].contains(l) {
                return Err(PromgateError::InvalidMetric(format!(
                    "{}: duplicate label name: {}",
                    self.name, l
                )));
            }
        }
        if self.kind == MetricKind::Histogram {
            if self.labels.iter().any(|l| l == "le") {
                return Err(PromgateError::InvalidMetric(format!(
                    "{}: histogram cannot use label \"le\"",
                    self.name
                )));
            }
            if let Some(problem) = bucket_problem(&self.buckets) {
                return Err(PromgateError::InvalidMetric(format!(
                    "{}: {problem}",
                    self.name
                )));
            }
        }
        Ok(())
    }

    fn build(self) -> MetricHandle {
        match self.kind {
            MetricKind::Counter => MetricHandle::Counter(Arc::new(CounterVec::new(
                self.name,
                self.help,
                self.labels,
            ))),
            MetricKind::Gauge => MetricHandle::Gauge(Arc::new(Gauge::new(self.name, self.help))),
            MetricKind::Histogram => MetricHandle::Histogram(Arc::new(HistogramVec::new(
                self.name,
                self.help,
                self.labels,
                self.buckets,
            ))),
        }
    }
}

/// Bucket bounds must be non-empty, finite and strictly ascending.
pub fn validate_buckets(buckets: &[f64]) -> Result<()> {
    match bucket_problem(buckets) {
        Some(problem) => Err(PromgateError::InvalidMetric(problem.to_string())),
        None => Ok(()),
    }
}

fn bucket_problem(buckets: &[f64]) -> Option<&'static str> {
    if buckets.is_empty() {
        return Some("buckets must not be empty");
    }
    if buckets.iter().any(|b| !b.is_finite()) {
        return Some("buckets must be finite (+Inf is implicit)");
    }
    if buckets.windows(2).any(|w| w[0] >= w[1]) {
        return Some("buckets must be strictly ascending");
    }
    None
}

fn valid_metric_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
}

fn valid_label_name(name: &str) -> bool {
    if name.starts_with("__") {
        return false;
    }
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Process-local metric registry. Construct one at startup and share it via `Arc`.
#[derive(Debug, Default)]
pub struct Registry {
    collectors: DashMap<String, MetricHandle>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the collector registered under `opts.name`, or validate `opts`
    /// and register a new one.
    ///
    /// Lookup and insert happen under one shard lock, so concurrent callers
    /// racing on a name all receive the same object. `InvalidMetric` is only
    /// returned when a new collector would be created.
    pub fn get_or_create(&self, opts: MetricOpts) -> Result<MetricHandle> {
        match self.collectors.entry(opts.name.clone()) {
            Entry::Occupied(e) => {
                let existing = e.get().clone();
                if existing.kind() != opts.kind
                    || existing.label_names() != opts.labels.as_slice()
                {
                    tracing::warn!(
                        metric = %opts.name,
                        registered_kind = %existing.kind(),
                        requested_kind = %opts.kind,
                        registered_labels = ?existing.label_names(),
                        requested_labels = ?opts.labels,
                        "metric already registered with a different shape; keeping the existing one"
                    );
                }
                Ok(existing)
            }
            Entry::Vacant(v) => {
                opts.validate()?;
                tracing::debug!(metric = %opts.name, kind = %opts.kind, "registering metric");
                let handle = opts.build();
                v.insert(handle.clone());
                Ok(handle)
            }
        }
    }

    /// Get or create a counter family.
    pub fn counter(&self, name: &str, help: &str, labels: &[&str]) -> Result<Arc<CounterVec>> {
        let h = self.get_or_create(MetricOpts::counter(name, help, labels))?;
        h.as_counter().ok_or_else(|| kind_mismatch(name, MetricKind::Counter, h.kind()))
    }

    /// Get or create a histogram family.
    pub fn histogram(
        &self,
        name: &str,
        help: &str,
        labels: &[&str],
        buckets: &[f64],
    ) -> Result<Arc<HistogramVec>> {
        let h = self.get_or_create(MetricOpts::histogram(name, help, labels, buckets))?;
        h.as_histogram().ok_or_else(|| kind_mismatch(name, MetricKind::Histogram, h.kind()))
    }

    /// Get or create an unlabeled gauge.
    pub fn gauge(&self, name: &str, help: &str) -> Result<Arc<Gauge>> {
        let h = self.get_or_create(MetricOpts::gauge(name, help))?;
        h.as_gauge().ok_or_else(|| kind_mismatch(name, MetricKind::Gauge, h.kind()))
    }

    pub fn get(&self, name: &str) -> Option<MetricHandle> {
        self.collectors.get(name).map(|e| e.value().clone())
    }

    pub fn len(&self) -> usize {
        self.collectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collectors.is_empty()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.collectors.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// Render every collector in Prometheus text exposition format, sorted by name.
    pub fn render(&self) -> String {
        let mut handles: Vec<MetricHandle> =
            self.collectors.iter().map(|e| e.value().clone()).collect();
        handles.sort_by(|a, b| a.name().cmp(b.name()));

        let mut out = String::new();
        for h in &handles {
            h.render(&mut out);
        }
        out
    }
}

fn kind_mismatch(name: &str, expected: MetricKind, found: MetricKind) -> PromgateError {
    PromgateError::KindMismatch {
        name: name.to_string(),
        expected: expected.as_str(),
        found: found.as_str(),
    }
}
