use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::error::Result;

use super::atomic::AtomicF64;
use super::encode::{braced, fmt_float, label_pairs, write_header};
use super::series_key;

struct AtomicHistogram {
    count: AtomicU64,
    sum: AtomicF64,
    buckets: Vec<AtomicU64>,
}

impl AtomicHistogram {
    fn new(n: usize) -> Self {
        Self {
            count: AtomicU64::new(0),
            sum: AtomicF64::default(),
            buckets: (0..n).map(|_| AtomicU64::new(0)).collect(),
        }
    }
}

/// Cumulative-bucket histogram partitioned by a fixed, ordered set of label names.
///
/// Bucket bounds are upper limits in the observed unit (seconds for durations),
/// strictly ascending. `+Inf` is implicit and always equals the count.
pub struct HistogramVec {
    name: String,
    help: String,
    labels: Vec<String>,
    bounds: Vec<f64>,
    map: DashMap<Vec<String>, AtomicHistogram>,
}

impl std::fmt::Debug for HistogramVec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistogramVec")
            .field("name", &self.name)
            .field("labels", &self.labels)
            .field("bounds", &self.bounds)
            .field("series", &self.map.len())
            .finish()
    }
}

impl HistogramVec {
    pub(crate) fn new(name: String, help: String, labels: Vec<String>, bounds: Vec<f64>) -> Self {
        Self {
            name,
            help,
            labels,
            bounds,
            map: DashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label_names(&self) -> &[String] {
        &self.labels
    }

    pub fn buckets(&self) -> &[f64] {
        &self.bounds
    }

    /// Observe a duration in seconds.
    pub fn observe(&self, values: &[&str], duration: Duration) -> Result<()> {
        self.observe_secs(values, duration.as_secs_f64())
    }

    /// Observe a raw value. Every bucket whose bound is `>= v` is incremented.
    pub fn observe_secs(&self, values: &[&str], v: f64) -> Result<()> {
        let key = series_key(&self.name, &self.labels, values)?;
        let n = self.bounds.len();
        let hist = self
            .map
            .entry(key)
            .or_insert_with(|| AtomicHistogram::new(n));

        hist.count.fetch_add(1, Ordering::Relaxed);
        hist.sum.add(v);
        for (i, &b) in self.bounds.iter().enumerate() {
            if v <= b {
                hist.buckets[i].fetch_add(1, Ordering::Relaxed);
            }
        }
        Ok(())
    }

    /// Number of observations for one series.
    pub fn count(&self, values: &[&str]) -> Option<u64> {
        let key = series_key(&self.name, &self.labels, values).ok()?;
        self.map.get(&key).map(|h| h.count.load(Ordering::Relaxed))
    }

    /// Sum of observations for one series.
    pub fn sum(&self, values: &[&str]) -> Option<f64> {
        let key = series_key(&self.name, &self.labels, values).ok()?;
        self.map.get(&key).map(|h| h.sum.load())
    }

    /// Cumulative bucket counts for one series, aligned with [`buckets`](Self::buckets).
    pub fn bucket_counts(&self, values: &[&str]) -> Option<Vec<u64>> {
        let key = series_key(&self.name, &self.labels, values).ok()?;
        self.map
            .get(&key)
            .map(|h| h.buckets.iter().map(|b| b.load(Ordering::Relaxed)).collect())
    }

    pub(crate) fn render(&self, out: &mut String) {
        write_header(out, &self.name, &self.help, "histogram");

        let mut keys: Vec<Vec<String>> = self.map.iter().map(|r| r.key().clone()).collect();
        keys.sort();

        for key in keys {
            let Some(hist) = self.map.get(&key) else {
                continue;
            };
            let label_str = label_pairs(&self.labels, &key);
            let prefix = if label_str.is_empty() {
                String::new()
            } else {
                format!("{},", label_str)
            };

            for (i, &le) in self.bounds.iter().enumerate() {
                let count = hist.buckets[i].load(Ordering::Relaxed);
                let _ = writeln!(
                    out,
                    "{}_bucket{{{}le=\"{}\"}} {}",
                    self.name,
                    prefix,
                    fmt_float(le),
                    count
                );
            }
            let count = hist.count.load(Ordering::Relaxed);
            let _ = writeln!(
                out,
                "{}_bucket{{{}le=\"+Inf\"}} {}",
                self.name, prefix, count
            );

            let sum = hist.sum.load();
            let labels = braced(&label_str);
            let _ = writeln!(out, "{}_sum{} {}", self.name, labels, fmt_float(sum));
            let _ = writeln!(out, "{}_count{} {}", self.name, labels, count);
        }
    }
}
