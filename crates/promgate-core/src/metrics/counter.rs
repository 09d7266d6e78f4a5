use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::Result;

use super::encode::{braced, label_pairs, write_header};
use super::series_key;

/// Monotonic counter partitioned by a fixed, ordered set of label names.
#[derive(Debug)]
pub struct CounterVec {
    name: String,
    help: String,
    labels: Vec<String>,
    map: DashMap<Vec<String>, AtomicU64>,
}

impl CounterVec {
    pub(crate) fn new(name: String, help: String, labels: Vec<String>) -> Self {
        Self {
            name,
            help,
            labels,
            map: DashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label_names(&self) -> &[String] {
        &self.labels
    }

    /// Increment by 1. `values` follow the declared label order.
    pub fn inc(&self, values: &[&str]) -> Result<()> {
        self.add(values, 1)
    }

    /// Increment by an arbitrary value. The series is created on first use.
    pub fn add(&self, values: &[&str], v: u64) -> Result<()> {
        let key = series_key(&self.name, &self.labels, values)?;
        let counter = self.map.entry(key).or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
        Ok(())
    }

    /// Current value of one series, `None` if it was never incremented.
    pub fn get(&self, values: &[&str]) -> Option<u64> {
        let key = series_key(&self.name, &self.labels, values).ok()?;
        self.map.get(&key).map(|c| c.load(Ordering::Relaxed))
    }

    pub(crate) fn render(&self, out: &mut String) {
        write_header(out, &self.name, &self.help, "counter");
        let mut rows: Vec<(Vec<String>, u64)> = self
            .map
            .iter()
            .map(|r| (r.key().clone(), r.value().load(Ordering::Relaxed)))
            .collect();
        rows.sort();
        for (key, val) in rows {
            let labels = braced(&label_pairs(&self.labels, &key));
            let _ = writeln!(out, "{}{} {}", self.name, labels, val);
        }
    }
}
