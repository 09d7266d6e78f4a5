use std::fmt::Write;

use super::atomic::AtomicF64;
use super::encode::{fmt_float, write_header};

/// Single unlabeled value that can go up and down.
#[derive(Debug)]
pub struct Gauge {
    name: String,
    help: String,
    value: AtomicF64,
}

impl Gauge {
    pub(crate) fn new(name: String, help: String) -> Self {
        Self {
            name,
            help,
            value: AtomicF64::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn inc(&self) {
        self.add(1.0);
    }

    pub fn dec(&self) {
        self.add(-1.0);
    }

    pub fn add(&self, delta: f64) {
        self.value.add(delta);
    }

    pub fn set(&self, v: f64) {
        self.value.store(v);
    }

    pub fn get(&self) -> f64 {
        self.value.load()
    }

    pub(crate) fn render(&self, out: &mut String) {
        write_header(out, &self.name, &self.help, "gauge");
        let _ = writeln!(out, "{} {}", self.name, fmt_float(self.get()));
    }
}
