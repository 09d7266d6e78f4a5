//! Registry accessor tests: idempotent get-or-create and shape handling.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::thread;

use promgate_core::metrics::validate_buckets;
use promgate_core::{MetricKind, MetricOpts, Registry};

const BUCKETS: [f64; 3] = [0.1, 0.5, 1.0];

#[test]
fn same_name_returns_same_object() {
    let reg = Registry::new();
    let a = reg
        .get_or_create(MetricOpts::counter("jobs_total", "Jobs", &["queue"]))
        .unwrap();
    let b = reg
        .get_or_create(MetricOpts::counter("jobs_total", "Jobs", &["queue"]))
        .unwrap();
    assert!(a.same_as(&b));
    assert_eq!(reg.len(), 1);

    let g1 = reg.gauge("workers", "Workers").unwrap();
    let g2 = reg.gauge("workers", "Workers").unwrap();
    assert!(Arc::ptr_eq(&g1, &g2));
}

#[test]
fn state_is_shared_between_lookups() {
    let reg = Registry::new();
    let first = reg.counter("hits_total", "Hits", &["route"]).unwrap();
    first.inc(&["/a"]).unwrap();

    let second = reg.counter("hits_total", "Hits", &["route"]).unwrap();
    second.inc(&["/a"]).unwrap();
    assert_eq!(first.get(&["/a"]), Some(2));
}

#[test]
fn mismatched_kind_returns_existing_collector() {
    let reg = Registry::new();
    let counter = reg
        .get_or_create(MetricOpts::counter("thing", "Thing", &["a"]))
        .unwrap();
    let again = reg.get_or_create(MetricOpts::gauge("thing", "Other")).unwrap();
    assert_eq!(again.kind(), MetricKind::Counter);
    assert!(again.same_as(&counter));
}

#[test]
fn mismatched_labels_return_existing_collector() {
    let reg = Registry::new();
    let a = reg.counter("req_total", "Req", &["method"]).unwrap();
    let b = reg.counter("req_total", "Req", &["method", "path"]).unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(b.label_names(), ["method".to_string()]);
}

#[test]
fn typed_accessor_reports_kind_mismatch() {
    let reg = Registry::new();
    reg.gauge("busy", "Busy").unwrap();
    let err = reg.counter("busy", "Busy", &[]).expect_err("gauge is not a counter");
    assert_eq!(err.client_code().as_str(), "KIND_MISMATCH");
}

#[test]
fn invalid_options_are_rejected_only_on_create() {
    let reg = Registry::new();
    let err = reg
        .get_or_create(MetricOpts::counter("bad-name", "x", &[]))
        .expect_err("dash is not allowed");
    assert_eq!(err.client_code().as_str(), "INVALID_METRIC");

    let err = reg
        .get_or_create(MetricOpts::histogram("lat", "x", &["le"], &BUCKETS))
        .expect_err("le is reserved");
    assert_eq!(err.client_code().as_str(), "INVALID_METRIC");

    let err = reg
        .get_or_create(MetricOpts::histogram("lat", "x", &["path"], &[1.0, 0.5]))
        .expect_err("descending buckets");
    assert_eq!(err.client_code().as_str(), "INVALID_METRIC");

    let err = reg
        .get_or_create(MetricOpts::counter("dup", "x", &["a", "a"]))
        .expect_err("duplicate label");
    assert_eq!(err.client_code().as_str(), "INVALID_METRIC");
    assert!(reg.is_empty());

    reg.histogram("lat", "x", &["path"], &BUCKETS).unwrap();
    // Existing name: bad buckets are never looked at.
    reg.get_or_create(MetricOpts::histogram("lat", "x", &["path"], &[]))
        .unwrap();
}

#[test]
fn concurrent_creation_yields_one_object() {
    let reg = Arc::new(Registry::new());
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let reg = Arc::clone(&reg);
            thread::spawn(move || {
                let c = reg.counter("races_total", "Races", &[]).unwrap();
                c.inc(&[]).unwrap();
                c
            })
        })
        .collect();
    let counters: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for c in &counters[1..] {
        assert!(Arc::ptr_eq(&counters[0], c));
    }
    assert_eq!(counters[0].get(&[]), Some(8));
    assert_eq!(reg.len(), 1);
}

#[test]
fn label_arity_is_checked() {
    let reg = Registry::new();
    let c = reg.counter("req_total", "Req", &["method", "path"]).unwrap();
    let err = c.inc(&["GET"]).expect_err("one value for two labels");
    assert_eq!(err.client_code().as_str(), "LABEL_MISMATCH");
    assert_eq!(c.get(&["GET"]), None);
}

#[test]
fn histogram_buckets_are_cumulative() {
    let reg = Registry::new();
    let h = reg.histogram("lat_seconds", "Latency", &["path"], &BUCKETS).unwrap();
    h.observe_secs(&["/"], 0.05).unwrap();
    h.observe_secs(&["/"], 0.3).unwrap();
    h.observe_secs(&["/"], 2.0).unwrap();

    assert_eq!(h.count(&["/"]), Some(3));
    assert_eq!(h.bucket_counts(&["/"]), Some(vec![1, 2, 2]));
    let sum = h.sum(&["/"]).unwrap();
    assert!((sum - 2.35).abs() < 1e-9);
}

#[test]
fn gauge_moves_both_ways() {
    let reg = Registry::new();
    let g = reg.gauge("queue_depth", "Depth").unwrap();
    g.inc();
    g.inc();
    g.dec();
    assert_eq!(g.get(), 1.0);
    g.set(7.5);
    g.add(-0.5);
    assert_eq!(g.get(), 7.0);
}

#[test]
fn names_are_sorted() {
    let reg = Registry::new();
    reg.gauge("b", "b").unwrap();
    reg.gauge("a", "a").unwrap();
    assert_eq!(reg.names(), vec!["a".to_string(), "b".to_string()]);
    assert!(reg.get("a").is_some());
    assert!(reg.get("c").is_none());
}

#[test]
fn bucket_validation_reports_invalid_metric() {
    validate_buckets(&BUCKETS).unwrap();

    let cases: [&[f64]; 3] = [&[], &[0.5, 0.5], &[1.0, f64::INFINITY]];
    for bad in cases {
        let err = validate_buckets(bad).expect_err("must fail");
        assert_eq!(err.client_code().as_str(), "INVALID_METRIC");
    }

    let err = validate_buckets(&[2.0, 1.0]).expect_err("descending");
    assert_eq!(err.to_string(), "invalid metric: buckets must be strictly ascending");
}
