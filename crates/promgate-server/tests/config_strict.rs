#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use promgate_server::config::{self, DEFAULT_DURATION_BUCKETS};

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
server:
  listen: "0.0.0.0:8080"
metrics:
  enabeld: false # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.server.listen, "0.0.0.0:80");
    assert!(cfg.metrics.enabled);
    assert_eq!(cfg.metrics.duration_buckets, DEFAULT_DURATION_BUCKETS.to_vec());
    assert_eq!(cfg.app.greeting, "Hello DevOps!");
}

#[test]
fn full_config() {
    let ok = r#"
version: 1
server:
  listen: "127.0.0.1:9000"
app:
  title: "demo"
  version: "2.1.0"
  greeting: "hi"
metrics:
  enabled: false
  duration_buckets: [0.1, 1, 10]
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.server.listen_addr().unwrap().port(), 9000);
    assert_eq!(cfg.app.title, "demo");
    assert!(!cfg.metrics.enabled);
    assert_eq!(cfg.metrics.duration_buckets, vec![0.1, 1.0, 10.0]);
}

#[test]
fn unsupported_version() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn bad_listen_addr() {
    let bad = r#"
version: 1
server:
  listen: "localhost"
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn buckets_must_ascend() {
    let bad = r#"
version: 1
metrics:
  duration_buckets: [1.0, 0.5]
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
    assert_eq!(
        err.to_string(),
        "bad request: metrics.duration_buckets: buckets must be strictly ascending"
    );

    let empty = "version: 1\nmetrics:\n  duration_buckets: []\n";
    assert!(config::load_from_str(empty).is_err());
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let cfg = config::load_or_default("does/not/exist/promgate.yaml").expect("defaults");
    assert_eq!(cfg.server.listen, "0.0.0.0:80");

    let err = config::load_from_file("does/not/exist/promgate.yaml").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "INTERNAL");
}
