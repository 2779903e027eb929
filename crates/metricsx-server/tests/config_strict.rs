#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::time::Duration;

use metricsx_server::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
server:
  listen: "0.0.0.0:8080"
metrics:
  reservoir_sise: 100 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_REQUEST");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.server.listen, "0.0.0.0:8080");
    assert!(cfg.metrics.process_gauges);
    assert!(cfg.metrics.resource_timing);
    assert_eq!(cfg.metrics.reservoir_size, 1028);
    assert_eq!(cfg.metrics.report_interval(), None);
}

#[test]
fn full_config() {
    let ok = r#"
version: 1
server:
  listen: "127.0.0.1:9100"
metrics:
  process_gauges: false
  resource_timing: false
  reservoir_size: 64
  report_interval_ms: 15000
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.server.listen_addr().unwrap().port(), 9100);
    assert!(!cfg.metrics.process_gauges);
    assert_eq!(cfg.metrics.reservoir_size, 64);
    assert_eq!(cfg.metrics.report_interval(), Some(Duration::from_secs(15)));
}

#[test]
fn unsupported_version() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn listen_must_be_a_socket_addr() {
    let err = config::load_from_str("version: 1\nserver:\n  listen: \"localhost\"\n").expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_REQUEST");
}

#[test]
fn ranges_are_validated() {
    for bad in [
        "version: 1\nmetrics:\n  reservoir_size: 0\n",
        "version: 1\nmetrics:\n  report_interval_ms: 10\n",
    ] {
        let err = config::load_from_str(bad).expect_err("must fail");
        assert_eq!(err.code().as_str(), "BAD_REQUEST", "{bad}");
    }
}
