#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::HashMap;
use std::time::Duration;

use pizzametrics_collector::config;

const MINIMAL: &str = r#"
version: 1
metrics:
  url: "https://influx.example/api/v1/push/influx/write"
  user_id: "12345"
  api_key: "secret"
  source: "pizza-service-dev"
"#;

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str(MINIMAL).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.server.listen, "0.0.0.0:3000");
    assert_eq!(cfg.metrics.source, "pizza-service-dev");
    assert_eq!(cfg.metrics.report_interval(), Duration::from_secs(10));
    assert_eq!(cfg.metrics.request_timeout(), Duration::from_secs(5));
    assert_eq!(cfg.metrics.bearer(), "Bearer 12345:secret");
}

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
metrics:
  url: "https://influx.example/write"
  user_id: "1"
  api_key: "k"
  source: "s"
  report_intervall_ms: 500 # typo should fail
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "CONFIG");
}

#[test]
fn rejects_unsupported_version() {
    let bad = MINIMAL.replace("version: 1", "version: 2");
    let err = config::load_from_str(&bad).expect_err("must fail");
    assert!(err.to_string().contains("version"), "{err}");
}

#[test]
fn rejects_source_that_breaks_line_format() {
    let bad = MINIMAL.replace("pizza-service-dev", "pizza service");
    let err = config::load_from_str(&bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "CONFIG");
}

#[test]
fn rejects_non_http_url_and_bad_ranges() {
    let bad_url = MINIMAL.replace("https://", "ftp://");
    assert!(config::load_from_str(&bad_url).is_err());

    let fast = format!("{MINIMAL}  report_interval_ms: 5\n");
    assert!(config::load_from_str(&fast).is_err());

    let bad_listen = format!("{MINIMAL}server:\n  listen: \"nowhere\"\n");
    assert!(config::load_from_str(&bad_listen).is_err());

    for (timeout, ok) in [(99, false), (100, true), (60_000, true), (60_001, false)] {
        let doc = format!("{MINIMAL}  request_timeout_ms: {timeout}\n");
        assert_eq!(config::load_from_str(&doc).is_ok(), ok, "request_timeout_ms={timeout}");
    }
}

#[test]
fn env_overrides_apply_before_validation() {
    let env: HashMap<&str, &str> = [
        ("PIZZAMETRICS_URL", "http://127.0.0.1:8086/write"),
        ("PIZZAMETRICS_USER_ID", "67890"),
        ("PIZZAMETRICS_API_KEY", "from-env"),
        ("PIZZAMETRICS_SOURCE", "pizza-service-prod"),
        ("PIZZAMETRICS_REPORT_INTERVAL_MS", "2500"),
    ]
    .into_iter()
    .collect();

    let cfg = config::load_with_overrides(MINIMAL, |k| env.get(k).map(|v| v.to_string()))
        .expect("must parse");
    assert_eq!(cfg.metrics.url, "http://127.0.0.1:8086/write");
    assert_eq!(cfg.metrics.user_id, "67890");
    assert_eq!(cfg.metrics.api_key, "from-env");
    assert_eq!(cfg.metrics.bearer(), "Bearer 67890:from-env");
    assert_eq!(cfg.metrics.source, "pizza-service-prod");
    assert_eq!(cfg.metrics.report_interval_ms, 2500);

    let err = config::load_with_overrides(MINIMAL, |k| {
        (k == "PIZZAMETRICS_REPORT_INTERVAL_MS").then(|| "soon".to_string())
    })
    .expect_err("must fail");
    assert_eq!(err.code().as_str(), "CONFIG");

    // Overrides are validated like file values.
    let err = config::load_with_overrides(MINIMAL, |k| {
        (k == "PIZZAMETRICS_URL").then(|| "influx.example/write".to_string())
    })
    .expect_err("must fail");
    assert_eq!(err.code().as_str(), "CONFIG");
}

#[test]
fn api_key_is_redacted_in_debug() {
    let cfg = config::load_from_str(MINIMAL).unwrap();
    let dbg = format!("{:?}", cfg.metrics);
    assert!(!dbg.contains("secret"), "{dbg}");
    assert!(dbg.contains("<redacted>"));
}
