//! End-to-end transform over a CSV fixture.

use std::fs;
use std::path::PathBuf;

use serde_json::{json, Value};
use tempfile::tempdir;

use netlog_indexer::models::NetworkLogDocument;
use netlog_indexer::transform;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/cybersecurity_attacks_sample.csv")
}

#[test]
fn test_fixture_to_bulk_ndjson() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("network_logs_bulk.jsonl");

    let summary = transform::run(&fixture(), &output, "network-logs").unwrap();
    assert_eq!(summary.rows, 7);
    assert_eq!(summary.lines, 14);

    let content = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 14);

    for (i, line) in lines.iter().enumerate() {
        let value: Value = serde_json::from_str(line).unwrap();
        if i % 2 == 0 {
            assert_eq!(value, json!({ "index": { "_index": "network-logs" } }));
        } else {
            assert!(value.get("timestamp").is_none());
            assert_eq!(value.as_object().unwrap().len(), 7);
        }
    }

    let first: NetworkLogDocument = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(first.duration, 503);
    assert_eq!(first.protocol_type, "icmp");
    assert_eq!(first.service, "http");
    assert_eq!(first.label, "malware");
    assert_eq!(first.indicator, "ioc detected");
    assert_eq!(first.action, "logged");
    assert_eq!(first.severity, "low");

    // Empty Malware Indicators cell falls back to ""
    let fourth: NetworkLogDocument = serde_json::from_str(lines[7]).unwrap();
    assert_eq!(fourth.indicator, "");
    assert_eq!(fourth.severity, "medium");

    let last: NetworkLogDocument = serde_json::from_str(lines[13]).unwrap();
    assert_eq!(last.protocol_type, "tcp");
    assert_eq!(last.severity, "high");
}

#[test]
fn test_rerun_produces_identical_output() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("bulk.jsonl");

    transform::run(&fixture(), &output, "network-logs").unwrap();
    let first = fs::read(&output).unwrap();
    transform::run(&fixture(), &output, "network-logs").unwrap();
    let second = fs::read(&output).unwrap();

    assert_eq!(first, second);
}
