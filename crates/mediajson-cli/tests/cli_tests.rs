//! Integration tests for the `mediajson` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the check,
//! normalize and inspect subcommands through the actual binary.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

fn grain_json_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/grain.json")
}

fn bad_timestamp_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/bad_timestamp.json")
}

// ─────────────────────────────────────────────────────────────────────────────
// check
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn check_valid_file() {
    Command::cargo_bin("mediajson")
        .unwrap()
        .args(["check", "-i", grain_json_path()])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ok (7 media values)"));
}

#[test]
fn check_stdin_plain_json() {
    Command::cargo_bin("mediajson")
        .unwrap()
        .arg("check")
        .write_stdin(r#"{"foo":"bar","n":25}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("ok (0 media values)"));
}

#[test]
fn check_rejects_out_of_range_timestamp() {
    Command::cargo_bin("mediajson")
        .unwrap()
        .args(["check", "-i", bad_timestamp_path()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse media JSON"))
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn check_rejects_malformed_json() {
    Command::cargo_bin("mediajson")
        .unwrap()
        .arg("check")
        .write_stdin("{not json")
        .assert()
        .failure();
}

#[test]
fn check_missing_file() {
    Command::cargo_bin("mediajson")
        .unwrap()
        .args(["check", "-i", "/nonexistent/grain.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn check_respects_max_depth() {
    Command::cargo_bin("mediajson")
        .unwrap()
        .args(["check", "--max-depth", "2"])
        .write_stdin("[[[1]]]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("maximum depth of 2"));
}

#[test]
fn check_rejects_max_depth_beyond_parser_limit() {
    Command::cargo_bin("mediajson")
        .unwrap()
        .args(["check", "--max-depth", "500"])
        .write_stdin("[]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be at most 127"));
}

// ─────────────────────────────────────────────────────────────────────────────
// normalize
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn normalize_canonicalises_values() {
    let output = Command::cargo_bin("mediajson")
        .unwrap()
        .args(["normalize", "-i", grain_json_path()])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["id"], "b8b4a34f-3293-11e8-89c0-acde48001122");
    assert_eq!(value["rate"]["numerator"], 30000);
    assert_eq!(value["rate"]["denominator"], 1001);
    assert_eq!(value["valid"][1], "()");
    assert_eq!(value["tags"]["take"], 3);
}

#[test]
fn normalize_pretty_to_file() {
    let dir = std::env::temp_dir().join(format!("mediajson-cli-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let out = dir.join("normalized.json");

    Command::cargo_bin("mediajson")
        .unwrap()
        .args(["normalize", "--pretty", "-i", grain_json_path(), "-o"])
        .arg(&out)
        .assert()
        .success();

    let text = std::fs::read_to_string(&out).unwrap();
    assert!(text.contains("\n  \"origin\": \"417798915:0\""));
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn normalize_is_stable() {
    let first = Command::cargo_bin("mediajson")
        .unwrap()
        .args(["normalize", "-i", grain_json_path()])
        .output()
        .unwrap();
    let second = Command::cargo_bin("mediajson")
        .unwrap()
        .arg("normalize")
        .write_stdin(first.stdout.clone())
        .output()
        .unwrap();
    assert_eq!(first.stdout, second.stdout);
}

// ─────────────────────────────────────────────────────────────────────────────
// inspect
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn inspect_lists_pointers_and_kinds() {
    Command::cargo_bin("mediajson")
        .unwrap()
        .args(["inspect", "-i", grain_json_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "/id\tuuid\t\"b8b4a34f-3293-11e8-89c0-acde48001122\"",
        ))
        .stdout(predicate::str::contains(
            "/rate\trational\t{\"numerator\":30000,\"denominator\":1001}",
        ))
        .stdout(predicate::str::contains("/origin\ttimestamp\t\"417798915:0\""))
        .stdout(predicate::str::contains("/duration\ttimeoffset\t\"+0:40000000\""))
        .stdout(predicate::str::contains("/valid/1\ttimerange\t\"()\""))
        .stdout(predicate::str::contains("/valid/2\ttimerange\t\"_\""))
        .stdout(predicate::str::contains("source").not());
}

#[test]
fn inspect_escapes_pointer_tokens() {
    Command::cargo_bin("mediajson")
        .unwrap()
        .arg("inspect")
        .write_stdin(r#"{"a/b": {"c~d": "1:0"}}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("/a~1b/c~0d\ttimestamp"));
}
