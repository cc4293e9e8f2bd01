use std::fs;

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("phoenix-beacon"))
}

fn repo_root() -> std::path::PathBuf {
    let manifest = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest
        .parent()
        .and_then(|p| p.parent())
        .expect("repo root")
        .to_path_buf()
}

fn stowed_fixture() -> std::path::PathBuf {
    repo_root()
        .join("tests")
        .join("fixtures")
        .join("phoenix_stowed.bin")
}

#[test]
fn help_and_version() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("decode"));
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(contains(env!("CARGO_PKG_VERSION")));
    cmd().arg("decode").arg("--help").assert().success();
}

#[test]
fn decode_prints_text_record() {
    cmd()
        .arg("decode")
        .arg(stowed_fixture())
        .assert()
        .success()
        .stdout(
            contains("PHOENIX operating mode")
                .and(contains("antenna stowed (registers cleared)"))
                .and(contains("ConOps magic num ID"))
                .and(contains("EPS I Battery Voltage"))
                .and(contains("SOL PAN X V"))
                .and(contains("Default Vals LUPs & fastcharge"))
                .and(contains("0x1234")),
        );
}

#[test]
fn decode_json_keeps_field_order() {
    let assert = cmd()
        .arg("decode")
        .arg(stowed_fixture())
        .arg("--format")
        .arg("json")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let value: Value = serde_json::from_str(&stdout).expect("valid json");

    let fields = value["telemetry"]["fields"].as_array().expect("fields");
    assert_eq!(fields.len(), 36);
    assert_eq!(fields[0]["name"], "mode");
    assert_eq!(fields[0]["value"]["text"], "PHOENIX operating mode");
    assert_eq!(fields[35]["name"], "default_outs");
    assert!(value.get("frame").is_none());
}

#[test]
fn show_frame_includes_hex_dump() {
    let assert = cmd()
        .arg("decode")
        .arg(stowed_fixture())
        .arg("--format")
        .arg("json")
        .arg("--show-frame")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let value: Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(value["frame"]["length"], 76);
    assert_eq!(value["frame"]["header"], 0x7e);

    cmd()
        .arg("decode")
        .arg(stowed_fixture())
        .arg("--show-frame")
        .assert()
        .success()
        .stdout(contains("Frame (76 bytes): 7e4bc9a1"));
}

#[test]
fn report_written_to_file() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("out").join("report.json");

    cmd()
        .arg("decode")
        .arg(stowed_fixture())
        .arg("--format")
        .arg("json")
        .arg("--pretty")
        .arg("-o")
        .arg(&report)
        .assert()
        .success()
        .stderr(contains("OK: report written"));

    let json = fs::read_to_string(&report).expect("read report");
    let value: Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["report_version"], 1);
}

#[test]
fn quiet_suppresses_ok_message() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.txt");

    cmd()
        .arg("decode")
        .arg(stowed_fixture())
        .arg("-o")
        .arg(report)
        .arg("--quiet")
        .assert()
        .success()
        .stderr(contains("OK:").not());
}

#[test]
fn report_must_differ_from_input() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("beacon.bin");
    fs::copy(stowed_fixture(), &input).expect("copy fixture");

    cmd()
        .arg("decode")
        .arg(&input)
        .arg("-o")
        .arg(&input)
        .assert()
        .failure()
        .stderr(contains("report path must differ from input"));
}

#[test]
fn missing_input_shows_error_and_hint() {
    let temp = TempDir::new().expect("tempdir");
    let missing = temp.path().join("missing.bin");

    cmd()
        .arg("decode")
        .arg(missing)
        .assert()
        .failure()
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn unsupported_extension_is_rejected() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("beacon.dat");
    fs::copy(stowed_fixture(), &input).expect("copy fixture");

    cmd()
        .arg("decode")
        .arg(input)
        .assert()
        .failure()
        .stderr(contains("unsupported input format").and(contains(".bin or .txt")));
}

#[test]
fn short_frame_fails() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("short.txt");
    fs::write(&input, [0x7e; 20]).expect("write");

    cmd()
        .arg("decode")
        .arg(input)
        .assert()
        .failure()
        .code(2)
        .stderr(contains("frame too short").and(contains("hint:")));
}

#[test]
fn pretty_requires_json() {
    cmd()
        .arg("decode")
        .arg(stowed_fixture())
        .arg("--pretty")
        .assert()
        .failure()
        .stderr(contains("only apply to JSON"));
}

#[test]
fn pretty_and_compact_conflict() {
    cmd()
        .arg("decode")
        .arg(stowed_fixture())
        .arg("--format")
        .arg("json")
        .arg("--pretty")
        .arg("--compact")
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn glob_resolving_to_one_file_is_accepted() {
    let temp = TempDir::new().expect("tempdir");
    fs::copy(stowed_fixture(), temp.path().join("pass_0001.bin")).expect("copy fixture");
    let pattern = temp.path().join("pass_*.bin");

    cmd()
        .arg("decode")
        .arg(pattern)
        .assert()
        .success()
        .stdout(contains("PHOENIX operating mode"));
}

#[test]
fn glob_matching_many_files_is_rejected() {
    let temp = TempDir::new().expect("tempdir");
    fs::copy(stowed_fixture(), temp.path().join("pass_0001.bin")).expect("copy fixture");
    fs::copy(stowed_fixture(), temp.path().join("pass_0002.bin")).expect("copy fixture");
    let pattern = temp.path().join("pass_*.bin");

    cmd()
        .arg("decode")
        .arg(pattern)
        .assert()
        .failure()
        .stderr(contains("multiple files match pattern"));
}

#[test]
fn fields_lists_schema() {
    cmd()
        .arg("fields")
        .assert()
        .success()
        .stdout(
            contains("Battery Internal Resistance")
                .and(contains("(66,67)"))
                .and(contains("(73,72,71,70)")),
        );

    let assert = cmd()
        .arg("fields")
        .arg("--format")
        .arg("json")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let rows: Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(rows.as_array().expect("rows").len(), 36);
    assert_eq!(rows[35]["offsets"], "66");
}
