// Regression tests for the pvdb2json binary.
// Requires: assert_cmd, predicates and tempfile in [dev-dependencies]

mod common;

use std::fs;

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};

use common::fixture;

fn pvdb2json(dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pvdb2json").unwrap();
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn cli_converts_and_confirms() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("pv_db.txt");
    fs::copy(fixture("pv_db.txt"), &input).unwrap();

    pvdb2json(&dir)
        .arg("--input")
        .arg(&input)
        .assert()
        .success()
        .stdout(
            "Parsing pv_001...\nParsing pv_002...\nParsing pv_010...\nParsed to 'pv_db.json'.\n",
        )
        .stderr("");

    let written = fs::read_to_string(dir.path().join("pv_db.json")).unwrap();
    assert_eq!(written, fs::read_to_string(fixture("pv_db.json")).unwrap());
}

#[test]
fn cli_applies_type_to_every_record() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("mdata_pv_db.txt");
    fs::write(&input, "pv_001.bpm=1\npv_002.bpm=2\n").unwrap();

    pvdb2json(&dir)
        .args(["-i", "mdata_pv_db.txt", "--type", "3"])
        .assert()
        .success()
        .stdout(contains("Parsed to 'mdata_pv_db.json'."));

    let written = fs::read_to_string(dir.path().join("mdata_pv_db.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    let categories: Vec<i64> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|record| record["category"].as_i64().unwrap())
        .collect();
    assert_eq!(categories, vec![3, 3]);
}

#[test]
fn cli_output_is_byte_identical_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    fs::copy(fixture("pv_db.txt"), dir.path().join("pv_db.txt")).unwrap();

    pvdb2json(&dir).args(["--input", "pv_db.txt"]).assert().success();
    let first = fs::read(dir.path().join("pv_db.json")).unwrap();
    pvdb2json(&dir).args(["--input", "pv_db.txt"]).assert().success();
    let second = fs::read(dir.path().join("pv_db.json")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn cli_lenient_input_is_silent() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("lenient.txt"),
        "pv_001.bpm=abc\npv_001.mystery=1\npv_001.performer.0.type=VOCAL\n",
    )
    .unwrap();

    pvdb2json(&dir)
        .args(["--input", "lenient.txt"])
        .assert()
        .success()
        .stdout("Parsing pv_001...\nParsed to 'lenient.json'.\n")
        .stderr("");
}

#[test]
fn cli_reports_miette_diagnostics_on_malformed_identifier() {
    let dir = tempfile::tempdir().unwrap();
    fs::copy(fixture("malformed_pv_db.txt"), dir.path().join("broken.txt")).unwrap();

    pvdb2json(&dir)
        .args(["--input", "broken.txt"])
        .assert()
        .failure()
        .code(1)
        .stderr(
            contains("pvdb2json::parse::malformed_identifier")
                .and(contains("pv_0x2"))
                .and(contains("help:")),
        );

    assert!(!dir.path().join("broken.json").exists());
}

#[test]
fn cli_rejects_missing_input_file() {
    let dir = tempfile::tempdir().unwrap();

    pvdb2json(&dir)
        .args(["--input", "nowhere.txt"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("File does not exist."));
}

#[test]
fn cli_requires_input() {
    let dir = tempfile::tempdir().unwrap();

    pvdb2json(&dir)
        .assert()
        .failure()
        .code(2)
        .stderr(contains("--input"));
}
