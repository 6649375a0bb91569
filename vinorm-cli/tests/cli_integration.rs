//! Integration tests for the vinorm CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn vinorm() -> Command {
    Command::cargo_bin("vinorm").expect("binary builds")
}

#[test]
fn test_stdin_to_stdout() {
    vinorm()
        .arg("-q")
        .write_stdin("Ngày 25/12/2023.")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "ngày hai mươi lăm tháng mười hai năm hai nghìn không trăm hai mươi ba",
        ));
}

#[test]
fn test_sentences_joined_with_delimiter() {
    vinorm()
        .args(["-q", "--lower"])
        .write_stdin("Trời mưa. Tôi ở nhà.")
        .assert()
        .success()
        .stdout(predicate::str::contains("trời mưa#line#tôi ở nhà"));
}

#[test]
fn test_punc_flag_keeps_punctuation() {
    vinorm()
        .args(["-q", "--punc"])
        .write_stdin("Xin chào, thế giới.")
        .assert()
        .success()
        .stdout(predicate::str::contains("Xin chào, thế giới."));
}

#[test]
fn test_lower_flag() {
    vinorm()
        .args(["-q", "--lower"])
        .write_stdin("Xin Chào")
        .assert()
        .success()
        .stdout(predicate::str::contains("xin chào"));

    vinorm()
        .arg("-q")
        .write_stdin("Xin Chào")
        .assert()
        .success()
        .stdout(predicate::str::contains("Xin Chào"));
}

#[test]
fn test_terminator_flag() {
    vinorm()
        .args(["-q", "--terminator"])
        .write_stdin("xin chào")
        .assert()
        .success()
        .stdout(predicate::str::contains("xin chào."));
}

#[test]
fn test_rule_trace_on_stderr() {
    vinorm()
        .args(["-q", "--rule"])
        .write_stdin("25/12/2023")
        .assert()
        .success()
        .stderr(predicate::str::contains("rule date/"));
}

#[test]
fn test_rule_trace_json() {
    vinorm()
        .args(["-q", "--rule", "--trace-format", "json"])
        .write_stdin("25/12/2023")
        .assert()
        .success()
        .stderr(predicate::str::contains("\"category\": \"date\""));
}

#[test]
fn test_file_input_and_output() {
    let temp_dir = TempDir::new().unwrap();
    let input_file = temp_dir.path().join("input.txt");
    let output_file = temp_dir.path().join("output.txt");
    fs::write(&input_file, "Giá 1,000,000 VND.").unwrap();

    vinorm()
        .args(["-q", "-i"])
        .arg(&input_file)
        .arg("-o")
        .arg(&output_file)
        .assert()
        .success();

    let out = fs::read_to_string(&output_file).unwrap();
    assert!(out.contains("một triệu việt nam đồng"));
}

#[test]
fn test_missing_input_file_fails() {
    vinorm()
        .args(["-q", "-i", "/definitely/not/here.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input not found"));
}

#[test]
fn test_bad_data_dir_fails() {
    vinorm()
        .args(["-q", "-d", "/definitely/not/here"])
        .write_stdin("xin chào")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load normalization data"));
}

#[test]
fn test_empty_input_succeeds() {
    vinorm().arg("-q").write_stdin("").assert().success();
}

#[test]
fn test_custom_data_dir() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    // Minimal data set: copy the bundled dictionaries, but a rule set
    // with only the mandatory number category.
    fs::write(
        dir.join("abbreviations.dict"),
        include_str!("../../vinorm-core/data/abbreviations.dict"),
    )
    .unwrap();
    fs::write(
        dir.join("letters.dict"),
        include_str!("../../vinorm-core/data/letters.dict"),
    )
    .unwrap();
    fs::write(
        dir.join("symbols.dict"),
        include_str!("../../vinorm-core/data/symbols.dict"),
    )
    .unwrap();
    fs::write(
        dir.join("numbers.dict"),
        include_str!("../../vinorm-core/data/numbers.dict"),
    )
    .unwrap();
    fs::write(dir.join("number.rules"), "10\t(\\d+)\t{1:num}\n").unwrap();

    vinorm()
        .args(["-q", "-d"])
        .arg(dir)
        .write_stdin("25/12")
        .assert()
        .success()
        // No date rules loaded: the slash falls back to plain numbers.
        .stdout(predicate::str::contains("hai mươi lăm"));
}
