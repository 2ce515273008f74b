//! The `transpiler-cases` binary: exit codes and subcommand output

use std::path::Path;
use std::process::{Command, Output};

use transpiler_cases::fixture::Fixture;
use transpiler_cases::trace::expected_trace;

const BIN: &str = env!("CARGO_BIN_EXE_transpiler-cases");

fn run(args: &[&str]) -> Output {
    Command::new(BIN)
        .args(args)
        .env_remove("TRANSPILER_CASES_LOG")
        .output()
        .unwrap()
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn write_captured(dir: &Path, contents: &str) -> String {
    let path = dir.join("captured.txt");
    std::fs::write(&path, contents).unwrap();
    path.to_string_lossy().into_owned()
}

fn statements_stdout() -> String {
    expected_trace(&Fixture::statements_step_two())
        .unwrap()
        .to_stdout()
}

#[test]
fn test_trace_prints_expected_stdout() {
    let output = run(&["trace", "-f", "statements"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_of(&output), statements_stdout());
}

#[test]
fn test_render_rust_starts_with_prelude() {
    let output = run(&["render", "-f", "statements_step_one", "-l", "rs"]);
    assert_eq!(output.status.code(), Some(0));
    let code = stdout_of(&output);
    assert!(code.starts_with("use ts_std::*;\n"));
    assert!(code.contains("for i in (0..=10).rev() {"));
}

#[test]
fn test_check_matching_output_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let captured = write_captured(dir.path(), &statements_stdout());

    let output = run(&["check", "-f", "statements", &captured]);
    assert_eq!(output.status.code(), Some(0), "{}", stderr_of(&output));
    assert_eq!(stdout_of(&output), "Outputs match\n");
}

#[test]
fn test_check_mismatch_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let wrong = statements_stdout().replacen("not equal to b or c", "equal to b", 1);
    let captured = write_captured(dir.path(), &wrong);

    let output = run(&["check", "-f", "statements", &captured]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout_of(&output).contains("Line 1: expected 'not equal to b or c', got 'equal to b'"));
}

#[test]
fn test_check_strict_rejects_crlf() {
    let dir = tempfile::tempdir().unwrap();
    let captured = write_captured(dir.path(), &statements_stdout().replace('\n', "\r\n"));

    assert_eq!(run(&["check", &captured]).status.code(), Some(0));
    let strict = run(&["check", "-s", "strict", &captured]);
    assert_eq!(strict.status.code(), Some(1));
}

#[test]
fn test_unknown_fixture_exits_two() {
    let dir = tempfile::tempdir().unwrap();
    let captured = write_captured(dir.path(), &statements_stdout());

    let output = run(&["check", "-f", "nope", &captured]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = stderr_of(&output);
    assert!(stderr.contains("unknown fixture `nope`"), "{stderr}");
    assert!(stderr.contains("statements_step_one"));
    assert!(stdout_of(&output).is_empty());
}

#[test]
fn test_generate_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("cases.json");
    std::fs::write(
        &config,
        r#"{"fixtures": [{"name": "by_five", "for_step": 5}]}"#,
    )
    .unwrap();
    let out = dir.path().join("out");

    let output = run(&[
        "generate",
        "--config",
        &config.to_string_lossy(),
        "-o",
        &out.to_string_lossy(),
    ]);
    assert_eq!(output.status.code(), Some(0), "{}", stderr_of(&output));
    assert!(stdout_of(&output).contains("Generated 1 fixture(s)"));
    for ext in ["ts", "rs", "expected"] {
        assert!(out.join(format!("by_five.{ext}")).exists(), "{ext}");
    }
    let expected = std::fs::read_to_string(out.join("by_five.expected")).unwrap();
    assert!(expected.ends_with("for\n10\n5\n0\n"));
}

#[test]
fn test_out_of_range_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("cases.json");
    std::fs::write(
        &config,
        format!(
            r#"{{"fixtures": [{{"name": "min", "for_step": 1, "count_down": {{"start": {min}, "lower": {min}}}}}]}}"#,
            min = i64::MIN
        ),
    )
    .unwrap();

    let output = run(&["trace", "--config", &config.to_string_lossy(), "-f", "min"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_of(&output).starts_with("Error: "));
    assert!(!stderr_of(&output).contains("panicked"));
}

#[test]
fn test_verify_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("cases.json");
    std::fs::write(
        &config,
        r#"{"fixtures": [{"name": "short", "for_step": 2, "count_down": {"start": 4, "lower": 0}}]}"#,
    )
    .unwrap();

    let output = run(&[
        "verify",
        "--config",
        &config.to_string_lossy(),
        "-l",
        "rs",
        "-t",
        "120000",
        "-o",
        "json",
    ]);
    assert_eq!(output.status.code(), Some(0), "{}", stderr_of(&output));

    let results: serde_json::Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    let results = results.as_array().unwrap();
    // Empty when rustc is not installed
    for result in results {
        assert_eq!(result["fixture"], "short");
        assert_eq!(result["language"], "rust");
        assert_eq!(result["verdict"], "Pass");
    }
}

#[test]
fn test_log_filter_from_environment() {
    let output = Command::new(BIN)
        .args(["trace"])
        .env("TRANSPILER_CASES_LOG", "debug")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));
    assert!(stderr_of(&output).contains("fixtures loaded"));
    assert_eq!(stdout_of(&output), statements_stdout());

    let quiet = run(&["trace"]);
    assert!(!stderr_of(&quiet).contains("fixtures loaded"));
}
