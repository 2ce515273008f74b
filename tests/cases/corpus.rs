//! Corpus generation and output checking end to end

use transpiler_cases::data::{load_manifest, FixtureWriter};
use transpiler_cases::fixture::{Fixture, FixtureConfig};
use transpiler_cases::grammar::grammar_for;
use transpiler_cases::oracle::{Oracle, TraceOracle};
use transpiler_cases::Language;

#[test]
fn test_generated_expected_files_pass_the_oracle() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = FixtureWriter::new()
        .write(dir.path(), &Fixture::builtin())
        .unwrap();

    let oracle = TraceOracle::new();
    for record in &manifest.records {
        let stdout = std::fs::read_to_string(dir.path().join(&record.expected_file)).unwrap();
        assert_eq!(stdout.lines().count(), record.expected_lines);
        assert!(oracle.check_output(&record.fixture, &stdout).unwrap().matches);
    }
}

#[test]
fn test_generated_sources_validate() {
    let dir = tempfile::tempdir().unwrap();
    FixtureWriter::new()
        .write(dir.path(), &Fixture::builtin())
        .unwrap();

    let manifest = load_manifest(dir.path()).unwrap();
    for record in &manifest.records {
        for file in &record.files {
            let code = std::fs::read_to_string(dir.path().join(&file.file)).unwrap();
            assert!(grammar_for(file.language).validate(&code), "{}", file.file);
            assert_eq!(code.lines().count(), file.lines);
        }
    }
}

#[test]
fn test_config_driven_corpus() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("cases.json");
    std::fs::write(
        &config_path,
        r#"{
            "fixtures": [
                {"name": "hits_b", "for_step": 4, "bindings": {"a": 2, "b": 2, "c": 3}},
                {"name": "short", "for_step": 1, "count_down": {"start": 2, "lower": 0}}
            ]
        }"#,
    )
    .unwrap();

    let config = FixtureConfig::load(&config_path).unwrap();
    let out = dir.path().join("out");
    let manifest = FixtureWriter::new()
        .with_languages(&[Language::TypeScript])
        .write(&out, &config.fixtures)
        .unwrap();
    assert_eq!(manifest.records.len(), 2);

    let hits_b = std::fs::read_to_string(out.join("hits_b.expected")).unwrap();
    assert!(hits_b.starts_with("equal to b\nwhile\n"));
    assert!(hits_b.ends_with("for\n10\n6\n2\n"));

    let short = std::fs::read_to_string(out.join("short.expected")).unwrap();
    assert_eq!(
        short,
        "not equal to b or c\nwhile\n2\n1\n0\ndo while\n2\n1\n0\nfor\n2\n1\n0\n"
    );
}

#[test]
fn test_wrong_output_is_reported() {
    let oracle = TraceOracle::new();
    let fixture = Fixture::statements_step_two();
    let mut stdout = oracle.expected(&fixture).unwrap().stdout;
    stdout = stdout.replacen("not equal to b or c", "equal to c", 1);

    let diff = oracle.check_output(&fixture, &stdout).unwrap();
    assert!(!diff.matches);
    assert_eq!(diff.differences.len(), 1);
    assert_eq!(diff.differences[0].line, 1);
}

#[test]
fn test_rust_fixtures_run_when_rustc_available() {
    let oracle = TraceOracle::new();
    if !oracle.executor(Language::Rust).is_available() {
        eprintln!("rustc not available, skipping test");
        return;
    }

    for fixture in Fixture::builtin() {
        let result = oracle.verify(&fixture, Language::Rust).unwrap();
        assert!(result.verdict.is_pass(), "{}: {:?}", fixture.name, result.verdict);
    }
    assert!(oracle
        .check_idempotent(&Fixture::statements_step_one(), Language::Rust)
        .unwrap());
}
