//! Rendered fixtures against the golden files in `tests/golden`

use transpiler_cases::fixture::Fixture;
use transpiler_cases::render::{renderer_for, Renderer, RustRenderer, TypeScriptRenderer};
use transpiler_cases::Language;

const GOLDEN_TS: &str = include_str!("../golden/statements.ts");
const GOLDEN_RS: &str = include_str!("../golden/statements.rs");

/// Compare ignoring a missing final newline in the golden file
fn same_text(rendered: &str, golden: &str) -> bool {
    rendered.trim_end_matches('\n') == golden.trim_end_matches('\n')
}

#[test]
fn test_typescript_matches_golden() {
    let rendered = TypeScriptRenderer::new()
        .render(&Fixture::statements_step_two())
        .unwrap();
    assert!(same_text(&rendered, GOLDEN_TS), "rendered:\n{rendered}");
}

#[test]
fn test_rust_matches_golden() {
    let rendered = RustRenderer::new()
        .render(&Fixture::statements_step_two())
        .unwrap();
    assert!(same_text(&rendered, GOLDEN_RS), "rendered:\n{rendered}");
}

#[test]
fn test_line_counts_match_golden() {
    let fixture = Fixture::statements_step_two();
    for (language, golden) in [(Language::TypeScript, GOLDEN_TS), (Language::Rust, GOLDEN_RS)] {
        let rendered = renderer_for(language).render(&fixture).unwrap();
        assert_eq!(rendered.lines().count(), golden.lines().count(), "{language}");
    }
}

#[test]
fn test_step_one_variant_differs_only_in_for_loop() {
    let fixture = Fixture::statements_step_one();
    for (language, golden) in [(Language::TypeScript, GOLDEN_TS), (Language::Rust, GOLDEN_RS)] {
        let rendered = renderer_for(language).render(&fixture).unwrap();
        let changed: Vec<_> = rendered
            .lines()
            .zip(golden.lines())
            .filter(|(r, g)| r != g)
            .collect();
        assert_eq!(changed.len(), 1, "{language}: {changed:?}");
        assert!(changed[0].0.trim_start().starts_with("for"));
    }
}
