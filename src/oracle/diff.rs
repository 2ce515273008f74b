//! Line diffing of fixture output
//!
//! Fixture output is a sequence of short lines, so comparison is positional:
//! line N of the expected trace against line N of what was printed.

use std::fmt::Write;

use super::ExecutionResult;

/// Options for output comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffOptions {
    /// Ignore trailing whitespace on lines (including `\r`)
    pub ignore_trailing_whitespace: bool,
    /// Collapse runs of whitespace and trim lines
    pub normalize_whitespace: bool,
    /// Ignore stderr differences
    pub ignore_stderr: bool,
    /// Ignore exit code differences
    pub ignore_exit_code: bool,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            ignore_trailing_whitespace: true,
            normalize_whitespace: false,
            ignore_stderr: true,
            ignore_exit_code: false,
        }
    }
}

impl DiffOptions {
    /// Byte-exact comparison of stdout, stderr and exit code
    #[must_use]
    pub fn strict() -> Self {
        Self {
            ignore_trailing_whitespace: false,
            normalize_whitespace: false,
            ignore_stderr: false,
            ignore_exit_code: false,
        }
    }

    /// Stdout-only comparison that tolerates whitespace changes
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            ignore_trailing_whitespace: true,
            normalize_whitespace: true,
            ignore_stderr: true,
            ignore_exit_code: true,
        }
    }
}

/// Result of a diff operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffResult {
    /// Whether the outputs match
    pub matches: bool,
    /// Differences found, in line order
    pub differences: Vec<Difference>,
}

/// A single difference between expected and actual output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Difference {
    /// Line number (1-indexed, 0 for the exit code)
    pub line: usize,
    /// Expected content
    pub expected: String,
    /// Actual content
    pub actual: String,
    /// Type of difference
    pub kind: DifferenceKind,
}

/// Type of difference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DifferenceKind {
    /// Line content differs
    ContentMismatch,
    /// Line missing in actual
    MissingLine,
    /// Extra line in actual
    ExtraLine,
    /// Exit code differs
    ExitCodeMismatch,
    /// Stderr differs
    StderrMismatch,
}

/// Compare two execution results
#[must_use]
pub fn diff_results(
    expected: &ExecutionResult,
    actual: &ExecutionResult,
    options: &DiffOptions,
) -> DiffResult {
    let mut differences = Vec::new();

    if !options.ignore_exit_code && expected.exit_code != actual.exit_code {
        differences.push(Difference {
            line: 0,
            expected: expected.exit_code.to_string(),
            actual: actual.exit_code.to_string(),
            kind: DifferenceKind::ExitCodeMismatch,
        });
    }

    differences.extend(diff_lines(&expected.stdout, &actual.stdout, options));

    if !options.ignore_stderr {
        differences.extend(
            diff_lines(&expected.stderr, &actual.stderr, options)
                .into_iter()
                .map(|d| Difference {
                    kind: DifferenceKind::StderrMismatch,
                    ..d
                }),
        );
    }

    DiffResult {
        matches: differences.is_empty(),
        differences,
    }
}

/// Compare two texts line by line
///
/// Without `ignore_trailing_whitespace` the texts are split on `\n` only,
/// so a `\r` stays part of its line and a missing final newline shows up
/// as a missing or extra empty last line.
#[must_use]
pub fn diff_lines(expected: &str, actual: &str, options: &DiffOptions) -> Vec<Difference> {
    let expected_lines = split_lines(expected, options);
    let actual_lines = split_lines(actual, options);
    let max_lines = expected_lines.len().max(actual_lines.len());

    (0..max_lines)
        .filter_map(|i| {
            let line = i + 1;
            match (expected_lines.get(i), actual_lines.get(i)) {
                (Some(exp), Some(act)) if !lines_equal(exp, act, options) => Some(Difference {
                    line,
                    expected: (*exp).to_string(),
                    actual: (*act).to_string(),
                    kind: DifferenceKind::ContentMismatch,
                }),
                (Some(exp), None) => Some(Difference {
                    line,
                    expected: (*exp).to_string(),
                    actual: String::new(),
                    kind: DifferenceKind::MissingLine,
                }),
                (None, Some(act)) => Some(Difference {
                    line,
                    expected: String::new(),
                    actual: (*act).to_string(),
                    kind: DifferenceKind::ExtraLine,
                }),
                _ => None,
            }
        })
        .collect()
}

fn split_lines<'a>(text: &'a str, options: &DiffOptions) -> Vec<&'a str> {
    if options.ignore_trailing_whitespace || options.normalize_whitespace {
        text.lines().collect()
    } else {
        text.split('\n').collect()
    }
}

fn lines_equal(expected: &str, actual: &str, options: &DiffOptions) -> bool {
    if options.normalize_whitespace {
        return normalize_whitespace(expected) == normalize_whitespace(actual);
    }
    if options.ignore_trailing_whitespace {
        return expected.trim_end() == actual.trim_end();
    }
    expected == actual
}

fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Format a diff result for display
#[must_use]
pub fn format_diff(result: &DiffResult) -> String {
    if result.matches {
        return "Outputs match".to_string();
    }

    let mut output = String::new();
    let _ = writeln!(output, "Found {} difference(s):", result.differences.len());

    for diff in &result.differences {
        let _ = match diff.kind {
            DifferenceKind::ContentMismatch => writeln!(
                output,
                "Line {}: expected '{}', got '{}'",
                diff.line, diff.expected, diff.actual
            ),
            DifferenceKind::MissingLine => {
                writeln!(output, "Line {}: missing '{}'", diff.line, diff.expected)
            }
            DifferenceKind::ExtraLine => {
                writeln!(output, "Line {}: unexpected '{}'", diff.line, diff.actual)
            }
            DifferenceKind::ExitCodeMismatch => writeln!(
                output,
                "Exit code: expected {}, got {}",
                diff.expected, diff.actual
            ),
            DifferenceKind::StderrMismatch => writeln!(
                output,
                "Stderr line {}: expected '{}', got '{}'",
                diff.line, diff.expected, diff.actual
            ),
        };
    }

    output
}
