//! Verification oracle for fixture output
//!
//! The oracle knows what a fixture must print (its [`Trace`]) and judges
//! output captured from a run of the TypeScript source or of the Rust a
//! transpiler produced for it.
//!
//! # Example
//!
//! ```rust
//! use transpiler_cases::fixture::Fixture;
//! use transpiler_cases::oracle::TraceOracle;
//!
//! let oracle = TraceOracle::new();
//! let fixture = Fixture::statements_step_two();
//! let diff = oracle.check_output(&fixture, "not equal to b or c\n").unwrap();
//! assert!(!diff.matches);
//! ```
//!
//! [`Trace`]: crate::trace::Trace

mod diff;
mod executor;

pub use diff::{diff_lines, diff_results, format_diff, DiffOptions, DiffResult, Difference, DifferenceKind};
pub use executor::{executor_for, Executor, RustExecutor, TypeScriptExecutor, TS_STD_SHIM};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::fixture::Fixture;
use crate::render::renderer_for;
use crate::trace::expected_trace;
use crate::{Error, Language, Result};

/// Result of executing code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
    /// Exit code
    pub exit_code: i32,
    /// Execution time in milliseconds
    pub duration_ms: u64,
}

impl ExecutionResult {
    /// A clean run that printed `stdout`
    #[must_use]
    pub fn from_stdout(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            exit_code: 0,
            duration_ms: 0,
        }
    }
}

/// Verdict from verification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Output equals the expected trace
    Pass,
    /// Output differs from the expected trace
    OutputMismatch {
        /// Expected output
        expected: String,
        /// Actual output
        actual: String,
    },
    /// Timeout during execution
    Timeout {
        /// Which phase timed out
        phase: Phase,
        /// Timeout limit in milliseconds
        limit_ms: u64,
    },
    /// The run failed before producing comparable output
    RuntimeError {
        /// Phase where error occurred
        phase: Phase,
        /// Error message
        error: String,
    },
}

impl Verdict {
    /// Whether the verdict is [`Verdict::Pass`]
    #[must_use]
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

/// Phase of execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Running the TypeScript fixture
    Source,
    /// Running the transpiled Rust
    Target,
}

impl Phase {
    /// Phase in which code of `language` runs
    #[must_use]
    pub fn of(language: Language) -> Self {
        match language {
            Language::TypeScript => Self::Source,
            Language::Rust => Self::Target,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source => write!(f, "source"),
            Self::Target => write!(f, "target"),
        }
    }
}

/// Verification result with full metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Fixture name
    pub fixture: String,
    /// Language that was executed
    pub language: Language,
    /// Verification verdict
    pub verdict: Verdict,
    /// Captured run (absent on timeout)
    pub execution: Option<ExecutionResult>,
}

/// Verification oracle trait
pub trait Oracle: Send + Sync {
    /// Output a conforming run of `fixture` produces
    ///
    /// # Errors
    ///
    /// Returns an error if the fixture is invalid
    fn expected(&self, fixture: &Fixture) -> Result<ExecutionResult>;

    /// Compare an expected run with an actual one
    fn compare(&self, expected: &ExecutionResult, actual: &ExecutionResult) -> Verdict;

    /// Get the timeout for execution in milliseconds
    fn timeout_ms(&self) -> u64 {
        30_000
    }
}

/// Oracle comparing runs against the expected trace
pub struct TraceOracle {
    timeout_ms: u64,
    diff_options: DiffOptions,
    source_executor: Box<dyn Executor>,
    target_executor: Box<dyn Executor>,
}

impl std::fmt::Debug for TraceOracle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TraceOracle")
            .field("timeout_ms", &self.timeout_ms)
            .field("diff_options", &self.diff_options)
            .field(
                "source_executor",
                &format!("<{}>", self.source_executor.language()),
            )
            .field(
                "target_executor",
                &format!("<{}>", self.target_executor.language()),
            )
            .finish()
    }
}

impl Default for TraceOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl TraceOracle {
    /// Create an oracle with default executors and a 30 second timeout
    #[must_use]
    pub fn new() -> Self {
        Self {
            timeout_ms: 30_000,
            diff_options: DiffOptions::default(),
            source_executor: executor_for(Language::TypeScript),
            target_executor: executor_for(Language::Rust),
        }
    }

    /// Set the execution timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set diff options for comparison
    #[must_use]
    pub fn with_diff_options(mut self, options: DiffOptions) -> Self {
        self.diff_options = options;
        self
    }

    /// Replace the executor for the executor's language
    #[must_use]
    pub fn with_executor(mut self, executor: Box<dyn Executor>) -> Self {
        match executor.language() {
            Language::TypeScript => self.source_executor = executor,
            Language::Rust => self.target_executor = executor,
        }
        self
    }

    /// Get diff options
    #[must_use]
    pub fn diff_options(&self) -> &DiffOptions {
        &self.diff_options
    }

    /// Executor used for `language`
    #[must_use]
    pub fn executor(&self, language: Language) -> &dyn Executor {
        match language {
            Language::TypeScript => self.source_executor.as_ref(),
            Language::Rust => self.target_executor.as_ref(),
        }
    }

    /// Diff captured stdout against the fixture's expected trace
    ///
    /// # Errors
    ///
    /// Returns an error if the fixture is invalid
    pub fn check_output(&self, fixture: &Fixture, actual_stdout: &str) -> Result<DiffResult> {
        let expected = self.expected(fixture)?;
        let actual = ExecutionResult::from_stdout(actual_stdout);
        let options = DiffOptions {
            ignore_exit_code: true,
            ignore_stderr: true,
            ..self.diff_options.clone()
        };
        Ok(diff_results(&expected, &actual, &options))
    }

    /// Render `fixture` in `language`, run it and judge the output
    ///
    /// Timeouts and failed runs become verdicts, not errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the fixture is invalid or the toolchain cannot
    /// be spawned.
    pub fn verify(&self, fixture: &Fixture, language: Language) -> Result<VerificationResult> {
        let expected = self.expected(fixture)?;
        let code = renderer_for(language).render(fixture)?;
        let phase = Phase::of(language);

        let (verdict, execution) = match self.executor(language).execute(&code, self.timeout_ms) {
            Ok(actual) if actual.exit_code != 0 => (
                Verdict::RuntimeError {
                    phase,
                    error: format!(
                        "exit code {}: {}",
                        actual.exit_code,
                        actual.stderr.lines().next().unwrap_or_default()
                    ),
                },
                Some(actual),
            ),
            Ok(actual) => (self.compare(&expected, &actual), Some(actual)),
            Err(Error::Timeout(limit_ms)) => (Verdict::Timeout { phase, limit_ms }, None),
            Err(e) => return Err(e),
        };

        if verdict.is_pass() {
            info!(fixture = %fixture.name, %language, "fixture verified");
        } else {
            warn!(fixture = %fixture.name, %language, ?verdict, "fixture failed verification");
        }

        Ok(VerificationResult {
            fixture: fixture.name.clone(),
            language,
            verdict,
            execution,
        })
    }

    /// Run the fixture twice and require byte-identical stdout
    ///
    /// # Errors
    ///
    /// Returns an error if either run cannot be performed.
    pub fn check_idempotent(&self, fixture: &Fixture, language: Language) -> Result<bool> {
        let code = renderer_for(language).render(fixture)?;
        let executor = self.executor(language);
        let first = executor.execute(&code, self.timeout_ms)?;
        let second = executor.execute(&code, self.timeout_ms)?;
        Ok(first.exit_code == second.exit_code && first.stdout == second.stdout)
    }
}

impl Oracle for TraceOracle {
    fn expected(&self, fixture: &Fixture) -> Result<ExecutionResult> {
        Ok(ExecutionResult::from_stdout(
            expected_trace(fixture)?.to_stdout(),
        ))
    }

    fn compare(&self, expected: &ExecutionResult, actual: &ExecutionResult) -> Verdict {
        if diff_results(expected, actual, &self.diff_options).matches {
            Verdict::Pass
        } else {
            Verdict::OutputMismatch {
                expected: expected.stdout.clone(),
                actual: actual.stdout.clone(),
            }
        }
    }

    fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }
}
