//! Execution backends for rendered fixtures
//!
//! Each executor writes the rendered fixture to a temporary file, runs it
//! with an external toolchain and captures stdout, stderr and exit code.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Output, Stdio};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::{Error, Language, Result};

use super::{ExecutionResult, Phase};

/// `ts_std` stand-in linked into every Rust fixture
///
/// The expected Rust output starts with `use ts_std::*;` and calls
/// `console.log(..)` with both strings and integers.
pub const TS_STD_SHIM: &str = r#"#[allow(non_upper_case_globals, dead_code)]
mod ts_std {
    pub struct Console;

    impl Console {
        pub fn log(&self, value: impl std::fmt::Display) {
            println!("{}", value);
        }
    }

    pub const console: Console = Console;
}
"#;

/// Code executor trait for running rendered fixtures
pub trait Executor: Send + Sync {
    /// Execute code and capture its output
    ///
    /// # Errors
    ///
    /// Returns an error if the toolchain cannot be spawned or the run
    /// exceeds `timeout_ms`.
    fn execute(&self, code: &str, timeout_ms: u64) -> Result<ExecutionResult>;

    /// Get the language this executor handles
    fn language(&self) -> Language;

    /// Whether the external toolchain can be started
    fn is_available(&self) -> bool;
}

/// Unique scratch path for one execution
fn scratch_path(extension: &str) -> PathBuf {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let unique_id = COUNTER.fetch_add(1, Ordering::SeqCst);
    let stem = format!("transpiler_cases_{}_{}", std::process::id(), unique_id);
    let mut path = std::env::temp_dir().join(stem);
    if !extension.is_empty() {
        path.set_extension(extension);
    }
    path
}

fn probe(program: &str, args: &[String]) -> bool {
    Command::new(program)
        .args(args)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|status| status.success())
}

fn to_result(output: &Output, start: Instant) -> ExecutionResult {
    ExecutionResult {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        exit_code: output.status.code().unwrap_or(-1),
        duration_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
    }
}

fn remove_scratch(path: &Path) {
    if let Err(e) = std::fs::remove_file(path) {
        debug!(path = %path.display(), error = %e, "failed to remove scratch file");
    }
}

/// Runs the Rust form of a fixture by compiling it with `rustc`
#[derive(Debug, Clone)]
pub struct RustExecutor {
    compiler: String,
    edition: String,
}

impl Default for RustExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl RustExecutor {
    /// Create a new Rust executor using `rustc` from `PATH`
    #[must_use]
    pub fn new() -> Self {
        Self {
            compiler: "rustc".to_string(),
            edition: "2021".to_string(),
        }
    }

    /// Use a different compiler binary
    #[must_use]
    pub fn with_compiler(mut self, compiler: impl Into<String>) -> Self {
        self.compiler = compiler.into();
        self
    }

    /// Prepend the console shim to a rendered fixture
    #[must_use]
    pub fn with_shim(code: &str) -> String {
        format!("{TS_STD_SHIM}\n{code}")
    }
}

impl Executor for RustExecutor {
    fn execute(&self, code: &str, timeout_ms: u64) -> Result<ExecutionResult> {
        let start = Instant::now();
        let source_file = scratch_path("rs");
        let binary_file = scratch_path("");

        std::fs::write(&source_file, Self::with_shim(code))?;

        debug!(compiler = %self.compiler, source = %source_file.display(), "compiling fixture");
        let compile = Command::new(&self.compiler)
            .arg("--edition")
            .arg(&self.edition)
            .arg(&source_file)
            .arg("-o")
            .arg(&binary_file)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::Runtime {
                phase: Phase::Target,
                message: format!("failed to spawn {}: {e}", self.compiler),
            })
            .and_then(|child| wait_with_timeout(child, timeout_ms));
        remove_scratch(&source_file);
        let compile = compile?;

        if !compile.status.success() {
            warn!(exit_code = ?compile.status.code(), "fixture failed to compile");
            return Ok(to_result(&compile, start));
        }

        // Compilation and the run share one deadline.
        let elapsed = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        let remaining_ms = timeout_ms.saturating_sub(elapsed);

        let child = Command::new(&binary_file)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn();
        let result = child
            .map_err(|e| Error::Runtime {
                phase: Phase::Target,
                message: format!("failed to run compiled fixture: {e}"),
            })
            .and_then(|child| wait_with_timeout(child, remaining_ms));
        remove_scratch(&binary_file);

        Ok(to_result(&result?, start))
    }

    fn language(&self) -> Language {
        Language::Rust
    }

    fn is_available(&self) -> bool {
        probe(&self.compiler, &[])
    }
}

/// Runs the TypeScript form of a fixture with an external runner
///
/// Defaults to `npx --yes tsx <file>`.
#[derive(Debug, Clone)]
pub struct TypeScriptExecutor {
    program: String,
    args: Vec<String>,
}

impl Default for TypeScriptExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeScriptExecutor {
    /// Create a TypeScript executor using `npx tsx`
    #[must_use]
    pub fn new() -> Self {
        Self {
            program: "npx".to_string(),
            args: vec!["--yes".to_string(), "tsx".to_string()],
        }
    }

    /// Use a different runner, e.g. `deno run` or `bun`
    #[must_use]
    pub fn with_runner<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl Executor for TypeScriptExecutor {
    fn execute(&self, code: &str, timeout_ms: u64) -> Result<ExecutionResult> {
        let start = Instant::now();
        let source_file = scratch_path("ts");
        std::fs::write(&source_file, code)?;

        debug!(runner = %self.program, source = %source_file.display(), "running fixture");
        let child = Command::new(&self.program)
            .args(&self.args)
            .arg(&source_file)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn();
        let result = child
            .map_err(|e| Error::Runtime {
                phase: Phase::Source,
                message: format!("failed to spawn {}: {e}", self.program),
            })
            .and_then(|child| wait_with_timeout(child, timeout_ms));
        remove_scratch(&source_file);

        Ok(to_result(&result?, start))
    }

    fn language(&self) -> Language {
        Language::TypeScript
    }

    fn is_available(&self) -> bool {
        probe(&self.program, &self.args)
    }
}

/// Wait for a process, killing it once `timeout_ms` elapses
///
/// Output pipes are drained on their own threads so a chatty child cannot
/// block on a full pipe while we wait.
fn wait_with_timeout(mut child: Child, timeout_ms: u64) -> Result<Output> {
    let stdout_handle = child.stdout.take();
    let stderr_handle = child.stderr.take();

    let stdout_thread = thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut stdout) = stdout_handle {
            let _ = stdout.read_to_end(&mut buf);
        }
        buf
    });
    let stderr_thread = thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut stderr) = stderr_handle {
            let _ = stderr.read_to_end(&mut buf);
        }
        buf
    });

    let deadline = Instant::now() + Duration::from_millis(timeout_ms);
    let (tx, rx) = mpsc::channel();
    let poll_thread = thread::spawn(move || loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                let _ = tx.send(Ok(status));
                return;
            }
            Ok(None) if Instant::now() >= deadline => {
                let _ = child.kill();
                let _ = child.wait();
                let _ = tx.send(Err(Error::Timeout(timeout_ms)));
                return;
            }
            Ok(None) => thread::sleep(Duration::from_millis(5)),
            Err(e) => {
                let _ = tx.send(Err(Error::Io(e)));
                return;
            }
        }
    });

    let status = rx
        .recv()
        .map_err(|_| Error::Verification("process wait thread disconnected".to_string()));
    let _ = poll_thread.join();
    let stdout = stdout_thread.join().unwrap_or_default();
    let stderr = stderr_thread.join().unwrap_or_default();

    Ok(Output {
        status: status??,
        stdout,
        stderr,
    })
}

/// Get an executor for the specified language
#[must_use]
pub fn executor_for(language: Language) -> Box<dyn Executor> {
    match language {
        Language::TypeScript => Box::new(TypeScriptExecutor::new()),
        Language::Rust => Box::new(RustExecutor::new()),
    }
}
