//! Reference semantics of a fixture
//!
//! Computes the lines a conforming interpreter prints for a [`Fixture`].
//! Each loop phase is written with the loop form it models, so the
//! `while`/`do-while` agreement is observed rather than assumed.

use std::io::Write;

use crate::fixture::Fixture;
use crate::Result;

/// Line sink behind `console.log`
///
/// Collects every logged value as one line. With [`Console::echo`] the
/// lines are also written through to another writer, the way the
/// `ts_std::console` shim writes to stdout.
pub struct Console<'w> {
    lines: Vec<String>,
    echo: Option<&'w mut dyn Write>,
}

impl std::fmt::Debug for Console<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console")
            .field("lines", &self.lines.len())
            .field("echo", &self.echo.is_some())
            .finish()
    }
}

impl Default for Console<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'w> Console<'w> {
    /// Console that only records
    #[must_use]
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            echo: None,
        }
    }

    /// Console that records and writes each line to `writer`
    pub fn echo(writer: &'w mut dyn Write) -> Self {
        Self {
            lines: Vec::new(),
            echo: Some(writer),
        }
    }

    /// Log one value
    ///
    /// # Errors
    ///
    /// Returns an error if the echo writer fails.
    pub fn log(&mut self, value: impl std::fmt::Display) -> Result<()> {
        let line = value.to_string();
        if let Some(writer) = self.echo.as_mut() {
            writeln!(writer, "{line}")?;
        }
        self.lines.push(line);
        Ok(())
    }

    /// Finish logging and return the collected trace
    #[must_use]
    pub fn into_trace(self) -> Trace {
        Trace { lines: self.lines }
    }
}

/// Ordered lines printed by a fixture
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace {
    lines: Vec<String>,
}

impl Trace {
    /// The printed lines
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of printed lines
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether nothing was printed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Stdout of the fixture: each line newline-terminated
    #[must_use]
    pub fn to_stdout(&self) -> String {
        let mut out = String::with_capacity(self.lines.iter().map(|l| l.len() + 1).sum());
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    /// Lines printed between `label` and the next label line
    ///
    /// Phase labels are `"while"`, `"do while"` and `"for"`.
    #[must_use]
    pub fn section(&self, label: &str) -> &[String] {
        let Some(start) = self.lines.iter().position(|l| l == label) else {
            return &[];
        };
        let rest = &self.lines[start + 1..];
        let end = rest
            .iter()
            .position(|l| PHASE_LABELS.contains(&l.as_str()))
            .unwrap_or(rest.len());
        &rest[..end]
    }
}

/// Labels printed before each loop phase
pub const PHASE_LABELS: [&str; 3] = ["while", "do while", "for"];

/// Expected output of a validated fixture
///
/// # Errors
///
/// Returns an error if the fixture fails [`Fixture::validate`].
pub fn expected_trace(fixture: &Fixture) -> Result<Trace> {
    fixture.validate()?;
    expected_trace_unchecked(fixture)
}

/// Expected output without validating bounds
///
/// A start below the lower bound yields an empty `while` section and a
/// single `do while` line. A zero step is still rejected since the `for`
/// loop would not terminate.
///
/// # Errors
///
/// Returns an error for a zero `for` step.
pub fn expected_trace_unchecked(fixture: &Fixture) -> Result<Trace> {
    let mut console = Console::new();
    run(fixture, &mut console)?;
    let trace = console.into_trace();
    tracing::debug!(fixture = %fixture.name, lines = trace.len(), "computed expected trace");
    Ok(trace)
}

/// Play the fixture into `console`
///
/// # Errors
///
/// Returns an error if the console's writer fails, for a zero `for`
/// step, or when a counter would underflow `i64`.
pub fn run(fixture: &Fixture, console: &mut Console<'_>) -> Result<()> {
    let Fixture {
        bindings,
        count_down,
        for_step,
        ..
    } = fixture;
    let step = usize::try_from(*for_step)
        .ok()
        .filter(|s| *s > 0)
        .ok_or_else(|| crate::Error::Configuration("for step must be at least 1".to_string()))?;

    console.log(bindings.branch())?;

    console.log("while")?;
    let mut d = count_down.start;
    while d >= count_down.lower {
        console.log(d)?;
        d = decrement(d)?;
    }

    console.log("do while")?;
    d = count_down.start;
    loop {
        console.log(d)?;
        d = decrement(d)?;
        if d < count_down.lower {
            break;
        }
    }

    console.log("for")?;
    for i in (count_down.lower..=count_down.start).rev().step_by(step) {
        console.log(i)?;
    }

    Ok(())
}

fn decrement(d: i64) -> Result<i64> {
    d.checked_sub(1)
        .ok_or_else(|| crate::Error::Configuration(format!("counter {d} cannot be decremented")))
}
