//! Expected Rust output of the transpiler
//!
//! Mirrors the transpiler's lowering rules:
//! - `const` becomes `let`, `let` becomes `let mut`
//! - `===` becomes `==`
//! - the if/else-if chain is an expression statement, closed with `};`
//! - `do { body } while (cond)` becomes `loop { body; if !(cond) { break; } }`
//! - a literal count-down `for` becomes a reversed inclusive range, with
//!   `.step_by(n)` unless the step is 1 (bounds are non-negative literals,
//!   which [`Fixture::validate`] guarantees)

use std::fmt::Write;

use tracing::debug;

use super::Renderer;
use crate::fixture::Fixture;
use crate::{Error, Language, Result};

/// Renders the Rust a conforming transpiler emits for a fixture
#[derive(Debug, Default, Clone, Copy)]
pub struct RustRenderer;

impl RustRenderer {
    /// Create a new Rust renderer
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Range expression for a count-down `for` loop from `start` to `lower`
    #[must_use]
    pub fn range_expr(start: i64, lower: i64, step: u32) -> String {
        let range = format!("({lower}..={start}).rev()");
        if step == 1 {
            range
        } else {
            format!("{range}.step_by({step})")
        }
    }

    fn write(fixture: &Fixture, out: &mut String) -> std::fmt::Result {
        let b = &fixture.bindings;
        let cd = &fixture.count_down;

        writeln!(out, "use ts_std::*;")?;
        writeln!(out, "#[allow(clippy::all)]")?;
        writeln!(out, "fn main() {{")?;
        writeln!(out, "    let a = {};", b.a)?;
        writeln!(out, "    let b = {};", b.b)?;
        writeln!(out, "    let c = {};", b.c)?;
        writeln!(out, "    if a == b {{")?;
        writeln!(out, "        console.log(\"equal to b\");")?;
        writeln!(out, "    }} else if a == c {{")?;
        writeln!(out, "        console.log(\"equal to c\");")?;
        writeln!(out, "    }} else {{")?;
        writeln!(out, "        console.log(\"not equal to b or c\");")?;
        writeln!(out, "    }};")?;
        writeln!(out, "    console.log(\"while\");")?;
        writeln!(out, "    let mut d = {};", cd.start)?;
        writeln!(out, "    while d >= {} {{", cd.lower)?;
        writeln!(out, "        console.log(d);")?;
        writeln!(out, "        d -= 1;")?;
        writeln!(out, "    }}")?;
        writeln!(out, "    console.log(\"do while\");")?;
        writeln!(out, "    d = {};", cd.start)?;
        writeln!(out, "    loop {{")?;
        writeln!(out, "        console.log(d);")?;
        writeln!(out, "        d -= 1;")?;
        writeln!(out, "        if !(d >= {}) {{", cd.lower)?;
        writeln!(out, "            break;")?;
        writeln!(out, "        }}")?;
        writeln!(out, "    }}")?;
        writeln!(out, "    console.log(\"for\");")?;
        writeln!(
            out,
            "    for i in {} {{",
            Self::range_expr(cd.start, cd.lower, fixture.for_step)
        )?;
        writeln!(out, "        console.log(i);")?;
        writeln!(out, "    }}")?;
        writeln!(out, "}}")
    }
}

impl Renderer for RustRenderer {
    fn language(&self) -> Language {
        Language::Rust
    }

    fn extension(&self) -> &'static str {
        "rs"
    }

    fn render(&self, fixture: &Fixture) -> Result<String> {
        fixture.validate()?;
        let mut out = String::new();
        Self::write(fixture, &mut out).map_err(|e| Error::Render(e.to_string()))?;
        debug!(fixture = %fixture.name, lines = out.lines().count(), "rendered rust");
        Ok(out)
    }
}
