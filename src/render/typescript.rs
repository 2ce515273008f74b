//! TypeScript fixture source

use std::fmt::Write;

use tracing::debug;

use super::Renderer;
use crate::fixture::Fixture;
use crate::{Error, Language, Result};

/// Renders the TypeScript form of a fixture
#[derive(Debug, Default, Clone, Copy)]
pub struct TypeScriptRenderer;

impl TypeScriptRenderer {
    /// Create a new TypeScript renderer
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Update clause of the `for` loop
    fn for_update(step: u32) -> String {
        if step == 1 {
            "i--".to_string()
        } else {
            format!("i -= {step}")
        }
    }

    fn write(fixture: &Fixture, out: &mut String) -> std::fmt::Result {
        let b = &fixture.bindings;
        let cd = &fixture.count_down;

        writeln!(out, "const a = {};", b.a)?;
        writeln!(out, "const b = {};", b.b)?;
        writeln!(out, "const c = {};", b.c)?;
        writeln!(out)?;
        writeln!(out, "if (a === b) {{")?;
        writeln!(out, "  console.log(\"equal to b\");")?;
        writeln!(out, "}} else if (a === c) {{")?;
        writeln!(out, "  console.log(\"equal to c\");")?;
        writeln!(out, "}} else {{")?;
        writeln!(out, "  console.log(\"not equal to b or c\");")?;
        writeln!(out, "}}")?;
        writeln!(out)?;
        writeln!(out, "console.log(\"while\");")?;
        writeln!(out, "let d = {};", cd.start)?;
        writeln!(out, "while (d >= {}) {{", cd.lower)?;
        writeln!(out, "  console.log(d);")?;
        writeln!(out, "  d--;")?;
        writeln!(out, "}}")?;
        writeln!(out)?;
        writeln!(out, "console.log(\"do while\");")?;
        writeln!(out, "d = {};", cd.start)?;
        writeln!(out, "do {{")?;
        writeln!(out, "  console.log(d);")?;
        writeln!(out, "  d--;")?;
        writeln!(out, "}} while (d >= {});", cd.lower)?;
        writeln!(out)?;
        writeln!(out, "console.log(\"for\");")?;
        writeln!(
            out,
            "for (let i = {}; i >= {}; {}) {{",
            cd.start,
            cd.lower,
            Self::for_update(fixture.for_step)
        )?;
        writeln!(out, "  console.log(i);")?;
        writeln!(out, "}}")
    }
}

impl Renderer for TypeScriptRenderer {
    fn language(&self) -> Language {
        Language::TypeScript
    }

    fn extension(&self) -> &'static str {
        "ts"
    }

    fn render(&self, fixture: &Fixture) -> Result<String> {
        fixture.validate()?;
        let mut out = String::new();
        Self::write(fixture, &mut out).map_err(|e| Error::Render(e.to_string()))?;
        debug!(fixture = %fixture.name, lines = out.lines().count(), "rendered typescript");
        Ok(out)
    }
}
