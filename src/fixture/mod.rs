//! Statement fixtures
//!
//! A fixture is a flat script: three constant bindings, a chained
//! conditional over them, then a `while`, a `do-while` and a stepped `for`
//! loop that all count down and print their counter.
//!
//! Two fixtures ship with the crate. They only differ in the step of the
//! final `for` loop (2 and 1).

mod config;

pub use config::FixtureConfig;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// The three immutable bindings `a`, `b` and `c`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bindings {
    /// Value compared against the other two
    pub a: i64,
    /// First comparison operand
    pub b: i64,
    /// Second comparison operand
    pub c: i64,
}

impl Default for Bindings {
    fn default() -> Self {
        Self { a: 1, b: 2, c: 3 }
    }
}

impl Bindings {
    /// Select the conditional branch: first true comparison in source
    /// order, `else` as fallback.
    #[must_use]
    pub fn branch(&self) -> Branch {
        if self.a == self.b {
            Branch::EqualToB
        } else if self.a == self.c {
            Branch::EqualToC
        } else {
            Branch::NotEqual
        }
    }
}

/// Branch of the chained conditional
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Branch {
    /// `a === b`
    EqualToB,
    /// `a === c`
    EqualToC,
    /// Neither comparison held
    NotEqual,
}

impl Branch {
    /// Every branch in source order
    pub const ALL: [Self; 3] = [Self::EqualToB, Self::EqualToC, Self::NotEqual];

    /// Text the branch prints
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::EqualToB => "equal to b",
            Self::EqualToC => "equal to c",
            Self::NotEqual => "not equal to b or c",
        }
    }
}

impl std::fmt::Display for Branch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Bounds shared by the three count-down loops
///
/// The `while` and `do-while` loops decrement by one; the `for` loop uses
/// [`Fixture::for_step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CountDown {
    /// Initial counter value
    pub start: i64,
    /// Smallest value still printed (guard is `counter >= lower`)
    pub lower: i64,
}

impl Default for CountDown {
    fn default() -> Self {
        Self {
            start: 10,
            lower: 0,
        }
    }
}

/// A complete statement fixture
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fixture {
    /// File stem used when the fixture is written to disk
    pub name: String,
    /// Constant bindings
    #[serde(default)]
    pub bindings: Bindings,
    /// Loop bounds
    #[serde(default)]
    pub count_down: CountDown,
    /// Decrement of the `for` loop
    pub for_step: u32,
}

impl Fixture {
    /// Create a fixture with the default bindings and bounds
    #[must_use]
    pub fn new(name: impl Into<String>, for_step: u32) -> Self {
        Self {
            name: name.into(),
            bindings: Bindings::default(),
            count_down: CountDown::default(),
            for_step,
        }
    }

    /// The fixture whose `for` loop steps by 2
    #[must_use]
    pub fn statements_step_two() -> Self {
        Self::new("statements", 2)
    }

    /// The fixture whose `for` loop steps by 1
    #[must_use]
    pub fn statements_step_one() -> Self {
        Self::new("statements_step_one", 1)
    }

    /// Both shipped fixtures
    #[must_use]
    pub fn builtin() -> Vec<Self> {
        vec![Self::statements_step_two(), Self::statements_step_one()]
    }

    /// Override the bindings
    #[must_use]
    pub fn with_bindings(mut self, bindings: Bindings) -> Self {
        self.bindings = bindings;
        self
    }

    /// Override the loop bounds
    #[must_use]
    pub fn with_count_down(mut self, count_down: CountDown) -> Self {
        self.count_down = count_down;
        self
    }

    /// Check that every loop of the fixture terminates and that the
    /// fixture can be written to disk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for an empty or path-like name, a
    /// zero `for` step, a binding outside `i32`, loop bounds outside
    /// `0..=i32::MAX`, or a start value below the lower bound.
    ///
    /// Rendered literals are untyped, so the transpiled program holds them
    /// in `i32`. The transpiler only lowers a `for` loop to a range when
    /// both bounds are plain literals, which rules out negative bounds.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty()
            || !self
                .name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(Error::Configuration(format!(
                "fixture name `{}` must be non-empty and contain only [A-Za-z0-9_-]",
                self.name
            )));
        }
        if self.for_step == 0 {
            return Err(Error::Configuration(format!(
                "fixture `{}`: for step must be at least 1",
                self.name
            )));
        }
        let Bindings { a, b, c } = self.bindings;
        for (binding, value) in [("a", a), ("b", b), ("c", c)] {
            if i32::try_from(value).is_err() {
                return Err(Error::Configuration(format!(
                    "fixture `{}`: binding {binding} = {value} does not fit in i32",
                    self.name
                )));
            }
        }
        let CountDown { start, lower } = self.count_down;
        if lower < 0 || i32::try_from(start).is_err() {
            return Err(Error::Configuration(format!(
                "fixture `{}`: bounds {lower}..={start} must lie within 0..={}",
                self.name,
                i32::MAX
            )));
        }
        if start < lower {
            return Err(Error::Configuration(format!(
                "fixture `{}`: start {start} is below lower bound {lower}",
                self.name
            )));
        }
        Ok(())
    }
}
