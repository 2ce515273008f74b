//! transpiler-cases - statement fixtures for TypeScript to Rust transpilation
//!
//! Regenerates the statement fixtures a TypeScript → Rust transpiler is
//! tested with, states what each fixture must print, and checks captured
//! output against that.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      TRANSPILER CASES                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Fixture   →   Render    →   Grammar   →   Oracle          │
//! │  Model         TS / Rust     Checks        Trace diffing    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use transpiler_cases::fixture::Fixture;
//! use transpiler_cases::render::{Renderer, TypeScriptRenderer};
//! use transpiler_cases::trace::expected_trace;
//!
//! let fixture = Fixture::statements_step_two();
//! let source = TypeScriptRenderer::new().render(&fixture).unwrap();
//! assert!(source.contains("i -= 2"));
//!
//! let trace = expected_trace(&fixture).unwrap();
//! assert_eq!(trace.section("for"), ["10", "8", "6", "4", "2", "0"]);
//! ```
//!
//! # Modules
//!
//! - [`fixture`] - Fixture model and configuration
//! - [`trace`] - Expected output of a fixture
//! - [`render`] - TypeScript source and expected Rust output
//! - [`grammar`] - Validation of rendered text
//! - [`oracle`] - Execution and output verification
//! - [`data`] - Corpus directories and manifests

pub mod data;
pub mod error;
pub mod fixture;
pub mod grammar;
pub mod oracle;
pub mod render;
pub mod trace;

use serde::{Deserialize, Serialize};

pub use error::{Error, Result};

/// Languages a fixture is rendered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// TypeScript (transpiler input)
    TypeScript,
    /// Rust (transpiler output)
    Rust,
}

impl Language {
    /// Every language, input first
    pub const ALL: [Self; 2] = [Self::TypeScript, Self::Rust];
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TypeScript => write!(f, "typescript"),
            Self::Rust => write!(f, "rust"),
        }
    }
}

impl std::str::FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "typescript" | "ts" => Ok(Self::TypeScript),
            "rust" | "rs" => Ok(Self::Rust),
            _ => Err(Error::Configuration(format!("unknown language `{s}`"))),
        }
    }
}


/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::data::{load_manifest, FixtureWriter, Manifest};
    pub use crate::fixture::{Bindings, Branch, CountDown, Fixture, FixtureConfig};
    pub use crate::grammar::{grammar_for, Grammar};
    pub use crate::oracle::{Executor, Oracle, TraceOracle, Verdict, VerificationResult};
    pub use crate::render::{renderer_for, Renderer};
    pub use crate::trace::{expected_trace, Trace};
    pub use crate::{Error, Language, Result};
}
