//! Grammar checks for rendered fixtures
//!
//! Each language gets a validator that rejects text a fixture could never
//! be rendered as.
//!
//! # Supported Languages
//!
//! - TypeScript (transpiler input), structural heuristics
//! - Rust (transpiler output), full parse with `syn`

mod rust;
mod typescript;

pub use rust::RustGrammar;
pub use typescript::TypeScriptGrammar;

use crate::Language;

/// Trait for language grammar definitions
pub trait Grammar: Send + Sync + std::fmt::Debug {
    /// Get the language this grammar defines
    fn language(&self) -> Language;

    /// Validate that a code string conforms to the grammar
    fn validate(&self, code: &str) -> bool;
}

/// Create a grammar for the specified language
#[must_use]
pub fn grammar_for(language: Language) -> Box<dyn Grammar> {
    match language {
        Language::TypeScript => Box::new(TypeScriptGrammar::new()),
        Language::Rust => Box::new(RustGrammar::new()),
    }
}
