//! Rust grammar checks backed by `syn`

use syn::Item;

use crate::{Error, Language, Result};

use super::Grammar;

/// Rust grammar for validating expected transpiler output
#[derive(Debug, Default, Clone, Copy)]
pub struct RustGrammar;

impl RustGrammar {
    /// Create a new Rust grammar
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parse a whole source file
    ///
    /// # Errors
    ///
    /// Returns [`Error::Grammar`] with the parser's message.
    pub fn parse(&self, code: &str) -> Result<syn::File> {
        syn::parse_file(code).map_err(|e| Error::Grammar(e.to_string()))
    }

    /// Whether the file defines a free `fn main`
    #[must_use]
    pub fn has_main(file: &syn::File) -> bool {
        file.items
            .iter()
            .any(|item| matches!(item, Item::Fn(f) if f.sig.ident == "main"))
    }
}

impl Grammar for RustGrammar {
    fn language(&self) -> Language {
        Language::Rust
    }

    fn validate(&self, code: &str) -> bool {
        match self.parse(code) {
            Ok(file) => Self::has_main(&file),
            Err(e) => {
                tracing::debug!(error = %e, "rust grammar rejected code");
                false
            }
        }
    }
}
