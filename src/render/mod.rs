//! Fixture renderers
//!
//! Turn a [`Fixture`] into source text: the TypeScript the transpiler
//! consumes, and the Rust it is expected to emit for it.

mod rust;
mod typescript;

pub use rust::RustRenderer;
pub use typescript::TypeScriptRenderer;

use crate::fixture::Fixture;
use crate::{Language, Result};

/// Trait for fixture renderers
pub trait Renderer: Send + Sync + std::fmt::Debug {
    /// Language of the rendered text
    fn language(&self) -> Language;

    /// File extension used when the rendering is written to disk
    fn extension(&self) -> &'static str;

    /// Render the fixture
    ///
    /// # Errors
    ///
    /// Returns an error if the fixture fails [`Fixture::validate`].
    fn render(&self, fixture: &Fixture) -> Result<String>;
}

/// Create a renderer for the specified language
#[must_use]
pub fn renderer_for(language: Language) -> Box<dyn Renderer> {
    match language {
        Language::TypeScript => Box::new(TypeScriptRenderer::new()),
        Language::Rust => Box::new(RustRenderer::new()),
    }
}
