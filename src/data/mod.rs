//! Fixture corpus on disk
//!
//! A corpus directory holds, per fixture, the TypeScript input, the
//! expected Rust output and the expected stdout, plus a `manifest.json`
//! describing every file.
//!
//! ```text
//! out/
//! ├── manifest.json
//! ├── statements.ts
//! ├── statements.rs
//! ├── statements.expected
//! └── ...
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::fixture::Fixture;
use crate::grammar::grammar_for;
use crate::render::renderer_for;
use crate::trace::expected_trace;
use crate::{Error, Language, Result};

/// Manifest file name inside a corpus directory
pub const MANIFEST_FILE: &str = "manifest.json";

/// Extension of expected-stdout files
pub const EXPECTED_EXTENSION: &str = "expected";

/// Manifest schema version
pub const MANIFEST_VERSION: &str = "1";

/// One fixture as written to disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureRecord {
    /// The fixture the files were rendered from
    pub fixture: Fixture,
    /// Rendered files, one per language
    pub files: Vec<RenderedFile>,
    /// File holding the expected stdout
    pub expected_file: String,
    /// Number of expected stdout lines
    pub expected_lines: usize,
}

/// A rendered source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedFile {
    /// Language of the file
    pub language: Language,
    /// File name relative to the corpus directory
    pub file: String,
    /// Line count of the file
    pub lines: usize,
}

/// Description of a corpus directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Schema version
    pub version: String,
    /// Records in generation order
    pub records: Vec<FixtureRecord>,
}

impl Manifest {
    /// Record for the fixture called `name`
    #[must_use]
    pub fn record(&self, name: &str) -> Option<&FixtureRecord> {
        self.records.iter().find(|r| r.fixture.name == name)
    }
}

/// Writes fixtures into a corpus directory
#[derive(Debug, Clone)]
pub struct FixtureWriter {
    languages: Vec<Language>,
    validate: bool,
}

impl Default for FixtureWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl FixtureWriter {
    /// Writer for every language, validating rendered text
    #[must_use]
    pub fn new() -> Self {
        Self {
            languages: Language::ALL.to_vec(),
            validate: true,
        }
    }

    /// Only render the given languages
    #[must_use]
    pub fn with_languages(mut self, languages: &[Language]) -> Self {
        self.languages = languages.to_vec();
        self
    }

    /// Skip grammar validation of rendered text
    #[must_use]
    pub fn without_validation(mut self) -> Self {
        self.validate = false;
        self
    }

    /// Render one fixture in memory: `(file name, contents)` pairs and its
    /// record
    ///
    /// # Errors
    ///
    /// Returns an error if the fixture is invalid or a rendering fails
    /// grammar validation.
    pub fn render(&self, fixture: &Fixture) -> Result<(Vec<(String, String)>, FixtureRecord)> {
        let mut outputs = Vec::new();
        let mut files = Vec::new();

        for &language in &self.languages {
            let renderer = renderer_for(language);
            let code = renderer.render(fixture)?;
            if self.validate && !grammar_for(language).validate(&code) {
                return Err(Error::Grammar(format!(
                    "rendered {language} for `{}` does not validate",
                    fixture.name
                )));
            }
            let file = format!("{}.{}", fixture.name, renderer.extension());
            files.push(RenderedFile {
                language,
                file: file.clone(),
                lines: code.lines().count(),
            });
            outputs.push((file, code));
        }

        let trace = expected_trace(fixture)?;
        let expected_file = format!("{}.{EXPECTED_EXTENSION}", fixture.name);
        outputs.push((expected_file.clone(), trace.to_stdout()));

        let record = FixtureRecord {
            fixture: fixture.clone(),
            files,
            expected_file,
            expected_lines: trace.len(),
        };
        Ok((outputs, record))
    }

    /// Write `fixtures` and the manifest into `dir`, creating it if needed
    ///
    /// Everything is rendered before the first file is written, so an
    /// invalid fixture leaves the directory untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if two fixtures share a name, rendering fails, or
    /// the files cannot be written.
    pub fn write(&self, dir: &Path, fixtures: &[Fixture]) -> Result<Manifest> {
        let mut names = std::collections::HashSet::new();
        let mut outputs = Vec::new();
        let mut records = Vec::with_capacity(fixtures.len());

        for fixture in fixtures {
            if !names.insert(fixture.name.as_str()) {
                return Err(Error::Configuration(format!(
                    "duplicate fixture name `{}`",
                    fixture.name
                )));
            }
            let (files, record) = self.render(fixture)?;
            outputs.extend(files);
            records.push(record);
        }

        std::fs::create_dir_all(dir)?;
        for (file, contents) in &outputs {
            std::fs::write(dir.join(file), contents)?;
        }

        let manifest = Manifest {
            version: MANIFEST_VERSION.to_string(),
            records,
        };
        std::fs::write(
            dir.join(MANIFEST_FILE),
            serde_json::to_string_pretty(&manifest)?,
        )?;

        info!(
            dir = %dir.display(),
            fixtures = manifest.records.len(),
            files = outputs.len(),
            "wrote fixture corpus"
        );
        Ok(manifest)
    }
}

/// Path of the manifest inside `dir`
#[must_use]
pub fn manifest_path(dir: &Path) -> PathBuf {
    dir.join(MANIFEST_FILE)
}

/// Load the manifest of a corpus directory
///
/// # Errors
///
/// Returns an error if the manifest is missing, malformed, or of an
/// unknown version.
pub fn load_manifest(dir: &Path) -> Result<Manifest> {
    let content = std::fs::read_to_string(manifest_path(dir))?;
    let manifest: Manifest = serde_json::from_str(&content)?;
    if manifest.version != MANIFEST_VERSION {
        return Err(Error::Configuration(format!(
            "unsupported manifest version {}",
            manifest.version
        )));
    }
    Ok(manifest)
}
