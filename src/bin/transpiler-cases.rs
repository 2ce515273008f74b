//! transpiler-cases CLI - statement fixtures for TypeScript to Rust transpilation
//!
//! Generate fixture corpora, print expected output and check captured runs.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use transpiler_cases::data::FixtureWriter;
use transpiler_cases::fixture::{Fixture, FixtureConfig};
use transpiler_cases::oracle::{format_diff, DiffOptions, TraceOracle, Verdict};
use transpiler_cases::render::renderer_for;
use transpiler_cases::trace::expected_trace;
use transpiler_cases::{Error, Language, Result};

/// Environment variable overriding the log filter
const LOG_ENV_VAR: &str = "TRANSPILER_CASES_LOG";

/// transpiler-cases - Statement fixtures for transpiler testing
#[derive(Parser)]
#[command(name = "transpiler-cases")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// JSON file listing fixtures (defaults to the built-in pair)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum LanguageArg {
    /// TypeScript fixture source
    Ts,
    /// Expected Rust output
    Rs,
}

impl From<LanguageArg> for Language {
    fn from(arg: LanguageArg) -> Self {
        match arg {
            LanguageArg::Ts => Language::TypeScript,
            LanguageArg::Rs => Language::Rust,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Strictness {
    /// Byte-exact comparison
    Strict,
    /// Ignore trailing whitespace
    Default,
    /// Ignore whitespace changes and exit codes
    Lenient,
}

impl From<Strictness> for DiffOptions {
    fn from(s: Strictness) -> Self {
        match s {
            Strictness::Strict => DiffOptions::strict(),
            Strictness::Default => DiffOptions::default(),
            Strictness::Lenient => DiffOptions::lenient(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Write fixtures, expected output and a manifest into a directory
    Generate {
        /// Output directory
        #[arg(short, long, default_value = "cases")]
        output: PathBuf,

        /// Only render these languages
        #[arg(short, long, value_enum)]
        language: Vec<LanguageArg>,
    },

    /// Print one fixture rendered in one language
    Render {
        /// Fixture name
        #[arg(short, long, default_value = "statements")]
        fixture: String,

        /// Language to render
        #[arg(short, long, value_enum, default_value = "ts")]
        language: LanguageArg,
    },

    /// Print the output a fixture must produce
    Trace {
        /// Fixture name
        #[arg(short, long, default_value = "statements")]
        fixture: String,
    },

    /// Compare captured stdout with a fixture's expected output
    Check {
        /// Fixture name
        #[arg(short, long, default_value = "statements")]
        fixture: String,

        /// File holding the captured stdout ("-" for stdin)
        input: PathBuf,

        /// Comparison strictness
        #[arg(short, long, value_enum, default_value = "default")]
        strictness: Strictness,
    },

    /// Run fixtures with the external toolchains and check their output
    Verify {
        /// Languages to run
        #[arg(short, long, value_enum)]
        language: Vec<LanguageArg>,

        /// Per-run timeout in milliseconds
        #[arg(short, long, default_value = "30000")]
        timeout: u64,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        output: String,
    },
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_fixtures(config: Option<&Path>) -> Result<Vec<Fixture>> {
    match config {
        Some(path) => Ok(FixtureConfig::load(path)?.fixtures),
        None => Ok(FixtureConfig::default().fixtures),
    }
}

fn find_fixture(fixtures: Vec<Fixture>, name: &str) -> Result<Fixture> {
    let known: Vec<_> = fixtures.iter().map(|f| f.name.clone()).collect();
    fixtures
        .into_iter()
        .find(|f| f.name == name)
        .ok_or_else(|| {
            Error::Configuration(format!(
                "unknown fixture `{name}` (known: {})",
                known.join(", ")
            ))
        })
}

fn languages(args: Vec<LanguageArg>) -> Vec<Language> {
    if args.is_empty() {
        Language::ALL.to_vec()
    } else {
        args.into_iter().map(Language::from).collect()
    }
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        Ok(std::io::read_to_string(std::io::stdin())?)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let fixtures = load_fixtures(cli.config.as_deref())?;
    debug!(count = fixtures.len(), "fixtures loaded");

    match cli.command {
        Commands::Generate { output, language } => {
            let manifest = FixtureWriter::new()
                .with_languages(&languages(language))
                .write(&output, &fixtures)?;
            for record in &manifest.records {
                for file in &record.files {
                    println!("Wrote: {}", output.join(&file.file).display());
                }
                println!("Wrote: {}", output.join(&record.expected_file).display());
            }
            println!(
                "\nGenerated {} fixture(s) in {}/",
                manifest.records.len(),
                output.display()
            );
            Ok(ExitCode::SUCCESS)
        }

        Commands::Render { fixture, language } => {
            let fixture = find_fixture(fixtures, &fixture)?;
            print!("{}", renderer_for(language.into()).render(&fixture)?);
            Ok(ExitCode::SUCCESS)
        }

        Commands::Trace { fixture } => {
            let fixture = find_fixture(fixtures, &fixture)?;
            print!("{}", expected_trace(&fixture)?.to_stdout());
            Ok(ExitCode::SUCCESS)
        }

        Commands::Check {
            fixture,
            input,
            strictness,
        } => {
            let fixture = find_fixture(fixtures, &fixture)?;
            let actual = read_input(&input)?;
            let oracle = TraceOracle::new().with_diff_options(strictness.into());
            let diff = oracle.check_output(&fixture, &actual)?;
            println!("{}", format_diff(&diff).trim_end());
            Ok(if diff.matches {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }

        Commands::Verify {
            language,
            timeout,
            output,
        } => {
            let oracle = TraceOracle::new().with_timeout(timeout);
            let mut results = Vec::new();
            let mut skipped = Vec::new();

            for language in languages(language) {
                if !oracle.executor(language).is_available() {
                    tracing::warn!(%language, "toolchain not available, skipping");
                    skipped.push(language);
                    continue;
                }
                for fixture in &fixtures {
                    results.push(oracle.verify(fixture, language)?);
                }
            }

            let failed = results.iter().filter(|r| !r.verdict.is_pass()).count();

            if output == "json" {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                for result in &results {
                    let status = match &result.verdict {
                        Verdict::Pass => "PASS".to_string(),
                        Verdict::OutputMismatch { .. } => "FAIL output mismatch".to_string(),
                        Verdict::Timeout { limit_ms, .. } => format!("FAIL timeout {limit_ms}ms"),
                        Verdict::RuntimeError { error, .. } => format!("FAIL {error}"),
                    };
                    println!("{:<24} {:<10} {status}", result.fixture, result.language.to_string());
                }
                for language in &skipped {
                    println!("{language}: skipped (toolchain not available)");
                }
                println!("\n{} run(s), {failed} failed", results.len());
            }

            Ok(if failed == 0 {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(2)
        }
    }
}
