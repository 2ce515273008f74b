//! Integration tests for transpiler-cases
//!
//! ## Structure
//!
//! - `golden` - Rendered fixtures against the checked-in golden files
//! - `properties` - Behavioural properties of fixture traces (proptest)
//! - `corpus` - Corpus generation and output checking end to end
//! - `cli` - The built binary's subcommands and exit codes

mod cli;
mod corpus;
mod golden;
mod properties;
