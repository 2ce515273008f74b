//! Error types for transpiler-cases
//!
//! This module defines the error types used throughout the library.

use thiserror::Error;

use crate::oracle::Phase;

/// Result type alias for fixture operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building, rendering or verifying fixtures
#[derive(Error, Debug)]
pub enum Error {
    /// Fixture or configuration is not usable
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Rendering a fixture into source text failed
    #[error("render error: {0}")]
    Render(String),

    /// Rendered text does not conform to the language grammar
    #[error("grammar error: {0}")]
    Grammar(String),

    /// Verification oracle error
    #[error("verification error: {0}")]
    Verification(String),

    /// Execution timeout
    #[error("execution timeout after {0}ms")]
    Timeout(u64),

    /// Runtime error during execution
    #[error("runtime error in {phase}: {message}")]
    Runtime {
        /// Phase where error occurred
        phase: Phase,
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
