#![deny(missing_docs)]

//! # CLI Errors
//!
//! Error types for the CLI crate.

use derive_more::{Display, From};
use llmops_core::AppError;

/// Main error enum for CLI operations.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// Reading the input or writing the output failed.
    #[display("IO Error: {}", _0)]
    Io(std::io::Error),

    /// The schema or request was rejected.
    #[display("{}", _0)]
    App(AppError),

    /// Output could not be encoded.
    #[display("Encoding Error: {}", _0)]
    Json(serde_json::Error),
}

/// `AppError` carries only strings, so the derived `source()` has nothing to return.
impl std::error::Error for CliError {}

/// Result type alias.
pub type CliResult<T> = Result<T, CliError>;
