#![deny(missing_docs)]

//! # CLI Errors
//!
//! Error types for the CLI crate.

use derive_more::{Display, From};
use schemagen_core::AppError;

/// Main error enum for CLI operations.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// Failure inside the generation pipeline.
    #[display("{}", _0)]
    App(AppError),

    /// The global logger was already installed.
    #[display("Logger initialization failed: {}", _0)]
    Logger(log::SetLoggerError),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for CliError {}

/// Result type alias.
pub type CliResult<T> = Result<T, CliError>;
