//! CLI support for log-filter-sql
//!
//! Provides programmatic access to the `logfilter` commands so other tools can
//! embed them without going through the binary.

mod check;
mod docs;

pub use check::{CheckOptions, CheckResult, execute_check, execute_translate, render_tokens};
pub use docs::{DocCategory, get_doc_category, get_docs_overview};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    /// Filter did not compile
    #[error("{0}")]
    Compile(#[from] crate::QueryCompileError),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] crate::ConfigError),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// No filter provided
    #[error("No filter provided. Pass it as an argument or pipe it to stdin.")]
    NoInput,

    /// Unknown documentation category
    #[error("Unknown category: '{0}'\nRun 'logfilter docs' to see available categories.")]
    UnknownCategory(String),
}
