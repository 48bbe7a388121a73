//! Validate, translate and inspect filters

use crate::{Dialect, Token, compile, engine, scan};

use super::CliError;

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The filter to validate
    pub filter: String,
}

/// Result of a check operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckResult {
    /// The filter will be searched as plain text
    FreeText,
    /// The filter compiled
    SyntaxValid,
}

/// Scan and parse a filter without generating SQL
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    match compile(&options.filter)? {
        None => Ok(CheckResult::FreeText),
        Some(_) => Ok(CheckResult::SyntaxValid),
    }
}

/// Translate a filter for the given dialect
pub fn execute_translate(filter: &str, dialect: &dyn Dialect) -> Result<String, CliError> {
    Ok(engine::translate(filter, dialect)?)
}

/// One line per token: 1-based position, kind and raw text
pub fn render_tokens(filter: &str) -> Result<String, CliError> {
    let tokens = scan(filter)?;
    Ok(tokens.iter().map(render_token).collect::<Vec<_>>().join("\n"))
}

fn render_token(token: &Token) -> String {
    format!("{:>4}  {:<18} {}", token.position + 1, token.kind.name(), token.text)
        .trim_end()
        .to_string()
}
