//! Compilation errors for the filter language.
//!
//! Every stage of the compiler (scanning, parsing, generation through the
//! engine) fails with the same [`QueryCompileError`]. The rendered message is
//! meant to be shown to the end user as is.

use thiserror::Error;

/// The stage that rejected the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input at the character level
    Lexical,
    /// Token stream does not match the grammar
    Syntax,
    /// Grammatically valid but the operands do not fit the operator
    Semantic,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Lexical => "lexical",
            ErrorKind::Syntax => "syntax",
            ErrorKind::Semantic => "semantic",
        }
    }
}

/// A filter that could not be compiled.
///
/// `position` is the 0-based character offset; the message shows it 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Error at position '{}'{}: {description}", .position + 1, token_suffix(.token))]
pub struct QueryCompileError {
    pub kind: ErrorKind,
    pub position: usize,
    pub token: Option<String>,
    pub description: String,
}

fn token_suffix(token: &Option<String>) -> String {
    match token {
        Some(text) => format!(" -> {}", text),
        None => String::new(),
    }
}

impl QueryCompileError {
    pub fn new(
        kind: ErrorKind,
        position: usize,
        token: Option<String>,
        description: impl Into<String>,
    ) -> Self {
        QueryCompileError {
            kind,
            position,
            token,
            description: description.into(),
        }
    }

    pub fn lexical(position: usize, token: Option<String>, description: impl Into<String>) -> Self {
        Self::new(ErrorKind::Lexical, position, token, description)
    }

    pub fn syntax(position: usize, token: Option<String>, description: impl Into<String>) -> Self {
        Self::new(ErrorKind::Syntax, position, token, description)
    }

    pub fn semantic(
        position: usize,
        token: Option<String>,
        description: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::Semantic, position, token, description)
    }

    /// The 1-based position shown to users.
    pub fn display_position(&self) -> usize {
        self.position + 1
    }
}

pub type CompileResult<T> = std::result::Result<T, QueryCompileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_with_token() {
        let err = QueryCompileError::semantic(2, Some("p".into()), "expect literal");
        assert_eq!(err.to_string(), "Error at position '3' -> p: expect literal");
    }

    #[test]
    fn test_message_without_token() {
        let err = QueryCompileError::syntax(7, None, "expect expression");
        assert_eq!(err.to_string(), "Error at position '8': expect expression");
        assert_eq!(err.display_position(), 8);
    }
}
