use std::fmt;

use crate::value::LiteralValue;

/// Kinds of lexical tokens produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Identifiers
    /// Property name
    ///
    /// # Examples
    /// ```text
    /// StatusCode
    /// user1
    /// ```
    Identifier,

    /// Built-in field name, written with a leading `@`
    ///
    /// The token text does not include the `@`.
    ///
    /// # Examples
    /// ```text
    /// @message
    /// @level
    /// ```
    BuiltInIdentifier,

    // Literals
    /// String literal enclosed in single quotes, `''` escapes a quote
    ///
    /// # Examples
    /// ```text
    /// 'value'
    /// 'it''s'
    /// ```
    String,

    /// Decimal number
    ///
    /// # Examples
    /// ```text
    /// 500
    /// 0.25
    /// ```
    Number,

    /// `true` (case-insensitive)
    True,

    /// `false` (case-insensitive)
    False,

    // Delimiters
    /// `(`
    OpenParen,

    /// `)`
    CloseParen,

    // Logical
    /// `and` (word, not symbol)
    And,

    /// `or` (word, not symbol)
    Or,

    // Comparison
    /// `like`
    Like,

    /// `not like`, the only place `not` is accepted
    NotLike,

    /// `=`
    Equal,

    /// `!=`
    NotEqual,

    /// `>`
    GreaterThan,

    /// `>=`
    GreaterOrEqual,

    /// `<`
    LessThan,

    /// `<=`
    LessOrEqual,

    /// Sentinel appended after the last real token
    EndOfInput,
}

impl TokenKind {
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Identifier => "Identifier",
            TokenKind::BuiltInIdentifier => "BuiltInIdentifier",
            TokenKind::String => "String",
            TokenKind::Number => "Number",
            TokenKind::True => "True",
            TokenKind::False => "False",
            TokenKind::OpenParen => "OpenParen",
            TokenKind::CloseParen => "CloseParen",
            TokenKind::And => "And",
            TokenKind::Or => "Or",
            TokenKind::Like => "Like",
            TokenKind::NotLike => "NotLike",
            TokenKind::Equal => "Equal",
            TokenKind::NotEqual => "NotEqual",
            TokenKind::GreaterThan => "GreaterThan",
            TokenKind::GreaterOrEqual => "GreaterOrEqual",
            TokenKind::LessThan => "LessThan",
            TokenKind::LessOrEqual => "LessOrEqual",
            TokenKind::EndOfInput => "EndOfInput",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single lexical unit.
///
/// `position` is the 0-based character offset of the first character of the
/// lexeme. `text` is the raw lexeme, except for built-in identifiers where the
/// leading `@` is dropped. `value` is only set for literal tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: usize,
    pub text: String,
    pub value: Option<LiteralValue>,
}

impl Token {
    pub fn new(kind: TokenKind, position: usize, text: impl Into<String>) -> Self {
        Token {
            kind,
            position,
            text: text.into(),
            value: None,
        }
    }

    pub fn literal(
        kind: TokenKind,
        position: usize,
        text: impl Into<String>,
        value: LiteralValue,
    ) -> Self {
        Token {
            kind,
            position,
            text: text.into(),
            value: Some(value),
        }
    }

    pub fn end_of_input(position: usize) -> Self {
        Token::new(TokenKind::EndOfInput, position, "")
    }

    pub fn is_end(&self) -> bool {
        self.kind == TokenKind::EndOfInput
    }
}
