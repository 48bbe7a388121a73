use std::str::FromStr;

use rust_decimal::Decimal;

use crate::ast::{Token, TokenKind};
use crate::error::{CompileResult, QueryCompileError};
use crate::value::LiteralValue;

/// Single-pass scanner turning a filter string into tokens.
///
/// Positions are character offsets, not byte offsets, so they line up with
/// what the user sees in the filter box.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

/// Scans `source` into tokens, always ending with an `EndOfInput` sentinel.
pub fn scan(source: &str) -> CompileResult<Vec<Token>> {
    Lexer::new(source).tokenize()
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn lexeme(&self, start: usize) -> String {
        self.input[start..self.position].iter().collect()
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if matches!(ch, ' ' | '\t' | '\r' | '\n') {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_word(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_alphanumeric() {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    fn unexpected_character(&self) -> QueryCompileError {
        QueryCompileError::lexical(
            self.position,
            self.current_char().map(String::from),
            "unexpected character",
        )
    }

    /// Reads a single-quoted string. A doubled quote is an escaped quote; the
    /// token text keeps it doubled so it is already valid SQL.
    fn read_string(&mut self) -> CompileResult<Token> {
        let start = self.position;
        let mut value = String::new();
        self.advance(); // Consume opening quote

        while let Some(ch) = self.current_char() {
            if ch == '\'' {
                if self.peek_char(1) == Some('\'') {
                    value.push('\'');
                    self.advance();
                    self.advance();
                    continue;
                }
                self.advance();
                return Ok(Token::literal(
                    TokenKind::String,
                    start,
                    self.lexeme(start),
                    LiteralValue::String(value),
                ));
            }
            value.push(ch);
            self.advance();
        }

        Err(QueryCompileError::lexical(
            self.position - 1,
            None,
            "unterminated string",
        ))
    }

    fn read_number(&mut self) -> CompileResult<Token> {
        let start = self.position;

        while self.current_char().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        let fraction = self.peek_char(1).is_some_and(|c| c.is_ascii_digit());
        if self.current_char() == Some('.') && fraction {
            self.advance(); // Consume '.'
            while self.current_char().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        let text = self.lexeme(start);
        let number = Decimal::from_str(&text)
            .map_err(|_| QueryCompileError::lexical(start, Some(text.clone()), "invalid number"))?;
        Ok(Token::literal(
            TokenKind::Number,
            start,
            text,
            LiteralValue::Number(number),
        ))
    }

    fn read_keyword_or_identifier(&mut self) -> CompileResult<Token> {
        let start = self.position;
        let word = self.read_word();

        let token = match word.to_lowercase().as_str() {
            "and" => Token::new(TokenKind::And, start, word),
            "or" => Token::new(TokenKind::Or, start, word),
            "like" => Token::new(TokenKind::Like, start, word),
            "true" => Token::literal(TokenKind::True, start, word, LiteralValue::Boolean(true)),
            "false" => Token::literal(TokenKind::False, start, word, LiteralValue::Boolean(false)),
            "not" => return self.read_not_like(start),
            _ => Token::new(TokenKind::Identifier, start, word),
        };
        Ok(token)
    }

    /// `not` is only valid as the first half of `not like`.
    fn read_not_like(&mut self, start: usize) -> CompileResult<Token> {
        self.skip_whitespace();

        let word_start = self.position;
        let next = self.read_word();
        if next.eq_ignore_ascii_case("like") {
            return Ok(Token::new(TokenKind::NotLike, start, self.lexeme(start)));
        }

        let token = if next.is_empty() {
            self.current_char().map(String::from)
        } else {
            Some(next)
        };
        Err(QueryCompileError::lexical(
            word_start,
            token,
            "'not' may only be used with 'like'",
        ))
    }

    fn read_builtin_identifier(&mut self) -> CompileResult<Token> {
        let start = self.position;
        self.advance(); // Consume '@'

        let name = self.read_word();
        if name.is_empty() {
            return Err(QueryCompileError::lexical(
                start,
                Some("@".to_string()),
                "unexpected character",
            ));
        }
        Ok(Token::new(TokenKind::BuiltInIdentifier, start, name))
    }

    /// Consumes `ch` and an optional `=` right after it.
    fn one_or_two(&mut self, single: TokenKind, with_equal: TokenKind) -> Token {
        let start = self.position;
        self.advance();
        if self.current_char() == Some('=') {
            self.advance();
            Token::new(with_equal, start, self.lexeme(start))
        } else {
            Token::new(single, start, self.lexeme(start))
        }
    }

    fn single(&mut self, kind: TokenKind) -> Token {
        let start = self.position;
        self.advance();
        Token::new(kind, start, self.lexeme(start))
    }

    pub fn next_token(&mut self) -> CompileResult<Token> {
        self.skip_whitespace();

        match self.current_char() {
            None => Ok(Token::end_of_input(self.position)),
            Some('(') => Ok(self.single(TokenKind::OpenParen)),
            Some(')') => Ok(self.single(TokenKind::CloseParen)),
            Some('=') => Ok(self.single(TokenKind::Equal)),
            Some('!') => {
                if self.peek_char(1) == Some('=') {
                    Ok(self.one_or_two(TokenKind::NotEqual, TokenKind::NotEqual))
                } else {
                    self.advance();
                    Err(self.unexpected_character())
                }
            }
            Some('>') => Ok(self.one_or_two(TokenKind::GreaterThan, TokenKind::GreaterOrEqual)),
            Some('<') => Ok(self.one_or_two(TokenKind::LessThan, TokenKind::LessOrEqual)),
            Some('\'') => self.read_string(),
            Some('@') => self.read_builtin_identifier(),
            Some(ch) if ch.is_ascii_digit() => self.read_number(),
            Some(ch) if ch.is_alphabetic() => self.read_keyword_or_identifier(),
            Some(_) => Err(self.unexpected_character()),
        }
    }

    /// Consumes the whole input.
    pub fn tokenize(mut self) -> CompileResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.is_end();
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }
}
