// tests/lexer_tests.rs

use log_filter_sql::ast::{Token, TokenKind};
use log_filter_sql::error::ErrorKind;
use log_filter_sql::lexer::{Lexer, scan};
use log_filter_sql::value::LiteralValue;
use rust_decimal::Decimal;
use std::str::FromStr;

fn single(input: &str) -> Token {
    let tokens = scan(input).unwrap();
    assert_eq!(tokens.len(), 2, "expected one token for {:?}: {:?}", input, tokens);
    assert_eq!(tokens[1].kind, TokenKind::EndOfInput);
    tokens.into_iter().next().unwrap()
}

// ============================================================================
// Punctuation and operators
// ============================================================================

#[test]
fn test_single_char_tokens() {
    let test_cases = vec![
        ("(", TokenKind::OpenParen),
        (")", TokenKind::CloseParen),
        ("=", TokenKind::Equal),
        (">", TokenKind::GreaterThan),
        ("<", TokenKind::LessThan),
    ];

    for (input, expected) in test_cases {
        let token = single(input);
        assert_eq!(token.kind, expected, "Failed for input: {}", input);
        assert_eq!(token.text, input);
        assert_eq!(token.position, 0);
    }
}

#[test]
fn test_two_char_tokens() {
    let test_cases = vec![
        ("!=", TokenKind::NotEqual),
        (">=", TokenKind::GreaterOrEqual),
        ("<=", TokenKind::LessOrEqual),
    ];

    for (input, expected) in test_cases {
        let token = single(input);
        assert_eq!(token.kind, expected, "Failed for input: {}", input);
        assert_eq!(token.text, input);
    }
}

#[test]
fn test_two_char_vs_single_char() {
    let kinds: Vec<TokenKind> = scan("< = <=")
        .unwrap()
        .into_iter()
        .map(|t| t.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::LessThan,
            TokenKind::Equal,
            TokenKind::LessOrEqual,
            TokenKind::EndOfInput,
        ]
    );
}

#[test]
fn test_bang_without_equal_is_invalid() {
    let err = scan("a !x").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Lexical);
    assert_eq!(err.description, "unexpected character");
    assert_eq!(err.to_string(), "Error at position '4' -> x: unexpected character");
}

#[test]
fn test_bang_at_end_of_input() {
    let err = scan("a !").unwrap_err();
    assert_eq!(err.to_string(), "Error at position '4': unexpected character");
}

// ============================================================================
// Keywords
// ============================================================================

#[test]
fn test_keywords() {
    let test_cases = vec![
        ("and", TokenKind::And),
        ("or", TokenKind::Or),
        ("like", TokenKind::Like),
        ("true", TokenKind::True),
        ("false", TokenKind::False),
    ];

    for (input, expected) in test_cases {
        assert_eq!(single(input).kind, expected, "Failed for input: {}", input);
    }
}

#[test]
fn test_keywords_are_case_insensitive() {
    let test_cases = vec![
        ("AND", TokenKind::And),
        ("Or", TokenKind::Or),
        ("LIKE", TokenKind::Like),
        ("True", TokenKind::True),
        ("FALSE", TokenKind::False),
    ];

    for (input, expected) in test_cases {
        let token = single(input);
        assert_eq!(token.kind, expected, "Failed for input: {}", input);
        // Raw lexeme is kept as typed
        assert_eq!(token.text, input);
    }
}

#[test]
fn test_boolean_tokens_carry_values() {
    assert_eq!(single("true").value, Some(LiteralValue::Boolean(true)));
    assert_eq!(single("False").value, Some(LiteralValue::Boolean(false)));
}

#[test]
fn test_keywords_vs_identifiers() {
    let test_cases = vec!["android", "order", "likes", "trueish", "falsehood", "nothing"];

    for input in test_cases {
        let token = single(input);
        assert_eq!(token.kind, TokenKind::Identifier, "Failed for input: {}", input);
        assert_eq!(token.text, input);
    }
}

#[test]
fn test_not_like() {
    let tokens = scan("p not like 'x'").unwrap();
    assert_eq!(tokens[1].kind, TokenKind::NotLike);
    assert_eq!(tokens[1].position, 2);
    assert_eq!(tokens[2].kind, TokenKind::String);
}

#[test]
fn test_not_like_mixed_case_and_spacing() {
    let tokens = scan("p NOT \t Like 'x'").unwrap();
    assert_eq!(tokens[1].kind, TokenKind::NotLike);
    assert_eq!(tokens[1].text, "NOT \t Like");
}

#[test]
fn test_not_requires_like() {
    let err = scan("p not = 'x'").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Lexical);
    assert_eq!(err.description, "'not' may only be used with 'like'");
    assert_eq!(err.display_position(), 7);

    let err = scan("p not equal 'x'").unwrap_err();
    assert_eq!(err.token.as_deref(), Some("equal"));
    assert_eq!(err.display_position(), 7);
}

#[test]
fn test_not_at_end_of_input() {
    let err = scan("p not").unwrap_err();
    assert_eq!(err.description, "'not' may only be used with 'like'");
    assert_eq!(err.token, None);
}

// ============================================================================
// Identifiers
// ============================================================================

#[test]
fn test_identifier() {
    let token = single("StatusCode2");
    assert_eq!(token.kind, TokenKind::Identifier);
    assert_eq!(token.text, "StatusCode2");
    assert_eq!(token.value, None);
}

#[test]
fn test_builtin_identifier_drops_prefix() {
    let tokens = scan("  @message").unwrap();
    assert_eq!(tokens[0].kind, TokenKind::BuiltInIdentifier);
    assert_eq!(tokens[0].text, "message");
    assert_eq!(tokens[0].position, 2);
}

#[test]
fn test_builtin_keyword_name_is_identifier() {
    let token = single("@level");
    assert_eq!(token.kind, TokenKind::BuiltInIdentifier);

    let token = single("@and");
    assert_eq!(token.kind, TokenKind::BuiltInIdentifier);
    assert_eq!(token.text, "and");
}

#[test]
fn test_lone_at_sign_is_invalid() {
    let err = scan("@ = 1").unwrap_err();
    assert_eq!(err.to_string(), "Error at position '1' -> @: unexpected character");
}

#[test]
fn test_underscore_is_not_an_identifier_character() {
    let err = scan("user_name = 'x'").unwrap_err();
    assert_eq!(err.to_string(), "Error at position '5' -> _: unexpected character");
}

// ============================================================================
// Numbers
// ============================================================================

#[test]
fn test_integer() {
    let token = single("500");
    assert_eq!(token.kind, TokenKind::Number);
    assert_eq!(token.value, Some(LiteralValue::Number(Decimal::from(500))));
}

#[test]
fn test_decimal() {
    let token = single("12.50");
    assert_eq!(token.text, "12.50");
    assert_eq!(
        token.value,
        Some(LiteralValue::Number(Decimal::from_str("12.50").unwrap()))
    );
}

#[test]
fn test_trailing_dot_is_not_part_of_number() {
    let err = scan("5.").unwrap_err();
    assert_eq!(err.to_string(), "Error at position '2' -> .: unexpected character");
}

#[test]
fn test_number_then_identifier() {
    let tokens = scan("5abc").unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].position, 1);
}

#[test]
fn test_number_out_of_range() {
    let err = scan("p = 123456789012345678901234567890123").unwrap_err();
    assert_eq!(err.description, "invalid number");
    assert_eq!(err.display_position(), 5);
}

// ============================================================================
// Strings
// ============================================================================

#[test]
fn test_string() {
    let token = single("'hello world'");
    assert_eq!(token.kind, TokenKind::String);
    assert_eq!(token.text, "'hello world'");
    assert_eq!(token.value, Some(LiteralValue::String("hello world".into())));
}

#[test]
fn test_empty_string() {
    let token = single("''");
    assert_eq!(token.text, "''");
    assert_eq!(token.value, Some(LiteralValue::String(String::new())));
}

#[test]
fn test_doubled_quote_is_kept_in_text() {
    let token = single("'it''s'");
    assert_eq!(token.text, "'it''s'");
    assert_eq!(token.value, Some(LiteralValue::String("it's".into())));
}

#[test]
fn test_string_text_rescans_to_same_value() {
    for content in ["plain", "it's", "''", "a''b'c", "%admin%"] {
        let quoted = format!("'{}'", content.replace('\'', "''"));
        let first = single(&quoted);
        let again = single(&first.text);
        assert_eq!(again.value, Some(LiteralValue::String(content.to_string())));
        assert_eq!(again.text, first.text);
    }
}

#[test]
fn test_unterminated_string() {
    let err = scan("p = 'abc").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Lexical);
    assert_eq!(err.to_string(), "Error at position '8': unterminated string");
}

#[test]
fn test_unterminated_string_after_escaped_quote() {
    let err = scan("'ab''").unwrap_err();
    assert_eq!(err.description, "unterminated string");
    assert_eq!(err.display_position(), 5);
}

// ============================================================================
// Positions and whitespace
// ============================================================================

#[test]
fn test_positions_are_character_offsets() {
    let tokens = scan("Ünïcode = 'ö' and x=1").unwrap();
    let positions: Vec<usize> = tokens.iter().map(|t| t.position).collect();
    assert_eq!(positions, vec![0, 8, 10, 14, 18, 19, 20, 21]);
}

#[test]
fn test_whitespace_variants_are_skipped() {
    let tokens = scan("\ta\r\n=\n1 ").unwrap();
    assert_eq!(tokens.len(), 4);
    assert_eq!(tokens[3].position, 8);
}

#[test]
fn test_empty_input() {
    let tokens = scan("").unwrap();
    assert_eq!(tokens, vec![Token::end_of_input(0)]);
}

#[test]
fn test_unexpected_character() {
    let err = scan("a = 1 # comment").unwrap_err();
    assert_eq!(err.to_string(), "Error at position '7' -> #: unexpected character");
}

#[test]
fn test_next_token_streaming() {
    let mut lexer = Lexer::new("(a=1)");
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::OpenParen);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Identifier);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Equal);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Number);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::CloseParen);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::EndOfInput);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::EndOfInput);
}
