use crate::{
    ast::{CompareOp, Expr, LogicalOp, Token, TokenKind},
    error::{CompileResult, QueryCompileError},
};

const EXPECT_CONDITION: &str = "expect binary, grouping or logical expression";

/// Deepest parenthesis nesting accepted.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Most `and`/`or` operators accepted in one filter. Chains build left-deep
/// trees, so this bounds tree depth the same way the nesting limit does.
pub const MAX_LOGICAL_OPERATORS: usize = 1024;

/// Recursive-descent parser over a scanned token list.
///
/// Grammar, lowest precedence first:
///
/// ```text
/// expr       := or
/// or         := and ( "or" and )*
/// and        := comparison ( "and" comparison )*
/// comparison := primary ( op primary )*
/// primary    := "true" | "false" | number | string | identifier | builtin | "(" or ")"
/// ```
///
/// Operand shapes are checked while reducing, so a successful parse always
/// yields a tree the generator can turn into a boolean SQL expression.
/// Nesting and chain length are bounded so that neither parsing nor the
/// recursive walks over the tree can exhaust the stack.
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    depth: usize,
    logical_operators: usize,
}

/// Parses a complete token list into a single expression.
pub fn parse(tokens: Vec<Token>) -> CompileResult<Expr> {
    Parser::new(tokens).parse()
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(Token::is_end) {
            let end = tokens
                .last()
                .map(|t| t.position + t.text.chars().count())
                .unwrap_or(0);
            tokens.push(Token::end_of_input(end));
        }
        Parser {
            tokens,
            current: 0,
            depth: 0,
            logical_operators: 0,
        }
    }

    fn current_token(&self) -> &Token {
        // new() guarantees a trailing EndOfInput and advance() never moves past it
        &self.tokens[self.current]
    }

    fn advance(&mut self) -> Token {
        let token = self.current_token().clone();
        if !token.is_end() {
            self.current += 1;
        }
        token
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current_token().kind == kind
    }

    fn error_at(token: &Token, description: &str, semantic: bool) -> QueryCompileError {
        let text = if token.is_end() {
            None
        } else {
            Some(token.text.clone())
        };
        if semantic {
            QueryCompileError::semantic(token.position, text, description)
        } else {
            QueryCompileError::syntax(token.position, text, description)
        }
    }

    fn require_condition(expr: &Expr, start: &Token) -> CompileResult<()> {
        if expr.is_condition() {
            Ok(())
        } else {
            Err(Self::error_at(start, EXPECT_CONDITION, true))
        }
    }

    /// Parse primary expressions (atoms): literals, field references and
    /// parenthesized groups
    fn parse_primary(&mut self) -> CompileResult<Expr> {
        let token = self.current_token().clone();

        match token.kind {
            TokenKind::True | TokenKind::False | TokenKind::Number | TokenKind::String => {
                self.advance();
                match token.value {
                    Some(value) => Ok(Expr::Literal(value)),
                    None => Err(Self::error_at(&token, "expect literal", true)),
                }
            }
            TokenKind::Identifier | TokenKind::BuiltInIdentifier => {
                self.advance();
                Ok(Expr::Variable(token))
            }
            TokenKind::OpenParen => {
                if self.depth >= MAX_NESTING_DEPTH {
                    return Err(Self::error_at(&token, "expression nested too deeply", false));
                }
                self.advance();
                let inner_start = self.current_token().clone();
                self.depth += 1;
                let inner = self.parse_or()?;
                self.depth -= 1;
                if !self.check(TokenKind::CloseParen) {
                    return Err(Self::error_at(
                        self.current_token(),
                        "expect ')' after expression",
                        false,
                    ));
                }
                self.advance();
                Self::require_condition(&inner, &inner_start)?;
                Ok(Expr::grouping(inner))
            }
            _ => Err(Self::error_at(&token, "expect expression", false)),
        }
    }

    fn parse_comparison(&mut self) -> CompileResult<Expr> {
        let start = self.current_token().clone();
        let mut left = self.parse_primary()?;

        while let Some(op) = CompareOp::from_token(self.current_token().kind) {
            self.advance();
            let right_start = self.current_token().clone();
            let right = self.parse_primary()?;

            if !matches!(left, Expr::Variable(_)) {
                return Err(Self::error_at(&start, "expect identifier", true));
            }
            match &right {
                Expr::Literal(value) if op.is_pattern() && !value.is_string() => {
                    return Err(Self::error_at(&right_start, "expect string literal", true));
                }
                Expr::Literal(value) if op.is_ordering() && !value.is_numeric() => {
                    return Err(Self::error_at(&right_start, "expect numeric literal", true));
                }
                Expr::Literal(_) => {}
                _ => return Err(Self::error_at(&right_start, "expect literal", true)),
            }

            left = Expr::binary(left, op, right);
        }
        Ok(left)
    }

    fn parse_logical(
        &mut self,
        keyword: TokenKind,
        operator: LogicalOp,
        operand: fn(&mut Self) -> CompileResult<Expr>,
    ) -> CompileResult<Expr> {
        let start = self.current_token().clone();
        let mut left = operand(self)?;

        while self.check(keyword) {
            if self.logical_operators >= MAX_LOGICAL_OPERATORS {
                return Err(Self::error_at(self.current_token(), "too many conditions", false));
            }
            self.logical_operators += 1;
            self.advance();
            let right_start = self.current_token().clone();
            let right = operand(self)?;

            Self::require_condition(&left, &start)?;
            Self::require_condition(&right, &right_start)?;

            left = Expr::logical(left, operator, right);
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> CompileResult<Expr> {
        self.parse_logical(TokenKind::And, LogicalOp::And, Self::parse_comparison)
    }

    fn parse_or(&mut self) -> CompileResult<Expr> {
        self.parse_logical(TokenKind::Or, LogicalOp::Or, Self::parse_and)
    }

    pub fn parse(&mut self) -> CompileResult<Expr> {
        let start = self.current_token().clone();
        let expr = self.parse_or()?;

        if !self.check(TokenKind::EndOfInput) {
            return Err(Self::error_at(
                self.current_token(),
                "expect end of line",
                false,
            ));
        }
        Self::require_condition(&expr, &start)?;
        Ok(expr)
    }
}
