use crate::ast::{CompareOp, LogicalOp, Token, TokenKind};
use crate::value::LiteralValue;

/// Abstract Syntax Tree node representing a parsed filter.
///
/// The parser guarantees the shape constraints the type system does not:
/// the left side of a [`Expr::Binary`] is always a [`Expr::Variable`], its
/// right side is always a [`Expr::Literal`], and both sides of a
/// [`Expr::Logical`] are themselves `Binary`, `Grouping` or `Logical`.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Comparison of a field against a constant
    ///
    /// # Examples
    /// ```text
    /// StatusCode >= 500
    /// @message like '%timeout%'
    /// ```
    Binary {
        left: Box<Expr>,
        operator: CompareOp,
        right: Box<Expr>,
    },

    /// Parenthesized sub-expression
    Grouping(Box<Expr>),

    /// Constant value
    Literal(LiteralValue),

    /// `and` / `or` combination
    Logical {
        left: Box<Expr>,
        operator: LogicalOp,
        right: Box<Expr>,
    },

    /// Property (`Identifier`) or built-in field (`BuiltInIdentifier`) reference
    Variable(Token),
}

impl Expr {
    pub fn binary(left: Expr, operator: CompareOp, right: Expr) -> Self {
        Expr::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    pub fn logical(left: Expr, operator: LogicalOp, right: Expr) -> Self {
        Expr::Logical {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    pub fn grouping(inner: Expr) -> Self {
        Expr::Grouping(Box::new(inner))
    }

    /// True when every field referenced below this node is a property.
    ///
    /// Literals are neutral. Recomputed on every call.
    pub fn is_all_property(&self) -> bool {
        match self {
            Expr::Variable(token) => token.kind == TokenKind::Identifier,
            Expr::Literal(_) => true,
            Expr::Grouping(inner) => inner.is_all_property(),
            Expr::Binary { left, right, .. } | Expr::Logical { left, right, .. } => {
                left.is_all_property() && right.is_all_property()
            }
        }
    }

    /// Nodes that evaluate to a boolean: the only valid operands of `and`/`or`.
    pub fn is_condition(&self) -> bool {
        matches!(
            self,
            Expr::Binary { .. } | Expr::Grouping(_) | Expr::Logical { .. }
        )
    }
}
