use crate::ast::TokenKind;

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// Equal (`=`)
    Equal,
    /// Not equal (`!=`)
    NotEqual,
    /// Pattern match (`like`)
    Like,
    /// Negated pattern match (`not like`)
    NotLike,
    /// Greater than (`>`)
    GreaterThan,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Less than (`<`)
    LessThan,
    /// Less than or equal (`<=`)
    LessEqual,
}

impl CompareOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Equal => Some(CompareOp::Equal),
            TokenKind::NotEqual => Some(CompareOp::NotEqual),
            TokenKind::Like => Some(CompareOp::Like),
            TokenKind::NotLike => Some(CompareOp::NotLike),
            TokenKind::GreaterThan => Some(CompareOp::GreaterThan),
            TokenKind::GreaterOrEqual => Some(CompareOp::GreaterEqual),
            TokenKind::LessThan => Some(CompareOp::LessThan),
            TokenKind::LessOrEqual => Some(CompareOp::LessEqual),
            _ => None,
        }
    }

    /// `!=` and `not like` exclude matches rather than select them.
    pub fn is_exclusion(&self) -> bool {
        matches!(self, CompareOp::NotEqual | CompareOp::NotLike)
    }

    /// `like` and `not like` only accept string literals.
    pub fn is_pattern(&self) -> bool {
        matches!(self, CompareOp::Like | CompareOp::NotLike)
    }

    /// The four ordering comparisons only accept numeric literals.
    pub fn is_ordering(&self) -> bool {
        matches!(
            self,
            CompareOp::GreaterThan
                | CompareOp::GreaterEqual
                | CompareOp::LessThan
                | CompareOp::LessEqual
        )
    }

    /// SQL spelling for a plain column comparison.
    pub fn sql(&self) -> &'static str {
        match self {
            CompareOp::Equal => "=",
            CompareOp::NotEqual => "!=",
            CompareOp::Like => "LIKE",
            CompareOp::NotLike => "NOT LIKE",
            CompareOp::GreaterThan => ">",
            CompareOp::GreaterEqual => ">=",
            CompareOp::LessThan => "<",
            CompareOp::LessEqual => "<=",
        }
    }

    /// SQL spelling inside a property aggregate.
    ///
    /// Exclusion is expressed by the `= 0` wrapper around the aggregate, so the
    /// inner comparison always uses the inclusive form.
    pub fn inclusive_sql(&self) -> &'static str {
        match self {
            CompareOp::NotEqual => CompareOp::Equal.sql(),
            CompareOp::NotLike => CompareOp::Like.sql(),
            op => op.sql(),
        }
    }
}

/// Logical connectives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    /// Logical AND (`and`)
    And,
    /// Logical OR (`or`)
    Or,
}

impl LogicalOp {
    pub fn sql(&self) -> &'static str {
        match self {
            LogicalOp::And => "AND",
            LogicalOp::Or => "OR",
        }
    }
}
