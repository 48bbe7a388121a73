use std::fmt;

use rust_decimal::Decimal;

/// A constant appearing on the right-hand side of a comparison.
///
/// Numbers are kept as [`Decimal`] so that `0.1` in a filter is rendered back
/// into SQL exactly as typed, without binary floating point rounding.
///
/// # Examples
///
/// ```
/// use log_filter_sql::LiteralValue;
///
/// let s = LiteralValue::String("it's".to_string());
/// assert_eq!(s.to_string(), "it's");
/// assert!(!s.is_numeric());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiteralValue {
    /// `true` / `false`
    Boolean(bool),

    /// Decimal number, always non-negative in source
    Number(Decimal),

    /// Unescaped string content (without surrounding quotes)
    String(String),
}

impl LiteralValue {
    pub fn is_numeric(&self) -> bool {
        matches!(self, LiteralValue::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, LiteralValue::String(_))
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Boolean(b) => write!(f, "{}", b),
            LiteralValue::Number(n) => write!(f, "{}", n),
            LiteralValue::String(s) => write!(f, "{}", s),
        }
    }
}
