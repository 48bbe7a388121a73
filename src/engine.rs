//! Entry point for turning a user filter into a SQL predicate.
//!
//! Filters that look like plain search text skip the compiler entirely and
//! become a fixed `LIKE` search over the message, the exception and all
//! property values. Everything else goes through
//! [`scan`](crate::lexer::scan) → [`parse`](crate::parser::parse) →
//! [`generate`](crate::codegen::generate).
//!
//! The returned fragment is a complete boolean expression that the caller
//! embeds verbatim next to its own timestamp, level and paging clauses.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::{
    ast::Expr,
    codegen::SqlGenerator,
    dialect::Dialect,
    error::CompileResult,
    lexer::scan,
    parser::parse,
};

static QUOTED_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)\A"(.*)"\z"#).expect("valid quoted text regex"));
static FILTER_SYNTAX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s=!()]").expect("valid filter syntax regex"));

/// True when `filter` is searched as text instead of compiled.
///
/// That is the case when it is wrapped in double quotes, or when it contains
/// none of whitespace, `=`, `!`, `(` and `)`.
pub fn is_free_text(filter: &str) -> bool {
    QUOTED_TEXT.is_match(filter) || !FILTER_SYNTAX.is_match(filter)
}

/// The fixed search predicate for free text.
pub fn free_text_predicate(filter: &str, dialect: &dyn Dialect) -> String {
    let text = QUOTED_TEXT
        .captures(filter)
        .and_then(|caps| caps.get(1))
        .map_or(filter, |m| m.as_str());
    let pattern = dialect.quote_string(&format!("%{text}%"));

    format!(
        "(message LIKE {pattern} OR exception LIKE {pattern} OR id IN \
         (SELECT logId FROM {table} WHERE value LIKE {pattern}))",
        table = dialect.property_table_name(),
    )
}

/// Scans and parses `filter` without generating SQL.
///
/// Returns `None` for free text, which needs no compilation.
pub fn compile(filter: &str) -> CompileResult<Option<Expr>> {
    if is_free_text(filter) {
        return Ok(None);
    }
    let tokens = scan(filter)?;
    parse(tokens).map(Some)
}

/// Translates a user filter into a SQL boolean expression for `dialect`.
pub fn translate(filter: &str, dialect: &dyn Dialect) -> CompileResult<String> {
    match compile(filter)? {
        None => {
            debug!(dialect = dialect.name(), "translating filter as free text");
            Ok(free_text_predicate(filter, dialect))
        }
        Some(expr) => {
            debug!(dialect = dialect.name(), "translating compiled filter");
            Ok(SqlGenerator::new(dialect).generate(&expr))
        }
    }
}

/// A dialect bound to the translation entry point.
pub struct QueryEngine {
    dialect: Box<dyn Dialect>,
}

impl QueryEngine {
    pub fn new(dialect: Box<dyn Dialect>) -> Self {
        QueryEngine { dialect }
    }

    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    pub fn translate(&self, filter: &str) -> CompileResult<String> {
        translate(filter, self.dialect.as_ref())
    }
}
