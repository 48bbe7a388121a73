//! Documentation content for the logfilter CLI

use super::CliError;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Syntax,
    Operators,
    FreeText,
    Dialects,
    Errors,
}

impl DocCategory {
    /// Parse category name from string
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "syntax" => Some(Self::Syntax),
            "operators" | "ops" => Some(Self::Operators),
            "free-text" | "search" | "text" => Some(Self::FreeText),
            "dialects" | "dialect" => Some(Self::Dialects),
            "errors" | "error" => Some(Self::Errors),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"LOGFILTER DOCUMENTATION

logfilter compiles filter expressions over log events into SQL predicates.
Events have fixed columns (message, level, exception, ...) and any number of
user-defined properties stored as key/value pairs.

DOCUMENTATION CATEGORIES

  syntax      Fields, properties, literals and grouping
  operators   Comparison and logical operators
  free-text   How plain search text is handled
  dialects    Supported SQL backends
  errors      Error messages and positions

QUICK REFERENCE

  StatusCode >= 500                 Property comparison
  @message like '%timeout%'         Built-in field comparison
  Env = 'prod' and @level = 'Error' Combination
  "connection refused"              Free text search

Run 'logfilter doc <category>' for detailed documentation.
"#
}

/// Get documentation for a specific category
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    match DocCategory::from_name(name) {
        Some(DocCategory::Syntax) => Ok(SYNTAX_DOC),
        Some(DocCategory::Operators) => Ok(OPERATORS_DOC),
        Some(DocCategory::FreeText) => Ok(FREE_TEXT_DOC),
        Some(DocCategory::Dialects) => Ok(DIALECTS_DOC),
        Some(DocCategory::Errors) => Ok(ERRORS_DOC),
        None => Err(CliError::UnknownCategory(name.to_string())),
    }
}

const SYNTAX_DOC: &str = r#"SYNTAX - Fields, Literals and Grouping

PROPERTIES
  name
    A user-defined property of the event. Letters and digits, starting with
    a letter. Matched against the property table.

    Example:
      UserName = 'alice'

BUILT-IN FIELDS
  @name
    A fixed column of the event record.

    Example:
      @level = 'Error'
      @message like '%timeout%'

LITERALS
  'text'      String, '' inside escapes a quote: 'it''s'
  42, 0.5     Number (no sign, no exponent)
  true false  Boolean (any case)

GROUPING
  ( ... )
    Parentheses override precedence. 'and' binds tighter than 'or'.

    Example:
      (Env = 'prod' or Env = 'staging') and StatusCode >= 500

    Constraints:
      - Every comparison is <field> <operator> <literal>
      - 'and'/'or' combine comparisons or groups, never bare fields or literals
"#;

const OPERATORS_DOC: &str = r#"OPERATORS - Comparison and Logical

COMPARISON OPERATORS
  =           Equal (any literal)
  !=          Not equal (any literal)
  like        SQL pattern match, % and _ wildcards (string literal)
  not like    Negated pattern match (string literal)
  >  >=       Greater than / or equal (numeric literal)
  <  <=       Less than / or equal (numeric literal)

  Property semantics:
    =, like, >, ...   at least one property row matches
    !=, not like      no property row matches

  Numeric comparisons on properties cast the stored value to a number.

LOGICAL OPERATORS
  and         Both sides hold
  or          Either side holds

  Keywords are case-insensitive. 'not' is only valid in 'not like'.
"#;

const FREE_TEXT_DOC: &str = r#"FREE TEXT - Plain Search

A filter is searched as text instead of compiled when it is wrapped in double
quotes, or when it contains no whitespace and none of = ! ( ).

    timeout
    "connection refused"

The text is matched with LIKE '%text%' against the message, the exception and
every property value. Single quotes are escaped.
"#;

const DIALECTS_DOC: &str = r#"DIALECTS - SQL Backends

  sqlite      CAST(value AS NUMERIC), booleans as 1/0
  mysql       CAST(value AS DECIMAL(38,10)), backslashes doubled in strings
  postgres    guarded CAST(value AS NUMERIC), CASE-based aggregates
  sqlserver   TRY_CAST(value AS DECIMAL(38,10)), CASE-based aggregates

Select with --dialect, the "dialect" key of a --config file, or the
LOGFILTER_DIALECT environment variable. The property table defaults to
log_property and can be changed with --property-table or
LOGFILTER_PROPERTY_TABLE.
"#;

const ERRORS_DOC: &str = r#"ERRORS - Messages

  Error at position '<n>' -> <token>: <description>

Positions are 1-based characters. The token part is omitted at end of input.

  unexpected character                      e.g. '#', or '!' without '='
  unterminated string                       missing closing quote
  'not' may only be used with 'like'
  expect expression                         operand missing
  expect ')' after expression
  expect end of line                        trailing input
  expression nested too deeply              more than 256 nested '('
  too many conditions                       more than 1024 and / or
  expect identifier                         left of a comparison
  expect literal                            right of a comparison
  expect string literal                     like / not like
  expect numeric literal                    > >= < <=
  expect binary, grouping or logical expression
"#;
