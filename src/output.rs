//! JSON rendering of translation results.
//!
//! A failed translation is rendered the way an HTTP front end reports it to
//! the dashboard: an object whose `error` field holds the displayable message.
//!
//! # Examples
//!
//! ```
//! use log_filter_sql::{dialect::Sqlite, output::translation_json, translate};
//!
//! let dialect = Sqlite::new();
//! let result = translate("@level = 'Error'", &dialect);
//! let json = translation_json("@level = 'Error'", &dialect, &result);
//! assert_eq!(json["sql"], "level = 'Error'");
//! ```

use serde_json::{Value, json};

use crate::dialect::Dialect;
use crate::error::{CompileResult, QueryCompileError};

pub fn error_json(error: &QueryCompileError) -> Value {
    json!({
        "error": error.to_string(),
        "kind": error.kind.as_str(),
        "position": error.display_position(),
        "token": error.token,
    })
}

pub fn translation_json(
    filter: &str,
    dialect: &dyn Dialect,
    result: &CompileResult<String>,
) -> Value {
    match result {
        Ok(sql) => json!({
            "filter": filter,
            "dialect": dialect.name(),
            "sql": sql,
        }),
        Err(error) => error_json(error),
    }
}

pub fn to_json(value: &Value, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}
