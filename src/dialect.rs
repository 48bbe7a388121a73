//! Storage dialects the SQL generator is parameterized over.
//!
//! A dialect supplies the handful of fragments that differ between backends:
//! where properties live, how a stored property value is cast to a number, and
//! how "matches at least once" / "never matches" is aggregated per event.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PROPERTY_TABLE: &str = "log_property";

/// Column holding the property value in the property table.
pub const PROPERTY_VALUE_COLUMN: &str = "value";

// Placeholders filled by the generator
pub const PNAME: &str = "|PNAME|";
pub const VALCOL: &str = "|VALCOL|";
pub const OP: &str = "|OP|";
pub const PVAL: &str = "|PVAL|";

static TABLE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)?\z")
        .expect("valid table name regex")
});

const SUM_TEMPLATE: &str = "SUM(name = '|PNAME|' AND |VALCOL| |OP| |PVAL|)";
const CASE_TEMPLATE: &str =
    "SUM(CASE WHEN name = '|PNAME|' AND |VALCOL| |OP| |PVAL| THEN 1 ELSE 0 END)";

/// Table name that can be spliced into SQL unquoted, optionally schema-qualified
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid property table name: '{0}'")]
pub struct InvalidTableName(pub String);

pub fn validate_table_name(table: &str) -> Result<(), InvalidTableName> {
    if TABLE_NAME.is_match(table) {
        Ok(())
    } else {
        Err(InvalidTableName(table.to_string()))
    }
}

/// Single-quoted SQL string with embedded quotes doubled.
fn quote_standard(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn wrap_count(aggregate: &str, negate: bool) -> String {
    if negate {
        format!("{aggregate} = 0")
    } else {
        format!("{aggregate} > 0")
    }
}

/// Backend-specific SQL fragments.
pub trait Dialect {
    /// Short name, as accepted by [`DialectKind::from_str`]
    fn name(&self) -> &'static str;

    /// Table holding one row per (event, property) pair
    fn property_table_name(&self) -> &str;

    /// Expression converting `column` to a number for ordering comparisons
    fn numeric_cast_expression(&self, column: &str) -> String;

    /// Aggregate condition over one event's property rows.
    ///
    /// Contains the `|PNAME|`, `|VALCOL|`, `|OP|` and `|PVAL|` placeholders.
    /// `negate` selects "never matches" (`= 0`) over "matches at least once"
    /// (`> 0`).
    fn property_filter_template(&self, negate: bool) -> String {
        wrap_count(SUM_TEMPLATE, negate)
    }

    /// SQL string literal for `value`
    fn quote_string(&self, value: &str) -> String {
        quote_standard(value)
    }

    /// SQL spelling of a boolean constant
    fn boolean_literal(&self, value: bool) -> &'static str {
        if value { "TRUE" } else { "FALSE" }
    }
}

macro_rules! property_table_ctor {
    ($ty:ident) => {
        impl $ty {
            pub fn new() -> Self {
                $ty {
                    property_table: DEFAULT_PROPERTY_TABLE.to_string(),
                }
            }

            pub fn with_property_table(
                table: impl Into<String>,
            ) -> Result<Self, InvalidTableName> {
                let property_table = table.into();
                validate_table_name(&property_table)?;
                Ok($ty { property_table })
            }
        }

        impl Default for $ty {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

/// SQLite: aggregates over boolean expressions directly, booleans are integers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sqlite {
    property_table: String,
}

property_table_ctor!(Sqlite);

impl Dialect for Sqlite {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn property_table_name(&self) -> &str {
        &self.property_table
    }

    fn numeric_cast_expression(&self, column: &str) -> String {
        format!("CAST({column} AS NUMERIC)")
    }

    fn boolean_literal(&self, value: bool) -> &'static str {
        if value { "1" } else { "0" }
    }
}

/// MySQL / MariaDB
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MySql {
    property_table: String,
}

property_table_ctor!(MySql);

impl Dialect for MySql {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn property_table_name(&self) -> &str {
        &self.property_table
    }

    fn numeric_cast_expression(&self, column: &str) -> String {
        format!("CAST({column} AS DECIMAL(38,10))")
    }

    /// Backslash is an escape character in MySQL string literals unless
    /// `NO_BACKSLASH_ESCAPES` is set, so it is doubled as well.
    fn quote_string(&self, value: &str) -> String {
        quote_standard(&value.replace('\\', "\\\\"))
    }
}

/// PostgreSQL: `SUM` does not take booleans, and a plain cast of a
/// non-numeric value aborts the whole query, so non-numbers become NULL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Postgres {
    property_table: String,
}

property_table_ctor!(Postgres);

impl Dialect for Postgres {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn property_table_name(&self) -> &str {
        &self.property_table
    }

    fn numeric_cast_expression(&self, column: &str) -> String {
        format!(
            "CASE WHEN {column} ~ '^-?[0-9]+(\\.[0-9]+)?$' THEN CAST({column} AS NUMERIC) END"
        )
    }

    fn property_filter_template(&self, negate: bool) -> String {
        wrap_count(CASE_TEMPLATE, negate)
    }
}

/// Microsoft SQL Server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlServer {
    property_table: String,
}

property_table_ctor!(SqlServer);

impl Dialect for SqlServer {
    fn name(&self) -> &'static str {
        "sqlserver"
    }

    fn property_table_name(&self) -> &str {
        &self.property_table
    }

    fn numeric_cast_expression(&self, column: &str) -> String {
        format!("TRY_CAST({column} AS DECIMAL(38,10))")
    }

    fn property_filter_template(&self, negate: bool) -> String {
        wrap_count(CASE_TEMPLATE, negate)
    }

    fn boolean_literal(&self, value: bool) -> &'static str {
        if value { "1" } else { "0" }
    }
}

/// Selector for the built-in dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum DialectKind {
    #[default]
    Sqlite,
    #[serde(alias = "mariadb")]
    Mysql,
    #[serde(alias = "postgresql")]
    Postgres,
    #[serde(alias = "mssql")]
    Sqlserver,
}

impl DialectKind {
    /// Builds the dialect, optionally pointing it at a different property table.
    pub fn build(
        &self,
        property_table: Option<&str>,
    ) -> Result<Box<dyn Dialect>, InvalidTableName> {
        let table = property_table.unwrap_or(DEFAULT_PROPERTY_TABLE);
        let dialect: Box<dyn Dialect> = match self {
            DialectKind::Sqlite => Box::new(Sqlite::with_property_table(table)?),
            DialectKind::Mysql => Box::new(MySql::with_property_table(table)?),
            DialectKind::Postgres => Box::new(Postgres::with_property_table(table)?),
            DialectKind::Sqlserver => Box::new(SqlServer::with_property_table(table)?),
        };
        Ok(dialect)
    }
}

/// Error returned when a dialect name is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown dialect: '{0}'. Valid dialects are: sqlite, mysql, postgres, sqlserver")]
pub struct UnknownDialect(pub String);

impl FromStr for DialectKind {
    type Err = UnknownDialect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sqlite" => Ok(DialectKind::Sqlite),
            "mysql" | "mariadb" => Ok(DialectKind::Mysql),
            "postgres" | "postgresql" | "pg" => Ok(DialectKind::Postgres),
            "sqlserver" | "mssql" => Ok(DialectKind::Sqlserver),
            _ => Err(UnknownDialect(s.to_string())),
        }
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DialectKind::Sqlite => "sqlite",
            DialectKind::Mysql => "mysql",
            DialectKind::Postgres => "postgres",
            DialectKind::Sqlserver => "sqlserver",
        };
        f.write_str(name)
    }
}
