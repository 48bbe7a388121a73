//! Compiles a small filter language over log events into SQL predicates.
//!
//! ```
//! use log_filter_sql::{dialect::Sqlite, translate};
//!
//! let sql = translate("@message like '%timeout%'", &Sqlite::new()).unwrap();
//! assert_eq!(sql, "message LIKE '%timeout%'");
//! ```
pub mod ast;
pub mod cli;
pub mod codegen;
pub mod config;
pub mod dialect;
pub mod engine;
pub mod error;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod value;

pub use ast::{CompareOp, Expr, LogicalOp, Token, TokenKind};
pub use codegen::{SqlGenerator, generate};
pub use config::{CompilerConfig, ConfigError};
pub use dialect::{Dialect, DialectKind, MySql, Postgres, SqlServer, Sqlite};
pub use engine::{QueryEngine, compile, is_free_text, translate};
pub use error::{ErrorKind, QueryCompileError};
pub use lexer::{Lexer, scan};
pub use parser::{Parser, parse};
pub use value::LiteralValue;
