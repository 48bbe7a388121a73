//! # Filter Language - Abstract Syntax Tree
//!
//! This module defines the tokens and the expression tree for the log filter
//! language, a small boolean language over log event fields.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[expressions]** - Expression nodes (comparison, grouping, logical, leaves)
//! - **[operators]** - Comparison and logical operators
//!
//! ## Quick Start
//!
//! ```text
//! StatusCode >= 500 and UserName like '%admin%'
//! ```
//!
//! ## Core Concepts
//!
//! ### Properties and built-in fields
//!
//! A bare name (`StatusCode`) refers to a user-defined property, stored as a
//! key/value pair next to the event. A name prefixed with `@` (`@message`)
//! refers to a fixed column of the event record. The two are queried through
//! different SQL shapes, see [`crate::codegen`].
//!
//! ### Comparisons
//!
//! Every comparison has a field on the left and a constant on the right:
//!
//! - `=` and `!=` accept any constant
//! - `like` and `not like` accept strings (`%` and `_` are SQL wildcards)
//! - `>`, `>=`, `<` and `<=` accept numbers
//!
//! ### Combining
//!
//! `and` binds tighter than `or`; parentheses group.
//!
//! ```text
//! (Env = 'prod' or Env = 'staging') and @level = 'Error'
//! ```
pub mod expressions;
pub mod operators;
pub mod tokens;

pub use expressions::Expr;
pub use operators::{CompareOp, LogicalOp};
pub use tokens::{Token, TokenKind};
