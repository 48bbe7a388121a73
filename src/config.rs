//! Dialect selection for the CLI and for embedders that want a file-driven setup.
//!
//! Sources, lowest priority first: built-in defaults, a JSON file, then the
//! `LOGFILTER_DIALECT` / `LOGFILTER_PROPERTY_TABLE` environment variables.
//!
//! ```json
//! { "dialect": "postgres", "property_table": "event_properties" }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dialect::{
    Dialect, DialectKind, InvalidTableName, UnknownDialect, validate_table_name,
};
use crate::engine::QueryEngine;

pub const DIALECT_ENV: &str = "LOGFILTER_DIALECT";
pub const PROPERTY_TABLE_ENV: &str = "LOGFILTER_PROPERTY_TABLE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    UnknownDialect(#[from] UnknownDialect),

    #[error(transparent)]
    InvalidTableName(#[from] InvalidTableName),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompilerConfig {
    pub dialect: DialectKind,
    pub property_table: Option<String>,
}

impl CompilerConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Applies overrides from a variable lookup (normally [`std::env::var`]).
    pub fn apply_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dialect) = lookup(DIALECT_ENV) {
            self.dialect = dialect.parse()?;
        }
        if let Some(table) = lookup(PROPERTY_TABLE_ENV) {
            self.property_table = Some(table);
        }
        Ok(self)
    }

    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.apply_env(|key| std::env::var(key).ok())
    }

    /// Rejects table names that could not be spliced into SQL unquoted.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.property_table {
            Some(table) => Ok(validate_table_name(table)?),
            None => Ok(()),
        }
    }

    pub fn dialect(&self) -> Result<Box<dyn Dialect>, ConfigError> {
        Ok(self.dialect.build(self.property_table.as_deref())?)
    }

    pub fn engine(&self) -> Result<QueryEngine, ConfigError> {
        Ok(QueryEngine::new(self.dialect()?))
    }
}
