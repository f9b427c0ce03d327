//! Error types for rust-sqlalias

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a field map or rewriting a query
#[derive(Error, Debug)]
pub enum SqlAliasError {
    #[error("Failed to read field map file: {path}")]
    FieldMapReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse field map file: {path}")]
    FieldMapParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown table '{table}': no entry in the field map")]
    UnknownTable { table: String },

    #[error("Unknown field '{field}' for table '{table}'")]
    UnknownField { table: String, field: String },

    #[error("Malformed {clause} clause: {message}")]
    MalformedClause { clause: String, message: String },

    #[error("Failed to rewrite query on line {line}")]
    ScriptQueryError {
        line: usize,
        #[source]
        source: Box<SqlAliasError>,
    },
}

impl SqlAliasError {
    pub(crate) fn malformed(clause: &str, message: impl Into<String>) -> Self {
        SqlAliasError::MalformedClause {
            clause: clause.to_string(),
            message: message.into(),
        }
    }
}
