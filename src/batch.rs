//! Query scripts: one query per line
//!
//! Blank lines and `--` comment lines are skipped. Line numbers are 1-based
//! and refer to the original script so errors can point at the failing line.

use crate::error::SqlAliasError;
use crate::rewriter::Rewriter;

/// A query taken from a script, with the line it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptQuery<'a> {
    pub line: usize,
    pub sql: &'a str,
}

/// Split a script into its queries.
pub fn split_queries(script: &str) -> Vec<ScriptQuery<'_>> {
    script
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| {
            let sql = line.trim();
            if sql.is_empty() || sql.starts_with("--") {
                None
            } else {
                Some(ScriptQuery { line: idx + 1, sql })
            }
        })
        .collect()
}

/// Rewrite every query of a script, stopping at the first failure.
///
/// The error wraps the cause with the 1-based line number of the failing
/// query.
pub fn rewrite_script(
    script: &str,
    rewriter: &Rewriter<'_>,
) -> Result<Vec<String>, SqlAliasError> {
    split_queries(script)
        .into_iter()
        .map(|query| {
            rewriter
                .transform(query.sql)
                .map_err(|e| SqlAliasError::ScriptQueryError {
                    line: query.line,
                    source: Box::new(e),
                })
        })
        .collect()
}
