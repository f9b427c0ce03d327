//! FROM clause rewriting and table list extraction

use tracing::debug;

use super::list::split_list;
use super::resolver::TableList;
use super::segmenter::{require_clause, segment, Clause, ClauseKind};
use super::token::VendorToken;
use crate::error::SqlAliasError;

/// Table list of an already segmented query.
pub(crate) fn tables_from_clauses(clauses: &[Clause]) -> Result<TableList, SqlAliasError> {
    let from = require_clause(clauses, ClauseKind::From)?;
    let tables = TableList::new(split_list(from.body()))?;
    debug!(tables = ?tables.iter().collect::<Vec<_>>(), "extracted table list");
    Ok(tables)
}

/// Render a table list as `" FROM {t1}, {t2} "`.
pub(crate) fn render_from(tables: &TableList) -> String {
    let tokens: Vec<String> = tables
        .iter()
        .map(|table| VendorToken::Table(table).to_string())
        .collect();

    format!(" FROM {} ", tokens.join(", "))
}

/// Extract the ordered table list from the query's FROM clause.
///
/// The FROM clause runs up to the first WHERE / GROUP BY / ORDER BY / LIMIT
/// or the end of the query.
pub fn table_list(query: &str) -> Result<TableList, SqlAliasError> {
    tables_from_clauses(&segment(query)?)
}

/// Rewrite the FROM clause as `" FROM {t1}, {t2} "`.
///
/// Table names pass through literally; the field map is not consulted.
pub fn rewrite_from(query: &str) -> Result<String, SqlAliasError> {
    Ok(render_from(&table_list(query)?))
}
