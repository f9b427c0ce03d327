//! SELECT list rewriting

use super::from::tables_from_clauses;
use super::list::split_list;
use super::resolver::{resolve_field, TableList};
use super::segmenter::{require_clause, segment, Clause, ClauseKind};
use crate::error::SqlAliasError;
use crate::field_map::FieldMap;

/// Rewrite an already located SELECT clause against `tables`.
pub(crate) fn render_select(
    select: &Clause,
    tables: &TableList,
    field_map: &FieldMap,
) -> Result<String, SqlAliasError> {
    let fields = split_list(select.body())
        .iter()
        .map(|field| {
            if field.contains('*') {
                Ok(field.clone())
            } else {
                resolve_field(field, tables, field_map)
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(format!("SELECT {} ", fields.join(", ")))
}

/// Rewrite the SELECT list as `"SELECT <fields> "`.
///
/// Fields containing `*` (`*`, `user.*`, `COUNT(*)`) are copied verbatim;
/// every other field is resolved against the query's own table list.
pub fn rewrite_select(query: &str, field_map: &FieldMap) -> Result<String, SqlAliasError> {
    let clauses = segment(query)?;
    let select = require_clause(&clauses, ClauseKind::Select)?;
    // A SELECT with no FROM is as malformed as no SELECT at all
    let tables = tables_from_clauses(&clauses)?;
    render_select(select, &tables, field_map)
}
