//! SQL to vendor-token rewriting
//!
//! The rewrite happens in one linear pass over the query's clauses:
//!
//! 1. the query is tokenized and segmented into clauses once
//! 2. SELECT and FROM are rewritten against the table list from FROM, and
//!    every clause after FROM is dispatched to its rewriter
//! 3. the pieces are concatenated in source order
//!
//! `rewrite_select`, `rewrite_from` and `table_list` remain usable on their
//! own; each segments the query it is given.
//!
//! Clause order is never changed and no clause is revisited.

mod from;
mod list;
mod resolver;
mod segmenter;
mod select;
mod simple_list;
mod token;
mod where_clause;

use tracing::debug;

pub use from::{rewrite_from, table_list};
pub use list::split_list;
pub use resolver::{resolve_field, resolve_in_table, TableList};
pub use segmenter::{segment, Clause, ClauseKind};
pub use select::rewrite_select;
pub use simple_list::{
    rewrite_group_by, rewrite_order_by, rewrite_simple_list, sort_direction, SimpleListKind,
    SortDirection,
};
pub use token::VendorToken;
pub use where_clause::{
    classify_right_hand, is_quoted_literal, matches_known_field, matches_known_table,
    rewrite_predicates, rewrite_where, Predicate, RightHandSide,
};

use crate::error::SqlAliasError;
use crate::field_map::FieldMap;

/// Query rewriter bound to one field map
#[derive(Debug, Clone, Copy)]
pub struct Rewriter<'a> {
    field_map: &'a FieldMap,
}

impl<'a> Rewriter<'a> {
    pub fn new(field_map: &'a FieldMap) -> Self {
        Self { field_map }
    }

    pub fn field_map(&self) -> &'a FieldMap {
        self.field_map
    }

    /// Rewrite one query into vendor token syntax.
    ///
    /// Fails without partial output on the first unknown table or field, or
    /// when SELECT ... FROM cannot be located.
    pub fn transform(&self, query: &str) -> Result<String, SqlAliasError> {
        let clauses = segment(query)?;
        let select = segmenter::require_clause(&clauses, ClauseKind::Select)?;
        let tables = from::tables_from_clauses(&clauses)?;

        let mut output = select::render_select(select, &tables, self.field_map)?;
        output.push_str(&from::render_from(&tables));

        // Everything after FROM, in source order
        let qualifiers = clauses
            .iter()
            .skip_while(|c| c.kind != ClauseKind::From)
            .skip(1);

        for clause in qualifiers {
            debug!(kind = ?clause.kind, text = %clause.text, "rewriting clause");
            let rewritten = match clause.kind {
                ClauseKind::Where => rewrite_where(&clause.text, &tables, self.field_map)?,
                ClauseKind::GroupBy => rewrite_group_by(&clause.text, &tables, self.field_map)?,
                ClauseKind::OrderBy => rewrite_order_by(&clause.text, &tables, self.field_map)?,
                ClauseKind::Limit
                | ClauseKind::Unrecognized
                | ClauseKind::Select
                | ClauseKind::From => format!(" {}", clause.text.trim()),
            };
            output.push_str(&rewritten);
        }

        debug!(query, rewritten = %output, "rewrote query");
        Ok(output)
    }
}

/// Rewrite one query into vendor token syntax using `field_map`.
pub fn transform(query: &str, field_map: &FieldMap) -> Result<String, SqlAliasError> {
    Rewriter::new(field_map).transform(query)
}
