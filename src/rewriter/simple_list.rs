//! GROUP BY and ORDER BY field list rewriting

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use super::list::split_list;
use super::resolver::{resolve_field, TableList};
use crate::error::SqlAliasError;
use crate::field_map::FieldMap;
use crate::util::{contains_ci, strip_leading_keyword};

/// Trailing sort direction at the end of an ORDER BY list
static TRAILING_DIRECTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(asc|desc)\s*$").unwrap());

/// Which field-list clause is being rewritten
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimpleListKind {
    GroupBy,
    OrderBy,
}

impl SimpleListKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            SimpleListKind::GroupBy => "GROUP BY",
            SimpleListKind::OrderBy => "ORDER BY",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "ASC"),
            SortDirection::Desc => write!(f, "DESC"),
        }
    }
}

/// Sort direction mentioned anywhere in an ORDER BY clause.
///
/// Matches `asc` / `desc` as case-insensitive substrings, so an identifier
/// such as `description` or `cascade` also counts. `ASC` wins when both
/// appear.
pub fn sort_direction(clause: &str) -> Option<SortDirection> {
    if contains_ci(clause, "asc") {
        Some(SortDirection::Asc)
    } else if contains_ci(clause, "desc") {
        Some(SortDirection::Desc)
    } else {
        None
    }
}

/// Resolve the fields of a GROUP BY / ORDER BY clause, in order.
///
/// The leading keyword is stripped; for ORDER BY a trailing `ASC`/`DESC` is
/// excluded from the field list.
pub fn rewrite_simple_list(
    clause: &str,
    kind: SimpleListKind,
    tables: &TableList,
    field_map: &FieldMap,
) -> Result<Vec<String>, SqlAliasError> {
    let mut body = strip_leading_keyword(clause, kind.keyword()).unwrap_or(clause);
    if kind == SimpleListKind::OrderBy {
        if let Some(m) = TRAILING_DIRECTION_RE.find(body) {
            body = &body[..m.start()];
        }
    }

    split_list(body)
        .iter()
        .map(|field| resolve_field(field, tables, field_map))
        .collect()
}

/// Rewrite a GROUP BY clause as `" GROUP BY a, b "`.
pub fn rewrite_group_by(
    clause: &str,
    tables: &TableList,
    field_map: &FieldMap,
) -> Result<String, SqlAliasError> {
    let fields = rewrite_simple_list(clause, SimpleListKind::GroupBy, tables, field_map)?;
    Ok(format!(" GROUP BY {} ", fields.join(", ")))
}

/// Rewrite an ORDER BY clause as `" ORDER BY a, b DESC "`.
pub fn rewrite_order_by(
    clause: &str,
    tables: &TableList,
    field_map: &FieldMap,
) -> Result<String, SqlAliasError> {
    let fields = rewrite_simple_list(clause, SimpleListKind::OrderBy, tables, field_map)?;
    match sort_direction(clause) {
        Some(direction) => Ok(format!(" ORDER BY {} {} ", fields.join(", "), direction)),
        None => Ok(format!(" ORDER BY {} ", fields.join(", "))),
    }
}
