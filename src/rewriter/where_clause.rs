//! WHERE clause rewriting
//!
//! A WHERE clause is a list of predicates joined by the literal, upper-case
//! substring `AND`. Lower or mixed-case `and` is not a delimiter and stays
//! inside the predicate text; an upper-case `AND` inside an identifier or
//! literal (`BRAND`, `'SAND'`) does split.
//!
//! Each predicate is either an equality (`left = right`) or a bare fragment
//! with no `=` (`active`, `age > 21`). The left side of an equality is always
//! a field reference. The right side has no type information, so it is
//! classified by the rules below, checked in order; the first match wins:
//!
//! 1. [`is_quoted_literal`]: contains a quote, copied verbatim
//! 2. [`matches_known_table`]: mentions a table in scope, resolved as a field
//! 3. [`matches_known_field`]: mentions a default-table field, resolved
//!    against the default table
//! 4. anything else (numbers, booleans) is copied verbatim
//!
//! Matching is by substring, so a literal such as `userland` next to a
//! `user` table is treated as a reference. That misclassification is not
//! detected.

use tracing::trace;

use super::resolver::{resolve_field, resolve_in_table, TableList};
use crate::error::SqlAliasError;
use crate::field_map::FieldMap;
use crate::util::{strip_leading_keyword, strip_whitespace};

/// Predicate separator, matched exact-case as a plain substring
const AND_SEPARATOR: &str = "AND";

/// One AND-separated unit of a WHERE clause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate<'a> {
    Equality { left: &'a str, right: &'a str },
    Fragment(&'a str),
}

impl<'a> Predicate<'a> {
    /// Classify raw predicate text, splitting equalities at the first `=`.
    pub fn parse(raw: &'a str) -> Self {
        match raw.split_once('=') {
            Some((left, right)) => Predicate::Equality { left, right },
            None => Predicate::Fragment(raw),
        }
    }
}

/// How the right-hand side of an equality is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RightHandSide {
    QuotedLiteral,
    TableReference,
    FieldReference,
    Literal,
}

pub fn is_quoted_literal(right: &str) -> bool {
    right.contains('\'') || right.contains('"')
}

pub fn matches_known_table(right: &str, tables: &TableList) -> bool {
    tables.iter().any(|table| right.contains(table))
}

pub fn matches_known_field(right: &str, tables: &TableList, field_map: &FieldMap) -> bool {
    field_map
        .fields(tables.default_table())
        .any(|field| right.contains(field))
}

/// Apply the right-hand rules in priority order.
pub fn classify_right_hand(right: &str, tables: &TableList, field_map: &FieldMap) -> RightHandSide {
    if is_quoted_literal(right) {
        RightHandSide::QuotedLiteral
    } else if matches_known_table(right, tables) {
        RightHandSide::TableReference
    } else if matches_known_field(right, tables, field_map) {
        RightHandSide::FieldReference
    } else {
        RightHandSide::Literal
    }
}

fn rewrite_equality(
    left: &str,
    right: &str,
    tables: &TableList,
    field_map: &FieldMap,
) -> Result<String, SqlAliasError> {
    let left = resolve_field(&strip_whitespace(left), tables, field_map)?;

    // Quoted literals keep their inner whitespace; everything else is an
    // identifier or bare literal and loses it
    let right = match classify_right_hand(right, tables, field_map) {
        RightHandSide::QuotedLiteral => right.trim().to_string(),
        RightHandSide::TableReference => resolve_field(&strip_whitespace(right), tables, field_map)?,
        RightHandSide::FieldReference => {
            resolve_in_table(tables.default_table(), &strip_whitespace(right), field_map)?
        }
        RightHandSide::Literal => strip_whitespace(right),
    };

    Ok(format!("{} = {}", left, right))
}

fn rewrite_fragment(
    fragment: &str,
    tables: &TableList,
    field_map: &FieldMap,
) -> Result<String, SqlAliasError> {
    let fragment = fragment.trim();
    let Some(word) = fragment.split_whitespace().next() else {
        return Ok(String::new());
    };

    let resolved = resolve_field(word, tables, field_map)?;
    Ok(fragment.replacen(word, &resolved, 1))
}

/// Rewrite each predicate of a WHERE body (keyword already removed).
pub fn rewrite_predicates(
    body: &str,
    tables: &TableList,
    field_map: &FieldMap,
) -> Result<Vec<String>, SqlAliasError> {
    let mut rewritten = Vec::new();
    for raw in body.split(AND_SEPARATOR) {
        if raw.trim().is_empty() {
            continue;
        }
        let predicate = Predicate::parse(raw);
        trace!(?predicate, "rewriting predicate");
        let output = match predicate {
            Predicate::Equality { left, right } => rewrite_equality(left, right, tables, field_map)?,
            Predicate::Fragment(fragment) => rewrite_fragment(fragment, tables, field_map)?,
        };
        rewritten.push(output);
    }
    Ok(rewritten)
}

/// Rewrite a WHERE clause as `" WHERE <p1> AND <p2> "`.
pub fn rewrite_where(
    clause: &str,
    tables: &TableList,
    field_map: &FieldMap,
) -> Result<String, SqlAliasError> {
    let body = strip_leading_keyword(clause, "WHERE").unwrap_or(clause);
    let predicates = rewrite_predicates(body, tables, field_map)?;
    Ok(format!(" WHERE {} ", predicates.join(" AND ")))
}
