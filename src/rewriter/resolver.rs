//! Field reference resolution
//!
//! Turns a bare (`full_name`) or qualified (`user.full_name`) identifier
//! into a vendor token using the tables in scope for the current query.

use tracing::trace;

use super::token::VendorToken;
use crate::error::SqlAliasError;
use crate::field_map::FieldMap;

/// Ordered table names from a query's FROM clause.
///
/// The first entry is the default table for unqualified field references.
/// Duplicate names are not rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableList {
    tables: Vec<String>,
}

impl TableList {
    /// Build a table list, rejecting an empty FROM clause.
    pub fn new(tables: Vec<String>) -> Result<Self, SqlAliasError> {
        if tables.is_empty() {
            return Err(SqlAliasError::malformed("FROM", "no tables listed"));
        }
        Ok(Self { tables })
    }

    pub fn default_table(&self) -> &str {
        &self.tables[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Resolve `field` against an explicit table.
pub fn resolve_in_table(
    table: &str,
    field: &str,
    field_map: &FieldMap,
) -> Result<String, SqlAliasError> {
    let vendor = field_map.vendor_field(table, field)?;
    let token = VendorToken::Field {
        table,
        field: vendor,
    }
    .to_string();
    trace!(table, field, %token, "resolved field");
    Ok(token)
}

/// Resolve one identifier token.
///
/// A dotted token names its table explicitly (split at the first `.`);
/// anything else resolves against the default table. Wildcards are not
/// handled here.
pub fn resolve_field(
    token: &str,
    tables: &TableList,
    field_map: &FieldMap,
) -> Result<String, SqlAliasError> {
    match token.split_once('.') {
        Some((table, field)) => resolve_in_table(table, field, field_map),
        None => resolve_in_table(tables.default_table(), token, field_map),
    }
}
