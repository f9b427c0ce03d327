//! Static table -> field alias resource
//!
//! A [`FieldMap`] maps every table name to the generic field names callers
//! write in SQL, and each generic name to the vendor field name that appears
//! inside a `{Table:Field}` token. It is built once (from JSON or in code) and
//! then only borrowed immutably by the rewriter, so a single map can be shared
//! across threads without locking.
//!
//! ## JSON format
//!
//! ```json
//! {
//!   "user": { "id": "Id", "full_name": "FullName__c" },
//!   "account": { "id": "Id", "name": "Name" }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SqlAliasError;

/// Generic field name -> vendor field name for one table
pub type TableFields = BTreeMap<String, String>;

/// Read-only table -> field alias map
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMap {
    tables: BTreeMap<String, TableFields>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a field map from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load a field map from a JSON file on disk.
    pub fn from_path(path: &Path) -> Result<Self, SqlAliasError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| SqlAliasError::FieldMapReadError {
                path: path.to_path_buf(),
                source: e,
            })?;

        Self::from_json_str(&content).map_err(|e| SqlAliasError::FieldMapParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Register (or replace) the aliases of one table.
    ///
    /// Only meant for construction; the rewriter never mutates a map.
    pub fn insert_table<I, K, V>(&mut self, table: impl Into<String>, fields: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let fields = fields
            .into_iter()
            .map(|(generic, vendor)| (generic.into(), vendor.into()))
            .collect();
        self.tables.insert(table.into(), fields);
    }

    /// Aliases of one table, if the table is known.
    pub fn table(&self, table: &str) -> Option<&TableFields> {
        self.tables.get(table)
    }

    pub fn contains_table(&self, table: &str) -> bool {
        self.tables.contains_key(table)
    }

    /// Vendor name for `table.field`.
    ///
    /// Distinguishes an unknown table from an unknown field so callers get a
    /// precise error.
    pub fn vendor_field(&self, table: &str, field: &str) -> Result<&str, SqlAliasError> {
        let fields = self
            .tables
            .get(table)
            .ok_or_else(|| SqlAliasError::UnknownTable {
                table: table.to_string(),
            })?;

        fields
            .get(field)
            .map(String::as_str)
            .ok_or_else(|| SqlAliasError::UnknownField {
                table: table.to_string(),
                field: field.to_string(),
            })
    }

    /// Generic field names registered for `table` (empty for unknown tables).
    pub fn fields(&self, table: &str) -> impl Iterator<Item = &str> {
        self.tables
            .get(table)
            .into_iter()
            .flat_map(|fields| fields.keys().map(String::as_str))
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl<T, I, K, V> FromIterator<(T, I)> for FieldMap
where
    T: Into<String>,
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<It: IntoIterator<Item = (T, I)>>(iter: It) -> Self {
        let mut map = FieldMap::new();
        for (table, fields) in iter {
            map.insert_table(table, fields);
        }
        map
    }
}
