//! Vendor token output grammar
//!
//! ```text
//! field token := "{" Table ":" VendorField "}"
//! table token := "{" Table "}"
//! ```

use std::fmt;

/// A bracket-delimited identifier in the vendor dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VendorToken<'a> {
    Field { table: &'a str, field: &'a str },
    Table(&'a str),
}

impl fmt::Display for VendorToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VendorToken::Field { table, field } => write!(f, "{{{}:{}}}", table, field),
            VendorToken::Table(table) => write!(f, "{{{}}}", table),
        }
    }
}
