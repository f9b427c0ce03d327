//! rust-sqlalias: rewrite restricted SQL into a bracket-token vendor dialect
//!
//! Callers write ordinary SQL against generic table and field names; this
//! library resolves every identifier through a static [`FieldMap`] and emits
//! the vendor's `{Table:Field}` / `{Table}` token syntax.
//!
//! ```no_run
//! use rust_sqlalias::{transform, FieldMap};
//!
//! let map = FieldMap::from_json_str(r#"{"user": {"id": "Id"}}"#).unwrap();
//! let rewritten = transform("SELECT id FROM user", &map).unwrap();
//! assert_eq!(rewritten, "SELECT {user:Id}  FROM {user} ");
//! ```

pub mod batch;
pub mod error;
pub mod field_map;
pub mod rewriter;
mod util;

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

pub use error::SqlAliasError;
pub use field_map::FieldMap;
pub use rewriter::{transform, Rewriter};

/// Options for rewriting queries from the command line
#[derive(Debug, Clone)]
pub struct RewriteOptions {
    /// Path to the JSON field map
    pub field_map_path: PathBuf,
    /// Query script to read (one query per line); stdin is used by the CLI when absent
    pub input_path: Option<PathBuf>,
}

/// Load the field map named in `options`
pub fn load_field_map(options: &RewriteOptions) -> Result<FieldMap> {
    let field_map = FieldMap::from_path(&options.field_map_path)?;
    info!(
        path = %options.field_map_path.display(),
        tables = field_map.table_names().count(),
        "loaded field map"
    );
    Ok(field_map)
}

/// Load the field map and rewrite every query of `script`
pub fn rewrite_queries(options: &RewriteOptions, script: &str) -> Result<Vec<String>> {
    // Step 1: Load the field map
    let field_map = load_field_map(options)?;

    // Step 2: Rewrite each query
    let rewriter = Rewriter::new(&field_map);
    let source = options
        .input_path
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "<stdin>".to_string());
    let rewritten = batch::rewrite_script(script, &rewriter)
        .with_context(|| format!("Failed to rewrite queries from {}", source))?;

    info!(queries = rewritten.len(), "rewrote queries");
    Ok(rewritten)
}

/// Read the input script named in `options` and rewrite it
pub fn rewrite_file(options: &RewriteOptions) -> Result<Vec<String>> {
    let path = options
        .input_path
        .as_ref()
        .context("No input file given")?;
    let script = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read query file: {}", path.display()))?;

    rewrite_queries(options, &script)
}
