//! Comma-separated list splitting

use crate::util::strip_whitespace;

/// Split a comma-delimited fragment into whitespace-free entries.
///
/// All whitespace is removed before splitting, so `a, b` and `a ,b` give
/// the same result. Empty entries (from an empty input or a trailing comma)
/// are dropped.
pub fn split_list(raw: &str) -> Vec<String> {
    strip_whitespace(raw)
        .split(',')
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}
