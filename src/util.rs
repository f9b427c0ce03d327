//! Shared utility helpers.

/// Case-insensitive substring search without allocating an uppercase copy.
#[inline]
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    let needle_bytes = needle.as_bytes();
    let haystack_bytes = haystack.as_bytes();
    if needle_bytes.len() > haystack_bytes.len() {
        return false;
    }
    haystack_bytes
        .windows(needle_bytes.len())
        .any(|window| window.eq_ignore_ascii_case(needle_bytes))
}

/// Case-insensitive starts_with check without allocating.
#[inline]
pub fn starts_with_ci(haystack: &str, needle: &str) -> bool {
    haystack.len() >= needle.len()
        && haystack.as_bytes()[..needle.len()].eq_ignore_ascii_case(needle.as_bytes())
}

/// Remove every whitespace character, not just the leading/trailing ones.
#[inline]
pub fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

#[inline]
fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Strip a leading (possibly multi-word) keyword such as `GROUP BY`.
///
/// Words are matched case-insensitively and may be separated by any amount
/// of whitespace. A word only matches when it is not immediately followed by
/// an identifier character, so `WHERE` does not strip the front of
/// `WHEREVER`. Returns `None` when the keyword is not at the front.
pub fn strip_leading_keyword<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    let mut rest = text;
    for word in keyword.split_whitespace() {
        rest = rest.trim_start();
        if !starts_with_ci(rest, word) {
            return None;
        }
        if rest.as_bytes().get(word.len()).is_some_and(|b| is_ident_byte(*b)) {
            return None;
        }
        rest = &rest[word.len()..];
    }
    Some(rest)
}
