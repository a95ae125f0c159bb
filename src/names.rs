//! Validation for names that become path segments or object key prefixes

use std::sync::LazyLock;

use regex::Regex;

/// Letters, digits, `_`, `.`, `+` and `-`, not starting with a dot
static PATH_SAFE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_][A-Za-z0-9._+-]*$").unwrap());

/// Returns true if `name` can be joined onto a storage path without escaping it.
///
/// Rejects empty names, `.`/`..`, separators and any other character outside
/// the allowed set.
pub fn is_path_safe(name: &str) -> bool {
    PATH_SAFE_RE.is_match(name)
}
