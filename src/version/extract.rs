//! Version extraction from storage entry names
//!
//! Entries are expected to be named `<artifact>-<version><extensions>`, e.g.
//! `app-2.0.0-beta.1.tar.gz`. Extensions are peeled off one dotted segment at a
//! time for as long as the segment carries no digit, so `.tar.gz` goes away while
//! `.1` (part of the version itself) stays.

/// Extract the version string from an entry name belonging to `artifact_name`.
///
/// Returns `None` when the entry belongs to another artifact or when nothing is
/// left once the prefix and extensions are stripped.
///
/// Examples:
/// - ("app-2.0.0.txt", "app") -> Some("2.0.0")
/// - ("app-2.0.0-beta.1.txt", "app") -> Some("2.0.0-beta.1")
/// - ("other-1.0.0.txt", "app") -> None
pub fn extract_version<'a>(name: &'a str, artifact_name: &str) -> Option<&'a str> {
    let mut version = name.strip_prefix(artifact_name)?.strip_prefix('-')?;

    while let Some(extension) = trailing_extension(version) {
        if contains_digit(extension) {
            break;
        }
        version = &version[..version.len() - extension.len()];
    }

    (!version.is_empty()).then_some(version)
}

/// Returns true if any character of `s` is an ASCII digit
pub fn contains_digit(s: &str) -> bool {
    s.bytes().any(|b| b.is_ascii_digit())
}

/// The suffix starting at the last `.` of the final `/`-separated element,
/// or `None` when that element has no dot.
fn trailing_extension(s: &str) -> Option<&str> {
    let start = s.rfind(['.', '/'])?;
    s[start..].starts_with('.').then(|| &s[start..])
}
