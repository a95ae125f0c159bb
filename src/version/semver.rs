use semver::Version;

use crate::version::error::VersionError;

/// Parse a version string strictly as `major.minor.patch[-pre][+build]`.
///
/// Unlike lenient registry parsing, partial versions ("1", "1.2") and `v`
/// prefixes are rejected.
pub fn parse_version(version: &str) -> Result<Version, VersionError> {
    Version::parse(version).map_err(|source| VersionError::Parse {
        version: version.to_string(),
        source,
    })
}

/// Find the highest version by semver precedence.
///
/// Returns `Ok(None)` for an empty list. A single unparseable entry fails the
/// whole lookup; there is no best-effort result.
pub fn find_latest(versions: &[String]) -> Result<Option<String>, VersionError> {
    let mut parsed = versions
        .iter()
        .map(|v| parse_version(v))
        .collect::<Result<Vec<_>, _>>()?;

    parsed.sort();

    Ok(parsed.pop().map(|latest| latest.to_string()))
}
