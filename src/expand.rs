//! Wildcard game version expansion
//!
//! `1.21.x` stands for every stable release in the `1.21` line. Each such
//! token is replaced, in place, by the matching catalog ids in catalog
//! order. Other tokens pass through untouched and nothing is deduplicated.

use crate::catalog::GameVersionCatalog;
use crate::error::PublishError;

/// The `major.minor` line of a `major.minor.x` token, if it is one
pub fn wildcard_line(token: &str) -> Option<&str> {
    let line = token.strip_suffix(".x")?;
    let (major, minor) = line.split_once('.')?;
    let is_number = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    (is_number(major) && is_number(minor)).then_some(line)
}

/// Whether `id` belongs to the release line `line`
///
/// `1.21` belongs to itself and to `1.21.1`, but not `1.210`.
pub fn in_release_line(id: &str, line: &str) -> bool {
    match id.strip_prefix(line) {
        Some(rest) => rest.is_empty() || rest.starts_with('.'),
        None => false,
    }
}

/// Replace wildcard tokens with the concrete versions they cover
///
/// The catalog is consulted only when at least one wildcard is present.
pub fn expand_game_versions(
    tokens: &[String],
    catalog: &GameVersionCatalog,
) -> Result<Vec<String>, PublishError> {
    if !tokens.iter().any(|t| wildcard_line(t).is_some()) {
        return Ok(tokens.to_vec());
    }

    let releases = catalog.releases()?;
    let mut expanded = Vec::with_capacity(tokens.len());
    for token in tokens {
        match wildcard_line(token) {
            Some(line) => expanded.extend(
                releases
                    .iter()
                    .filter(|id| in_release_line(id, line))
                    .cloned(),
            ),
            None => expanded.push(token.clone()),
        }
    }
    Ok(expanded)
}
