//! Decoding of raw action inputs
//!
//! GitHub Actions hands every input over as a string, with unset inputs
//! arriving as `""`. List inputs are either a JSON array (when the raw
//! value starts with `[`) or one entry per line.

use anyhow::{Context, Result};
use clap::ValueEnum;

use crate::error::PublishError;
use crate::modrinth::Dependency;

/// How plain-text list inputs are split
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    Newline,
    Comma,
}

impl Separator {
    fn as_char(self) -> char {
        match self {
            Separator::Newline => '\n',
            Separator::Comma => ',',
        }
    }
}

/// `None` for blank input, the trimmed value otherwise
pub fn optional(raw: &str) -> Option<String> {
    let value = raw.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Decode a list input; blank entries are dropped
pub fn parse_list(input: &str, raw: &str, separator: Separator) -> Result<Vec<String>> {
    let raw = raw.trim();
    let entries: Vec<String> = if raw.starts_with('[') {
        serde_json::from_str(raw).map_err(|e| {
            PublishError::invalid_input(format!(
                "Input `{}` is not a JSON array of strings: {}",
                input, e
            ))
        })?
    } else {
        raw.split(separator.as_char()).map(str::to_string).collect()
    };

    Ok(entries
        .into_iter()
        .map(|entry| entry.trim().to_string())
        .filter(|entry| !entry.is_empty())
        .collect())
}

/// Decode a boolean input; only `true` (any case) is true
pub fn parse_bool(raw: &str) -> Option<bool> {
    optional(raw).map(|value| value.eq_ignore_ascii_case("true"))
}

/// Decode an enumerated input such as `channel` or `status`
pub fn parse_choice<T: ValueEnum>(input: &str, raw: &str) -> Result<Option<T>, PublishError> {
    let Some(value) = optional(raw) else {
        return Ok(None);
    };
    T::from_str(&value, true).map(Some).map_err(|_| {
        let allowed: Vec<String> = T::value_variants()
            .iter()
            .filter_map(|v| v.to_possible_value())
            .map(|v| v.get_name().to_string())
            .collect();
        PublishError::invalid_input_with_hint(
            format!("Invalid value \"{}\" for input `{}`", value, input),
            format!("Expected one of: {}", allowed.join(", ")),
        )
    })
}

/// Decode the `dependencies` JSON array; blank means none
pub fn parse_dependencies(raw: &str) -> Result<Vec<Dependency>> {
    match optional(raw) {
        Some(json) => serde_json::from_str(&json)
            .context("Input `dependencies` is not a valid JSON array of dependencies"),
        None => Ok(Vec::new()),
    }
}
