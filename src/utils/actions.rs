//! GitHub Actions step outputs and event payload access

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

/// Environment variable naming the step output file
pub const GITHUB_OUTPUT: &str = "GITHUB_OUTPUT";

/// Environment variable naming the event that triggered the workflow
pub const GITHUB_EVENT_NAME: &str = "GITHUB_EVENT_NAME";

/// Environment variable naming the JSON file holding the event payload
pub const GITHUB_EVENT_PATH: &str = "GITHUB_EVENT_PATH";

/// Set a step output
///
/// Appends to the file named by `GITHUB_OUTPUT` when running inside a
/// workflow, otherwise prints `name=value` so local runs still see it.
pub fn set_output(name: &str, value: &str) -> Result<()> {
    let line = format_output(name, value);
    match std::env::var_os(GITHUB_OUTPUT) {
        Some(path) if !path.is_empty() => append_output(Path::new(&path), &line),
        _ => {
            print!("{}", line);
            Ok(())
        }
    }
}

fn append_output(path: &Path, line: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open step output file {}", path.display()))?;
    file.write_all(line.as_bytes())
        .with_context(|| format!("Failed to write step output file {}", path.display()))
}

/// Render one output entry, using the delimiter form for multi-line values
fn format_output(name: &str, value: &str) -> String {
    if value.contains('\n') {
        let delimiter = format!("ghadelimiter_{}", uuid::Uuid::new_v4().simple());
        format!("{name}<<{delimiter}\n{value}\n{delimiter}\n")
    } else {
        format!("{name}={value}\n")
    }
}

/// Name of the triggering workflow event, if running inside a workflow
pub fn event_name() -> Option<String> {
    std::env::var(GITHUB_EVENT_NAME)
        .ok()
        .filter(|name| !name.is_empty())
}

/// Body text of the release that triggered the workflow
///
/// Returns `None` when there is no event payload or it carries no
/// release body.
pub fn release_body() -> Result<Option<String>> {
    let Some(path) = std::env::var_os(GITHUB_EVENT_PATH).filter(|p| !p.is_empty()) else {
        return Ok(None);
    };
    let content = std::fs::read_to_string(&path).with_context(|| {
        format!(
            "Failed to read event payload {}",
            Path::new(&path).display()
        )
    })?;
    release_body_from_payload(&content)
}

fn release_body_from_payload(content: &str) -> Result<Option<String>> {
    let payload: serde_json::Value =
        serde_json::from_str(content).context("Failed to parse event payload JSON")?;
    Ok(payload
        .pointer("/release/body")
        .and_then(|body| body.as_str())
        .map(str::to_string))
}
