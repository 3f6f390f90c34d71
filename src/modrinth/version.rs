//! Version metadata sent in the `data` part

use std::sync::LazyLock;

use clap::ValueEnum;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{hints, PublishError};

static ALPHA_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\balpha\b").expect("alpha pattern is valid"));

static BETA_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:beta|pre\d*|rc\d*)\b").expect("beta pattern is valid")
});

/// Release channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum VersionType {
    Release,
    Beta,
    Alpha,
}

impl VersionType {
    /// Infer the channel from whole words in a version string
    ///
    /// `alpha` wins over `beta`/`preN`/`rcN`; anything else is a release.
    pub fn infer(version: &str) -> Self {
        if ALPHA_WORD.is_match(version) {
            VersionType::Alpha
        } else if BETA_WORD.is_match(version) {
            VersionType::Beta
        } else {
            VersionType::Release
        }
    }
}

impl std::fmt::Display for VersionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VersionType::Release => write!(f, "release"),
            VersionType::Beta => write!(f, "beta"),
            VersionType::Alpha => write!(f, "alpha"),
        }
    }
}

/// Status to create the version with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Listed,
    Archived,
    Draft,
    Unlisted,
    Scheduled,
    Unknown,
}

/// Status to request from moderation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RequestedStatus {
    Listed,
    Archived,
    Draft,
    Unlisted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyType {
    Required,
    Optional,
    Incompatible,
    Embedded,
}

/// A dependency on another project, version or file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    pub dependency_type: DependencyType,
}

/// Resolved inputs for one version, before files are attached
#[derive(Debug, Clone)]
pub struct VersionDraft {
    pub project_id: String,
    /// Display name; the version string when unset
    pub name: Option<String>,
    pub version: String,
    pub changelog: Option<String>,
    pub dependencies: Vec<Dependency>,
    /// Concrete game versions (wildcards already expanded)
    pub game_versions: Vec<String>,
    /// Explicit channel; inferred from `version` when unset
    pub channel: Option<VersionType>,
    /// Explicit featured flag; defaults to "is a release"
    pub featured: Option<bool>,
    pub loaders: Vec<String>,
    pub status: Option<Status>,
    pub requested_status: Option<RequestedStatus>,
}

impl VersionDraft {
    /// Check the inputs that no registry would accept
    pub fn validate(&self) -> Result<(), PublishError> {
        if self.version.trim().is_empty() {
            return Err(PublishError::invalid_input("No version number provided"));
        }
        if self.loaders.is_empty() {
            return Err(PublishError::invalid_input_with_hint(
                "No loaders provided",
                hints::loaders(),
            ));
        }
        Ok(())
    }

    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.version,
        }
    }

    /// Final channel: explicit first, then inferred
    pub fn version_type(&self) -> VersionType {
        self.channel
            .unwrap_or_else(|| VersionType::infer(&self.version))
    }

    /// Final featured flag, computed after the channel is settled
    pub fn featured(&self) -> bool {
        self.featured
            .unwrap_or_else(|| self.version_type() == VersionType::Release)
    }

    /// Combine with the upload part names into the `data` payload
    pub fn into_payload(self, file_parts: Vec<String>, primary_file: String) -> PublishPayload {
        let version_type = self.version_type();
        let featured = self.featured();
        PublishPayload {
            name: self.display_name().to_string(),
            version_number: self.version,
            changelog: self.changelog,
            dependencies: self.dependencies,
            game_versions: self.game_versions,
            version_type,
            loaders: self.loaders,
            featured,
            status: self.status,
            requested_status: self.requested_status,
            project_id: self.project_id,
            file_parts,
            primary_file,
        }
    }
}

/// Body of the `data` part of `POST /v2/version`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishPayload {
    pub name: String,
    pub version_number: String,
    pub changelog: Option<String>,
    pub dependencies: Vec<Dependency>,
    pub game_versions: Vec<String>,
    pub version_type: VersionType,
    pub loaders: Vec<String>,
    pub featured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_status: Option<RequestedStatus>,
    pub project_id: String,
    pub file_parts: Vec<String>,
    pub primary_file: String,
}
