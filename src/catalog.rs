//! Upstream game version catalog
//!
//! The Mojang launcher manifest lists every published game version with a
//! release/snapshot classification. A run needs at most one copy of it, so
//! [`GameVersionCatalog`] fetches lazily on first use and keeps the stable
//! release ids for the rest of the run.

use std::cell::OnceCell;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

use crate::error::PublishError;

/// Mojang version manifest URL
pub const MOJANG_VERSION_MANIFEST_URL: &str =
    "https://piston-meta.mojang.com/mc/game/version_manifest_v2.json";

/// Version manifest payload
#[derive(Debug, Clone, Deserialize)]
pub struct VersionManifest {
    pub versions: Vec<ManifestEntry>,
}

/// One game version in the manifest
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl ManifestEntry {
    pub fn is_release(&self) -> bool {
        self.kind == "release"
    }
}

impl VersionManifest {
    /// Ids of stable releases, in manifest order
    pub fn release_ids(&self) -> Vec<String> {
        self.versions
            .iter()
            .filter(|v| v.is_release())
            .map(|v| v.id.clone())
            .collect()
    }
}

/// Somewhere a version manifest can be loaded from
pub trait ManifestSource {
    fn fetch(&self) -> Result<VersionManifest, PublishError>;
}

/// Loads the manifest over HTTPS
pub struct MojangManifest {
    url: String,
}

impl Default for MojangManifest {
    fn default() -> Self {
        Self::new(MOJANG_VERSION_MANIFEST_URL)
    }
}

impl MojangManifest {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl ManifestSource for MojangManifest {
    fn fetch(&self) -> Result<VersionManifest, PublishError> {
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(crate::modrinth::USER_AGENT)
            .build()
            .context("Failed to create HTTP client")
            .map_err(|e| PublishError::upstream_with_source("HTTP client unavailable", e))?;

        let response = client
            .get(&self.url)
            .send()
            .with_context(|| format!("Failed to fetch {}", self.url))
            .map_err(|e| PublishError::upstream_with_source("request failed", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PublishError::upstream(format!(
                "{} returned HTTP {}",
                self.url,
                status
            )));
        }

        response
            .json::<VersionManifest>()
            .with_context(|| format!("Unexpected manifest shape from {}", self.url))
            .map_err(|e| PublishError::upstream_with_source("malformed manifest", e))
    }
}

/// Stable release ids, fetched at most once per run
pub struct GameVersionCatalog {
    source: Box<dyn ManifestSource>,
    releases: OnceCell<Vec<String>>,
}

impl GameVersionCatalog {
    pub fn new(source: impl ManifestSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            releases: OnceCell::new(),
        }
    }

    /// Catalog backed by the live Mojang manifest
    pub fn mojang() -> Self {
        Self::new(MojangManifest::default())
    }

    /// Stable release ids, fetching the manifest on first call
    ///
    /// A failed fetch is not cached; every failure is fatal to the run
    /// anyway.
    pub fn releases(&self) -> Result<&[String], PublishError> {
        if let Some(releases) = self.releases.get() {
            return Ok(releases.as_slice());
        }
        let releases = self.source.fetch()?.release_ids();
        Ok(self.releases.get_or_init(|| releases).as_slice())
    }
}
