//! Modrinth version publishing
//!
//! - [`version`]: the JSON metadata sent alongside the files
//! - [`request`]: upload ordering and multipart body assembly
//! - [`client`]: the `POST /v2/version` call and response classification

pub mod client;
pub mod request;
pub mod version;

use clap::ValueEnum;

pub use client::RegistryClient;
pub use request::{build_request, PublishRequest, Uploads};
pub use version::{Dependency, RequestedStatus, Status, VersionDraft, VersionType};

/// Identifying `User-Agent` for every outbound request
pub const USER_AGENT: &str = concat!(
    "modrinth-publish/",
    env!("CARGO_PKG_VERSION"),
    " (github.com/cloudnode-pro/modrinth-publish)"
);

/// Production API host
pub const DEFAULT_API_DOMAIN: &str = "api.modrinth.com";

/// Path layout of the version-creation endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ApiLayout {
    /// `/v2/version`
    #[default]
    Standard,
    /// `/api/v2/version`, for hosts that mount the API under `/api`
    Legacy,
}

impl ApiLayout {
    pub fn version_path(self) -> &'static str {
        match self {
            ApiLayout::Standard => "/v2/version",
            ApiLayout::Legacy => "/api/v2/version",
        }
    }
}

impl std::fmt::Display for ApiLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiLayout::Standard => write!(f, "standard"),
            ApiLayout::Legacy => write!(f, "legacy"),
        }
    }
}

/// Website host matching an API host
///
/// `api.modrinth.com` → `modrinth.com`,
/// `staging-api.modrinth.com` → `staging.modrinth.com`.
pub fn site_domain(api_domain: &str) -> String {
    if let Some(rest) = api_domain.strip_prefix("api.") {
        return rest.to_string();
    }
    match api_domain.split_once('.') {
        Some((label, rest)) => match label.strip_suffix("-api") {
            Some(env) => format!("{}.{}", env, rest),
            None => api_domain.to_string(),
        },
        None => api_domain.to_string(),
    }
}

/// Public page of a created version
pub fn version_url(api_domain: &str, project: &str, version_id: &str) -> String {
    format!(
        "https://{}/project/{}/version/{}",
        site_domain(api_domain),
        project,
        version_id
    )
}
