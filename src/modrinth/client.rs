//! Registry client for `POST /v2/version`

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};

use super::request::PublishRequest;
use super::{ApiLayout, USER_AGENT};
use crate::error::PublishError;

/// Sends version-creation requests to one API host
pub struct RegistryClient {
    http: reqwest::blocking::Client,
    endpoint: String,
    token: String,
}

impl RegistryClient {
    /// Create a client for `https://{api_domain}{layout path}`
    pub fn new(api_domain: &str, layout: ApiLayout, token: impl Into<String>) -> Result<Self> {
        Self::with_endpoint(
            format!("https://{}{}", api_domain, layout.version_path()),
            token,
        )
    }

    /// Create a client posting to a full endpoint URL
    pub(crate) fn with_endpoint(
        endpoint: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self> {
        // Uploads can be large, so only connecting is bounded
        let http = reqwest::blocking::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(None::<Duration>)
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
            token: token.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send the request and collect the full response
    ///
    /// Only transport failures are errors here; a non-2xx answer is a
    /// normal [`RegistryResult`] for the caller to classify.
    pub fn create_version(&self, request: &PublishRequest) -> Result<RegistryResult> {
        let response = self
            .http
            .post(&self.endpoint)
            .header(AUTHORIZATION, &self.token)
            .header(CONTENT_TYPE, request.body.content_type())
            .body(request.body.encode())
            .send()
            .with_context(|| format!("Failed to send request to {}", self.endpoint))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .with_context(|| format!("Failed to read response from {}", self.endpoint))?;

        Ok(RegistryResult::from_response(status, body))
    }
}

/// Outcome of the version-creation call
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryResult {
    pub status: u16,
    pub raw_body: String,
    /// `None` when the body is not JSON
    pub parsed_body: Option<serde_json::Value>,
    pub version_id: Option<String>,
}

impl RegistryResult {
    pub fn from_response(status: u16, raw_body: String) -> Self {
        let parsed_body = serde_json::from_str::<serde_json::Value>(&raw_body).ok();
        let version_id = parsed_body
            .as_ref()
            .and_then(|body| body.get("id"))
            .and_then(|id| id.as_str())
            .map(str::to_string);
        Self {
            status,
            raw_body,
            parsed_body,
            version_id,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body rendered for humans: pretty JSON when parseable, raw text otherwise
    pub fn detail(&self) -> String {
        self.parsed_body
            .as_ref()
            .and_then(|body| serde_json::to_string_pretty(body).ok())
            .unwrap_or_else(|| self.raw_body.clone())
    }

    /// Classify the call
    ///
    /// `Ok(Some(id))` on success, `Ok(None)` on success with an unexpected
    /// body, and a registry error for any non-2xx status.
    pub fn outcome(&self) -> Result<Option<&str>, PublishError> {
        if !self.is_success() {
            return Err(PublishError::registry(self.status, self.detail()));
        }
        Ok(self.version_id.as_deref())
    }
}
