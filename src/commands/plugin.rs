//! Plugin command implementation
//!
//! Publishes a single server plugin jar, reading name, version and
//! supported game versions from the descriptor inside it. Meant to run on
//! GitHub release events; the release notes become the changelog unless
//! one is given.

use anyhow::Result;
use clap::Args;

use crate::catalog::GameVersionCatalog;
use crate::config::inputs::{self, Separator};
use crate::error::{hints, PublishError};
use crate::files::FileHandle;
use crate::infer::infer_from_archive;
use crate::modrinth::{
    build_request, version_url, ApiLayout, RegistryClient, Uploads, VersionDraft, VersionType,
    DEFAULT_API_DOMAIN,
};
use crate::utils::actions::{self, set_output};
use crate::utils::terminal::{print_debug, print_info, print_success, print_warning};

/// Publish a plugin jar with metadata inferred from its descriptor
#[derive(Args, Debug)]
pub struct PluginCommand {
    /// Modrinth API token
    #[arg(long, env = "INPUT_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Project ID or slug
    #[arg(long, env = "INPUT_PROJECT")]
    pub project: String,

    /// Plugin jar to upload
    #[arg(long, env = "INPUT_FILE")]
    pub file: String,

    /// Changelog in Markdown (default: the release notes)
    #[arg(long, env = "INPUT_CHANGELOG", default_value = "")]
    pub changelog: String,

    /// Supported loaders, comma separated or a JSON array
    #[arg(long, env = "INPUT_LOADERS")]
    pub loaders: String,

    /// Release channel (default: inferred from the plugin version)
    #[arg(long, env = "INPUT_CHANNEL", default_value = "")]
    pub channel: String,

    /// Feature the version (default: true for releases)
    #[arg(long, env = "INPUT_FEATURED", default_value = "")]
    pub featured: String,

    /// Dependencies as a JSON array
    #[arg(long, env = "INPUT_DEPENDENCIES", default_value = "")]
    pub dependencies: String,

    /// Modrinth API host
    #[arg(long, env = "INPUT_API-DOMAIN", default_value = DEFAULT_API_DOMAIN)]
    pub api_domain: String,

    /// Endpoint path layout: standard (/v2) or legacy (/api/v2)
    #[arg(long, env = "INPUT_API-LAYOUT", default_value = "")]
    pub api_layout: String,
}

impl PluginCommand {
    /// Execute the plugin command
    pub fn execute(self, verbose: bool) -> Result<()> {
        if let Some(event) = actions::event_name() {
            if event != "release" {
                print_warning(&format!(
                    "This command only publishes on release events. Current event: {}",
                    event
                ));
                return Ok(());
            }
        }

        let loaders = inputs::parse_list("loaders", &self.loaders, Separator::Comma)?;
        if loaders.is_empty() {
            return Err(
                PublishError::invalid_input_with_hint("No loaders provided", hints::loaders())
                    .into(),
            );
        }

        let changelog = match inputs::optional(&self.changelog) {
            Some(changelog) => Some(changelog),
            None => actions::release_body()?,
        };

        let file = FileHandle::new(self.file.trim());
        let uploads = Uploads::new(vec![file.clone()], None)?;

        print_info(&format!("Inferring metadata from {}…", file.name()));
        let catalog = GameVersionCatalog::mojang();
        let inferred = infer_from_archive(&file.read()?, &catalog)?.ok_or_else(|| {
            PublishError::invalid_input_with_hint(
                "Could not infer data from plugin jar",
                hints::descriptor(),
            )
        })?;
        print_debug(
            verbose,
            &format!("inferred: {}", serde_json::to_string(&inferred)?),
        );

        let draft = VersionDraft {
            project_id: self.project.trim().to_string(),
            name: Some(inferred.name),
            version: inferred.version,
            changelog,
            dependencies: inputs::parse_dependencies(&self.dependencies)?,
            game_versions: inferred.game_versions,
            channel: inputs::parse_choice::<VersionType>("channel", &self.channel)?,
            featured: inputs::parse_bool(&self.featured),
            loaders,
            status: None,
            requested_status: None,
        };
        draft.validate()?;

        let project = draft.project_id.clone();
        let request = build_request(draft, &uploads)?;

        let api_domain = inputs::optional(&self.api_domain)
            .unwrap_or_else(|| DEFAULT_API_DOMAIN.to_string());
        let layout = inputs::parse_choice::<ApiLayout>("api-layout", &self.api_layout)?
            .unwrap_or_default();
        let client = RegistryClient::new(&api_domain, layout, self.token.trim())?;

        match super::submit(&client, &request, verbose)? {
            Some(id) => {
                let url = version_url(&api_domain, &project, &id);
                set_output("version-id", &id)?;
                set_output("version-url", &url)?;
                print_success(&format!("Published {}", url));
            }
            None => print_success("Version published"),
        }
        Ok(())
    }
}
