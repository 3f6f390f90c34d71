//! Publish command implementation
//!
//! Creates a version from explicitly supplied metadata and any number of
//! files. Game versions may use `X.Y.x` wildcards.

use anyhow::Result;
use clap::Args;

use crate::catalog::GameVersionCatalog;
use crate::config::inputs::{self, Separator};
use crate::expand::{expand_game_versions, wildcard_line};
use crate::files::FileHandle;
use crate::modrinth::{
    build_request, ApiLayout, RegistryClient, RequestedStatus, Status, Uploads, VersionDraft,
    VersionType, DEFAULT_API_DOMAIN,
};
use crate::utils::actions::set_output;
use crate::utils::terminal::{create_spinner, print_debug, print_info, print_success};

/// Publish a version from explicit inputs
#[derive(Args, Debug)]
pub struct PublishCommand {
    /// Modrinth API token
    #[arg(long, env = "INPUT_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Project ID or slug
    #[arg(long, env = "INPUT_PROJECT")]
    pub project: String,

    /// Version display name (default: the version number)
    #[arg(long, env = "INPUT_NAME", default_value = "")]
    pub name: String,

    /// Version number, ideally semantic versioning
    #[arg(long, env = "INPUT_VERSION")]
    pub version: String,

    /// Release channel: release, beta or alpha (default: inferred from the version)
    #[arg(long, env = "INPUT_CHANNEL", default_value = "")]
    pub channel: String,

    /// Feature the version (default: true for releases)
    #[arg(long, env = "INPUT_FEATURED", default_value = "")]
    pub featured: String,

    /// Changelog in Markdown
    #[arg(long, env = "INPUT_CHANGELOG", default_value = "")]
    pub changelog: String,

    /// Supported loaders, one per line or a JSON array
    #[arg(long, env = "INPUT_LOADERS")]
    pub loaders: String,

    /// Supported game versions, one per line or a JSON array; `1.21.x` expands
    #[arg(long, env = "INPUT_GAME-VERSIONS", default_value = "")]
    pub game_versions: String,

    /// Files to upload, one per line or a JSON array
    #[arg(long, env = "INPUT_FILES")]
    pub files: String,

    /// File name of the primary file (default: the first file)
    #[arg(long, env = "INPUT_PRIMARY-FILE", default_value = "")]
    pub primary_file: String,

    /// Dependencies as a JSON array
    #[arg(long, env = "INPUT_DEPENDENCIES", default_value = "")]
    pub dependencies: String,

    /// Version status: listed, archived, draft, unlisted, scheduled or unknown
    #[arg(long, env = "INPUT_STATUS", default_value = "")]
    pub status: String,

    /// Requested status: listed, archived, draft or unlisted
    #[arg(long, env = "INPUT_REQUESTED-STATUS", default_value = "")]
    pub requested_status: String,

    /// Modrinth API host
    #[arg(long, env = "INPUT_API-DOMAIN", default_value = DEFAULT_API_DOMAIN)]
    pub api_domain: String,

    /// Endpoint path layout: standard (/v2) or legacy (/api/v2)
    #[arg(long, env = "INPUT_API-LAYOUT", default_value = "")]
    pub api_layout: String,
}

impl PublishCommand {
    /// Execute the publish command
    pub fn execute(self, verbose: bool) -> Result<()> {
        print_info("Parsing inputs…");
        let mut draft = self.draft()?;
        draft.validate()?;

        let files = inputs::parse_list("files", &self.files, Separator::Newline)?
            .into_iter()
            .map(FileHandle::new)
            .collect();
        let primary = inputs::optional(&self.primary_file);
        let uploads = Uploads::new(files, primary.as_deref())?;
        print_info(&format!("Primary file: {}", uploads.primary().name()));
        for file in uploads.files() {
            print_debug(verbose, &format!("file: {}", file.path().display()));
        }
        print_debug(verbose, &format!("draft: {:?}", draft));

        if draft.game_versions.iter().any(|v| wildcard_line(v).is_some()) {
            let catalog = GameVersionCatalog::mojang();
            let spinner = create_spinner("Fetching Mojang versions manifest…");
            let expanded = expand_game_versions(&draft.game_versions, &catalog);
            spinner.finish_and_clear();
            draft.game_versions = expanded?;
            print_debug(
                verbose,
                &format!("game versions: {}", draft.game_versions.join(", ")),
            );
        }

        print_info("Reading files…");
        let request = build_request(draft, &uploads)?;

        let api_domain = inputs::optional(&self.api_domain)
            .unwrap_or_else(|| DEFAULT_API_DOMAIN.to_string());
        let layout = inputs::parse_choice::<ApiLayout>("api-layout", &self.api_layout)?
            .unwrap_or_default();
        let client = RegistryClient::new(&api_domain, layout, self.token.trim())?;

        match super::submit(&client, &request, verbose)? {
            Some(id) => {
                set_output("version-id", &id)?;
                print_success(&format!("Published version {}", id));
            }
            None => print_success("Version published"),
        }
        Ok(())
    }

    /// Decode the metadata inputs
    fn draft(&self) -> Result<VersionDraft> {
        let game_versions = inputs::parse_list("game-versions", &self.game_versions, Separator::Newline)?
            .into_iter()
            .map(|v| v.to_lowercase())
            .collect();

        Ok(VersionDraft {
            project_id: self.project.trim().to_string(),
            name: inputs::optional(&self.name),
            version: self.version.trim().to_string(),
            changelog: inputs::optional(&self.changelog),
            dependencies: inputs::parse_dependencies(&self.dependencies)?,
            game_versions,
            channel: inputs::parse_choice::<VersionType>("channel", &self.channel)?,
            featured: inputs::parse_bool(&self.featured),
            loaders: inputs::parse_list("loaders", &self.loaders, Separator::Newline)?,
            status: inputs::parse_choice::<Status>("status", &self.status)?,
            requested_status: inputs::parse_choice::<RequestedStatus>(
                "requested-status",
                &self.requested_status,
            )?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command() -> PublishCommand {
        PublishCommand {
            token: "mrp_token".to_string(),
            project: " AANobbMI ".to_string(),
            name: String::new(),
            version: "1.2.0-rc1".to_string(),
            channel: String::new(),
            featured: String::new(),
            changelog: String::new(),
            loaders: "fabric\nquilt".to_string(),
            game_versions: "1.21.X\n1.20.1".to_string(),
            files: "a.jar".to_string(),
            primary_file: String::new(),
            dependencies: String::new(),
            status: String::new(),
            requested_status: String::new(),
            api_domain: DEFAULT_API_DOMAIN.to_string(),
            api_layout: String::new(),
        }
    }

    #[test]
    fn test_draft_defaults() {
        let draft = command().draft().unwrap();
        assert_eq!(draft.project_id, "AANobbMI");
        assert_eq!(draft.display_name(), "1.2.0-rc1");
        assert_eq!(draft.version_type(), VersionType::Beta);
        assert!(!draft.featured());
        assert_eq!(draft.loaders, vec!["fabric", "quilt"]);
        assert_eq!(draft.game_versions, vec!["1.21.x", "1.20.1"]);
        assert!(draft.changelog.is_none());
        assert!(draft.dependencies.is_empty());
    }

    #[test]
    fn test_draft_overrides() {
        let cmd = PublishCommand {
            name: "Big Update".to_string(),
            channel: "release".to_string(),
            featured: "false".to_string(),
            status: "draft".to_string(),
            requested_status: "unlisted".to_string(),
            ..command()
        };
        let draft = cmd.draft().unwrap();
        assert_eq!(draft.display_name(), "Big Update");
        assert_eq!(draft.version_type(), VersionType::Release);
        assert!(!draft.featured());
        assert_eq!(draft.status, Some(Status::Draft));
        assert_eq!(draft.requested_status, Some(RequestedStatus::Unlisted));
    }

    #[test]
    fn test_invalid_channel_rejected() {
        let cmd = PublishCommand {
            channel: "stable".to_string(),
            ..command()
        };
        assert!(cmd.draft().is_err());
    }

    #[test]
    fn test_empty_files_fail_before_network() {
        let cmd = PublishCommand {
            files: String::new(),
            api_domain: "127.0.0.1:9".to_string(),
            game_versions: "1.20.1".to_string(),
            ..command()
        };
        let err = cmd.execute(false).unwrap_err();
        assert!(err.to_string().contains("No files provided"));
    }

    #[test]
    fn test_empty_loaders_rejected() {
        let cmd = PublishCommand {
            loaders: "\n".to_string(),
            ..command()
        };
        let err = cmd.execute(false).unwrap_err();
        assert!(err.to_string().contains("No loaders provided"));
    }
}
