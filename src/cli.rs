//! CLI argument parsing using clap derive macros

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands::{plugin::PluginCommand, publish::PublishCommand};

/// modrinth-publish - publish versions to Modrinth from CI
///
/// Every option can also be supplied through the matching GitHub Actions
/// input variable (`INPUT_<NAME>`).
#[derive(Parser, Debug)]
#[command(name = "modrinth-publish")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, env = "RUNNER_DEBUG", value_parser = clap::builder::FalseyValueParser::new())]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Publish a version from explicit metadata and files
    Publish(PublishCommand),

    /// Publish a plugin jar, inferring metadata from its descriptor
    Plugin(PluginCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        // Set up terminal colors
        if self.no_color {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        }

        match self.command {
            Commands::Publish(cmd) => cmd.execute(self.verbose),
            Commands::Plugin(cmd) => cmd.execute(self.verbose),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_publish_args() {
        let cli = Cli::try_parse_from([
            "modrinth-publish",
            "publish",
            "--token",
            "t",
            "--project",
            "p",
            "--version",
            "1.0.0",
            "--loaders",
            "fabric",
            "--files",
            "a.jar",
            "--api-layout",
            "legacy",
        ])
        .unwrap();
        match cli.command {
            Commands::Publish(cmd) => {
                assert_eq!(cmd.version, "1.0.0");
                assert_eq!(cmd.api_layout, "legacy");
                assert_eq!(cmd.api_domain, "api.modrinth.com");
                assert!(cmd.game_versions.is_empty());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
