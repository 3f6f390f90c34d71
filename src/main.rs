//! modrinth-publish - publish plugin and mod archives to Modrinth
//!
//! Runs as a GitHub Actions step or by hand. The pipeline is linear:
//!
//! ```text
//! inputs → (infer from jar) → expand game versions → build multipart → POST /v2/version
//! ```

mod catalog;
mod cli;
mod commands;
mod config;
mod error;
mod expand;
mod files;
mod infer;
mod modrinth;
mod multipart;
mod utils;

use std::process::ExitCode;

use clap::Parser;

use cli::Cli;
use error::PublishError;
use utils::terminal::print_error;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<PublishError>() {
                Some(publish_error) => publish_error.display_with_hints(),
                None => print_error(&format!("{:#}", err)),
            }
            ExitCode::FAILURE
        }
    }
}
