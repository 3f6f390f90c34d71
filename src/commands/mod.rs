//! Command implementations
//!
//! Each command module provides a clap-derived struct and execute method.

pub mod plugin;
pub mod publish;

use anyhow::Result;

use crate::modrinth::{PublishRequest, RegistryClient};
use crate::utils::terminal::{create_spinner, print_debug, print_warning};

/// Send a built request and classify the response
///
/// Returns the created version id, or `None` when the upload succeeded
/// but the response did not carry one.
pub(crate) fn submit(
    client: &RegistryClient,
    request: &PublishRequest,
    verbose: bool,
) -> Result<Option<String>> {
    print_debug(
        verbose,
        &format!("data: {}", serde_json::to_string_pretty(&request.payload)?),
    );

    print_debug(
        verbose,
        &format!("multipart parts: {}", request.body.parts().len()),
    );

    let spinner = create_spinner(&format!("Uploading to {}…", client.endpoint()));
    let result = client.create_version(request);
    spinner.finish_and_clear();
    let result = result?;

    print_debug(verbose, &format!("Modrinth API status: {}", result.status));
    print_debug(verbose, &format!("Modrinth API body: {}", result.raw_body));

    match result.outcome()? {
        Some(id) => Ok(Some(id.to_string())),
        None => {
            if result.parsed_body.is_none() {
                print_warning("Failed to parse Modrinth response body as JSON");
            } else {
                print_warning("Modrinth response did not include a version id");
            }
            Ok(None)
        }
    }
}
