//! Error types and helpers for user-friendly error messages
//!
//! Every failure that aborts a publish run is classified here so the
//! entry point can print it with an actionable hint before exiting
//! non-zero.

use thiserror::Error;

/// Classified publish failures with helpful context and suggestions
#[derive(Error, Debug)]
pub enum PublishError {
    /// Inputs that can never produce a valid version (empty file list,
    /// missing loaders, unknown primary file, unreadable descriptor)
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        hint: Option<String>,
    },

    /// The upstream game version manifest could not be loaded
    #[error("Failed to load game versions: {message}")]
    Upstream {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// The registry answered with a non-success status
    #[error("Modrinth API returned error status {status}: {detail}")]
    Registry { status: u16, detail: String },
}

impl PublishError {
    /// Create an input validation error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            hint: None,
        }
    }

    /// Create an input validation error with a hint
    pub fn invalid_input_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Create an upstream manifest error
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
            source: None,
        }
    }

    /// Create an upstream manifest error wrapping its cause
    pub fn upstream_with_source(message: impl Into<String>, source: anyhow::Error) -> Self {
        Self::Upstream {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Create a registry status error
    pub fn registry(status: u16, detail: impl Into<String>) -> Self {
        Self::Registry {
            status,
            detail: detail.into(),
        }
    }

    fn hint(&self) -> Option<&str> {
        match self {
            PublishError::InvalidInput { hint, .. } => hint.as_deref(),
            PublishError::Upstream { .. } => Some(hints::manifest()),
            PublishError::Registry { status: 401, .. } => Some(hints::token()),
            PublishError::Registry { .. } => None,
        }
    }

    /// Display error with formatting and hints
    pub fn display_with_hints(&self) {
        use console::style;

        eprintln!("\n{} {}", style("ERROR:").red().bold(), self);

        if let PublishError::Upstream {
            source: Some(source),
            ..
        } = self
        {
            eprintln!("  caused by: {:#}", source);
        }

        if let Some(h) = self.hint() {
            eprintln!("\n{} {}", style("HINT:").yellow().bold(), h);
        }

        eprintln!();
    }
}

/// Common error hints
pub mod hints {
    /// Hint for an empty file list
    pub fn files() -> &'static str {
        "Pass at least one file with --files (or the `files` action input).\n\
         Multiple files may be given one per line or as a JSON array."
    }

    /// Hint for an empty loader list
    pub fn loaders() -> &'static str {
        "Pass the supported loaders, e.g. `fabric`, `paper` or `[\"forge\", \"neoforge\"]`."
    }

    /// Hint for a primary file that is not among the uploads
    pub fn primary_file() -> &'static str {
        "The primary file must be given by its file name only (no directory),\n\
         and it must also be listed in `files`."
    }

    /// Hint for archives without a recognised descriptor
    pub fn descriptor() -> &'static str {
        "The archive must contain one of plugin.yml, paper-plugin.yml, bungee.yml\n\
         or velocity-plugin.json at its root. Use `publish` to supply name,\n\
         version and game versions explicitly instead."
    }

    /// Hint for manifest failures
    pub fn manifest() -> &'static str {
        "Check network access to piston-meta.mojang.com, or list concrete game\n\
         versions instead of wildcards such as 1.21.x."
    }

    /// Hint for authorization failures
    pub fn token() -> &'static str {
        "Check that the token is valid and has the CREATE_VERSION scope."
    }
}
