//! Project metadata inference from plugin archives
//!
//! Server plugins ship a descriptor at the root of their jar. Four kinds
//! are recognised and looked up in a fixed order; the first one present wins.
//!
//! | Entry                  | Format | Game versions                  |
//! |------------------------|--------|--------------------------------|
//! | `plugin.yml`           | YAML   | resolved from `api-version`    |
//! | `paper-plugin.yml`     | YAML   | resolved from `api-version`    |
//! | `bungee.yml`           | YAML   | none                           |
//! | `velocity-plugin.json` | JSON   | none                           |

use std::io::{Cursor, Read};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use zip::result::ZipError;
use zip::ZipArchive;

use crate::catalog::GameVersionCatalog;
use crate::error::{hints, PublishError};
use crate::expand::in_release_line;

/// Metadata read from a descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InferredMetadata {
    /// `"{name} {version}"`
    pub name: String,
    pub version: String,
    pub game_versions: Vec<String>,
}

/// Recognised descriptor kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorKind {
    Bukkit,
    Paper,
    Bungee,
    Velocity,
}

impl DescriptorKind {
    /// Lookup order
    pub const PRIORITY: [DescriptorKind; 4] = [
        DescriptorKind::Bukkit,
        DescriptorKind::Paper,
        DescriptorKind::Bungee,
        DescriptorKind::Velocity,
    ];

    /// Archive entry holding this descriptor
    pub fn entry_name(self) -> &'static str {
        match self {
            DescriptorKind::Bukkit => "plugin.yml",
            DescriptorKind::Paper => "paper-plugin.yml",
            DescriptorKind::Bungee => "bungee.yml",
            DescriptorKind::Velocity => "velocity-plugin.json",
        }
    }

    /// Whether the descriptor declares a game compatibility marker
    pub fn has_api_version(self) -> bool {
        matches!(self, DescriptorKind::Bukkit | DescriptorKind::Paper)
    }

    /// Extract metadata from the descriptor text
    pub fn extract(self, text: &str, catalog: &GameVersionCatalog) -> Result<InferredMetadata> {
        let fields = match self {
            DescriptorKind::Bukkit | DescriptorKind::Paper | DescriptorKind::Bungee => {
                yaml_fields(text, self.has_api_version())
            }
            DescriptorKind::Velocity => json_fields(text),
        }
        .with_context(|| format!("Failed to parse {}", self.entry_name()))?;

        let name = fields.name.ok_or_else(|| self.missing("name"))?;
        let version = fields.version.ok_or_else(|| self.missing("version"))?;

        let game_versions = match fields.api_version {
            Some(marker) => catalog
                .releases()?
                .iter()
                .filter(|id| in_release_line(id, &marker))
                .cloned()
                .collect(),
            None => Vec::new(),
        };

        Ok(InferredMetadata {
            name: format!("{} {}", name, version),
            version,
            game_versions,
        })
    }

    fn missing(self, field: &str) -> PublishError {
        PublishError::invalid_input(format!(
            "{} does not declare `{}`",
            self.entry_name(),
            field
        ))
    }
}

#[derive(Debug, Default)]
struct DescriptorFields {
    name: Option<String>,
    version: Option<String>,
    api_version: Option<String>,
}

/// Fields shared by the YAML descriptors
///
/// Every field is read as a string, which serde_yaml answers with the
/// scalar's source text. Unquoted numbers therefore survive as written:
/// `1.20` stays `1.20` instead of becoming the float `1.2`, in block and
/// flow layouts alike.
#[derive(Debug, Deserialize)]
struct YamlDescriptor {
    name: Option<String>,
    version: Option<String>,
    #[serde(rename = "api-version")]
    api_version: Option<String>,
}

fn yaml_fields(text: &str, with_api_version: bool) -> Result<DescriptorFields> {
    let doc: YamlDescriptor = serde_yaml::from_str(text)?;
    Ok(DescriptorFields {
        name: doc.name,
        version: doc.version,
        api_version: doc.api_version.filter(|_| with_api_version),
    })
}

fn json_fields(text: &str) -> Result<DescriptorFields> {
    let doc: serde_json::Value = serde_json::from_str(text)?;
    let field = |key: &str| match doc.get(key)? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    };
    Ok(DescriptorFields {
        name: field("name"),
        version: field("version"),
        api_version: None,
    })
}

/// Infer metadata from archive bytes
///
/// Returns `Ok(None)` when the archive holds none of the known
/// descriptors. The catalog is only consulted for descriptors that carry
/// an `api-version`.
pub fn infer_from_archive(
    bytes: &[u8],
    catalog: &GameVersionCatalog,
) -> Result<Option<InferredMetadata>> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(|e| {
        PublishError::invalid_input_with_hint(
            format!("File is not a readable zip archive: {}", e),
            hints::descriptor(),
        )
    })?;

    for kind in DescriptorKind::PRIORITY {
        let text = match archive.by_name(kind.entry_name()) {
            Ok(mut entry) => {
                let mut text = String::new();
                entry
                    .read_to_string(&mut text)
                    .with_context(|| format!("Failed to read {}", kind.entry_name()))?;
                text
            }
            Err(ZipError::FileNotFound) => continue,
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to open {}", kind.entry_name()))
            }
        };
        return kind.extract(&text, catalog).map(Some);
    }

    Ok(None)
}
