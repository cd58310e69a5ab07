//! Content loaders for reading and writing catalog files.
//!
//! Every loader accepts TOML or RON; the format is chosen from the file
//! extension. Specs are resolved against a [`crate::BehaviorRegistry`] once
//! they are parsed.

pub mod combatant;
pub mod config;
pub mod factory;
pub mod plan;
pub mod terrain;

pub use combatant::CombatantLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use plan::PlanLoader;
pub use terrain::TerrainLoader;

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

pub(crate) fn write_file(path: &Path, contents: &str) -> LoadResult<()> {
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write file {}: {}", path.display(), e))
}

/// Text format of a catalog file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Toml,
    Ron,
}

impl Format {
    /// Picks the format from the file extension (`.toml` or `.ron`).
    pub fn from_path(path: &Path) -> LoadResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            Some(ext) if ext.eq_ignore_ascii_case("ron") => Ok(Self::Ron),
            _ => Err(anyhow::anyhow!(
                "Unsupported catalog format for {}: expected .toml or .ron",
                path.display()
            )),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Toml => "TOML",
            Self::Ron => "RON",
        }
    }

    pub(crate) fn parse<T: DeserializeOwned>(self, content: &str, what: &str) -> LoadResult<T> {
        match self {
            Self::Toml => toml::from_str(content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {} TOML: {}", what, e)),
            Self::Ron => ron::from_str(content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {} RON: {}", what, e)),
        }
    }

    pub(crate) fn render<T: Serialize>(self, value: &T, what: &str) -> LoadResult<String> {
        match self {
            Self::Toml => toml::to_string_pretty(value)
                .map_err(|e| anyhow::anyhow!("Failed to serialize {} TOML: {}", what, e)),
            Self::Ron => ron::ser::to_string_pretty(value, ron::ser::PrettyConfig::default())
                .map_err(|e| anyhow::anyhow!("Failed to serialize {} RON: {}", what, e)),
        }
    }
}

/// Reads and parses `path` in the format its extension names.
pub(crate) fn load_as<T: DeserializeOwned>(path: &Path, what: &str) -> LoadResult<T> {
    let format = Format::from_path(path)?;
    let content = read_file(path)?;
    format.parse(&content, what)
}

/// Serializes `value` into `path` in the format its extension names.
pub(crate) fn save_as<T: Serialize>(path: &Path, value: &T, what: &str) -> LoadResult<()> {
    let format = Format::from_path(path)?;
    let content = format.render(value, what)?;
    write_file(path, &content)
}
