//! Engine configuration loader.

use std::path::Path;

use battle_core::EngineConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for engine configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`EngineConfig::default`].
    pub fn load(path: &Path) -> LoadResult<EngineConfig> {
        let content = read_file(path)?;
        let config: EngineConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.max_rounds == 0 {
            return Err(anyhow::anyhow!(
                "Invalid config {}: max_rounds must be at least 1",
                path.display()
            ));
        }
        Ok(config)
    }
}
