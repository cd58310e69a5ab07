//! Content factory for loading a catalog from a data directory.

use std::path::{Path, PathBuf};

use battle_core::{Combatant, EngineConfig, Terrain};

use crate::behaviors::BehaviorRegistry;
use crate::catalog::Catalog;
use crate::loaders::{CombatantLoader, ConfigLoader, LoadResult, PlanLoader, TerrainLoader};
use crate::specs::BattlePlan;

/// Content factory that loads all battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── terrains.toml
/// ├── battles.toml
/// └── combatants/
///     ├── lcenzo.toml
///     ├── shinigami.toml
///     └── suit.toml
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load engine configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<EngineConfig> {
        ConfigLoader::load(&self.config_path())
    }

    /// Load every combatant file under `combatants/`.
    pub fn load_combatants(&self, registry: &BehaviorRegistry) -> LoadResult<Vec<Combatant>> {
        CombatantLoader::load_dir(&self.combatants_dir(), registry)
    }

    /// Load `combatants/{file_name}` (extension included).
    pub fn load_combatant(
        &self,
        file_name: &str,
        registry: &BehaviorRegistry,
    ) -> LoadResult<Combatant> {
        CombatantLoader::load(&self.combatants_dir().join(file_name), registry)
    }

    /// Load the terrain catalog from `terrains.toml`.
    pub fn load_terrains(&self, registry: &BehaviorRegistry) -> LoadResult<Vec<(String, Terrain)>> {
        TerrainLoader::load(&self.data_dir.join("terrains.toml"), registry)
    }

    /// Load the battle plan from `battles.toml`.
    pub fn load_plan(&self) -> LoadResult<BattlePlan> {
        PlanLoader::load(&self.data_dir.join("battles.toml"))
    }

    /// Load combatants and terrains into one [`Catalog`].
    pub fn load_catalog(&self, registry: &BehaviorRegistry) -> LoadResult<Catalog> {
        let mut catalog = Catalog::new();
        for combatant in self.load_combatants(registry)? {
            catalog.insert_combatant(combatant);
        }
        for (key, terrain) in self.load_terrains(registry)? {
            catalog.insert_terrain(key, terrain);
        }
        Ok(catalog)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join("config.toml")
    }

    pub fn combatants_dir(&self) -> PathBuf {
        self.data_dir.join("combatants")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
        assert_eq!(factory.config_path(), Path::new("/tmp/data/config.toml"));
        assert_eq!(factory.combatants_dir(), Path::new("/tmp/data/combatants"));
    }

    #[test]
    fn shipped_data_directory_loads() {
        let factory = ContentFactory::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"));
        let registry = BehaviorRegistry::builtin();

        let catalog = factory.load_catalog(&registry).unwrap();
        assert_eq!(catalog.combatant_names().collect::<Vec<_>>(), ["LCEnzo", "Shinigami", "Suit"]);
        assert_eq!(catalog.terrain_keys().count(), 5);

        let plan = factory.load_plan().unwrap();
        for battle in &plan.battles {
            assert!(catalog.combatant(&battle.combatant_a).is_ok());
            assert!(catalog.combatant(&battle.combatant_b).is_ok());
            if let Some(key) = &battle.terrain {
                assert!(catalog.terrain(key).is_ok());
            }
        }

        assert_eq!(factory.load_config().unwrap(), EngineConfig::default());
    }
}
