//! Terrain catalog loader.

use std::path::Path;

use battle_core::Terrain;
use tracing::debug;

use crate::behaviors::BehaviorRegistry;
use crate::loaders::{LoadResult, load_as, save_as};
use crate::specs::{TerrainCatalogFile, TerrainSpec};

/// Loader for terrain catalogs (`[[terrains]]` records).
pub struct TerrainLoader;

impl TerrainLoader {
    pub fn load_specs(path: &Path) -> LoadResult<Vec<TerrainSpec>> {
        let file: TerrainCatalogFile = load_as(path, "terrain catalog")?;
        Ok(file.terrains)
    }

    /// Loads a terrain catalog as `(key, terrain)` pairs in file order.
    pub fn load(path: &Path, registry: &BehaviorRegistry) -> LoadResult<Vec<(String, Terrain)>> {
        let specs = Self::load_specs(path)?;

        let mut terrains = Vec::with_capacity(specs.len());
        for spec in specs {
            let terrain = spec.build(registry).map_err(|e| {
                anyhow::anyhow!("Failed to resolve terrain '{}': {}", spec.key, e)
            })?;
            terrains.push((spec.key, terrain));
        }

        debug!(
            target: "content::loaders",
            path = %path.display(),
            count = terrains.len(),
            "loaded terrain catalog"
        );
        Ok(terrains)
    }

    pub fn save(
        path: &Path,
        terrains: &[(String, Terrain)],
        registry: &BehaviorRegistry,
    ) -> LoadResult<()> {
        let terrains = terrains
            .iter()
            .map(|(key, terrain)| TerrainSpec::from_terrain(key.clone(), terrain, registry))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!("Failed to save terrain catalog: {}", e))?;

        save_as(path, &TerrainCatalogFile { terrains }, "terrain catalog")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_load_keeps_keys_and_hazards() {
        let registry = BehaviorRegistry::builtin();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("terrains.toml");

        let terrains = vec![
            (
                "malvinas".to_owned(),
                Terrain::new("Malvinas", "Shells fly further.", registry.hazard("malvinas").unwrap()),
            ),
            (
                "dunes".to_owned(),
                Terrain::new("Dunes", "Slow going.", registry.hazard("badaxsan").unwrap()),
            ),
        ];
        TerrainLoader::save(&path, &terrains, &registry).unwrap();

        let specs = TerrainLoader::load_specs(&path).unwrap();
        assert_eq!(specs[1].hazard, "badaxsan");

        let loaded = TerrainLoader::load(&path, &registry).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].0, "malvinas");
        assert_eq!(loaded[1].1.description, "Slow going.");
        assert_eq!(registry.hazard_key(&loaded[1].1), Some("badaxsan"));
    }

    #[test]
    fn unknown_hazard_names_the_terrain() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("terrains.toml");
        std::fs::write(
            &path,
            "[[terrains]]\nkey = \"swamp\"\nname = \"Swamp\"\nhazard = \"quicksand\"\n",
        )
        .unwrap();

        let err = TerrainLoader::load(&path, &BehaviorRegistry::builtin()).unwrap_err();
        assert!(err.to_string().contains("swamp"));
    }
}
