//! Combatant catalog loader.
//!
//! One file per combatant. Effects name registry behaviours; modifier tables
//! are keyed by attack type name.

use std::path::{Path, PathBuf};

use battle_core::Combatant;
use tracing::debug;

use crate::behaviors::BehaviorRegistry;
use crate::loaders::{Format, LoadResult, load_as, save_as};
use crate::specs::CombatantSpec;

/// Loader for combatant files (TOML or RON).
pub struct CombatantLoader;

impl CombatantLoader {
    /// Parses a combatant file without resolving its behaviours.
    pub fn load_spec(path: &Path) -> LoadResult<CombatantSpec> {
        load_as(path, "combatant")
    }

    /// Loads a combatant and resolves its effects against `registry`.
    pub fn load(path: &Path, registry: &BehaviorRegistry) -> LoadResult<Combatant> {
        let spec = Self::load_spec(path)?;
        let combatant = spec.build(registry).map_err(|e| {
            anyhow::anyhow!("Failed to resolve combatant {}: {}", path.display(), e)
        })?;

        debug!(
            target: "content::loaders",
            path = %path.display(),
            name = %combatant.name,
            effects = combatant.effects.len(),
            "loaded combatant"
        );
        Ok(combatant)
    }

    /// Loads every `.toml`/`.ron` file of `dir`, ordered by file name.
    pub fn load_dir(dir: &Path, registry: &BehaviorRegistry) -> LoadResult<Vec<Combatant>> {
        let entries = std::fs::read_dir(dir)
            .map_err(|e| anyhow::anyhow!("Failed to read directory {}: {}", dir.display(), e))?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|entry| entry.path()))
            .filter(|path| path.is_file() && Format::from_path(path).is_ok())
            .collect();
        paths.sort();

        paths
            .iter()
            .map(|path| Self::load(path, registry))
            .collect()
    }

    /// Writes the current values of `combatant` to `path`.
    pub fn save(path: &Path, combatant: &Combatant, registry: &BehaviorRegistry) -> LoadResult<()> {
        let spec = CombatantSpec::from_combatant(combatant, registry).map_err(|e| {
            anyhow::anyhow!("Failed to save combatant '{}': {}", combatant.name, e)
        })?;
        save_as(path, &spec, "combatant")
    }
}
