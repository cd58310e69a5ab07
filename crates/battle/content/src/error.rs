use thiserror::Error;

/// Configuration errors raised while resolving catalog data.
///
/// These never reach the engine: a battle whose data fails to resolve is
/// not started.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    #[error("unknown effect behaviour '{key}'")]
    UnknownEffect { key: String },

    #[error("unknown terrain hazard '{key}'")]
    UnknownHazard { key: String },

    #[error("unknown attack type '{key}' in {table}")]
    UnknownAttackType { key: String, table: String },

    #[error("unknown stat '{name}'")]
    UnknownStat { name: String },

    #[error("combatant '{name}' is not in the catalog")]
    UnknownCombatant { name: String },

    #[error("terrain '{key}' is not in the catalog")]
    UnknownTerrain { key: String },

    #[error("effect '{name}' was not built from a registered behaviour")]
    UnregisteredEffect { name: String },

    #[error("terrain '{name}' was not built from a registered hazard")]
    UnregisteredHazard { name: String },
}
