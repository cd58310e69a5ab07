//! In-memory catalog of combatants and terrains.

use std::collections::BTreeMap;

use battle_core::{Combatant, StatKind, Terrain};

use crate::error::ContentError;

/// Parses a stat by its lowercase name (`"armor"`, `"velocity"`, ...).
pub fn parse_stat(name: &str) -> Result<StatKind, ContentError> {
    name.trim()
        .parse()
        .map_err(|_| ContentError::UnknownStat {
            name: name.to_owned(),
        })
}

/// Combatants keyed by name, terrains keyed by catalog key.
///
/// Lookups hand out references; callers clone when they need a fresh copy
/// for a battle, so trigger counts never leak between battles.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    combatants: BTreeMap<String, Combatant>,
    terrains: BTreeMap<String, Terrain>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a combatant under its own name.
    pub fn insert_combatant(&mut self, combatant: Combatant) {
        self.combatants.insert(combatant.name.clone(), combatant);
    }

    pub fn insert_terrain(&mut self, key: impl Into<String>, terrain: Terrain) {
        self.terrains.insert(key.into(), terrain);
    }

    pub fn combatant(&self, name: &str) -> Result<&Combatant, ContentError> {
        self.combatants
            .get(name)
            .ok_or_else(|| ContentError::UnknownCombatant {
                name: name.to_owned(),
            })
    }

    pub fn terrain(&self, key: &str) -> Result<&Terrain, ContentError> {
        self.terrains
            .get(key)
            .ok_or_else(|| ContentError::UnknownTerrain {
                key: key.to_owned(),
            })
    }

    pub fn combatant_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.combatants.keys().map(String::as_str)
    }

    pub fn terrain_keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.terrains.keys().map(String::as_str)
    }

    pub fn combatants(&self) -> impl Iterator<Item = &Combatant> + '_ {
        self.combatants.values()
    }

    pub fn terrains(&self) -> impl Iterator<Item = (&str, &Terrain)> + '_ {
        self.terrains.iter().map(|(key, terrain)| (key.as_str(), terrain))
    }
}

#[cfg(feature = "loaders")]
mod builtin {
    use super::Catalog;
    use crate::behaviors::BehaviorRegistry;
    use crate::loaders::{Format, LoadResult};
    use crate::specs::{CombatantSpec, TerrainCatalogFile};

    const COMBATANTS: [&str; 3] = [
        include_str!("../data/combatants/lcenzo.toml"),
        include_str!("../data/combatants/shinigami.toml"),
        include_str!("../data/combatants/suit.toml"),
    ];
    const TERRAINS: &str = include_str!("../data/terrains.toml");

    impl Catalog {
        /// The catalog shipped with the crate, resolved against `registry`.
        pub fn builtin(registry: &BehaviorRegistry) -> LoadResult<Self> {
            let mut catalog = Self::new();

            for source in COMBATANTS {
                let spec: CombatantSpec = Format::Toml.parse(source, "built-in combatant")?;
                let combatant = spec
                    .build(registry)
                    .map_err(|e| anyhow::anyhow!("Failed to resolve built-in combatant: {}", e))?;
                catalog.insert_combatant(combatant);
            }

            let file: TerrainCatalogFile = Format::Toml.parse(TERRAINS, "built-in terrain catalog")?;
            for spec in file.terrains {
                let terrain = spec
                    .build(registry)
                    .map_err(|e| anyhow::anyhow!("Failed to resolve built-in terrain: {}", e))?;
                catalog.insert_terrain(spec.key, terrain);
            }

            Ok(catalog)
        }
    }
}

#[cfg(all(test, feature = "loaders"))]
mod tests {
    use battle_core::{
        ATTACK_HIT_CHANCE_MOD, AttackType, BaseStats, DEFENSE_HIT_CHANCE_MOD,
    };

    use super::*;
    use crate::behaviors::BehaviorRegistry;

    fn builtin() -> Catalog {
        Catalog::builtin(&BehaviorRegistry::builtin()).unwrap()
    }

    #[test]
    fn stats_parse_by_lowercase_name() {
        assert_eq!(parse_stat("shields"), Ok(StatKind::Shields));
        assert_eq!(parse_stat(" velocity "), Ok(StatKind::Velocity));
        assert_eq!(
            parse_stat("Armor"),
            Err(ContentError::UnknownStat {
                name: "Armor".to_owned()
            })
        );
    }

    #[test]
    fn builtin_roster() {
        let catalog = builtin();

        let shinigami = catalog.combatant("Shinigami").unwrap();
        assert_eq!(shinigami.stats(), BaseStats::new(2500, 2500, 800, 0, 1800, 200));
        assert_eq!(shinigami.effects[0].name, "Switcharoo");

        let suit = catalog.combatant("Suit").unwrap();
        assert_eq!(suit.stats(), BaseStats::new(1360, 1130, 356, 657, 0, 124));
    }

    #[test]
    fn lcenzo_carries_modifiers_and_four_effects() {
        let catalog = builtin();
        let lcenzo = catalog.combatant("LCEnzo").unwrap();

        let names: Vec<&str> = lcenzo.effects.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Last Stand", "Shield Plates", "Flare Knives", "Tandem Demo"]);
        for attack_type in AttackType::ALL {
            assert_eq!(lcenzo.modifier(ATTACK_HIT_CHANCE_MOD, attack_type), 56);
            assert_eq!(lcenzo.modifier(DEFENSE_HIT_CHANCE_MOD, attack_type), -19);
        }
        assert_eq!(lcenzo.armor_modifiers.get(&AttackType::Chemical), Some(&-65));
    }

    #[test]
    fn builtin_terrains() {
        let catalog = builtin();

        let keys: Vec<&str> = catalog.terrain_keys().collect();
        assert_eq!(
            keys,
            ["badaxsan", "hela", "lake_tampua", "malvinas", "ruthenian_grasses"]
        );
        let hela = catalog.terrain("hela").unwrap();
        assert!(hela.to_string().starts_with("--- Terrain: Hela ---\n"));
    }

    #[test]
    fn unknown_entries_are_configuration_errors() {
        let catalog = builtin();
        assert_eq!(
            catalog.combatant("Nobody").unwrap_err(),
            ContentError::UnknownCombatant {
                name: "Nobody".into()
            }
        );
        assert!(catalog.terrain("atlantis").is_err());
    }
}
