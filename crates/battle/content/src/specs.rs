//! Serializable catalog records.
//!
//! Specs mirror the on-disk TOML/RON shape. Effects and hazards are stored as
//! behaviour keys and resolved through a [`BehaviorRegistry`] when a spec is
//! built into an engine value.

use std::collections::BTreeMap;

use battle_core::{AttackType, BaseStats, Combatant, Effect, PhaseKind, Terrain};
use serde::{Deserialize, Serialize};

use crate::behaviors::BehaviorRegistry;
use crate::error::ContentError;

/// One effect attached to a combatant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectSpec {
    /// Behaviour key in the registry (e.g. `"last_stand"`).
    pub behavior: String,
    /// Display name; the behaviour's default name when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_state: Option<PhaseKind>,
}

impl EffectSpec {
    pub fn new(behavior: impl Into<String>) -> Self {
        Self {
            behavior: behavior.into(),
            name: None,
            target_state: None,
        }
    }

    pub fn build(&self, registry: &BehaviorRegistry) -> Result<Effect, ContentError> {
        let mut effect = registry.effect(&self.behavior)?;
        if let Some(name) = &self.name {
            effect.name = name.clone();
        }
        effect.target_state = self.target_state;
        Ok(effect)
    }

    pub fn from_effect(effect: &Effect, registry: &BehaviorRegistry) -> Result<Self, ContentError> {
        let behavior = registry
            .effect_key(effect)
            .ok_or_else(|| ContentError::UnregisteredEffect {
                name: effect.name.clone(),
            })?;
        let name = (registry.effect_name(behavior) != Some(effect.name.as_str()))
            .then(|| effect.name.clone());

        Ok(Self {
            behavior: behavior.to_owned(),
            name,
            target_state: effect.target_state,
        })
    }
}

/// A combatant record: one file per combatant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatantSpec {
    pub name: String,
    #[serde(default)]
    pub armor: u32,
    #[serde(default)]
    pub shields: u32,
    #[serde(default)]
    pub ballistics: u32,
    #[serde(default)]
    pub chemical: u32,
    #[serde(default)]
    pub firepower: u32,
    #[serde(default)]
    pub velocity: u32,
    #[serde(default)]
    pub effects: Vec<EffectSpec>,
    /// Attack type name to flat adjustment.
    #[serde(default)]
    pub armor_modifiers: BTreeMap<String, i32>,
    #[serde(default)]
    pub shield_modifiers: BTreeMap<String, i32>,
    /// Table name to attack type name to value.
    #[serde(default)]
    pub modifiers: BTreeMap<String, BTreeMap<String, i32>>,
}

impl CombatantSpec {
    pub fn stats(&self) -> BaseStats {
        BaseStats::new(
            self.armor,
            self.shields,
            self.ballistics,
            self.chemical,
            self.firepower,
            self.velocity,
        )
    }

    /// Resolves behaviours and attack type keys into a [`Combatant`].
    pub fn build(&self, registry: &BehaviorRegistry) -> Result<Combatant, ContentError> {
        let mut combatant = Combatant::new(self.name.clone(), self.stats());

        for effect in &self.effects {
            combatant.effects.push(effect.build(registry)?);
        }
        combatant.armor_modifiers = parse_table(&self.armor_modifiers, "armor_modifiers")?;
        combatant.shield_modifiers = parse_table(&self.shield_modifiers, "shield_modifiers")?;
        for (table, entries) in &self.modifiers {
            combatant
                .modifiers
                .insert(table.clone(), parse_table(entries, table)?);
        }

        Ok(combatant)
    }

    /// Captures the current values of `combatant`.
    ///
    /// Fails when an effect was not built from a registered behaviour, since
    /// it could not be loaded back.
    pub fn from_combatant(
        combatant: &Combatant,
        registry: &BehaviorRegistry,
    ) -> Result<Self, ContentError> {
        let effects = combatant
            .effects
            .iter()
            .map(|effect| EffectSpec::from_effect(effect, registry))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name: combatant.name.clone(),
            armor: combatant.armor,
            shields: combatant.shields,
            ballistics: combatant.ballistics,
            chemical: combatant.chemical,
            firepower: combatant.firepower,
            velocity: combatant.velocity,
            effects,
            armor_modifiers: format_table(&combatant.armor_modifiers),
            shield_modifiers: format_table(&combatant.shield_modifiers),
            modifiers: combatant
                .modifiers
                .iter()
                .map(|(table, entries)| (table.clone(), format_table(entries)))
                .collect(),
        })
    }
}

fn parse_table(
    raw: &BTreeMap<String, i32>,
    table: &str,
) -> Result<BTreeMap<AttackType, i32>, ContentError> {
    raw.iter()
        .map(|(key, value)| {
            key.parse::<AttackType>()
                .map(|attack_type| (attack_type, *value))
                .map_err(|_| ContentError::UnknownAttackType {
                    key: key.clone(),
                    table: table.to_owned(),
                })
        })
        .collect()
}

fn format_table(table: &BTreeMap<AttackType, i32>) -> BTreeMap<String, i32> {
    table
        .iter()
        .map(|(attack_type, value)| (attack_type.to_string().to_lowercase(), *value))
        .collect()
}

/// A terrain record keyed for lookup from battle plans.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainSpec {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Hazard key in the registry.
    pub hazard: String,
}

impl TerrainSpec {
    pub fn build(&self, registry: &BehaviorRegistry) -> Result<Terrain, ContentError> {
        let hook = registry.hazard(&self.hazard)?;
        Ok(Terrain::new(self.name.clone(), self.description.clone(), hook))
    }

    pub fn from_terrain(
        key: impl Into<String>,
        terrain: &Terrain,
        registry: &BehaviorRegistry,
    ) -> Result<Self, ContentError> {
        let hazard = registry
            .hazard_key(terrain)
            .ok_or_else(|| ContentError::UnregisteredHazard {
                name: terrain.name.clone(),
            })?;

        Ok(Self {
            key: key.into(),
            name: terrain.name.clone(),
            description: terrain.description.clone(),
            hazard: hazard.to_owned(),
        })
    }
}

/// Top level of a terrain catalog file (`[[terrains]]`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainCatalogFile {
    #[serde(default)]
    pub terrains: Vec<TerrainSpec>,
}

/// One named battle of a plan. Combatants are referenced by name, terrain by key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleSpec {
    pub name: String,
    pub combatant_a: String,
    pub combatant_b: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terrain: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub adds_a: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub adds_b: Vec<String>,
    /// Fixed seed for this battle; the simulator's seed policy applies otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Battles run in listed order (`[[battles]]`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattlePlan {
    #[serde(default)]
    pub battles: Vec<BattleSpec>,
}
