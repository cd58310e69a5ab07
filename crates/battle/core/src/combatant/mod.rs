//! Combatant entity model.
//!
//! A [`Combatant`] is a plain value aggregate: six numeric pools, the effects
//! it owns and three modifier tables. Damage rules live in [`damage`].
mod damage;

use std::collections::BTreeMap;
use std::fmt;

use strum::{Display, EnumString};

use crate::hooks::Effect;

/// Named modifier table read by the hit roll on the attacking side.
pub const ATTACK_HIT_CHANCE_MOD: &str = "attack_hit_chance_mod";
/// Named modifier table read by the hit roll on the defending side.
pub const DEFENSE_HIT_CHANCE_MOD: &str = "defense_hit_chance_mod";

/// Damage types. Each one doubles as the name of the attacker's damage pool.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString,
)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackType {
    Firepower,
    Ballistics,
    Chemical,
}

impl AttackType {
    /// Attack order inside one turn.
    pub const ALL: [AttackType; 3] = [Self::Firepower, Self::Ballistics, Self::Chemical];

    /// The attack type that follows this one in a turn, if any.
    pub const fn next(self) -> Option<AttackType> {
        match self {
            Self::Firepower => Some(Self::Ballistics),
            Self::Ballistics => Some(Self::Chemical),
            Self::Chemical => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    A,
    B,
}

impl Side {
    pub const fn other(self) -> Side {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

/// The six numeric stats of a combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum StatKind {
    Armor,
    Shields,
    Ballistics,
    Chemical,
    Firepower,
    Velocity,
}

impl From<AttackType> for StatKind {
    fn from(attack_type: AttackType) -> Self {
        match attack_type {
            AttackType::Firepower => Self::Firepower,
            AttackType::Ballistics => Self::Ballistics,
            AttackType::Chemical => Self::Chemical,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseStats {
    pub armor: u32,
    pub shields: u32,
    pub ballistics: u32,
    pub chemical: u32,
    pub firepower: u32,
    pub velocity: u32,
}

impl BaseStats {
    pub const fn new(
        armor: u32,
        shields: u32,
        ballistics: u32,
        chemical: u32,
        firepower: u32,
        velocity: u32,
    ) -> Self {
        Self {
            armor,
            shields,
            ballistics,
            chemical,
            firepower,
            velocity,
        }
    }

    pub const fn get(&self, kind: StatKind) -> u32 {
        match kind {
            StatKind::Armor => self.armor,
            StatKind::Shields => self.shields,
            StatKind::Ballistics => self.ballistics,
            StatKind::Chemical => self.chemical,
            StatKind::Firepower => self.firepower,
            StatKind::Velocity => self.velocity,
        }
    }

    fn saturating_add(self, other: BaseStats) -> Self {
        Self {
            armor: self.armor.saturating_add(other.armor),
            shields: self.shields.saturating_add(other.shields),
            ballistics: self.ballistics.saturating_add(other.ballistics),
            chemical: self.chemical.saturating_add(other.chemical),
            firepower: self.firepower.saturating_add(other.firepower),
            velocity: self.velocity.saturating_add(other.velocity),
        }
    }
}

/// A participant in a battle.
///
/// Pools are unsigned, so every stat stays non-negative; damage and hook
/// arithmetic saturates at zero.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Combatant {
    pub name: String,
    pub armor: u32,
    pub shields: u32,
    pub ballistics: u32,
    pub chemical: u32,
    pub firepower: u32,
    pub velocity: u32,
    pub effects: Vec<Effect>,
    /// Flat per-type adjustment once shields are down.
    pub armor_modifiers: BTreeMap<AttackType, i32>,
    /// Flat per-type adjustment while shields are up.
    pub shield_modifiers: BTreeMap<AttackType, i32>,
    /// Named tables such as [`ATTACK_HIT_CHANCE_MOD`].
    pub modifiers: BTreeMap<String, BTreeMap<AttackType, i32>>,
    original: BaseStats,
}

impl Combatant {
    /// Creates a combatant and captures `stats` as its original values.
    pub fn new(name: impl Into<String>, stats: BaseStats) -> Self {
        Self {
            name: name.into(),
            armor: stats.armor,
            shields: stats.shields,
            ballistics: stats.ballistics,
            chemical: stats.chemical,
            firepower: stats.firepower,
            velocity: stats.velocity,
            effects: Vec::new(),
            armor_modifiers: BTreeMap::new(),
            shield_modifiers: BTreeMap::new(),
            modifiers: BTreeMap::new(),
            original: stats,
        }
    }

    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    #[must_use]
    pub fn with_armor_modifier(mut self, attack_type: AttackType, value: i32) -> Self {
        self.armor_modifiers.insert(attack_type, value);
        self
    }

    #[must_use]
    pub fn with_shield_modifier(mut self, attack_type: AttackType, value: i32) -> Self {
        self.shield_modifiers.insert(attack_type, value);
        self
    }

    #[must_use]
    pub fn with_modifier(
        mut self,
        table: impl Into<String>,
        attack_type: AttackType,
        value: i32,
    ) -> Self {
        self.modifiers
            .entry(table.into())
            .or_default()
            .insert(attack_type, value);
        self
    }

    /// Stats captured at creation (summed across merges).
    pub const fn original(&self) -> &BaseStats {
        &self.original
    }

    /// Current values of the six numeric stats.
    pub const fn stats(&self) -> BaseStats {
        BaseStats::new(
            self.armor,
            self.shields,
            self.ballistics,
            self.chemical,
            self.firepower,
            self.velocity,
        )
    }

    pub const fn stat(&self, kind: StatKind) -> u32 {
        self.stats().get(kind)
    }

    /// Overwrites a current stat. The original value is left untouched.
    pub fn set_stat(&mut self, kind: StatKind, value: u32) {
        let slot = match kind {
            StatKind::Armor => &mut self.armor,
            StatKind::Shields => &mut self.shields,
            StatKind::Ballistics => &mut self.ballistics,
            StatKind::Chemical => &mut self.chemical,
            StatKind::Firepower => &mut self.firepower,
            StatKind::Velocity => &mut self.velocity,
        };
        *slot = value;
    }

    /// The stored pool for `attack_type`, which is also this combatant's
    /// attack damage of that type.
    pub const fn get_damage(&self, attack_type: AttackType) -> u32 {
        match attack_type {
            AttackType::Firepower => self.firepower,
            AttackType::Ballistics => self.ballistics,
            AttackType::Chemical => self.chemical,
        }
    }

    /// Value of a named modifier table entry (0 when absent).
    pub fn modifier(&self, table: &str, attack_type: AttackType) -> i32 {
        self.modifiers
            .get(table)
            .and_then(|entries| entries.get(&attack_type))
            .copied()
            .unwrap_or(0)
    }

    /// Adds `delta` to a named modifier table entry, creating it at 0 first.
    pub fn adjust_modifier(&mut self, table: &str, attack_type: AttackType, delta: i32) {
        let entry = self
            .modifiers
            .entry(table.to_owned())
            .or_default()
            .entry(attack_type)
            .or_insert(0);
        *entry = entry.saturating_add(delta);
    }

    /// Folds an add-on into this combatant.
    ///
    /// All six stats and their originals are summed, effects are appended in
    /// order and modifier tables are added entry-wise.
    pub fn merge_inplace(&mut self, other: &Combatant) {
        let merged = self.stats().saturating_add(other.stats());
        self.armor = merged.armor;
        self.shields = merged.shields;
        self.ballistics = merged.ballistics;
        self.chemical = merged.chemical;
        self.firepower = merged.firepower;
        self.velocity = merged.velocity;
        self.original = self.original.saturating_add(other.original);

        self.effects.extend(other.effects.iter().cloned());

        merge_table(&mut self.armor_modifiers, &other.armor_modifiers);
        merge_table(&mut self.shield_modifiers, &other.shield_modifiers);
        for (name, table) in &other.modifiers {
            merge_table(self.modifiers.entry(name.clone()).or_default(), table);
        }
    }

    /// The effective combatant for `main` and its add-ons.
    pub fn merged(main: &Combatant, adds: &[Combatant]) -> Combatant {
        let mut effective = main.clone();
        for add in adds {
            effective.merge_inplace(add);
        }
        effective
    }
}

fn merge_table(into: &mut BTreeMap<AttackType, i32>, from: &BTreeMap<AttackType, i32>) {
    for (attack_type, value) in from {
        let entry = into.entry(*attack_type).or_insert(0);
        *entry = entry.saturating_add(*value);
    }
}

impl fmt::Display for Combatant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Armor: {}", self.armor)?;
        writeln!(f, "Shields: {}", self.shields)?;
        writeln!(f, "Ballistics: {}", self.ballistics)?;
        writeln!(f, "Chemical: {}", self.chemical)?;
        writeln!(f, "Firepower: {}", self.firepower)?;
        writeln!(f, "Velocity: {}", self.velocity)?;
        let names: Vec<&str> = self.effects.iter().map(|e| e.name.as_str()).collect();
        write!(f, "Effects: {}", names.join(", "))
    }
}
