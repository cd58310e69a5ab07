use std::sync::Arc;

use super::Phase;
use crate::combatant::{Combatant, Side};
use crate::hooks::Terrain;

/// Everything needed to rebuild a battle from scratch.
///
/// Main combatants and add-ons are kept as configured; the effective
/// combatants are derived from them when a battle starts.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BattleSetup {
    pub main_a: Combatant,
    pub adds_a: Vec<Combatant>,
    pub main_b: Combatant,
    pub adds_b: Vec<Combatant>,
    pub terrain: Option<Terrain>,
    pub seed: u64,
}

impl BattleSetup {
    pub fn new(main_a: Combatant, main_b: Combatant, seed: u64) -> Self {
        Self {
            main_a,
            adds_a: Vec::new(),
            main_b,
            adds_b: Vec::new(),
            terrain: None,
            seed,
        }
    }

    #[must_use]
    pub fn with_adds_a(mut self, adds: Vec<Combatant>) -> Self {
        self.adds_a = adds;
        self
    }

    #[must_use]
    pub fn with_adds_b(mut self, adds: Vec<Combatant>) -> Self {
        self.adds_b = adds;
        self
    }

    #[must_use]
    pub fn with_terrain(mut self, terrain: Terrain) -> Self {
        self.terrain = Some(terrain);
        self
    }

    /// Main combatant of `side` merged with its add-ons.
    pub fn effective(&self, side: Side) -> Combatant {
        match side {
            Side::A => Combatant::merged(&self.main_a, &self.adds_a),
            Side::B => Combatant::merged(&self.main_b, &self.adds_b),
        }
    }
}

/// One immutable record of the encounter at a specific phase.
///
/// Equality and serialization cover the logical fields only; the generator
/// and the history live on [`super::BattleState`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BattleSnapshot {
    pub(crate) setup: Arc<BattleSetup>,
    pub(crate) phase: Phase,
    pub(crate) round_count: u32,
    pub(crate) combatant_a: Combatant,
    pub(crate) combatant_b: Combatant,
    pub(crate) terrain: Option<Terrain>,
}

impl BattleSnapshot {
    /// The `Start` snapshot for `setup`, fighting with effective combatants.
    pub(crate) fn from_setup(setup: Arc<BattleSetup>) -> Self {
        Self {
            phase: Phase::Start,
            round_count: 0,
            combatant_a: setup.effective(Side::A),
            combatant_b: setup.effective(Side::B),
            terrain: setup.terrain.clone(),
            setup,
        }
    }

    pub fn setup(&self) -> &BattleSetup {
        &self.setup
    }

    pub fn seed(&self) -> u64 {
        self.setup.seed
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn round_count(&self) -> u32 {
        self.round_count
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::A => &self.combatant_a,
            Side::B => &self.combatant_b,
        }
    }

    pub(crate) fn combatant_mut(&mut self, side: Side) -> &mut Combatant {
        match side {
            Side::A => &mut self.combatant_a,
            Side::B => &mut self.combatant_b,
        }
    }

    pub fn terrain(&self) -> Option<&Terrain> {
        self.terrain.as_ref()
    }

    pub fn any_dead(&self) -> bool {
        self.combatant_a.is_dead() || self.combatant_b.is_dead()
    }

    /// Winning side once a combatant is dead. Side B takes a double knockout.
    pub fn winner(&self) -> Option<Side> {
        if self.combatant_a.is_dead() {
            Some(Side::B)
        } else if self.combatant_b.is_dead() {
            Some(Side::A)
        } else {
            None
        }
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_terminal()
    }
}

/// Digest of a snapshot history.
///
/// Snapshots are serialized with bincode in order and hashed with SHA-256,
/// so two runs can be compared without keeping both histories around.
/// A snapshot that fails to serialize fails the whole digest.
#[cfg(feature = "serde")]
pub fn history_root(history: &[BattleSnapshot]) -> Result<[u8; 32], bincode::Error> {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    for snapshot in history {
        hasher.update(bincode::serialize(snapshot)?);
    }
    Ok(hasher.finalize().into())
}
