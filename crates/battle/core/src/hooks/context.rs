//! Hook execution context.

use crate::combatant::{AttackType, Combatant, Side};
use crate::engine::{BattleSetup, Phase, PhaseKind};
use crate::hooks::Terrain;

/// View of the current snapshot handed to hooks.
///
/// Structural fields (setup, phase, round counter) are read-only; the two
/// effective combatants are exposed mutably for the duration of one dispatch.
pub struct HookContext<'a> {
    setup: &'a BattleSetup,
    phase: &'a Phase,
    round_count: u32,
    combatant_a: &'a mut Combatant,
    combatant_b: &'a mut Combatant,
}

impl<'a> HookContext<'a> {
    pub fn new(
        setup: &'a BattleSetup,
        phase: &'a Phase,
        round_count: u32,
        combatant_a: &'a mut Combatant,
        combatant_b: &'a mut Combatant,
    ) -> Self {
        Self {
            setup,
            phase,
            round_count,
            combatant_a,
            combatant_b,
        }
    }

    /// Mains, add-ons, terrain and seed as the battle was configured.
    pub fn setup(&self) -> &BattleSetup {
        self.setup
    }

    /// Terrain the battle is fought on, as configured.
    ///
    /// The live terrain's trigger counter is not visible here; it is being
    /// dispatched alongside the effects.
    pub fn terrain(&self) -> Option<&Terrain> {
        self.setup.terrain.as_ref()
    }

    pub fn seed(&self) -> u64 {
        self.setup.seed
    }

    pub fn phase(&self) -> &Phase {
        self.phase
    }

    pub fn phase_kind(&self) -> PhaseKind {
        self.phase.kind()
    }

    pub fn round_count(&self) -> u32 {
        self.round_count
    }

    /// Attack type of the current phase, if it is an attack phase.
    pub fn attack_type(&self) -> Option<AttackType> {
        self.phase.attack_type()
    }

    /// Side currently acting, for phases inside the turn cycle.
    pub fn attacker(&self) -> Option<Side> {
        self.phase.turn().map(|flags| flags.attacker())
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::A => &*self.combatant_a,
            Side::B => &*self.combatant_b,
        }
    }

    pub fn combatant_mut(&mut self, side: Side) -> &mut Combatant {
        match side {
            Side::A => &mut *self.combatant_a,
            Side::B => &mut *self.combatant_b,
        }
    }

    pub fn opponent(&self, side: Side) -> &Combatant {
        self.combatant(side.other())
    }

    pub fn opponent_mut(&mut self, side: Side) -> &mut Combatant {
        self.combatant_mut(side.other())
    }

    /// Both combatants at once, in `(A, B)` order.
    pub fn both_mut(&mut self) -> (&mut Combatant, &mut Combatant) {
        (&mut *self.combatant_a, &mut *self.combatant_b)
    }
}
