//! Battle state machine.
//!
//! A battle is a chain of [`BattleSnapshot`]s. [`BattleState::transition`]
//! archives the current snapshot, broadcasts the phase's signals through the
//! hooks and returns the state holding the next snapshot. The seeded
//! generator and the history travel with the state, never with a snapshot.
mod attack;
mod phase;
mod snapshot;

pub use phase::{Phase, PhaseKind, TurnFlags};
#[cfg(feature = "serde")]
pub use snapshot::history_root;
pub use snapshot::{BattleSetup, BattleSnapshot};

use std::sync::Arc;

use tracing::{debug, info};

use crate::combatant::{AttackType, Combatant, Side};
use crate::config::EngineConfig;
use crate::error::{BattleError, ErrorContext};
use crate::hooks::{self, HookCriticality};
use crate::rng::PcgRng;
use crate::signal::{Signal, SignalPayload, SignalType, VelocityRollData};

/// A battle in progress: the current snapshot plus everything that must not
/// take part in snapshot equality.
#[derive(Clone, Debug)]
pub struct BattleState {
    snapshot: BattleSnapshot,
    rng: PcgRng,
    config: EngineConfig,
    saved_states: Vec<BattleSnapshot>,
}

impl BattleState {
    /// Builds the `Start` snapshot: effective combatants are merged from the
    /// mains and add-ons and the generator is seeded from `setup.seed`.
    pub fn start(setup: BattleSetup, config: EngineConfig) -> Self {
        let rng = PcgRng::from_seed(setup.seed);
        Self {
            snapshot: BattleSnapshot::from_setup(Arc::new(setup)),
            rng,
            config,
            saved_states: Vec::new(),
        }
    }

    pub fn snapshot(&self) -> &BattleSnapshot {
        &self.snapshot
    }

    pub fn phase(&self) -> &Phase {
        &self.snapshot.phase
    }

    pub fn round_count(&self) -> u32 {
        self.snapshot.round_count
    }

    pub fn seed(&self) -> u64 {
        self.snapshot.seed()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        self.snapshot.combatant(side)
    }

    pub fn is_finished(&self) -> bool {
        self.snapshot.is_finished()
    }

    /// Archived snapshots, oldest first. Ends with the `End` snapshot once
    /// the battle is over.
    pub fn saved_states(&self) -> &[BattleSnapshot] {
        &self.saved_states
    }

    pub fn into_history(self) -> Vec<BattleSnapshot> {
        self.saved_states
    }

    /// Advances the battle by one phase.
    ///
    /// # Errors
    ///
    /// - [`BattleError::IllegalTransition`] when called on `End`
    /// - [`BattleError::RunawaySimulation`] when a new round would pass the
    ///   configured ceiling
    /// - [`BattleError::HookFailed`] when a hook fails under strict hooks
    pub fn transition(mut self) -> Result<BattleState, BattleError> {
        let phase = self.snapshot.phase;
        if phase.is_terminal() {
            return Err(BattleError::illegal_transition(self.error_context()));
        }

        self.saved_states.push(self.snapshot.clone());

        let next = match phase {
            Phase::Start => {
                self.emit(SignalType::BattleStart)?;
                Phase::RoundStart
            }
            Phase::RoundStart => {
                self.begin_round()?;
                Phase::VelocityRoll
            }
            Phase::VelocityRoll => Phase::TurnStart(TurnFlags::new(self.roll_velocity()?)),
            Phase::TurnStart(flags) => {
                self.emit(SignalType::TurnStart)?;
                Phase::FirepowerAttack(flags)
            }
            Phase::FirepowerAttack(flags) => self.attack_step(AttackType::Firepower, flags)?,
            Phase::BallisticsAttack(flags) => self.attack_step(AttackType::Ballistics, flags)?,
            Phase::ChemicalAttack(flags) => self.attack_step(AttackType::Chemical, flags)?,
            Phase::TurnEnd(flags) => {
                self.emit(SignalType::TurnEnd)?;
                let flags = flags.finish_turn();
                if self.snapshot.any_dead() || flags.both_finished() {
                    Phase::RoundEnd
                } else {
                    Phase::TurnStart(flags.swap())
                }
            }
            Phase::RoundEnd => {
                self.emit(SignalType::RoundEnd)?;
                if self.snapshot.any_dead() {
                    self.emit(SignalType::BattleEnd)?;
                    Phase::End
                } else {
                    Phase::RoundStart
                }
            }
            // rejected above
            Phase::End => Phase::End,
        };

        self.snapshot.phase = next;
        if next.is_terminal() {
            info!(
                target: "battle::engine",
                seed = self.seed(),
                rounds = self.snapshot.round_count,
                winner = ?self.snapshot.winner(),
                "battle ended"
            );
            self.saved_states.push(self.snapshot.clone());
        }

        Ok(self)
    }

    /// Transitions until `End` is reached.
    pub fn run_to_end(mut self) -> Result<BattleState, BattleError> {
        while !self.is_finished() {
            self = self.transition()?;
        }
        Ok(self)
    }

    fn begin_round(&mut self) -> Result<(), BattleError> {
        let ceiling = self.config.max_rounds;
        if self.snapshot.round_count >= ceiling {
            return Err(BattleError::runaway(ceiling, self.error_context()));
        }

        self.snapshot.round_count += 1;
        debug!(
            target: "battle::engine",
            round = self.snapshot.round_count,
            armor_a = self.snapshot.combatant_a.armor,
            shields_a = self.snapshot.combatant_a.shields,
            armor_b = self.snapshot.combatant_b.armor,
            shields_b = self.snapshot.combatant_b.shields,
            "round started"
        );
        self.emit(SignalType::RoundStart)
    }

    /// Rolls initiative and returns whether side A acts first.
    fn roll_velocity(&mut self) -> Result<bool, BattleError> {
        self.emit(SignalType::PreVelocityRoll)?;

        let roll_a = self.rng.range(1, 1000);
        let roll_b = self.rng.range(1, 1000);
        let data = VelocityRollData::new(
            roll_a,
            roll_b,
            self.snapshot.combatant_a.velocity,
            self.snapshot.combatant_b.velocity,
        );

        let mut signal = Signal::with_payload(
            SignalType::PostVelocityRoll,
            SignalPayload::VelocityRoll(data),
        );
        self.dispatch(&mut signal)?;

        let resolved = signal.velocity_roll().copied().unwrap_or(data);
        let a_is_attacking = resolved.resolve(data.a_is_attacking);
        debug!(
            target: "battle::engine",
            round = self.snapshot.round_count,
            total_a = resolved.total_a,
            total_b = resolved.total_b,
            a_is_attacking,
            "velocity rolled"
        );
        Ok(a_is_attacking)
    }

    /// Runs one attack phase and picks the phase that follows it.
    fn attack_step(&mut self, attack_type: AttackType, flags: TurnFlags) -> Result<Phase, BattleError> {
        attack::process_attack(self, attack_type, flags)?;

        let defender_dead = self.snapshot.combatant(flags.defender()).is_dead();
        Ok(match attack_type.next() {
            Some(next) if !defender_dead => Phase::attack(next, flags),
            _ => Phase::TurnEnd(flags),
        })
    }

    fn emit(&mut self, kind: SignalType) -> Result<(), BattleError> {
        self.dispatch(&mut Signal::new(kind))
    }

    pub(crate) fn dispatch(&mut self, signal: &mut Signal) -> Result<(), BattleError> {
        let criticality = HookCriticality::from_strict(self.config.strict_hooks);
        hooks::apply_effects(&mut self.snapshot, signal, criticality)
    }

    fn error_context(&self) -> ErrorContext {
        ErrorContext::new(
            self.snapshot.phase.kind(),
            self.snapshot.round_count,
            self.seed(),
        )
    }
}

impl PartialEq for BattleState {
    fn eq(&self, other: &Self) -> bool {
        self.snapshot == other.snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::BaseStats;
    use crate::hooks::{Effect, hook_fn};

    fn twin(name: &str) -> Combatant {
        Combatant::new(name, BaseStats::new(50, 50, 10, 10, 10, 10))
    }

    fn battle(seed: u64) -> BattleState {
        BattleState::start(BattleSetup::new(twin("A"), twin("B"), seed), EngineConfig::strict())
    }

    #[test]
    fn start_leads_to_round_start_then_velocity_roll() {
        let state = battle(1).transition().unwrap();
        assert_eq!(state.phase(), &Phase::RoundStart);
        assert_eq!(state.round_count(), 0);

        let state = state.transition().unwrap();
        assert_eq!(state.phase(), &Phase::VelocityRoll);
        assert_eq!(state.round_count(), 1);

        let state = state.transition().unwrap();
        assert_eq!(state.phase().kind(), PhaseKind::TurnStart);
        assert_eq!(state.saved_states().len(), 3);
    }

    #[test]
    fn full_turn_cycle_for_one_round() {
        let mut state = battle(3);
        let mut kinds = Vec::new();
        while state.round_count() < 2 && !state.is_finished() {
            state = state.transition().unwrap();
            kinds.push(state.phase().kind());
        }

        let expected_head = [
            PhaseKind::RoundStart,
            PhaseKind::VelocityRoll,
            PhaseKind::TurnStart,
            PhaseKind::FirepowerAttack,
            PhaseKind::BallisticsAttack,
            PhaseKind::ChemicalAttack,
            PhaseKind::TurnEnd,
            PhaseKind::TurnStart,
            PhaseKind::FirepowerAttack,
            PhaseKind::BallisticsAttack,
            PhaseKind::ChemicalAttack,
            PhaseKind::TurnEnd,
            PhaseKind::RoundEnd,
            PhaseKind::RoundStart,
        ];
        assert_eq!(&kinds[..expected_head.len()], &expected_head);
    }

    #[test]
    fn second_turn_belongs_to_the_other_side() {
        let mut state = battle(11);
        let mut attackers = Vec::new();
        while state.round_count() < 2 {
            state = state.transition().unwrap();
            if let Phase::TurnStart(flags) = state.phase() {
                attackers.push(flags.attacker());
            }
        }
        assert_eq!(attackers.len(), 2);
        assert_ne!(attackers[0], attackers[1]);
    }

    #[test]
    fn battle_reaches_end_and_archives_it_once() {
        let state = battle(5).run_to_end().unwrap();
        let history = state.saved_states();

        let ends = history.iter().filter(|s| s.is_finished()).count();
        assert_eq!(ends, 1);
        assert!(history.last().is_some_and(|s| s.is_finished()));
        assert_eq!(history[0].phase(), &Phase::Start);
        assert!(state.snapshot().winner().is_some());
    }

    #[test]
    fn transition_out_of_end_is_illegal() {
        let state = battle(5).run_to_end().unwrap();
        let err = state.transition().unwrap_err();
        assert!(matches!(err, BattleError::IllegalTransition { .. }));
    }

    #[test]
    fn same_seed_same_history() {
        let first = battle(42).run_to_end().unwrap();
        let second = battle(42).run_to_end().unwrap();

        assert_eq!(first, second);
        assert_eq!(first.saved_states(), second.saved_states());
    }

    #[test]
    fn runaway_ceiling_stops_harmless_combatants() {
        let pacifist = |name: &str| Combatant::new(name, BaseStats::new(10, 10, 0, 0, 0, 0));
        let setup = BattleSetup::new(pacifist("A"), pacifist("B"), 0);
        let config = EngineConfig::new().with_max_rounds(5);

        let err = BattleState::start(setup, config).run_to_end().unwrap_err();
        match err {
            BattleError::RunawaySimulation { ceiling, context } => {
                assert_eq!(ceiling, 5);
                assert_eq!(context.round, 5);
                assert_eq!(context.phase, PhaseKind::RoundStart);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn round_start_effect_sees_incremented_counter() {
        let marker = Effect::new(
            "Marker",
            hook_fn(
                |_, ctx, signal| signal.kind == SignalType::RoundStart && ctx.round_count() == 1,
                |info, ctx, _| {
                    let side = info.owner()?;
                    ctx.combatant_mut(side).firepower += 10;
                    Ok(())
                },
            ),
        );
        let setup = BattleSetup::new(twin("A").with_effect(marker), twin("B"), 9);

        let mut state = BattleState::start(setup, EngineConfig::strict());
        while state.phase() != &Phase::VelocityRoll {
            state = state.transition().unwrap();
        }
        assert_eq!(state.combatant(Side::A).firepower, 20);
    }

    #[test]
    fn velocity_flip_overrides_roll() {
        let coward = Effect::new(
            "Coward",
            hook_fn(
                |_, _, signal| signal.kind == SignalType::PostVelocityRoll,
                |_, _, signal| {
                    if let Some(data) = signal.velocity_roll_mut() {
                        data.a_is_attacking = !data.a_is_attacking;
                    }
                    Ok(())
                },
            ),
        );
        let fast = Combatant::new("Fast", BaseStats::new(50, 50, 10, 10, 10, 5000));
        let setup = BattleSetup::new(fast.with_effect(coward), twin("B"), 2);

        let mut state = BattleState::start(setup, EngineConfig::strict());
        while !matches!(state.phase(), Phase::TurnStart(_)) {
            state = state.transition().unwrap();
        }
        assert_eq!(state.phase().turn().map(|f| f.attacker()), Some(Side::B));
    }

    #[test]
    fn add_ons_are_merged_at_start() {
        let drone = Combatant::new("Drone", BaseStats::new(5, 5, 1, 1, 1, 1));
        let setup = BattleSetup::new(twin("A"), twin("B"), 0).with_adds_a(vec![drone]);
        let state = BattleState::start(setup, EngineConfig::strict());

        assert_eq!(state.combatant(Side::A).armor, 55);
        assert_eq!(state.combatant(Side::A).original().armor, 55);
        assert_eq!(state.snapshot().setup().main_a.armor, 50);
    }
}
