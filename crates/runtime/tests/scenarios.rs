use battle_core::{
    BaseStats, Combatant, Effect, Phase, PhaseKind, Side, SignalType, hook_fn,
};
use runtime::{BattleSimulator, SimulatorConfig};

fn twin(name: &str) -> Combatant {
    Combatant::new(name, BaseStats::new(50, 50, 10, 10, 10, 10))
}

/// Two identical combatants always produce exactly one fully stripped loser.
#[test]
fn identical_combatants_fight_to_a_single_loser() {
    for seed in 0..20 {
        let mut sim = BattleSimulator::new(SimulatorConfig::debug().with_seed(seed));
        sim.load_combatants(twin("Left"), twin("Right"));

        let snapshot = sim.run_battle().expect("battle should finish");
        let stripped: Vec<Side> = [Side::A, Side::B]
            .into_iter()
            .filter(|side| {
                let c = snapshot.combatant(*side);
                c.armor == 0 && c.shields == 0
            })
            .collect();

        assert_eq!(stripped.len(), 1, "seed {seed}");
        assert!(snapshot.round_count() > 1, "seed {seed}");
        assert_eq!(snapshot.winner(), Some(stripped[0].other()));
    }
}

/// A velocity of 1000 against 0 wins the initiative roll.
#[test]
fn fast_combatant_attacks_first() {
    let mut sim = BattleSimulator::new(SimulatorConfig::debug());
    sim.load_combatants(
        Combatant::new("Fast", BaseStats::new(50, 50, 10, 10, 10, 1000)),
        Combatant::new("Slow", BaseStats::new(50, 50, 10, 10, 10, 0)),
    );

    let mut first = 0;
    for seed in 0..100 {
        sim.start_battle_with_seed(seed).unwrap();
        let phase = *sim.run_round(PhaseKind::VelocityRoll).unwrap();
        match phase {
            Phase::TurnStart(flags) if flags.a_is_attacking => first += 1,
            Phase::TurnStart(_) => {}
            other => panic!("expected TurnStart after the roll, got {other:?}"),
        }
    }
    assert!(first >= 95, "fast side went first {first} times");
}

/// A ROUND_START effect is visible once the first round has completed.
#[test]
fn round_start_effect_applies_once_per_round() {
    let sharpen = Effect::new(
        "Sharpen",
        hook_fn(
            |_, _, signal| signal.kind == SignalType::RoundStart,
            |info, ctx, _| {
                let owner = ctx.combatant_mut(info.owner()?);
                owner.firepower += 10;
                Ok(())
            },
        ),
    );

    let mut sim = BattleSimulator::new(SimulatorConfig::debug());
    sim.load_combatants(twin("Left").with_effect(sharpen), twin("Right"));

    let phase = *sim.run_round(PhaseKind::RoundEnd).unwrap();
    assert_eq!(phase, Phase::RoundEnd);

    let state = sim.current().unwrap();
    assert_eq!(state.round_count(), 1);
    assert_eq!(state.combatant(Side::A).firepower, 20);
    assert_eq!(state.combatant(Side::A).effects[0].trigger_count, 1);
    assert_eq!(state.combatant(Side::B).firepower, 10);

    // the loaded combatant is untouched
    assert_eq!(sim.combatant(Side::A).unwrap().firepower, 10);
}

/// Add-ons are summed into the effective combatant, mains stay as configured.
#[test]
fn add_ons_fight_merged() {
    let mut sim = BattleSimulator::new(SimulatorConfig::debug());
    sim.load_combatants(twin("Left"), twin("Right"));
    sim.set_adds(Side::B, vec![Combatant::new("Drone", BaseStats::new(25, 0, 0, 0, 0, 5))]);
    sim.start_battle().unwrap();

    let state = sim.current().unwrap();
    assert_eq!(state.combatant(Side::B).armor, 75);
    assert_eq!(state.combatant(Side::B).velocity, 15);
    assert_eq!(state.snapshot().setup().main_b.armor, 50);
    assert_eq!(state.snapshot().setup().adds_b.len(), 1);
}

/// Every battle terminates well inside the default ceiling.
#[test]
fn battles_terminate() {
    let mut sim = BattleSimulator::new(SimulatorConfig::debug());
    sim.load_combatants(
        Combatant::new("Glass", BaseStats::new(1, 0, 1, 1, 1, 0)),
        Combatant::new("Tank", BaseStats::new(5000, 5000, 1, 1, 1, 0)),
    );

    let tally = sim.run_multiple_battles(5).unwrap();
    assert!(tally.is_complete());
    assert!(tally.average_rounds() < 300.0);
}
