use battle_content::{BehaviorRegistry, Catalog};
use battle_core::{BaseStats, Combatant, Side};
use runtime::{BattleSimulator, SimulatorConfig};

fn catalog() -> Catalog {
    Catalog::builtin(&BehaviorRegistry::builtin()).expect("built-in catalog should load")
}

/// LCEnzo against Suit on Hela: every built-in hook family takes part.
fn loaded_simulator(seed: u64) -> BattleSimulator {
    let catalog = catalog();
    let mut sim = BattleSimulator::new(SimulatorConfig::debug().with_seed(seed));
    sim.load_combatants(
        catalog.combatant("LCEnzo").unwrap().clone(),
        catalog.combatant("Suit").unwrap().clone(),
    );
    sim.load_terrain(catalog.terrain("hela").unwrap().clone());
    sim
}

#[test]
fn same_seed_same_history() {
    for seed in [0, 1, 42, 9_999, u64::MAX] {
        let mut first = loaded_simulator(seed);
        let mut second = loaded_simulator(seed);

        first.run_battle().expect("battle should finish");
        second.run_battle().expect("battle should finish");

        assert_eq!(first.history().len(), second.history().len());
        assert_eq!(first.history(), second.history());
        assert_eq!(first.history_digest().unwrap(), second.history_digest().unwrap());
        assert_eq!(first.battle_result(), second.battle_result());
    }
}

#[test]
fn history_is_archived_in_phase_order() {
    let mut sim = loaded_simulator(7);
    sim.run_battle().unwrap();

    let history = sim.history();
    assert_eq!(history[0].phase().kind(), battle_core::PhaseKind::Start);
    assert!(history.last().is_some_and(|s| s.is_finished()));
    // End is archived exactly once
    assert_eq!(history.iter().filter(|s| s.is_finished()).count(), 1);
    // round counter never decreases
    assert!(history.windows(2).all(|w| w[0].round_count() <= w[1].round_count()));
}

#[test]
fn every_snapshot_records_the_seed() {
    let mut sim = loaded_simulator(1234);
    sim.run_battle().unwrap();

    assert!(sim.history().iter().all(|s| s.seed() == 1234));
}

#[test]
fn digest_tracks_the_seed() {
    let mut first = loaded_simulator(1);
    let mut second = loaded_simulator(2);
    first.run_battle().unwrap();
    second.run_battle().unwrap();

    assert_ne!(first.history_digest().unwrap(), second.history_digest().unwrap());
}

#[test]
fn exported_history_is_json_array() {
    let mut sim = loaded_simulator(3);
    sim.run_battle().unwrap();

    let json = sim.export_history_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let entries = value.as_array().expect("history exports as an array");
    assert_eq!(entries.len(), sim.history().len());
    assert!(entries[0]["combatant_a"]["name"] == "LCEnzo");
}

#[test]
fn batches_with_a_base_seed_repeat() {
    let run = || {
        let mut sim = BattleSimulator::new(SimulatorConfig::debug().with_seed(100));
        sim.load_combatants(
            Combatant::new("Left", BaseStats::new(50, 50, 10, 10, 10, 10)),
            Combatant::new("Right", BaseStats::new(50, 50, 10, 10, 10, 10)),
        );
        sim.run_multiple_battles(25).unwrap()
    };

    let first = run();
    assert_eq!(first, run());
    assert!(first.is_complete());
    assert_eq!(first.wins(Side::A) + first.wins(Side::B), 25);
}
