use battle_content::{BehaviorRegistry, Catalog};
use battle_core::{BaseStats, Combatant, Side};
use runtime::{BattleSimulator, SimulatorConfig};

fn assert_replays_match(sim: &BattleSimulator) {
    let history = sim.history();
    assert!(history.len() > 2);

    for index in [0, history.len() / 2, history.len() - 1] {
        let replayed = sim.replay_from(index).expect("replay should finish");
        assert_eq!(replayed.saved_states(), history, "replay from {index}");
        assert_eq!(
            replayed.snapshot(),
            history.last().unwrap(),
            "final state of replay from {index}"
        );
    }
}

#[test]
fn replay_reproduces_a_plain_battle() {
    let mut sim = BattleSimulator::new(SimulatorConfig::debug().with_seed(21));
    sim.load_combatants(
        Combatant::new("Left", BaseStats::new(40, 20, 10, 12, 8, 10)),
        Combatant::new("Right", BaseStats::new(30, 30, 9, 9, 9, 12)),
    );
    sim.run_battle().unwrap();

    assert_replays_match(&sim);
}

#[test]
fn replay_reproduces_adds_terrain_and_effects() {
    let catalog = Catalog::builtin(&BehaviorRegistry::builtin()).unwrap();
    let mut sim = BattleSimulator::new(SimulatorConfig::debug().with_seed(8));
    sim.load_combatants(
        catalog.combatant("LCEnzo").unwrap().clone(),
        catalog.combatant("Shinigami").unwrap().clone(),
    );
    sim.set_adds(Side::A, vec![catalog.combatant("Suit").unwrap().clone()]);
    sim.load_terrain(catalog.terrain("malvinas").unwrap().clone());
    sim.run_battle().unwrap();

    assert_replays_match(&sim);
}

#[test]
fn replay_does_not_disturb_the_current_battle() {
    let mut sim = BattleSimulator::new(SimulatorConfig::debug().with_seed(4));
    sim.load_combatants(
        Combatant::new("Left", BaseStats::new(50, 50, 10, 10, 10, 10)),
        Combatant::new("Right", BaseStats::new(50, 50, 10, 10, 10, 10)),
    );
    sim.run_battle().unwrap();
    let digest = sim.history_digest().unwrap();

    sim.replay_from(3).unwrap();
    assert_eq!(sim.history_digest().unwrap(), digest);
    assert!(sim.is_battle_over());
}
