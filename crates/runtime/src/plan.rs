//! Battle plan runner.

use battle_content::{BattleSpec, Catalog};
use battle_core::{Combatant, Side};
use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::simulator::BattleSimulator;

/// Result of one battle of a plan.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BattleOutcome {
    pub name: String,
    pub result: String,
    pub winner: Option<String>,
    pub rounds: u32,
    pub seed: u64,
}

/// Loads the combatants, add-ons and terrain of `spec` into `simulator`.
pub fn load_battle(simulator: &mut BattleSimulator, catalog: &Catalog, spec: &BattleSpec) -> Result<()> {
    let main_a = catalog.combatant(&spec.combatant_a)?.clone();
    let main_b = catalog.combatant(&spec.combatant_b)?.clone();
    let adds_a = resolve_adds(catalog, &spec.adds_a)?;
    let adds_b = resolve_adds(catalog, &spec.adds_b)?;
    let terrain = spec
        .terrain
        .as_deref()
        .map(|key| catalog.terrain(key).cloned())
        .transpose()?;

    simulator.load_combatants(main_a, main_b);
    simulator.set_adds(Side::A, adds_a);
    simulator.set_adds(Side::B, adds_b);
    match terrain {
        Some(terrain) => simulator.load_terrain(terrain),
        None => simulator.clear_terrain(),
    }
    Ok(())
}

fn resolve_adds(catalog: &Catalog, names: &[String]) -> Result<Vec<Combatant>> {
    names
        .iter()
        .map(|name| -> Result<Combatant> { Ok(catalog.combatant(name)?.clone()) })
        .collect()
}

/// Runs the battles of a plan in listed order on one simulator.
///
/// Every battle is resolved against `catalog` before it starts, so an
/// unknown name stops the plan with a configuration error.
pub fn run_battle_plan<'a>(
    simulator: &mut BattleSimulator,
    catalog: &Catalog,
    battles: impl IntoIterator<Item = &'a BattleSpec>,
) -> Result<Vec<BattleOutcome>> {
    let mut outcomes = Vec::new();

    for spec in battles {
        load_battle(simulator, catalog, spec)?;
        info!(target: "runtime::simulator", battle = %spec.name, "starting battle");

        match spec.seed {
            Some(seed) => simulator.start_battle_with_seed(seed)?,
            None => simulator.start_battle()?,
        }
        let snapshot = simulator.run_battle()?;

        let winner = snapshot
            .winner()
            .map(|side| snapshot.combatant(side).name.clone());
        let rounds = snapshot.round_count();
        let seed = snapshot.seed();
        outcomes.push(BattleOutcome {
            name: spec.name.clone(),
            result: simulator.battle_result(),
            winner,
            rounds,
            seed,
        });
    }

    Ok(outcomes)
}
