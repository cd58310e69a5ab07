//! Command implementations for mvm
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod batch;
mod plan;
mod run;
mod show;

pub use batch::Batch;
pub use plan::Plan;
pub use run::Run;
pub use show::Show;

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use battle_content::{BattleSpec, BehaviorRegistry, Catalog, ConfigLoader, ContentFactory};
use battle_core::Side;
use clap::Args;
use runtime::{BattleSimulator, SimulatorConfig, load_battle};

/// Where combatants, terrains and engine settings come from.
#[derive(Args, Debug, Default)]
pub struct ContentArgs {
    /// Content directory (combatants/, terrains.toml, battles.toml, config.toml).
    /// The built-in catalog is used when omitted.
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Engine config file; replaces MAX_ROUNDS and STRICT_HOOKS from the environment
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl ContentArgs {
    pub fn catalog(&self) -> Result<Catalog> {
        let registry = BehaviorRegistry::builtin();
        match &self.data_dir {
            Some(dir) => ContentFactory::new(dir).load_catalog(&registry),
            None => Catalog::builtin(&registry),
        }
    }

    pub fn apply(&self, mut config: SimulatorConfig) -> Result<SimulatorConfig> {
        if let Some(path) = &self.config {
            config.engine = ConfigLoader::load(path)
                .with_context(|| format!("Failed to load engine config {}", path.display()))?;
            // debug mode always propagates hook failures
            config.engine.strict_hooks |= config.is_debug();
        }
        Ok(config)
    }
}

/// The two sides of a single matchup.
#[derive(Args, Debug)]
pub struct MatchupArgs {
    /// Main combatant of side A
    pub combatant_a: String,

    /// Main combatant of side B
    pub combatant_b: String,

    /// Terrain key
    #[arg(long)]
    pub terrain: Option<String>,

    /// Add-on fighting with side A (repeatable)
    #[arg(long = "add-a")]
    pub adds_a: Vec<String>,

    /// Add-on fighting with side B (repeatable)
    #[arg(long = "add-b")]
    pub adds_b: Vec<String>,

    /// Stat override of a main combatant, e.g. `a.armor=500` (repeatable)
    #[arg(long = "set", value_name = "SIDE.STAT=VALUE")]
    pub overrides: Vec<String>,
}

impl MatchupArgs {
    pub fn to_spec(&self, seed: Option<u64>) -> BattleSpec {
        BattleSpec {
            name: format!("{} vs {}", self.combatant_a, self.combatant_b),
            combatant_a: self.combatant_a.clone(),
            combatant_b: self.combatant_b.clone(),
            terrain: self.terrain.clone(),
            adds_a: self.adds_a.clone(),
            adds_b: self.adds_b.clone(),
            seed,
        }
    }

    /// Loads the matchup into `simulator` and applies the stat overrides.
    pub fn load(&self, simulator: &mut BattleSimulator, catalog: &Catalog) -> Result<()> {
        load_battle(simulator, catalog, &self.to_spec(None))?;
        for raw in &self.overrides {
            let (side, stat, value) = parse_override(raw)?;
            simulator.modify_combatant_by_name(side, stat, value)?;
        }
        Ok(())
    }
}

fn parse_override(raw: &str) -> Result<(Side, &str, u32)> {
    let (target, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("override '{}' is not SIDE.STAT=VALUE", raw))?;
    let (side, stat) = target
        .split_once('.')
        .ok_or_else(|| anyhow!("override '{}' is not SIDE.STAT=VALUE", raw))?;
    let side = side
        .parse::<Side>()
        .with_context(|| format!("unknown side '{}' in override '{}'", side, raw))?;
    let value = value
        .trim()
        .parse::<u32>()
        .with_context(|| format!("invalid value in override '{}'", raw))?;
    Ok((side, stat, value))
}
