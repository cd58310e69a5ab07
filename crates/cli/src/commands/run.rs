use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use runtime::{BattleSimulator, SimulatorConfig};

use super::{ContentArgs, MatchupArgs};

/// Run a single battle and print its result
#[derive(Parser, Debug)]
pub struct Run {
    #[command(flatten)]
    pub matchup: MatchupArgs,

    #[command(flatten)]
    pub content: ContentArgs,

    /// Battle seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write the snapshot history to this file as JSON
    #[arg(long)]
    pub history: Option<PathBuf>,
}

impl Run {
    pub fn execute(self, config: SimulatorConfig) -> Result<()> {
        let mut config = self.content.apply(config)?;
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        let catalog = self.content.catalog()?;

        let mut simulator = BattleSimulator::new(config);
        self.matchup.load(&mut simulator, &catalog)?;
        simulator.run_battle()?;

        println!("{}", simulator.battle_status());
        println!("{}", simulator.battle_result());
        if let Some(state) = simulator.current() {
            println!("Rounds: {}, seed: {}", state.round_count(), state.seed());
        }
        println!("History digest: {}", simulator.history_digest()?);

        if let Some(path) = &self.history {
            let json = simulator.export_history_json()?;
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write history {}", path.display()))?;
            println!("History written to {}", path.display());
        }
        Ok(())
    }
}
