use std::path::PathBuf;

use anyhow::{Result, bail};
use battle_content::{ContentFactory, PlanLoader};
use clap::Parser;
use runtime::{BattleSimulator, SimulatorConfig, run_battle_plan};

use super::ContentArgs;

/// Run the battles of a battle plan in order
#[derive(Parser, Debug)]
pub struct Plan {
    #[command(flatten)]
    pub content: ContentArgs,

    /// Battle plan file; defaults to battles.toml in --data-dir
    #[arg(long)]
    pub plan: Option<PathBuf>,

    /// Print the outcomes as JSON
    #[arg(long)]
    pub json: bool,
}

impl Plan {
    pub fn execute(self, config: SimulatorConfig) -> Result<()> {
        let config = self.content.apply(config)?;
        let catalog = self.content.catalog()?;
        let plan = match (&self.plan, &self.content.data_dir) {
            (Some(path), _) => PlanLoader::load(path)?,
            (None, Some(dir)) => ContentFactory::new(dir).load_plan()?,
            (None, None) => bail!("no battle plan: pass --plan or --data-dir"),
        };

        let mut simulator = BattleSimulator::new(config);
        let outcomes = run_battle_plan(&mut simulator, &catalog, &plan.battles)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&outcomes)?);
            return Ok(());
        }
        for outcome in &outcomes {
            println!(
                "{}: {} ({} rounds, seed {})",
                outcome.name, outcome.result, outcome.rounds, outcome.seed
            );
        }
        Ok(())
    }
}
