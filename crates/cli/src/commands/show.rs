use anyhow::Result;
use clap::Parser;
use runtime::{BattleSimulator, SimulatorConfig};

use super::{ContentArgs, MatchupArgs};

/// Print the stat blocks of two combatants and a terrain
#[derive(Parser, Debug)]
pub struct Show {
    #[command(flatten)]
    pub matchup: MatchupArgs,

    #[command(flatten)]
    pub content: ContentArgs,
}

impl Show {
    pub fn execute(self, config: SimulatorConfig) -> Result<()> {
        let catalog = self.content.catalog()?;
        let mut simulator = BattleSimulator::new(config);
        self.matchup.load(&mut simulator, &catalog)?;

        println!("{}", simulator.describe_loadout()?);
        Ok(())
    }
}
