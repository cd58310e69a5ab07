use anyhow::Result;
use clap::Parser;
use runtime::{BattleSimulator, SimulatorConfig};

use super::{ContentArgs, MatchupArgs};

/// Run a batch of battles between two combatants and tally the winners
#[derive(Parser, Debug)]
pub struct Batch {
    #[command(flatten)]
    pub matchup: MatchupArgs,

    #[command(flatten)]
    pub content: ContentArgs,

    /// Number of battles
    #[arg(short = 'n', long, default_value_t = 100)]
    pub count: u32,

    /// Base seed; battle i uses seed + i
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Batch {
    pub fn execute(self, config: SimulatorConfig) -> Result<()> {
        let mut config = self.content.apply(config)?;
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        let catalog = self.content.catalog()?;

        let mut simulator = BattleSimulator::new(config);
        self.matchup.load(&mut simulator, &catalog)?;

        let tally = simulator.run_multiple_battles(self.count)?;
        println!("{}", tally);
        Ok(())
    }
}
