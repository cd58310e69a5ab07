//! Battle simulator driver.
//!
//! [`BattleSimulator`] holds the configured combatants and terrain, starts
//! battles from them and drives the engine one transition at a time, one
//! round at a time or to completion. It is the surface an interactive or
//! batch frontend talks to.

use battle_content::parse_stat;
use battle_core::{
    BattleSetup, BattleSnapshot, BattleState, Combatant, Phase, PhaseKind, Side, StatKind, Terrain,
    history_root,
};
use tracing::{error, info, warn};

use crate::config::SimulatorConfig;
use crate::error::{Result, RuntimeError};
use crate::tally::BattleTally;

/// Drives battles between two loaded combatants.
#[derive(Debug, Default)]
pub struct BattleSimulator {
    config: SimulatorConfig,
    main_a: Option<Combatant>,
    adds_a: Vec<Combatant>,
    main_b: Option<Combatant>,
    adds_b: Vec<Combatant>,
    terrain: Option<Terrain>,
    current: Option<BattleState>,
}

impl BattleSimulator {
    pub fn new(config: SimulatorConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Seed used by the next [`Self::start_battle`].
    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.config.seed = seed;
    }

    /// Loads the two main combatants. Add-ons and terrain are kept.
    pub fn load_combatants(&mut self, main_a: Combatant, main_b: Combatant) {
        info!(
            target: "runtime::simulator",
            a = %main_a.name,
            b = %main_b.name,
            "loaded combatants"
        );
        self.main_a = Some(main_a);
        self.main_b = Some(main_b);
    }

    /// Replaces the add-on list of `side`.
    pub fn set_adds(&mut self, side: Side, adds: Vec<Combatant>) {
        match side {
            Side::A => self.adds_a = adds,
            Side::B => self.adds_b = adds,
        }
    }

    pub fn load_terrain(&mut self, terrain: Terrain) {
        info!(target: "runtime::simulator", terrain = %terrain.name, "loaded terrain");
        self.terrain = Some(terrain);
    }

    pub fn clear_terrain(&mut self) {
        self.terrain = None;
    }

    pub fn combatant(&self, side: Side) -> Option<&Combatant> {
        match side {
            Side::A => self.main_a.as_ref(),
            Side::B => self.main_b.as_ref(),
        }
    }

    pub fn terrain(&self) -> Option<&Terrain> {
        self.terrain.as_ref()
    }

    /// Overwrites one stat of a loaded main combatant. Takes effect from the
    /// next battle on.
    pub fn modify_combatant(&mut self, side: Side, stat: StatKind, value: u32) -> Result<()> {
        let combatant = match side {
            Side::A => self.main_a.as_mut(),
            Side::B => self.main_b.as_mut(),
        }
        .ok_or(RuntimeError::CombatantNotLoaded { side })?;

        combatant.set_stat(stat, value);
        info!(
            target: "runtime::simulator",
            side = %side,
            name = %combatant.name,
            stat = %stat,
            value,
            "modified combatant"
        );
        Ok(())
    }

    /// Same as [`Self::modify_combatant`] with the stat given by name.
    pub fn modify_combatant_by_name(&mut self, side: Side, stat: &str, value: u32) -> Result<()> {
        let stat = parse_stat(stat)?;
        self.modify_combatant(side, stat, value)
    }

    /// Starts a battle with the configured seed policy.
    pub fn start_battle(&mut self) -> Result<()> {
        let seed = self.config.default_seed().unwrap_or_else(rand::random);
        self.start_battle_with_seed(seed)
    }

    /// Starts a battle from copies of the loaded combatants and terrain.
    pub fn start_battle_with_seed(&mut self, seed: u64) -> Result<()> {
        let setup = self.setup(seed)?;
        info!(
            target: "runtime::simulator",
            a = %setup.main_a.name,
            b = %setup.main_b.name,
            terrain = setup.terrain.as_ref().map_or("none", |t| t.name.as_str()),
            seed,
            "battle started"
        );
        self.current = Some(BattleState::start(setup, self.config.engine));
        Ok(())
    }

    fn setup(&self, seed: u64) -> Result<BattleSetup> {
        let main_a = self
            .main_a
            .clone()
            .ok_or(RuntimeError::CombatantNotLoaded { side: Side::A })?;
        let main_b = self
            .main_b
            .clone()
            .ok_or(RuntimeError::CombatantNotLoaded { side: Side::B })?;

        let mut setup = BattleSetup::new(main_a, main_b, seed)
            .with_adds_a(self.adds_a.clone())
            .with_adds_b(self.adds_b.clone());
        if let Some(terrain) = &self.terrain {
            setup = setup.with_terrain(terrain.clone());
        }
        Ok(setup)
    }

    /// Advances the current battle by one transition.
    ///
    /// The battle is dropped when the transition fails; its seed is in the
    /// error context.
    pub fn step(&mut self) -> Result<&Phase> {
        let state = self.current.take().ok_or(RuntimeError::NoBattle)?;
        let state = self.current.insert(state.transition()?);
        Ok(state.phase())
    }

    /// Runs a battle to `End`, starting a new one when none is in progress.
    pub fn run_battle(&mut self) -> Result<&BattleSnapshot> {
        if self.is_battle_over() {
            self.start_battle()?;
        }
        self.finish_current()?;

        let result = self.battle_result();
        info!(target: "runtime::simulator", "{}", result);
        self.current
            .as_ref()
            .map(BattleState::snapshot)
            .ok_or(RuntimeError::NoBattle)
    }

    fn finish_current(&mut self) -> Result<()> {
        let state = self.current.take().ok_or(RuntimeError::NoBattle)?;
        self.current = Some(state.run_to_end()?);
        Ok(())
    }

    /// Runs the current round, or stops early at `until`.
    ///
    /// A battle sitting at `RoundEnd` first moves into the next round.
    /// Transitions then continue until `RoundEnd`, `End` or a phase of kind
    /// `until` is reached; stopping at `until` performs one more transition,
    /// so `until` itself is resolved.
    pub fn run_round(&mut self, until: PhaseKind) -> Result<&Phase> {
        if self.is_battle_over() {
            self.start_battle()?;
        }
        if self.current_phase_kind() == Some(PhaseKind::RoundEnd) {
            self.step()?;
        }

        let settled = |kind: PhaseKind| matches!(kind, PhaseKind::RoundEnd | PhaseKind::End);
        while self
            .current_phase_kind()
            .is_some_and(|kind| !settled(kind) && kind != until)
        {
            self.step()?;
        }
        if self
            .current_phase_kind()
            .is_some_and(|kind| kind == until && !settled(kind))
        {
            self.step()?;
        }

        info!(target: "runtime::simulator", "{}", self.battle_result());
        self.current
            .as_ref()
            .map(BattleState::phase)
            .ok_or(RuntimeError::NoBattle)
    }

    /// Runs `count` battles back to back and tallies the winners.
    ///
    /// Battle `i` uses `base + i` when a seed is configured (or the debug
    /// seed in debug mode), otherwise a fresh seed. A failing battle stops
    /// the batch: in debug mode the error is returned together with the
    /// partial tally, otherwise the partial tally is returned.
    pub fn run_multiple_battles(&mut self, count: u32) -> Result<BattleTally> {
        for side in [Side::A, Side::B] {
            if self.combatant(side).is_none() {
                warn!(target: "runtime::simulator", side = %side, "batch requested without combatant");
                return Err(RuntimeError::CombatantNotLoaded { side });
            }
        }

        let base = self.config.default_seed();
        let mut tally = BattleTally::new(count);

        for index in 0..count {
            let seed = base.map_or_else(rand::random, |base| base.wrapping_add(u64::from(index)));
            self.start_battle_with_seed(seed)?;

            match self.finish_current() {
                Ok(()) => {
                    if let Some(state) = &self.current {
                        tally.record(state.snapshot());
                    }
                }
                Err(RuntimeError::Battle(source)) => {
                    error!(
                        target: "runtime::simulator",
                        battle = index + 1,
                        seed,
                        error = %source,
                        "batch stopped"
                    );
                    self.log_tally(&tally);
                    if self.config.is_debug() {
                        return Err(RuntimeError::BatchFailed {
                            failed_at: index + 1,
                            tally,
                            source,
                        });
                    }
                    return Ok(tally);
                }
                Err(other) => return Err(other),
            }
        }

        self.log_tally(&tally);
        Ok(tally)
    }

    fn log_tally(&self, tally: &BattleTally) {
        let name = |side| self.combatant(side).map_or("?", |c| c.name.as_str());
        info!(
            target: "runtime::simulator",
            a = name(Side::A),
            b = name(Side::B),
            completed = tally.completed,
            requested = tally.requested,
            wins_a = tally.wins_a,
            wins_b = tally.wins_b,
            average_rounds = tally.average_rounds(),
            "batch finished"
        );
    }

    /// Replays the battle recorded at `history[index]` from its setup.
    ///
    /// Any archived snapshot carries the full setup (mains, add-ons,
    /// terrain, seed), so the returned state reproduces the whole battle.
    pub fn replay_from(&self, index: usize) -> Result<BattleState> {
        let history = self.history();
        let snapshot = history.get(index).ok_or(RuntimeError::HistoryIndex {
            index,
            len: history.len(),
        })?;

        let setup = snapshot.setup().clone();
        info!(target: "runtime::simulator", index, seed = setup.seed, "replaying battle");
        Ok(BattleState::start(setup, self.config.engine).run_to_end()?)
    }

    pub fn current(&self) -> Option<&BattleState> {
        self.current.as_ref()
    }

    fn current_phase_kind(&self) -> Option<PhaseKind> {
        self.current.as_ref().map(|state| state.phase().kind())
    }

    pub fn round_count(&self) -> Option<u32> {
        self.current.as_ref().map(BattleState::round_count)
    }

    /// True when no battle is running (never started, ended or dropped).
    pub fn is_battle_over(&self) -> bool {
        self.current.as_ref().is_none_or(BattleState::is_finished)
    }

    /// Archived snapshots of the current battle (empty before the first one).
    pub fn history(&self) -> &[BattleSnapshot] {
        self.current
            .as_ref()
            .map(BattleState::saved_states)
            .unwrap_or_default()
    }

    /// Hex digest of the current history.
    pub fn history_digest(&self) -> Result<String> {
        history_root(self.history())
            .map(hex::encode)
            .map_err(|e| RuntimeError::Serialization(e.to_string()))
    }

    pub fn export_history_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self.history()).map_err(RuntimeError::Export)
    }

    /// One line per side with current armor and shields.
    pub fn battle_status(&self) -> String {
        let Some(state) = &self.current else {
            return "Battle has not started.".to_owned();
        };
        let line = |side| {
            let c = state.combatant(side);
            format!("{} - Armor: {}, Shields: {}", c.name, c.armor, c.shields)
        };
        format!("{}\n{}", line(Side::A), line(Side::B))
    }

    pub fn battle_result(&self) -> String {
        let Some(state) = &self.current else {
            return "Battle has not started.".to_owned();
        };
        match state.snapshot().winner() {
            Some(side) => {
                let winner = state.combatant(side);
                format!(
                    "Battle ended. Winner: {} with AR {} & SH {}",
                    winner.name, winner.armor, winner.shields
                )
            }
            None => "Battle is still ongoing.".to_owned(),
        }
    }

    /// Stat blocks of both main combatants followed by the terrain.
    pub fn describe_loadout(&self) -> Result<String> {
        let a = self.combatant(Side::A).ok_or(RuntimeError::CombatantNotLoaded { side: Side::A })?;
        let b = self.combatant(Side::B).ok_or(RuntimeError::CombatantNotLoaded { side: Side::B })?;
        let terrain = self
            .terrain
            .as_ref()
            .map_or_else(|| "No terrain loaded.".to_owned(), ToString::to_string);

        Ok(format!(
            "--- Combatant A: {} ---\n{}\n\n--- Combatant B: {} ---\n{}\n\n{}",
            a.name, a, b.name, b, terrain
        ))
    }
}
