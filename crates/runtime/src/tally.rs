//! Aggregate results of a batch of battles.

use std::fmt;

use battle_core::{BattleSnapshot, Side};
use serde::Serialize;

/// Wins and round counts over a batch.
///
/// Only completed battles are counted; a batch that stops early reports
/// what it finished.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BattleTally {
    pub requested: u32,
    pub completed: u32,
    pub wins_a: u32,
    pub wins_b: u32,
    pub total_rounds: u64,
}

impl BattleTally {
    pub fn new(requested: u32) -> Self {
        Self {
            requested,
            ..Self::default()
        }
    }

    /// Counts a finished battle.
    pub fn record(&mut self, snapshot: &BattleSnapshot) {
        self.completed += 1;
        self.total_rounds += u64::from(snapshot.round_count());
        match snapshot.winner() {
            Some(Side::A) => self.wins_a += 1,
            Some(Side::B) => self.wins_b += 1,
            None => {}
        }
    }

    pub fn wins(&self, side: Side) -> u32 {
        match side {
            Side::A => self.wins_a,
            Side::B => self.wins_b,
        }
    }

    /// Mean round count of completed battles (0 when none completed).
    pub fn average_rounds(&self) -> f64 {
        if self.completed == 0 {
            return 0.0;
        }
        self.total_rounds as f64 / f64::from(self.completed)
    }

    /// Share of completed battles won by `side`, in percent.
    pub fn win_rate(&self, side: Side) -> f64 {
        if self.completed == 0 {
            return 0.0;
        }
        f64::from(self.wins(side)) * 100.0 / f64::from(self.completed)
    }

    pub fn is_complete(&self) -> bool {
        self.completed == self.requested
    }
}

impl fmt::Display for BattleTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} battles: A won {} ({:.2}%), B won {} ({:.2}%), average rounds {:.2}",
            self.completed,
            self.requested,
            self.wins_a,
            self.win_rate(Side::A),
            self.wins_b,
            self.win_rate(Side::B),
            self.average_rounds()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tally_has_zero_averages() {
        let tally = BattleTally::new(10);
        assert_eq!(tally.average_rounds(), 0.0);
        assert_eq!(tally.win_rate(Side::A), 0.0);
        assert!(!tally.is_complete());
    }

    #[test]
    fn rates_use_completed_battles() {
        let tally = BattleTally {
            requested: 5,
            completed: 4,
            wins_a: 3,
            wins_b: 1,
            total_rounds: 10,
        };
        assert_eq!(tally.average_rounds(), 2.5);
        assert_eq!(tally.win_rate(Side::A), 75.0);
        assert_eq!(tally.wins(Side::B), 1);
        assert_eq!(
            tally.to_string(),
            "4/5 battles: A won 3 (75.00%), B won 1 (25.00%), average rounds 2.50"
        );
    }
}
