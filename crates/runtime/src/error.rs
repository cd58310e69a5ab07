//! Unified error types surfaced by the simulator API.
//!
//! Wraps engine failures and catalog configuration errors so callers can
//! bubble them up with consistent context.
use battle_content::ContentError;
use battle_core::{BattleError, Side};
use thiserror::Error;

use crate::tally::BattleTally;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Battle(#[from] BattleError),

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error("combatant {side} is not loaded")]
    CombatantNotLoaded { side: Side },

    #[error("no battle has been started")]
    NoBattle,

    #[error("snapshot {index} is out of range (history holds {len})")]
    HistoryIndex { index: usize, len: usize },

    #[error("battle {failed_at} of a {} battle batch failed", .tally.requested)]
    BatchFailed {
        failed_at: u32,
        tally: BattleTally,
        #[source]
        source: BattleError,
    },

    #[error("failed to export battle history")]
    Export(#[source] serde_json::Error),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl RuntimeError {
    /// True for configuration errors: the battle never started.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Content(_) | Self::CombatantNotLoaded { .. })
    }
}
