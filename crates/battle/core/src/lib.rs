//! Deterministic battle rules shared by the simulator and offline tools.
//!
//! `battle-core` defines the canonical combat rules (entity model, signals,
//! hooks, phase state machine) and exposes pure, synchronous APIs. Every
//! battle is driven through [`engine::BattleState::transition`], and a single
//! integer seed fully determines the outcome and the snapshot history.
pub mod combatant;
pub mod config;
pub mod engine;
pub mod error;
pub mod hooks;
pub mod rng;
pub mod signal;

pub use combatant::{
    ATTACK_HIT_CHANCE_MOD, AttackType, BaseStats, Combatant, DEFENSE_HIT_CHANCE_MOD, Side, StatKind,
};
pub use config::EngineConfig;
#[cfg(feature = "serde")]
pub use engine::history_root;
pub use engine::{BattleSetup, BattleSnapshot, BattleState, Phase, PhaseKind, TurnFlags};
pub use error::{BattleError, CombatError, ErrorContext, ErrorSeverity, HookError};
pub use hooks::{Effect, FnHook, Hook, HookContext, HookCriticality, HookInfo, Terrain, hook_fn};
pub use rng::PcgRng;
pub use signal::{
    DamageData, HIT_THRESHOLD, HitRollData, Signal, SignalPayload, SignalType, VelocityRollData,
};
