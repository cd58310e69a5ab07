//! Simulator driver for deterministic battles.
//!
//! This crate wires the rules engine and the content catalogs into a
//! synchronous simulator API. Consumers embed [`BattleSimulator`] to start,
//! step, run and replay battles, and to run batches and battle plans.
//!
//! Modules are organized by responsibility:
//! - [`simulator`] hosts the driver
//! - [`config`] holds the run mode and environment loading
//! - [`plan`] runs battle plans against a catalog
//! - [`tally`] aggregates batch results
pub mod config;
pub mod error;
pub mod plan;
pub mod simulator;
pub mod tally;

pub use config::{Mode, SimulatorConfig};
pub use error::{Result, RuntimeError};
pub use plan::{BattleOutcome, load_battle, run_battle_plan};
pub use simulator::BattleSimulator;
pub use tally::BattleTally;
