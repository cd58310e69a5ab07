//! Data-driven battle content and loaders.
//!
//! This crate houses the built-in abilities and terrain hazards and provides
//! loaders for TOML/RON data files:
//! - Combatant records (one file per combatant)
//! - Terrain catalogs
//! - Battle plans
//! - Engine configuration
//!
//! Catalog data never contains code. Effects and hazards reference hooks in a
//! [`BehaviorRegistry`] by key, so a catalog can be saved and loaded back.

pub mod behaviors;
pub mod catalog;
pub mod error;

#[cfg(feature = "serde")]
pub mod specs;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use behaviors::BehaviorRegistry;
pub use catalog::{Catalog, parse_stat};
pub use error::ContentError;

#[cfg(feature = "serde")]
pub use specs::{BattlePlan, BattleSpec, CombatantSpec, EffectSpec, TerrainCatalogFile, TerrainSpec};

#[cfg(feature = "loaders")]
pub use loaders::{
    CombatantLoader, ConfigLoader, ContentFactory, Format, LoadResult, PlanLoader, TerrainLoader,
};
