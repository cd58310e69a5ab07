//! Registry of named hook behaviours.
//!
//! Catalog files never contain code: effects and hazards name a behaviour
//! key, and the registry turns the key into a shared [`Hook`].
mod effects;
mod hazards;

pub use effects::{Extra, FlareKnives, LastStand, ShieldPlates, Switcharoo, TandemDemo};
pub use hazards::{Badaxsan, Hela, LakeTampua, Malvinas, RuthenianGrasses};

use std::collections::BTreeMap;
use std::sync::Arc;

use battle_core::{Effect, Hook, Terrain};

use crate::error::ContentError;

#[derive(Clone)]
struct EffectBehavior {
    name: String,
    hook: Arc<dyn Hook>,
}

/// Maps behaviour keys to hooks.
///
/// Each registered hook is shared by every effect or terrain built from it;
/// per-instance state (trigger counts) lives on the [`Effect`] or
/// [`Terrain`].
#[derive(Clone, Default)]
pub struct BehaviorRegistry {
    effects: BTreeMap<String, EffectBehavior>,
    hazards: BTreeMap<String, Arc<dyn Hook>>,
}

impl BehaviorRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with every built-in ability and hazard.
    pub fn builtin() -> Self {
        let mut registry = Self::new();

        registry.register_effect("switcharoo", "Switcharoo", Arc::new(Switcharoo));
        registry.register_effect("extra", "Extra", Arc::new(Extra));
        registry.register_effect("last_stand", "Last Stand", Arc::new(LastStand));
        registry.register_effect("shield_plates", "Shield Plates", Arc::new(ShieldPlates));
        registry.register_effect("flare_knives", "Flare Knives", Arc::new(FlareKnives));
        registry.register_effect("tandem_demo", "Tandem Demo", Arc::new(TandemDemo));

        registry.register_hazard("hela", Arc::new(Hela));
        registry.register_hazard("lake_tampua", Arc::new(LakeTampua));
        registry.register_hazard("malvinas", Arc::new(Malvinas));
        registry.register_hazard("ruthenian_grasses", Arc::new(RuthenianGrasses));
        registry.register_hazard("badaxsan", Arc::new(Badaxsan));

        registry
    }

    /// Registers an effect behaviour under `key` with a default display name.
    pub fn register_effect(
        &mut self,
        key: impl Into<String>,
        name: impl Into<String>,
        hook: Arc<dyn Hook>,
    ) {
        self.effects.insert(
            key.into(),
            EffectBehavior {
                name: name.into(),
                hook,
            },
        );
    }

    pub fn register_hazard(&mut self, key: impl Into<String>, hook: Arc<dyn Hook>) {
        self.hazards.insert(key.into(), hook);
    }

    /// A fresh effect (zero triggers) for the behaviour `key`.
    pub fn effect(&self, key: &str) -> Result<Effect, ContentError> {
        self.effects
            .get(key)
            .map(|behavior| Effect::new(behavior.name.clone(), Arc::clone(&behavior.hook)))
            .ok_or_else(|| ContentError::UnknownEffect {
                key: key.to_owned(),
            })
    }

    /// Default display name of the behaviour `key`.
    pub fn effect_name(&self, key: &str) -> Option<&str> {
        self.effects.get(key).map(|behavior| behavior.name.as_str())
    }

    pub fn hazard(&self, key: &str) -> Result<Arc<dyn Hook>, ContentError> {
        self.hazards
            .get(key)
            .cloned()
            .ok_or_else(|| ContentError::UnknownHazard {
                key: key.to_owned(),
            })
    }

    /// Behaviour key an effect was built from.
    pub fn effect_key(&self, effect: &Effect) -> Option<&str> {
        self.effects
            .iter()
            .find(|(_, behavior)| Arc::ptr_eq(&behavior.hook, &effect.hook))
            .map(|(key, _)| key.as_str())
    }

    /// Hazard key a terrain was built from.
    pub fn hazard_key(&self, terrain: &Terrain) -> Option<&str> {
        self.hazards
            .iter()
            .find(|(_, hook)| Arc::ptr_eq(hook, &terrain.hook))
            .map(|(key, _)| key.as_str())
    }

    pub fn effect_keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.effects.keys().map(String::as_str)
    }

    pub fn hazard_keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.hazards.keys().map(String::as_str)
    }
}
