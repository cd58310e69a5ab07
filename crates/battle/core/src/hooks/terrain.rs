use std::fmt;
use std::sync::Arc;

use super::{Hook, HookContext, HookInfo};
use crate::error::HookError;
use crate::signal::Signal;

/// An encounter-wide hazard.
///
/// The terrain hook is evaluated before any combatant effect and is not
/// owned by either side.
#[derive(Clone)]
pub struct Terrain {
    pub name: String,
    pub description: String,
    pub hook: Arc<dyn Hook>,
    /// Set once the hazard has fired at least once.
    pub triggered: bool,
    pub trigger_count: u32,
}

impl Terrain {
    pub fn new(name: impl Into<String>, description: impl Into<String>, hook: Arc<dyn Hook>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            hook,
            triggered: false,
            trigger_count: 0,
        }
    }

    pub(crate) fn evaluate(
        &mut self,
        ctx: &mut HookContext<'_>,
        signal: &mut Signal,
    ) -> Result<bool, HookError> {
        let info = HookInfo {
            name: &self.name,
            trigger_count: self.trigger_count,
            side: None,
        };
        if !self.hook.should_trigger(&info, ctx, signal) {
            return Ok(false);
        }
        self.hook.apply(&info, ctx, signal)?;

        self.triggered = true;
        self.trigger_count += 1;
        Ok(true)
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "--- Terrain: {} ---\n{}", self.name, self.description)
    }
}

impl fmt::Debug for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Terrain")
            .field("name", &self.name)
            .field("triggered", &self.triggered)
            .field("trigger_count", &self.trigger_count)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Terrain {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.description == other.description
            && self.triggered == other.triggered
            && self.trigger_count == other.trigger_count
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Terrain {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("Terrain", 4)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("description", &self.description)?;
        state.serialize_field("triggered", &self.triggered)?;
        state.serialize_field("trigger_count", &self.trigger_count)?;
        state.end()
    }
}
