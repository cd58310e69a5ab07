use std::fmt;
use std::sync::Arc;

use super::{Hook, HookContext, HookInfo};
use crate::combatant::Side;
use crate::engine::PhaseKind;
use crate::error::HookError;
use crate::signal::Signal;

/// A combatant-owned ability.
///
/// Effects travel with their combatant through merges. Equality and
/// serialization only consider the bookkeeping fields, never the hook itself.
#[derive(Clone)]
pub struct Effect {
    pub name: String,
    pub hook: Arc<dyn Hook>,
    pub trigger_count: u32,
    /// Restricts the effect to one phase kind.
    pub target_state: Option<PhaseKind>,
}

impl Effect {
    pub fn new(name: impl Into<String>, hook: Arc<dyn Hook>) -> Self {
        Self {
            name: name.into(),
            hook,
            trigger_count: 0,
            target_state: None,
        }
    }

    #[must_use]
    pub fn with_target_state(mut self, target_state: PhaseKind) -> Self {
        self.target_state = Some(target_state);
        self
    }

    /// Evaluates the effect for `side` and runs its action when triggered.
    ///
    /// Returns `Ok(true)` when the action ran. The trigger count only
    /// advances on success.
    pub(crate) fn evaluate(
        &mut self,
        side: Side,
        ctx: &mut HookContext<'_>,
        signal: &mut Signal,
    ) -> Result<bool, HookError> {
        if self
            .target_state
            .is_some_and(|target| target != ctx.phase_kind())
        {
            return Ok(false);
        }

        let info = HookInfo {
            name: &self.name,
            trigger_count: self.trigger_count,
            side: Some(side),
        };
        if !self.hook.should_trigger(&info, ctx, signal) {
            return Ok(false);
        }
        self.hook.apply(&info, ctx, signal)?;

        self.trigger_count += 1;
        Ok(true)
    }
}

impl fmt::Debug for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Effect")
            .field("name", &self.name)
            .field("trigger_count", &self.trigger_count)
            .field("target_state", &self.target_state)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Effect {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.trigger_count == other.trigger_count
            && self.target_state == other.target_state
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Effect {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("Effect", 3)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("trigger_count", &self.trigger_count)?;
        state.serialize_field("target_state", &self.target_state)?;
        state.end()
    }
}
