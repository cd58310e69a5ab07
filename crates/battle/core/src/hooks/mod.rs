//! Hook system for combatant effects and terrain hazards.
//!
//! Hooks are condition/action pairs the state machine invokes at fixed
//! observation points. The engine knows nothing about concrete abilities: it
//! only broadcasts a [`Signal`] and lets each hook decide whether to act.
//!
//! # Dispatch order
//!
//! For every signal the registry evaluates the terrain first, then side A's
//! effects in list order, then side B's. The order is part of the
//! reproducibility contract.
//!
//! # Error Handling
//!
//! Hook failures are handled according to [`HookCriticality`]:
//! - `Critical`: the failure aborts the transition
//! - `Important`: the failure is logged and the trigger is not counted
mod context;
mod effect;
mod registry;
mod terrain;

pub use context::HookContext;
pub use effect::Effect;
pub use terrain::Terrain;

pub(crate) use registry::apply_effects;

use std::sync::Arc;

use crate::combatant::Side;
use crate::error::HookError;
use crate::signal::Signal;

/// Defines how a hook failure is handled during dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookCriticality {
    /// Hook failure fails the whole transition.
    ///
    /// Used by strict runs (tests, debug mode) so broken content surfaces.
    Critical,

    /// Hook failure is logged as an error and dispatch continues.
    Important,
}

impl HookCriticality {
    pub const fn from_strict(strict: bool) -> Self {
        if strict {
            Self::Critical
        } else {
            Self::Important
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Important => "important",
        }
    }
}

/// Bookkeeping of the hook being evaluated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HookInfo<'a> {
    pub name: &'a str,
    /// Successful firings before this evaluation.
    pub trigger_count: u32,
    /// Owning side for effects, `None` for terrain.
    pub side: Option<Side>,
}

impl HookInfo<'_> {
    /// The side owning this hook. Terrain hooks have no owner.
    pub fn owner(&self) -> Result<Side, HookError> {
        self.side
            .ok_or_else(|| HookError::new(format!("hook '{}' is not owned by a side", self.name)))
    }
}

/// A condition/action pair invoked by the state machine.
///
/// `should_trigger` must not have side effects. `apply` may mutate
/// combatant fields through the context and payload fields through the
/// signal.
pub trait Hook: Send + Sync {
    fn should_trigger(&self, info: &HookInfo<'_>, ctx: &HookContext<'_>, signal: &Signal) -> bool;

    fn apply(
        &self,
        info: &HookInfo<'_>,
        ctx: &mut HookContext<'_>,
        signal: &mut Signal,
    ) -> Result<(), HookError>;
}

/// Hook built from a pair of closures.
pub struct FnHook<C, A> {
    condition: C,
    action: A,
}

impl<C, A> Hook for FnHook<C, A>
where
    C: Fn(&HookInfo<'_>, &HookContext<'_>, &Signal) -> bool + Send + Sync,
    A: Fn(&HookInfo<'_>, &mut HookContext<'_>, &mut Signal) -> Result<(), HookError> + Send + Sync,
{
    fn should_trigger(&self, info: &HookInfo<'_>, ctx: &HookContext<'_>, signal: &Signal) -> bool {
        (self.condition)(info, ctx, signal)
    }

    fn apply(
        &self,
        info: &HookInfo<'_>,
        ctx: &mut HookContext<'_>,
        signal: &mut Signal,
    ) -> Result<(), HookError> {
        (self.action)(info, ctx, signal)
    }
}

/// Wraps a condition closure and an action closure into a shareable hook.
pub fn hook_fn<C, A>(condition: C, action: A) -> Arc<dyn Hook>
where
    C: Fn(&HookInfo<'_>, &HookContext<'_>, &Signal) -> bool + Send + Sync + 'static,
    A: Fn(&HookInfo<'_>, &mut HookContext<'_>, &mut Signal) -> Result<(), HookError>
        + Send
        + Sync
        + 'static,
{
    Arc::new(FnHook { condition, action })
}
