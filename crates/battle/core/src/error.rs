//! Common error infrastructure for battle-core.
//!
//! Every error raised by the engine carries an [`ErrorContext`] with the phase,
//! round, side and seed at the time of failure, which is enough to reproduce
//! the failing battle from its seed.
//!
//! # Error classes
//!
//! - **Illegal transition**: transitioning a terminal `End` snapshot (driver bug, fatal)
//! - **Hook failure**: an effect or terrain action returned an error (recovered
//!   locally unless hooks are strict)
//! - **Runaway simulation**: the round counter reached the configured ceiling (fatal)
//!
//! Configuration errors (malformed catalog data) never reach the engine; they
//! are reported by the content loaders before a battle starts.

use core::fmt;

use crate::combatant::Side;
use crate::engine::PhaseKind;
use crate::signal::SignalType;

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - the battle can continue without the failed step.
    ///
    /// Examples: a buggy ability action
    Recoverable,

    /// Fatal error - the transition graph is broken, cannot continue.
    ///
    /// Examples: transition out of `End`, runaway round counter
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if the battle cannot continue past this error.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal)
    }
}

/// Contextual information attached to errors for debugging and replay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorContext {
    /// Phase whose transition failed.
    pub phase: PhaseKind,

    /// Round counter at the time of failure.
    pub round: u32,

    /// Side whose hook or turn was involved (if applicable).
    pub side: Option<Side>,

    /// Seed of the failing battle.
    pub seed: u64,

    /// Optional static message providing additional context.
    pub message: Option<&'static str>,
}

impl ErrorContext {
    /// Creates a new error context.
    #[must_use]
    pub const fn new(phase: PhaseKind, round: u32, seed: u64) -> Self {
        Self {
            phase,
            round,
            side: None,
            seed,
            message: None,
        }
    }

    /// Attaches a side to this context (builder pattern).
    #[must_use]
    pub const fn with_side(mut self, side: Side) -> Self {
        self.side = Some(side);
        self
    }

    /// Attaches a static message to this context (builder pattern).
    #[must_use]
    pub const fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "phase {}, round {}, seed {}",
            self.phase, self.round, self.seed
        )?;
        if let Some(side) = self.side {
            write!(f, ", side {side}")?;
        }
        if let Some(message) = self.message {
            write!(f, ": {message}")?;
        }
        Ok(())
    }
}

/// Common trait for all battle-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Include `ErrorContext` in variants that need debugging info
/// - Classify severity based on recoverability, not impact
pub trait CombatError: fmt::Display + fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns the context information for this error, if available.
    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Error returned by a hook action.
///
/// Hook authors construct these for anything unexpected (wrong payload for a
/// signal, missing phase data). The engine wraps them in
/// [`BattleError::HookFailed`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct HookError {
    message: String,
}

impl HookError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The signal did not carry the payload variant the hook expects.
    pub fn unexpected_payload(signal: SignalType) -> Self {
        Self::new(format!("unexpected payload for signal {signal}"))
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors surfaced while transitioning a battle.
#[derive(Clone, Debug, thiserror::Error)]
pub enum BattleError {
    #[error("illegal transition out of a terminal phase ({context})")]
    IllegalTransition { context: ErrorContext },

    #[error("hook '{hook}' failed ({context}): {source}")]
    HookFailed {
        hook: String,
        context: ErrorContext,
        #[source]
        source: HookError,
    },

    #[error("round count reached the ceiling of {ceiling} ({context})")]
    RunawaySimulation { ceiling: u32, context: ErrorContext },
}

impl BattleError {
    pub fn illegal_transition(context: ErrorContext) -> Self {
        Self::IllegalTransition {
            context: context.with_message("End is terminal"),
        }
    }

    pub fn hook_failed(hook: impl Into<String>, context: ErrorContext, source: HookError) -> Self {
        Self::HookFailed {
            hook: hook.into(),
            context,
            source,
        }
    }

    pub fn runaway(ceiling: u32, context: ErrorContext) -> Self {
        Self::RunawaySimulation { ceiling, context }
    }
}

impl CombatError for BattleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::IllegalTransition { .. } | Self::RunawaySimulation { .. } => ErrorSeverity::Fatal,
            Self::HookFailed { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::IllegalTransition { context }
            | Self::HookFailed { context, .. }
            | Self::RunawaySimulation { context, .. } => Some(context),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::IllegalTransition { .. } => "ILLEGAL_TRANSITION",
            Self::HookFailed { .. } => "HOOK_FAILED",
            Self::RunawaySimulation { .. } => "RUNAWAY_SIMULATION",
        }
    }
}
