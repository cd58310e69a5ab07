/// Engine configuration threaded into every battle.
///
/// There is no global mode switch: the simulator decides strictness and the
/// runaway ceiling once and hands this value to each [`crate::BattleState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Propagate hook failures instead of logging and swallowing them.
    pub strict_hooks: bool,
    /// Round count at which a battle is treated as a runaway simulation.
    pub max_rounds: u32,
}

impl EngineConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_ROUNDS: u32 = 300;

    pub const fn new() -> Self {
        Self {
            strict_hooks: false,
            max_rounds: Self::DEFAULT_MAX_ROUNDS,
        }
    }

    /// Configuration used by test suites and debug runs: broken hooks fail loudly.
    pub const fn strict() -> Self {
        Self {
            strict_hooks: true,
            max_rounds: Self::DEFAULT_MAX_ROUNDS,
        }
    }

    #[must_use]
    pub const fn with_strict_hooks(mut self, strict_hooks: bool) -> Self {
        self.strict_hooks = strict_hooks;
        self
    }

    #[must_use]
    pub const fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
