//! Simulator configuration and environment loading.

use std::env;

use battle_core::EngineConfig;
use strum::{Display, EnumString};

/// Run mode of the simulator.
///
/// `Debug` makes hook failures and batch failures propagate and pins the
/// default seed so runs are reproducible without passing one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Mode {
    #[default]
    Prod,
    Debug,
}

/// Simulator configuration shared by every battle the simulator starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimulatorConfig {
    pub mode: Mode,
    pub engine: EngineConfig,
    /// Seed for the next battle; `None` draws a fresh one (or
    /// [`Self::DEBUG_SEED`] in debug mode).
    pub seed: Option<u64>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Prod,
            engine: EngineConfig::default(),
            seed: None,
        }
    }
}

impl SimulatorConfig {
    /// Seed used in debug mode when none is configured.
    pub const DEBUG_SEED: u64 = 0;

    /// Debug configuration: strict hooks and a pinned default seed.
    pub fn debug() -> Self {
        Self {
            mode: Mode::Debug,
            engine: EngineConfig::strict(),
            seed: None,
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    pub fn is_debug(&self) -> bool {
        self.mode == Mode::Debug
    }

    /// The configured seed, falling back to [`Self::DEBUG_SEED`] in debug mode.
    pub fn default_seed(&self) -> Option<u64> {
        match (self.seed, self.mode) {
            (Some(seed), _) => Some(seed),
            (None, Mode::Debug) => Some(Self::DEBUG_SEED),
            (None, Mode::Prod) => None,
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `MODE` - `PROD` or `DEBUG` (default: PROD)
    /// - `BATTLE_SEED` - Seed for the next battle (default: fresh per battle)
    /// - `MAX_ROUNDS` - Runaway ceiling (default: 300)
    /// - `STRICT_HOOKS` - Propagate hook failures (default: on in DEBUG)
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Same as [`Self::from_env`] with an arbitrary variable source.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(mode) = read_var::<Mode>(&var, "MODE") {
            config.mode = mode;
            config.engine.strict_hooks = mode == Mode::Debug;
        }
        if let Some(seed) = read_var::<u64>(&var, "BATTLE_SEED") {
            config.seed = Some(seed);
        }
        if let Some(max_rounds) = read_var::<u32>(&var, "MAX_ROUNDS") {
            config.engine.max_rounds = max_rounds.max(1);
        }
        if let Some(strict) = read_bool(&var, "STRICT_HOOKS") {
            config.engine.strict_hooks = strict;
        }

        config
    }
}

fn read_var<T>(var: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    var(key)?.trim().parse().ok()
}

fn read_bool(var: &impl Fn(&str) -> Option<String>, key: &str) -> Option<bool> {
    match var(key)?.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
