//! Configuration system for RefAssign.
//!
//! Load solver configuration from TOML or YAML files to choose the search
//! method, its parameters, the termination limits, and the problem weights
//! without code changes.
//!
//! # Examples
//!
//! ```
//! use refassign_config::{AcceptorConfig, MoveKind, PhaseConfig, SolverConfig};
//! use std::time::Duration;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     random_seed = 7
//!
//!     [termination]
//!     seconds_spent_limit = 30
//!
//!     [phase]
//!     type = "local_search"
//!     move_kind = "single_slot"
//!     [phase.acceptor]
//!     type = "tabu_search"
//!     min_tenure = 4
//!     max_tenure = 8
//! "#).unwrap();
//!
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
//! match &config.phase {
//!     PhaseConfig::LocalSearch(ls) => {
//!         assert_eq!(ls.move_kind, MoveKind::SingleSlot);
//!         assert!(matches!(ls.acceptor, AcceptorConfig::TabuSearch(_)));
//!     }
//!     other => panic!("unexpected phase {:?}", other),
//! }
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use refassign_core::{ProblemSettings, Weights};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main solver configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    /// Environment mode affecting assertions.
    #[serde(default)]
    pub environment_mode: EnvironmentMode,

    /// Random seed for reproducible results.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Soft constraint weights. Missing entries default to 1.
    #[serde(default)]
    pub weights: Option<Weights>,

    /// Average travel speed in km/h.
    #[serde(default)]
    pub average_speed_kmh: Option<i64>,

    /// Termination configuration.
    #[serde(default)]
    pub termination: Option<TerminationConfig>,

    /// The search to run.
    #[serde(default)]
    pub phase: PhaseConfig,
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file, choosing the format by extension
    /// (`.yaml`/`.yml` for YAML, anything else for TOML).
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist, fails to parse, or holds
    /// out-of-range values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: SolverConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: SolverConfig = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges that the type system cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(weights) = &self.weights {
            if !weights.is_valid() {
                return Err(ConfigError::Invalid(
                    "weights must be non-negative".to_string(),
                ));
            }
        }
        if let Some(speed) = self.average_speed_kmh {
            if speed <= 0 {
                return Err(ConfigError::Invalid(format!(
                    "average_speed_kmh must be positive, got {}",
                    speed
                )));
            }
        }
        if let PhaseConfig::LocalSearch(ls) = &self.phase {
            ls.acceptor.validate()?;
            if ls.random_move_attempts == Some(0) {
                return Err(ConfigError::Invalid(
                    "random_move_attempts must be at least 1".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Sets the termination time limit.
    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.termination = Some(TerminationConfig {
            seconds_spent_limit: Some(seconds),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn with_weights(mut self, weights: Weights) -> Self {
        self.weights = Some(weights);
        self
    }

    pub fn with_average_speed(mut self, speed_kmh: i64) -> Self {
        self.average_speed_kmh = Some(speed_kmh);
        self
    }

    pub fn with_phase(mut self, phase: PhaseConfig) -> Self {
        self.phase = phase;
        self
    }

    /// Problem settings described by this configuration, falling back to
    /// `base` for anything left unset.
    pub fn problem_settings(&self, base: ProblemSettings) -> ProblemSettings {
        ProblemSettings {
            weights: self.weights.unwrap_or(base.weights),
            average_speed_kmh: self.average_speed_kmh.unwrap_or(base.average_speed_kmh),
        }
    }

    /// Returns the termination time limit, if configured.
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.as_ref().and_then(|t| t.time_limit())
    }
}

/// Environment mode affecting solver behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentMode {
    /// No extra checks.
    #[default]
    Fast,

    /// Verify incremental totals against a full evaluation after every step.
    FullAssert,
}

/// Termination configuration. Any limit that is reached stops the search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum seconds to spend solving.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum milliseconds to spend solving, added to the seconds.
    pub millis_spent_limit: Option<u64>,

    /// Maximum number of steps (search nodes for exhaustive methods).
    pub step_count_limit: Option<u64>,

    /// Maximum steps without a new best solution.
    pub unimproved_step_count_limit: Option<u64>,
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        let millis =
            self.seconds_spent_limit.unwrap_or(0) * 1000 + self.millis_spent_limit.unwrap_or(0);
        if millis > 0 {
            Some(Duration::from_millis(millis))
        } else {
            None
        }
    }

    /// True if no limit at all is configured.
    pub fn is_unbounded(&self) -> bool {
        self.time_limit().is_none()
            && self.step_count_limit.is_none()
            && self.unimproved_step_count_limit.is_none()
    }
}

/// Search method configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PhaseConfig {
    /// Depth-first branch and bound over per-game referee combinations.
    Backtracking,

    /// Full cartesian product of per-game combinations.
    Enumeration,

    /// Randomized greedy construction.
    Greedy,

    /// Trajectory search from an initial solution.
    LocalSearch(LocalSearchConfig),
}

impl Default for PhaseConfig {
    fn default() -> Self {
        PhaseConfig::LocalSearch(LocalSearchConfig::default())
    }
}

/// Local search configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LocalSearchConfig {
    #[serde(default)]
    pub move_kind: MoveKind,

    #[serde(default)]
    pub acceptor: AcceptorConfig,

    #[serde(default)]
    pub initial_solution: InitialSolution,

    /// Rejection-sampling budget for one random move.
    #[serde(default)]
    pub random_move_attempts: Option<usize>,
}

/// Neighborhood explored by local search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKind {
    /// Replace the whole crew of one game.
    #[default]
    WholeGame,

    /// Add, remove, or swap a single referee of one game.
    SingleSlot,
}

/// Where local search starts from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InitialSolution {
    /// Random crews that respect travel, availability, and level.
    #[default]
    Random,

    /// The randomized greedy construction.
    Greedy,

    /// No referees assigned.
    Empty,
}

/// Acceptor configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AcceptorConfig {
    /// Random moves, accepting any that do not worsen the score.
    HillClimbing,

    /// Best move of the full neighborhood while it improves.
    SteepestDescent,

    /// Random moves with Metropolis acceptance and geometric cooling.
    SimulatedAnnealing(SimulatedAnnealingConfig),

    /// Best non-tabu move of the full neighborhood.
    TabuSearch(TabuSearchConfig),
}

impl Default for AcceptorConfig {
    fn default() -> Self {
        AcceptorConfig::HillClimbing
    }
}

impl AcceptorConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        match self {
            AcceptorConfig::SimulatedAnnealing(sa) => sa.validate(),
            AcceptorConfig::TabuSearch(ts) => ts.validate(),
            _ => Ok(()),
        }
    }
}

/// Simulated annealing configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SimulatedAnnealingConfig {
    pub start_temperature: f64,

    /// The phase ends once the temperature falls below this.
    pub min_temperature: f64,

    /// Multiplier applied to the temperature at each cooling.
    pub cooling_rate: f64,

    /// Moves sampled at one temperature before cooling.
    pub neighbors_sampled: u64,

    /// Accepted moves at one temperature that trigger an early cooling.
    pub neighbors_accepted: u64,
}

impl Default for SimulatedAnnealingConfig {
    fn default() -> Self {
        Self {
            start_temperature: 10.0,
            min_temperature: 1.0,
            cooling_rate: 0.99,
            neighbors_sampled: 1000,
            neighbors_accepted: 100,
        }
    }
}

impl SimulatedAnnealingConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.start_temperature > 0.0 && self.min_temperature > 0.0) {
            return Err(ConfigError::Invalid(
                "temperatures must be positive".to_string(),
            ));
        }
        if self.min_temperature > self.start_temperature {
            return Err(ConfigError::Invalid(format!(
                "min_temperature {} exceeds start_temperature {}",
                self.min_temperature, self.start_temperature
            )));
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "cooling_rate must lie in (0, 1), got {}",
                self.cooling_rate
            )));
        }
        if self.neighbors_sampled == 0 || self.neighbors_accepted == 0 {
            return Err(ConfigError::Invalid(
                "neighbors_sampled and neighbors_accepted must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Tabu search configuration.
///
/// Each performed move makes its inverse tabu for a tenure drawn uniformly
/// from `min_tenure..=max_tenure` steps.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct TabuSearchConfig {
    pub min_tenure: usize,
    pub max_tenure: usize,
}

impl Default for TabuSearchConfig {
    fn default() -> Self {
        Self {
            min_tenure: 5,
            max_tenure: 10,
        }
    }
}

impl TabuSearchConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.min_tenure > self.max_tenure {
            return Err(ConfigError::Invalid(format!(
                "min_tenure {} exceeds max_tenure {}",
                self.min_tenure, self.max_tenure
            )));
        }
        Ok(())
    }
}

/// The search methods selectable by name on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Backtracking,
    Enumeration,
    Greedy,
    LocalSearch(MoveKind, AcceptorKind),
}

/// Acceptor families without their parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AcceptorKind {
    HillClimbing,
    SteepestDescent,
    SimulatedAnnealing,
    TabuSearch,
}

impl AcceptorKind {
    fn suffix(self) -> &'static str {
        match self {
            AcceptorKind::HillClimbing => "hc",
            AcceptorKind::SteepestDescent => "sd",
            AcceptorKind::SimulatedAnnealing => "sa",
            AcceptorKind::TabuSearch => "ts",
        }
    }

    fn default_config(self) -> AcceptorConfig {
        match self {
            AcceptorKind::HillClimbing => AcceptorConfig::HillClimbing,
            AcceptorKind::SteepestDescent => AcceptorConfig::SteepestDescent,
            AcceptorKind::SimulatedAnnealing => {
                AcceptorConfig::SimulatedAnnealing(SimulatedAnnealingConfig::default())
            }
            AcceptorKind::TabuSearch => AcceptorConfig::TabuSearch(TabuSearchConfig::default()),
        }
    }

    fn of(config: &AcceptorConfig) -> Self {
        match config {
            AcceptorConfig::HillClimbing => AcceptorKind::HillClimbing,
            AcceptorConfig::SteepestDescent => AcceptorKind::SteepestDescent,
            AcceptorConfig::SimulatedAnnealing(_) => AcceptorKind::SimulatedAnnealing,
            AcceptorConfig::TabuSearch(_) => AcceptorKind::TabuSearch,
        }
    }
}

impl Method {
    /// Every method name accepted by [`Method::from_str`].
    pub const NAMES: [&'static str; 11] = [
        "backtracking",
        "enumeration",
        "greedy",
        "whole-game-hc",
        "whole-game-sd",
        "whole-game-sa",
        "whole-game-ts",
        "single-slot-hc",
        "single-slot-sd",
        "single-slot-sa",
        "single-slot-ts",
    ];

    /// Applies this method to `phase`, keeping parameters already configured
    /// for the same acceptor family.
    pub fn apply_to(self, phase: &PhaseConfig) -> PhaseConfig {
        match self {
            Method::Backtracking => PhaseConfig::Backtracking,
            Method::Enumeration => PhaseConfig::Enumeration,
            Method::Greedy => PhaseConfig::Greedy,
            Method::LocalSearch(move_kind, acceptor) => {
                let mut ls = match phase {
                    PhaseConfig::LocalSearch(ls) => ls.clone(),
                    _ => LocalSearchConfig::default(),
                };
                ls.move_kind = move_kind;
                if AcceptorKind::of(&ls.acceptor) != acceptor {
                    ls.acceptor = acceptor.default_config();
                }
                PhaseConfig::LocalSearch(ls)
            }
        }
    }
}

impl FromStr for Method {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let method = match s {
            "backtracking" => Method::Backtracking,
            "enumeration" => Method::Enumeration,
            "greedy" => Method::Greedy,
            _ => {
                let (kind, suffix) = if let Some(rest) = s.strip_prefix("whole-game-") {
                    (MoveKind::WholeGame, rest)
                } else if let Some(rest) = s.strip_prefix("single-slot-") {
                    (MoveKind::SingleSlot, rest)
                } else {
                    return Err(unknown_method(s));
                };
                let acceptor = match suffix {
                    "hc" => AcceptorKind::HillClimbing,
                    "sd" => AcceptorKind::SteepestDescent,
                    "sa" => AcceptorKind::SimulatedAnnealing,
                    "ts" => AcceptorKind::TabuSearch,
                    _ => return Err(unknown_method(s)),
                };
                Method::LocalSearch(kind, acceptor)
            }
        };
        Ok(method)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Backtracking => f.write_str("backtracking"),
            Method::Enumeration => f.write_str("enumeration"),
            Method::Greedy => f.write_str("greedy"),
            Method::LocalSearch(MoveKind::WholeGame, a) => write!(f, "whole-game-{}", a.suffix()),
            Method::LocalSearch(MoveKind::SingleSlot, a) => write!(f, "single-slot-{}", a.suffix()),
        }
    }
}

fn unknown_method(name: &str) -> ConfigError {
    ConfigError::Invalid(format!(
        "unknown method '{}', expected one of: {}",
        name,
        Method::NAMES.join(", ")
    ))
}

#[cfg(test)]
mod tests;
