//! Seating engine configuration.

#[cfg(feature = "toml")]
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;

/// Configuration parameters for the seating engine.
///
/// Every field has a default, so a TOML file only needs the keys it
/// changes.
///
/// # Examples
///
/// ```
/// use u_seating::engine::SeatingConfig;
///
/// let config = SeatingConfig::default()
///     .with_max_passes(100)
///     .with_balance_weight(2.0)
///     .with_restarts(10)
///     .with_seed(7);
/// assert_eq!(config.max_passes, 100);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct SeatingConfig {
    /// Maximum local-search passes. A pass sweeps every cross-table swap
    /// (and relocation, if enabled) once.
    pub max_passes: usize,
    /// Whether local search may move a single guest into a table with
    /// spare seats, in addition to swapping guests.
    pub allow_relocation: bool,
    /// Multiplier applied to `avoid` strengths in the affinity ledger.
    pub avoid_penalty: f64,
    /// Weight of the quadratic table-size balancing penalty. 0 disables it.
    pub balance_weight: f64,
    /// Deviation from the target table size tolerated without penalty.
    pub target_slack: usize,
    /// Number of perturb-and-improve rounds after the first local search.
    pub restarts: usize,
    /// Random cross-table swaps applied per perturbation round.
    pub perturbation_strength: usize,
    /// Seed for the perturbation RNG.
    pub seed: u64,
    /// Wall-clock budget for the improvement phases, in milliseconds.
    pub time_limit_millis: Option<u64>,
}

impl Default for SeatingConfig {
    fn default() -> Self {
        Self {
            max_passes: 50,
            allow_relocation: true,
            avoid_penalty: 1.0,
            balance_weight: 0.0,
            target_slack: 0,
            restarts: 0,
            perturbation_strength: 2,
            seed: 42,
            time_limit_millis: None,
        }
    }
}

impl SeatingConfig {
    /// Sets the maximum number of local-search passes.
    pub fn with_max_passes(mut self, n: usize) -> Self {
        self.max_passes = n;
        self
    }

    /// Enables or disables single-guest relocation moves.
    pub fn with_relocation(mut self, allow: bool) -> Self {
        self.allow_relocation = allow;
        self
    }

    /// Sets the multiplier applied to `avoid` strengths.
    pub fn with_avoid_penalty(mut self, penalty: f64) -> Self {
        self.avoid_penalty = penalty;
        self
    }

    /// Sets the table-size balancing weight.
    pub fn with_balance_weight(mut self, weight: f64) -> Self {
        self.balance_weight = weight;
        self
    }

    /// Sets the penalty-free deviation around target sizes.
    pub fn with_target_slack(mut self, slack: usize) -> Self {
        self.target_slack = slack;
        self
    }

    /// Sets the number of perturbation rounds.
    pub fn with_restarts(mut self, n: usize) -> Self {
        self.restarts = n;
        self
    }

    /// Sets the number of random swaps per perturbation round.
    pub fn with_perturbation_strength(mut self, n: usize) -> Self {
        self.perturbation_strength = n;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the wall-clock budget for the improvement phases.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit_millis = Some(u64::try_from(limit.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// Returns the wall-clock budget, if configured.
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_millis.map(Duration::from_millis)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.avoid_penalty.is_finite() || self.avoid_penalty <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "avoid_penalty must be positive, got {}",
                self.avoid_penalty
            )));
        }
        if !self.balance_weight.is_finite() || self.balance_weight < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "balance_weight must be non-negative, got {}",
                self.balance_weight
            )));
        }
        if self.restarts > 0 && self.perturbation_strength == 0 {
            return Err(ConfigError::Invalid(
                "perturbation_strength must be at least 1 when restarts are enabled".into(),
            ));
        }
        Ok(())
    }

    /// Parses and validates configuration from a TOML string.
    #[cfg(feature = "toml")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates configuration from a TOML file.
    #[cfg(feature = "toml")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}
