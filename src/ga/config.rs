//! GA run configuration.

use serde::{Deserialize, Serialize};

use crate::error::{CvrpError, Result};

/// Parameters of the generational GA.
///
/// Deserializes from JSON with every field optional; missing fields keep
/// their defaults.
///
/// # Examples
///
/// ```
/// use cvrp_ga::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(100)
///     .with_max_generations(500)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
///
/// let parsed: GaConfig = serde_json::from_str(r#"{ "mutation_rate": 0.2 }"#).unwrap();
/// assert_eq!(parsed.population_size, 50);
/// assert_eq!(parsed.mutation_rate, 0.2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    /// Number of breeding members.
    pub population_size: usize,

    /// Number of generations to run; there is no early stop.
    pub max_generations: usize,

    /// Probability that a member is flagged for crossover.
    pub crossover_rate: f64,

    /// Probability that a member is mutated.
    pub mutation_rate: f64,

    /// Position swaps applied to each mutated member.
    pub mutation_swaps: usize,

    /// Cost added per route whose load exceeds capacity.
    pub penalty_weight: f64,

    /// Random seed; `None` lets the caller derive one.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            max_generations: 1000,
            crossover_rate: 0.8,
            mutation_rate: 0.1,
            mutation_swaps: 4,
            penalty_weight: 5000.0,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the number of breeding members.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets how many generations to run.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the per-member crossover probability.
    pub fn with_crossover_rate(mut self, p: f64) -> Self {
        self.crossover_rate = p;
        self
    }

    /// Sets the per-member mutation probability.
    pub fn with_mutation_rate(mut self, p: f64) -> Self {
        self.mutation_rate = p;
        self
    }

    /// Sets the swaps applied to each mutated member.
    pub fn with_mutation_swaps(mut self, n: usize) -> Self {
        self.mutation_swaps = n;
        self
    }

    /// Sets the cost added per overloaded route.
    pub fn with_penalty_weight(mut self, w: f64) -> Self {
        self.penalty_weight = w;
        self
    }

    /// Fixes the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parses a JSON configuration.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(CvrpError::InvalidConfig(
                "population_size must be at least 2".into(),
            ));
        }
        if self.max_generations == 0 {
            return Err(CvrpError::InvalidConfig(
                "max_generations must be at least 1".into(),
            ));
        }
        for (name, p) in [
            ("crossover_rate", self.crossover_rate),
            ("mutation_rate", self.mutation_rate),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(CvrpError::InvalidConfig(format!(
                    "{name} must be within [0, 1], got {p}"
                )));
            }
        }
        if !self.penalty_weight.is_finite() || self.penalty_weight < 0.0 {
            return Err(CvrpError::InvalidConfig(format!(
                "penalty_weight must be finite and non-negative, got {}",
                self.penalty_weight
            )));
        }
        Ok(())
    }
}
