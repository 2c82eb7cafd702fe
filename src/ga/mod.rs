//! Genetic algorithm over giant-tour permutations.
//!
//! - [`Chromosome`]: permutation of customer ids with cached fitness
//! - [`split`]: greedy capacity split of a giant tour into routes
//! - [`FitnessEvaluator`]: penalized route distance and `1 / cost` fitness
//! - [`selection`], [`crossover`], [`mutation`]: the generational operators
//! - [`EvolutionDriver`]: the initialize/evaluate/evolve/terminate lifecycle

mod chromosome;
mod config;
pub mod crossover;
mod driver;
mod elitism;
mod fitness;
pub mod mutation;
mod population;
pub mod selection;
pub mod split;

pub use chromosome::Chromosome;
pub use config::GaConfig;
pub use driver::{EvolutionDriver, EvolutionState, Phase, RunOutcome};
pub use elitism::{apply_elitism, capture_elite, EliteUpdate};
pub use fitness::FitnessEvaluator;
pub use population::Population;
pub use split::{split, split_cost};
