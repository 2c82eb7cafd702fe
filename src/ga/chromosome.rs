//! Permutation chromosome for the CVRP genetic algorithm.
//!
//! A chromosome lists every customer id exactly once. The order is the
//! giant tour that [`split`](super::split) cuts into capacity-respecting
//! routes. The fitness fields are derived data and may be stale between
//! generations; the gene sequence is the only state that must always be a
//! valid permutation.

use rand::Rng;

use crate::error::{CvrpError, Result};

/// A candidate solution: a permutation of customer ids 1..=N plus cached
/// fitness metrics.
///
/// # Examples
///
/// ```
/// use cvrp_ga::ga::Chromosome;
///
/// let c = Chromosome::new(vec![3, 1, 2]);
/// assert_eq!(c.genes(), &[3, 1, 2]);
/// assert_eq!(c.fitness(), 0.0);
/// assert!(c.validate(3).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Chromosome {
    genes: Vec<usize>,
    fitness: f64,
    relative_fitness: f64,
    cumulative_fitness: f64,
}

impl Chromosome {
    /// Creates an unevaluated chromosome from a gene sequence.
    pub fn new(genes: Vec<usize>) -> Self {
        Self {
            genes,
            fitness: 0.0,
            relative_fitness: 0.0,
            cumulative_fitness: 0.0,
        }
    }

    /// Creates a uniformly random permutation of 1..=n (Fisher-Yates).
    pub fn random<R: Rng>(n: usize, rng: &mut R) -> Self {
        let mut genes: Vec<usize> = (1..=n).collect();
        for i in (1..genes.len()).rev() {
            let j = rng.random_range(0..=i as u64) as usize;
            genes.swap(i, j);
        }
        Self::new(genes)
    }

    /// Customer ids in giant-tour order.
    pub fn genes(&self) -> &[usize] {
        &self.genes
    }

    /// Mutable access to the gene sequence; callers must keep it a permutation.
    pub fn genes_mut(&mut self) -> &mut [usize] {
        &mut self.genes
    }

    /// Number of genes.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Returns `true` if the chromosome has no genes.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Inverse of the penalized route cost; higher is better.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Penalized route cost, recovered from the fitness.
    pub fn cost(&self) -> f64 {
        1.0 / self.fitness
    }

    /// Share of the population's total fitness, set during selection.
    pub fn relative_fitness(&self) -> f64 {
        self.relative_fitness
    }

    /// Running sum of relative fitness up to this member, set during selection.
    pub fn cumulative_fitness(&self) -> f64 {
        self.cumulative_fitness
    }

    pub(crate) fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }

    pub(crate) fn set_selection_weights(&mut self, relative: f64, cumulative: f64) {
        self.relative_fitness = relative;
        self.cumulative_fitness = cumulative;
    }

    /// Checks that the genes form a permutation of 1..=n.
    pub fn validate(&self, n: usize) -> Result<()> {
        self.check_permutation(n)
            .map_err(|reason| CvrpError::InvariantViolation {
                index: None,
                reason,
            })
    }

    pub(crate) fn check_permutation(&self, n: usize) -> std::result::Result<(), String> {
        if self.genes.len() != n {
            return Err(format!("has {} genes, expected {}", self.genes.len(), n));
        }
        let mut seen = vec![false; n + 1];
        for &id in &self.genes {
            if id == 0 || id > n {
                return Err(format!("customer {id} out of range 1..={n}"));
            }
            if seen[id] {
                return Err(format!("customer {id} appears twice"));
            }
            seen[id] = true;
        }
        Ok(())
    }
}
