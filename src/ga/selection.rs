//! Fitness-proportionate (roulette-wheel) selection.
//!
//! Each member receives a slice of [0, 1) proportional to its fitness. The
//! slices are laid out in population order as a cumulative distribution and
//! `popSize` uniform draws pick the next generation, with replacement.
//!
//! # Resolution
//!
//! Draws come from `Rng::random::<f64>()`, which yields multiples of 2^-53
//! in [0, 1). Any member whose relative fitness is at least 2^-53 has a
//! non-zero chance of being drawn.

use rand::Rng;
use tracing::instrument;

use super::chromosome::Chromosome;

/// Computes relative and cumulative fitness for every member, in index order.
///
/// `relative[i] = fitness[i] / Σ fitness` and
/// `cumulative[i] = cumulative[i-1] + relative[i]`.
pub fn assign_selection_weights(members: &mut [Chromosome]) {
    let sum: f64 = members.iter().map(Chromosome::fitness).sum();
    let mut cumulative = 0.0;
    for member in members.iter_mut() {
        let relative = member.fitness() / sum;
        cumulative += relative;
        member.set_selection_weights(relative, cumulative);
    }
}

/// Index of the first member whose cumulative fitness is at least `p`.
///
/// If rounding leaves the last cumulative value below `p`, the last index is
/// returned.
///
/// # Examples
///
/// ```
/// use cvrp_ga::ga::selection::{assign_selection_weights, roulette_index};
/// use cvrp_ga::ga::Chromosome;
/// # use cvrp_ga::models::{Customer, Point, ProblemInstance};
/// # use cvrp_ga::ga::FitnessEvaluator;
///
/// // Costs 10, 5, 10/3, 2.5 give fitness 0.1, 0.2, 0.3, 0.4
/// # let mk = |x: f64| {
/// #     let inst = ProblemInstance::new(
/// #         Point::new(0.0, 0.0), 1.0, vec![Customer::new(1, x, 0.0, 1.0)],
/// #     ).unwrap();
/// #     let mut c = Chromosome::new(vec![1]);
/// #     FitnessEvaluator::new(inst, 0.0).evaluate(&mut c);
/// #     c
/// # };
/// let mut members = vec![mk(5.0), mk(2.5), mk(5.0 / 3.0), mk(1.25)];
/// assign_selection_weights(&mut members);
/// assert_eq!(roulette_index(&members, 0.05), 0);
/// assert_eq!(roulette_index(&members, 0.95), 3);
/// ```
pub fn roulette_index(members: &[Chromosome], p: f64) -> usize {
    let idx = members.partition_point(|m| m.cumulative_fitness() < p);
    idx.min(members.len().saturating_sub(1))
}

/// Replaces every member with a roulette draw, in place.
///
/// Selected members are copied by value; the same member may be copied any
/// number of times. The population size never changes.
#[instrument(level = "debug", skip_all, fields(size = members.len()))]
pub fn select<R: Rng>(members: &mut [Chromosome], rng: &mut R) {
    if members.is_empty() {
        return;
    }
    assign_selection_weights(members);
    let pool: &[Chromosome] = members;
    let next: Vec<Chromosome> = (0..pool.len())
        .map(|_| {
            let p: f64 = rng.random();
            pool[roulette_index(pool, p)].clone()
        })
        .collect();
    for (slot, chosen) in members.iter_mut().zip(next) {
        *slot = chosen;
    }
}
