//! Fitness evaluation: greedy split decoding scored as inverse penalized distance.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::instrument;

use crate::distance::DistanceMatrix;
use crate::models::{ProblemInstance, RoutePlan};

use super::chromosome::Chromosome;
use super::split::{split, split_cost};

/// Decodes chromosomes into routes and scores them.
///
/// Owns the instance and its distance matrix; both are read-only for the
/// lifetime of a run, so evaluation of different chromosomes is independent.
///
/// # Examples
///
/// ```
/// use cvrp_ga::models::{Customer, Point, ProblemInstance};
/// use cvrp_ga::ga::{Chromosome, FitnessEvaluator};
///
/// let instance = ProblemInstance::new(
///     Point::new(0.0, 0.0),
///     30.0,
///     vec![
///         Customer::new(1, 1.0, 0.0, 10.0),
///         Customer::new(2, 2.0, 0.0, 10.0),
///         Customer::new(3, 3.0, 0.0, 10.0),
///     ],
/// )
/// .unwrap();
/// let evaluator = FitnessEvaluator::new(instance, 5000.0);
///
/// let mut tour = Chromosome::new(vec![1, 2, 3]);
/// let fitness = evaluator.evaluate(&mut tour);
/// // 0→1→2→3→0 = 6
/// assert!((fitness - 1.0 / 6.0).abs() < 1e-12);
/// assert_eq!(tour.fitness(), fitness);
/// ```
#[derive(Debug, Clone)]
pub struct FitnessEvaluator {
    instance: ProblemInstance,
    distances: DistanceMatrix,
    penalty_weight: f64,
}

impl FitnessEvaluator {
    /// Creates an evaluator and precomputes the distance matrix.
    pub fn new(instance: ProblemInstance, penalty_weight: f64) -> Self {
        let distances = DistanceMatrix::from_instance(&instance);
        Self {
            instance,
            distances,
            penalty_weight,
        }
    }

    /// The problem instance being solved.
    pub fn instance(&self) -> &ProblemInstance {
        &self.instance
    }

    /// Precomputed distances (index 0 = depot).
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Penalty added per overloaded route.
    pub fn penalty_weight(&self) -> f64 {
        self.penalty_weight
    }

    /// Penalized route cost of a gene sequence.
    pub fn cost(&self, genes: &[usize]) -> f64 {
        split_cost(genes, &self.instance, &self.distances, self.penalty_weight)
    }

    /// Scores a chromosome, stores the fitness on it and returns it.
    ///
    /// A zero cost maps to `f64::INFINITY`; validated instances never
    /// produce one.
    pub fn evaluate(&self, chromosome: &mut Chromosome) -> f64 {
        let cost = self.cost(chromosome.genes());
        let fitness = if cost > 0.0 { 1.0 / cost } else { f64::INFINITY };
        chromosome.set_fitness(fitness);
        fitness
    }

    /// Scores every chromosome in place, preserving order.
    #[instrument(level = "debug", skip_all, fields(size = members.len()))]
    pub fn evaluate_all(&self, members: &mut [Chromosome]) {
        #[cfg(feature = "parallel")]
        members.par_iter_mut().for_each(|c| {
            self.evaluate(c);
        });

        #[cfg(not(feature = "parallel"))]
        for c in members.iter_mut() {
            self.evaluate(c);
        }
    }

    /// Full route decomposition of a chromosome, for reporting.
    pub fn decode(&self, chromosome: &Chromosome) -> RoutePlan {
        split(
            chromosome.genes(),
            &self.instance,
            &self.distances,
            self.penalty_weight,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Customer, Point};

    fn evaluator(penalty: f64) -> FitnessEvaluator {
        let instance = ProblemInstance::new(
            Point::new(0.0, 0.0),
            6.0,
            vec![
                Customer::new(1, 0.0, 1.0, 3.0),
                Customer::new(2, 0.0, 2.0, 4.0),
                Customer::new(3, 1.0, 2.0, 2.0),
                Customer::new(4, 1.0, 0.0, 5.0),
            ],
        )
        .expect("valid");
        FitnessEvaluator::new(instance, penalty)
    }

    #[test]
    fn test_evaluate_fixture() {
        let eval = evaluator(5000.0);
        let mut c = Chromosome::new(vec![1, 2, 3, 4]);
        let fitness = eval.evaluate(&mut c);
        let expected = 7.0 + 5f64.sqrt();
        assert!((fitness - 1.0 / expected).abs() < 1e-12);
        assert!((c.cost() - expected).abs() < 1e-10);
    }

    #[test]
    fn test_evaluate_deterministic() {
        let eval = evaluator(5000.0);
        let mut a = Chromosome::new(vec![4, 2, 1, 3]);
        let mut b = a.clone();
        assert_eq!(eval.evaluate(&mut a), eval.evaluate(&mut b));
        assert_eq!(eval.evaluate(&mut a), a.fitness());
    }

    #[test]
    fn test_evaluate_penalty_lowers_fitness() {
        let instance = ProblemInstance::new(
            Point::new(0.0, 0.0),
            5.0,
            vec![
                Customer::new(1, 1.0, 0.0, 3.0),
                Customer::new(2, 2.0, 0.0, 9.0),
            ],
        )
        .expect("valid");
        let light = FitnessEvaluator::new(instance.clone(), 0.0);
        let heavy = FitnessEvaluator::new(instance, 5000.0);
        let mut c = Chromosome::new(vec![1, 2]);
        let f_light = light.evaluate(&mut c);
        let f_heavy = heavy.evaluate(&mut c);
        // [1] + [2]: 2 + 4 = 6, customer 2 overloads once
        assert!((1.0 / f_light - 6.0).abs() < 1e-10);
        assert!((1.0 / f_heavy - 5006.0).abs() < 1e-9);
    }

    #[test]
    fn test_evaluate_all_preserves_order() {
        let eval = evaluator(5000.0);
        let mut members = vec![
            Chromosome::new(vec![1, 2, 3, 4]),
            Chromosome::new(vec![4, 3, 2, 1]),
            Chromosome::new(vec![2, 4, 1, 3]),
        ];
        eval.evaluate_all(&mut members);
        for m in &members {
            assert!((m.fitness() - 1.0 / eval.cost(m.genes())).abs() < 1e-15);
        }
    }

    #[test]
    fn test_decode_matches_cost() {
        let eval = evaluator(5000.0);
        let mut c = Chromosome::new(vec![3, 1, 4, 2]);
        eval.evaluate(&mut c);
        let plan = eval.decode(&c);
        assert!((plan.cost() - c.cost()).abs() < 1e-10);
        assert_eq!(plan.num_served(), 4);
    }
}
