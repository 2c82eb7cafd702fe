//! Breeding population plus the elite slot.

use rand::Rng;

use crate::error::{CvrpError, Result};

use super::chromosome::Chromosome;

/// A fixed-size breeding population and the best chromosome seen so far.
///
/// The elite is held outside `members`: selection, crossover and mutation
/// never touch it. It is only compared against and overwritten by
/// [`elitism`](super::elitism).
#[derive(Debug, Clone)]
pub struct Population {
    members: Vec<Chromosome>,
    elite: Chromosome,
}

impl Population {
    /// Creates `size` independent random permutations of 1..=n.
    ///
    /// The elite starts as an unevaluated copy of the first member and is
    /// replaced by the first elite capture.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero.
    pub fn random<R: Rng>(size: usize, n: usize, rng: &mut R) -> Self {
        assert!(size > 0, "population size must be positive");
        let members: Vec<Chromosome> = (0..size).map(|_| Chromosome::random(n, rng)).collect();
        let elite = members[0].clone();
        Self { members, elite }
    }

    /// Builds a population from explicit members.
    ///
    /// # Panics
    ///
    /// Panics if `members` is empty.
    pub fn from_members(members: Vec<Chromosome>) -> Self {
        assert!(!members.is_empty(), "population must not be empty");
        let elite = members[0].clone();
        Self { members, elite }
    }

    /// The breeding members.
    pub fn members(&self) -> &[Chromosome] {
        &self.members
    }

    /// Mutable access to the breeding members; the count is fixed.
    pub fn members_mut(&mut self) -> &mut [Chromosome] {
        &mut self.members
    }

    /// Number of breeding members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always `false`; a population has at least one member.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Best chromosome found in any generation so far.
    pub fn elite(&self) -> &Chromosome {
        &self.elite
    }

    pub(crate) fn set_elite(&mut self, elite: Chromosome) {
        self.elite = elite;
    }

    /// Index of the member with the highest fitness (first on ties).
    pub fn best_index(&self) -> usize {
        let mut best = 0;
        for (i, m) in self.members.iter().enumerate().skip(1) {
            if m.fitness() > self.members[best].fitness() {
                best = i;
            }
        }
        best
    }

    /// Index of the member with the lowest fitness (first on ties).
    pub fn worst_index(&self) -> usize {
        let mut worst = 0;
        for (i, m) in self.members.iter().enumerate().skip(1) {
            if m.fitness() < self.members[worst].fitness() {
                worst = i;
            }
        }
        worst
    }

    /// Checks that every member and the elite are permutations of 1..=n.
    pub fn validate(&self, n: usize) -> Result<()> {
        for (i, m) in self.members.iter().enumerate() {
            m.check_permutation(n)
                .map_err(|reason| CvrpError::InvariantViolation {
                    index: Some(i),
                    reason,
                })?;
        }
        self.elite.validate(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(values: &[f64]) -> Population {
        let members = values
            .iter()
            .map(|&f| {
                let mut c = Chromosome::new(vec![1, 2]);
                c.set_fitness(f);
                c
            })
            .collect();
        Population::from_members(members)
    }

    #[test]
    fn test_random_population() {
        let mut rng = u_numflow::random::create_rng(42);
        let pop = Population::random(20, 8, &mut rng);
        assert_eq!(pop.len(), 20);
        assert!(!pop.is_empty());
        assert!(pop.validate(8).is_ok());
    }

    #[test]
    fn test_best_and_worst() {
        let pop = scored(&[0.3, 0.9, 0.1, 0.9, 0.1]);
        assert_eq!(pop.best_index(), 1);
        assert_eq!(pop.worst_index(), 2);
    }

    #[test]
    fn test_worst_found_after_new_best() {
        // A member that is both a new best candidate and followed by the
        // worst must not hide the worst.
        let pop = scored(&[0.5, 0.6, 0.2]);
        assert_eq!(pop.best_index(), 1);
        assert_eq!(pop.worst_index(), 2);
    }

    #[test]
    fn test_validate_reports_slot() {
        let mut pop = scored(&[0.1, 0.2]);
        pop.members_mut()[1] = Chromosome::new(vec![2, 2]);
        let err = pop.validate(2).unwrap_err();
        match err {
            CvrpError::InvariantViolation { index, .. } => assert_eq!(index, Some(1)),
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn test_selection_keeps_population_size() {
        let mut pop = scored(&[0.1, 0.2, 0.3, 0.4]);
        let mut rng = u_numflow::random::create_rng(6);
        crate::ga::selection::select(pop.members_mut(), &mut rng);
        assert_eq!(pop.len(), 4);
    }

    #[test]
    fn test_validate_checks_elite() {
        let mut pop = scored(&[0.1]);
        pop.set_elite(Chromosome::new(vec![1, 3]));
        assert!(matches!(
            pop.validate(2),
            Err(CvrpError::InvariantViolation { index: None, .. })
        ));
    }
}
