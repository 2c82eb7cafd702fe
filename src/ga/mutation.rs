//! Swap mutation.
//!
//! A mutated chromosome undergoes a fixed number of pairwise position swaps.
//! Swapping two entries of a permutation yields a permutation, so mutation
//! can never break the gene invariant.

use rand::Rng;
use tracing::instrument;

use super::chromosome::Chromosome;

/// Draws two distinct positions in `0..n`, redrawing on a collision.
///
/// For `n < 2` there is no distinct pair and `(0, 0)` is returned.
pub fn draw_swap<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    if n < 2 {
        return (0, 0);
    }
    loop {
        let one = rng.random_range(0..n as u64) as usize;
        let two = rng.random_range(0..n as u64) as usize;
        if one != two {
            return (one, two);
        }
    }
}

/// Applies the given position swaps to a gene sequence, in order.
///
/// # Examples
///
/// ```
/// use cvrp_ga::ga::mutation::apply_swaps;
///
/// let mut genes = vec![1, 2, 3, 4, 5];
/// apply_swaps(&mut genes, [(0, 4), (1, 2), (0, 1), (3, 4)]);
/// assert_eq!(genes, vec![3, 5, 2, 1, 4]);
/// ```
pub fn apply_swaps<I>(genes: &mut [usize], swaps: I)
where
    I: IntoIterator<Item = (usize, usize)>,
{
    for (one, two) in swaps {
        genes.swap(one, two);
    }
}

/// Performs `swaps` random distinct-position swaps on one chromosome.
pub fn mutate_chromosome<R: Rng>(chromosome: &mut Chromosome, swaps: usize, rng: &mut R) {
    let n = chromosome.len();
    if n < 2 {
        return;
    }
    let draws: Vec<(usize, usize)> = (0..swaps).map(|_| draw_swap(n, rng)).collect();
    apply_swaps(chromosome.genes_mut(), draws);
}

/// Mutates each member independently with probability `rate`.
///
/// Returns the number of members mutated.
#[instrument(level = "debug", skip(members, rng), fields(size = members.len()))]
pub fn mutate<R: Rng>(members: &mut [Chromosome], rate: f64, swaps: usize, rng: &mut R) -> usize {
    let mut mutated = 0;
    for member in members.iter_mut() {
        if rng.random::<f64>() < rate {
            mutate_chromosome(member, swaps, rng);
            mutated += 1;
        }
    }
    mutated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_scripted_swaps() {
        let mut genes = vec![1, 2, 3, 4, 5];
        apply_swaps(&mut genes, [(0, 4), (1, 2), (0, 1), (3, 4)]);
        // [5,2,3,4,1] → [5,3,2,4,1] → [3,5,2,4,1] → [3,5,2,1,4]
        assert_eq!(genes, vec![3, 5, 2, 1, 4]);
    }

    #[test]
    fn test_draw_swap_distinct() {
        let mut rng = u_numflow::random::create_rng(42);
        for _ in 0..200 {
            let (a, b) = draw_swap(2, &mut rng);
            assert_ne!(a, b);
            assert!(a < 2 && b < 2);
        }
    }

    #[test]
    fn test_draw_swap_degenerate() {
        let mut rng = u_numflow::random::create_rng(42);
        assert_eq!(draw_swap(1, &mut rng), (0, 0));
        assert_eq!(draw_swap(0, &mut rng), (0, 0));
    }

    #[test]
    fn test_mutate_chromosome_seeded_is_reproducible() {
        let mut a = Chromosome::new((1..=10).collect());
        let mut b = a.clone();
        mutate_chromosome(&mut a, 4, &mut u_numflow::random::create_rng(17));
        mutate_chromosome(&mut b, 4, &mut u_numflow::random::create_rng(17));
        assert_eq!(a.genes(), b.genes());
        assert!(a.validate(10).is_ok());
    }

    #[test]
    fn test_seeded_swap_draws() {
        let mut rng = u_numflow::random::create_rng(23);
        let swaps: Vec<_> = (0..4).map(|_| draw_swap(8, &mut rng)).collect();
        assert_eq!(swaps, vec![(3, 7), (5, 0), (4, 5), (5, 7)]);
    }

    #[test]
    fn test_mutate_chromosome_seeded_result() {
        let mut c = Chromosome::new((1..=8).collect());
        mutate_chromosome(&mut c, 4, &mut u_numflow::random::create_rng(23));
        // swaps (3,7) (5,0) (4,5) (5,7) applied to 1..=8
        assert_eq!(c.genes(), &[6, 2, 3, 8, 1, 4, 7, 5]);
    }

    #[test]
    fn test_single_swap_changes_two_positions() {
        let mut c = Chromosome::new(vec![1, 2, 3, 4, 5, 6]);
        mutate_chromosome(&mut c, 1, &mut u_numflow::random::create_rng(8));
        let changed = c
            .genes()
            .iter()
            .zip(1..=6)
            .filter(|&(&g, i)| g != i)
            .count();
        assert_eq!(changed, 2);
    }

    #[test]
    fn test_mutate_rate_bounds() {
        let mut rng = u_numflow::random::create_rng(4);
        let mut members: Vec<Chromosome> =
            (0..10).map(|_| Chromosome::new(vec![1, 2, 3])).collect();
        assert_eq!(mutate(&mut members, 0.0, 4, &mut rng), 0);
        assert!(members.iter().all(|m| m.genes() == [1, 2, 3]));
        assert_eq!(mutate(&mut members, 1.0, 4, &mut rng), 10);
        assert!(members.iter().all(|m| m.validate(3).is_ok()));
    }

    #[test]
    fn test_mutate_single_gene_is_noop() {
        let mut rng = u_numflow::random::create_rng(4);
        let mut members = vec![Chromosome::new(vec![1])];
        mutate(&mut members, 1.0, 4, &mut rng);
        assert_eq!(members[0].genes(), &[1]);
    }
}
