//! Order crossover (OX) for permutation chromosomes.
//!
//! A child keeps one parent's genes on a contiguous segment `[start, end]`
//! and receives the remaining customers in the order they appear in the
//! other parent, filling the free positions left to right. Both children are
//! permutations of the same customer set whenever both parents are.

use rand::Rng;
use tracing::instrument;

use super::chromosome::Chromosome;

/// Builds one OX child: `keep[start..=end]` in place, the rest from `donor`.
fn ox_child(keep: &[usize], donor: &[usize], start: usize, end: usize) -> Vec<usize> {
    let n = keep.len();
    let mut child = vec![0; n];
    let mut in_segment = vec![false; n + 1];

    for pos in start..=end {
        child[pos] = keep[pos];
        in_segment[keep[pos]] = true;
    }

    let free = (0..start).chain(end + 1..n);
    let fill = donor.iter().copied().filter(|&id| !in_segment[id]);
    for (pos, id) in free.zip(fill) {
        child[pos] = id;
    }
    child
}

/// Order crossover of two parents over the segment `[start, end]`.
///
/// Returns `(child_a, child_b)` where `child_a` keeps `parent_a`'s segment and
/// is filled from `parent_b`, and `child_b` is built symmetrically. The
/// bounds may be given in either order.
///
/// # Panics
///
/// Panics if the parents differ in length or a bound is out of range.
///
/// # Examples
///
/// ```
/// use cvrp_ga::ga::crossover::order_crossover;
///
/// let (a, b) = order_crossover(&[1, 2, 3, 4, 5], &[5, 4, 3, 2, 1], 1, 3);
/// assert_eq!(a, vec![5, 2, 3, 4, 1]);
/// assert_eq!(b, vec![1, 4, 3, 2, 5]);
/// ```
pub fn order_crossover(
    parent_a: &[usize],
    parent_b: &[usize],
    start: usize,
    end: usize,
) -> (Vec<usize>, Vec<usize>) {
    assert_eq!(parent_a.len(), parent_b.len(), "parents differ in length");
    let (start, end) = (start.min(end), start.max(end));
    (
        ox_child(parent_a, parent_b, start, end),
        ox_child(parent_b, parent_a, start, end),
    )
}

/// Crosses members `i` and `j` over a random segment, replacing both with
/// their children.
pub fn cross_pair<R: Rng>(members: &mut [Chromosome], i: usize, j: usize, rng: &mut R) {
    let n = members[i].len();
    if n == 0 {
        return;
    }
    let start = rng.random_range(0..n as u64) as usize;
    let end = rng.random_range(0..n as u64) as usize;
    let (a, b) = order_crossover(members[i].genes(), members[j].genes(), start, end);
    members[i] = Chromosome::new(a);
    members[j] = Chromosome::new(b);
}

/// Applies crossover to the population in place.
///
/// Each slot is flagged independently with probability `rate`. Flagged slots
/// are paired in the order they were flagged (first with second, third with
/// fourth, ...); a trailing unpaired slot is left untouched. Returns the
/// number of pairs crossed.
#[instrument(level = "debug", skip(members, rng), fields(size = members.len()))]
pub fn crossover<R: Rng>(members: &mut [Chromosome], rate: f64, rng: &mut R) -> usize {
    let mut pending: Option<usize> = None;
    let mut pairs = 0;
    for mem in 0..members.len() {
        if rng.random::<f64>() >= rate {
            continue;
        }
        match pending.take() {
            Some(one) => {
                cross_pair(members, one, mem, rng);
                pairs += 1;
            }
            None => pending = Some(mem),
        }
    }
    pairs
}
