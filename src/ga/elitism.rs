//! Elitism: keep the best-known chromosome across generations.

use tracing::instrument;

use super::population::Population;

/// What [`apply_elitism`] did to the population.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EliteUpdate {
    /// The current best beat the elite and was copied into the elite slot.
    Improved {
        /// Member that became the new elite.
        from: usize,
    },
    /// The elite was copied over the current worst member.
    Reinjected {
        /// Member that was overwritten.
        into: usize,
    },
}

/// Copies the current best member into the elite slot.
///
/// Used once after the initial evaluation, when the elite holds no score yet.
pub fn capture_elite(population: &mut Population) {
    let best = population.best_index();
    let elite = population.members()[best].clone();
    population.set_elite(elite);
}

/// Compares the generation's best member with the elite.
///
/// If the best member is strictly fitter it replaces the elite; otherwise the
/// elite overwrites the worst member. Either way the elite's fitness never
/// decreases.
#[instrument(level = "debug", skip_all)]
pub fn apply_elitism(population: &mut Population) -> EliteUpdate {
    let best = population.best_index();
    if population.members()[best].fitness() > population.elite().fitness() {
        let elite = population.members()[best].clone();
        population.set_elite(elite);
        EliteUpdate::Improved { from: best }
    } else {
        let worst = population.worst_index();
        let elite = population.elite().clone();
        population.members_mut()[worst] = elite;
        EliteUpdate::Reinjected { into: worst }
    }
}
