//! Initial-population construction.
//!
//! A [`PopulationSeeder`] turns a cost model into a scored starting
//! population, sorted worst-first the way the search core keeps it.
//!
//! - [`RandomSeeder`]: oversampled uniform shuffles, keep the best.
//! - [`AnnealingSeeder`]: one short simulated-annealing run per member,
//!   each with its own cooling rate.

mod annealing;
mod random;

pub use annealing::AnnealingSeeder;
pub use random::RandomSeeder;

use crate::problem::{AssignmentProblem, Individual};
use rand::Rng;

/// Produces an initial scored population.
pub trait PopulationSeeder {
    /// Returns exactly `size` individuals sorted by cost descending
    /// (worst first, best last).
    fn seed<P, R>(&self, problem: &P, size: usize, rng: &mut R) -> Vec<Individual>
    where
        P: AssignmentProblem + ?Sized,
        R: Rng;
}
