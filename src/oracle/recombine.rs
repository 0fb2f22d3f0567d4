//! A self-contained generative oracle built on recombination.

use super::operators::{Crossover, Mutation};
use super::{is_valid_assignment, repair_assignment, Oracle, OracleError, OracleSettings};
use crate::problem::{Assignment, Individual};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// An oracle that breeds proposals from the population it is shown.
///
/// Each proposal takes two rank-biased parents (better individuals are
/// favored), recombines them with a randomly chosen [`Crossover`], and
/// mutates the child with a probability that grows with the configured
/// temperature, so the same adaptive schedule that would loosen a
/// generative model's sampling loosens this oracle's perturbation pressure.
///
/// Deterministic for a fixed seed, never fails, and keeps the control loop
/// runnable end to end without any external generator.
#[derive(Debug)]
pub struct RecombinationOracle {
    size: usize,
    temperature: f64,
    rng: StdRng,
}

impl RecombinationOracle {
    /// Creates an oracle for assignments of the given problem size.
    pub fn new(size: usize) -> Self {
        Self::with_seed(size, rand::random())
    }

    /// Creates a seeded oracle for reproducible runs.
    pub fn with_seed(size: usize, seed: u64) -> Self {
        Self {
            size,
            temperature: 1.0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Probability of mutating a freshly bred child.
    ///
    /// Saturates toward 1.0 as temperature rises; at the schedule floor of
    /// 0.1 it leaves most children untouched.
    fn mutation_rate(&self) -> f64 {
        1.0 - (-self.temperature).exp()
    }

    /// Picks an index biased toward the best end of a worst-first population.
    fn parent_index<R: Rng>(len: usize, rng: &mut R) -> usize {
        let draw: f64 = rng.random_range(0.0..1.0);
        let offset = ((draw * draw) * len as f64) as usize;
        len - 1 - offset.min(len - 1)
    }
}

impl Oracle for RecombinationOracle {
    fn configure(&mut self, settings: OracleSettings) {
        self.temperature = settings.temperature;
    }

    fn propose(
        &mut self,
        population: &[Individual],
        count: usize,
    ) -> Result<Vec<Assignment>, OracleError> {
        if population.is_empty() {
            return Ok(Vec::new());
        }

        let mutation_rate = self.mutation_rate();
        let mut proposals = Vec::with_capacity(count);
        for _ in 0..count {
            let first = Self::parent_index(population.len(), &mut self.rng);
            let second = Self::parent_index(population.len(), &mut self.rng);
            let parent1 = population[first].assignment();
            let parent2 = population[second].assignment();

            let mut child = Crossover::choose(&mut self.rng).apply(parent1, parent2, &mut self.rng);
            if self.rng.random_range(0.0..1.0) < mutation_rate {
                Mutation::choose(&mut self.rng).apply(&mut child, &mut self.rng);
            }
            if !is_valid_assignment(&child, self.size) {
                child = repair_assignment(&child, self.size, &mut self.rng);
            }
            proposals.push(child);
        }

        Ok(proposals)
    }
}
