//! Simulated-annealing seeding.

use super::PopulationSeeder;
use crate::problem::{AssignmentProblem, Individual};
use crate::search::sort_worst_first;
use rand::seq::SliceRandom;
use rand::Rng;

/// Seeds the population with one short simulated-annealing run per member.
///
/// Every member anneals from its own random shuffle under its own geometric
/// cooling rate, drawn uniformly from `cooling_range`. A spread of cooling
/// speeds keeps the seeded population diverse instead of collapsing onto a
/// single local optimum.
///
/// Swap neighborhood, Metropolis acceptance.
#[derive(Debug, Clone)]
pub struct AnnealingSeeder {
    initial_temperature: f64,
    max_iterations: usize,
    cooling_range: (f64, f64),
}

impl Default for AnnealingSeeder {
    fn default() -> Self {
        Self {
            initial_temperature: 1000.0,
            max_iterations: 1000,
            cooling_range: (0.90, 0.99),
        }
    }
}

impl AnnealingSeeder {
    /// Sets the starting temperature of each annealing run.
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    /// Sets the iteration budget of each annealing run.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the range cooling rates are drawn from.
    pub fn with_cooling_range(mut self, low: f64, high: f64) -> Self {
        self.cooling_range = (low, high);
        self
    }

    fn anneal<P, R>(&self, problem: &P, cooling_rate: f64, rng: &mut R) -> Individual
    where
        P: AssignmentProblem + ?Sized,
        R: Rng,
    {
        let n = problem.size();
        let mut current: Vec<usize> = (0..n).collect();
        current.shuffle(rng);
        let mut current_cost = problem.cost(&current);

        let mut best = current.clone();
        let mut best_cost = current_cost;
        let mut temperature = self.initial_temperature;

        for _ in 0..self.max_iterations {
            let mut neighbor = current.clone();
            let i = rng.random_range(0..n);
            let j = rng.random_range(0..n);
            neighbor.swap(i, j);
            let neighbor_cost = problem.cost(&neighbor);

            let delta = neighbor_cost - current_cost;
            let accept =
                delta < 0.0 || rng.random_range(0.0..1.0) < (-delta / temperature).exp();
            if accept {
                current = neighbor;
                current_cost = neighbor_cost;
                if current_cost < best_cost {
                    best = current.clone();
                    best_cost = current_cost;
                }
            }

            temperature *= cooling_rate;
        }

        Individual::evaluate(problem, best)
    }
}

impl PopulationSeeder for AnnealingSeeder {
    fn seed<P, R>(&self, problem: &P, size: usize, rng: &mut R) -> Vec<Individual>
    where
        P: AssignmentProblem + ?Sized,
        R: Rng,
    {
        let mut population: Vec<Individual> = (0..size)
            .map(|_| {
                let cooling_rate = rng.random_range(self.cooling_range.0..self.cooling_range.1);
                self.anneal(problem, cooling_rate, rng)
            })
            .collect();

        sort_worst_first(&mut population);
        population
    }
}
