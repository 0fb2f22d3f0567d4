//! Uniform-random seeding.

use super::PopulationSeeder;
use crate::problem::{AssignmentProblem, Individual};
use crate::search::sort_worst_first;
use rand::seq::SliceRandom;
use rand::Rng;

/// How many shuffles are drawn per requested individual.
const OVERSAMPLE: usize = 6;

/// Seeds the population with uniformly random permutations.
///
/// Draws six times the requested amount and keeps the cheapest, which gives
/// a noticeably better starting line than `size` raw shuffles at negligible
/// cost.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomSeeder;

impl PopulationSeeder for RandomSeeder {
    fn seed<P, R>(&self, problem: &P, size: usize, rng: &mut R) -> Vec<Individual>
    where
        P: AssignmentProblem + ?Sized,
        R: Rng,
    {
        let n = problem.size();
        let mut pool: Vec<Individual> = (0..size * OVERSAMPLE)
            .map(|_| {
                let mut assignment: Vec<usize> = (0..n).collect();
                assignment.shuffle(rng);
                Individual::evaluate(problem, assignment)
            })
            .collect();

        sort_worst_first(&mut pool);
        pool.split_off(pool.len() - size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::is_valid_assignment;
    use crate::problem::TspProblem;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ring(n: usize) -> TspProblem {
        let distance: Vec<Vec<f64>> = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| {
                        let gap = i.abs_diff(j).min(n - i.abs_diff(j));
                        gap as f64
                    })
                    .collect()
            })
            .collect();
        TspProblem::new(distance).unwrap()
    }

    #[test]
    fn test_seeds_requested_size_sorted_worst_first() {
        let problem = ring(8);
        let mut rng = StdRng::seed_from_u64(42);
        let population = RandomSeeder.seed(&problem, 5, &mut rng);

        assert_eq!(population.len(), 5);
        for pair in population.windows(2) {
            assert!(pair[0].cost() >= pair[1].cost());
        }
    }

    #[test]
    fn test_seeds_valid_permutations() {
        let problem = ring(8);
        let mut rng = StdRng::seed_from_u64(42);
        for individual in RandomSeeder.seed(&problem, 5, &mut rng) {
            assert!(is_valid_assignment(individual.assignment(), 8));
        }
    }

    #[test]
    fn test_oversampling_keeps_the_cheapest() {
        let problem = ring(8);
        let mut rng = StdRng::seed_from_u64(42);

        let n = 8;
        let mut pool: Vec<Individual> = (0..5 * OVERSAMPLE)
            .map(|_| {
                let mut assignment: Vec<usize> = (0..n).collect();
                assignment.shuffle(&mut rng);
                Individual::evaluate(&problem, assignment)
            })
            .collect();
        pool.sort_by(|a, b| {
            a.cost()
                .partial_cmp(&b.cost())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let cheapest = pool[0].cost();

        let mut rng = StdRng::seed_from_u64(42);
        let population = RandomSeeder.seed(&problem, 5, &mut rng);
        let best = population.last().map(Individual::cost);
        assert_eq!(best, Some(cheapest));
    }
}
