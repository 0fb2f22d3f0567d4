//! The bounded, ordered population the control loop owns.

use crate::problem::Individual;
use std::cmp::Ordering;

/// Sorts individuals by cost descending (worst first, best last).
///
/// The sort is stable; the merge policy's tie-break on equal costs depends
/// on that.
pub(crate) fn sort_worst_first(individuals: &mut [Individual]) {
    individuals.sort_by(|a, b| b.cost().partial_cmp(&a.cost()).unwrap_or(Ordering::Equal));
}

/// An ordered sequence of scored individuals.
///
/// Worst-first ordering (cost descending, best last) is an invariant
/// restored after every mutation. The population is owned by a single run
/// of the control loop; its size is bounded by the working population size
/// except transiently between append and truncation inside [`merge`].
///
/// [`merge`]: Population::merge
#[derive(Debug, Clone)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    /// Builds a population from seeded individuals, restoring the ordering
    /// invariant.
    pub fn new(mut individuals: Vec<Individual>) -> Self {
        sort_worst_first(&mut individuals);
        Self { individuals }
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn as_slice(&self) -> &[Individual] {
        &self.individuals
    }

    /// The best (lowest-cost) individual.
    pub fn best(&self) -> &Individual {
        self.individuals.last().expect("population is never empty")
    }

    /// The cost column, worst first.
    pub fn costs(&self) -> Vec<f64> {
        self.individuals.iter().map(Individual::cost).collect()
    }

    /// Whether some member has exactly this assignment.
    pub fn contains_assignment(&self, assignment: &[usize]) -> bool {
        self.individuals
            .iter()
            .any(|member| member.assignment() == assignment)
    }

    /// Drops every candidate whose assignment already occurs in the
    /// population. Structural equality only; equal cost does not make two
    /// assignments duplicates. Candidate order is preserved.
    pub fn retain_novel(&self, candidates: Vec<Individual>) -> Vec<Individual> {
        candidates
            .into_iter()
            .filter(|candidate| !self.contains_assignment(candidate.assignment()))
            .collect()
    }

    /// Elitist replacement: appends `candidates`, restores the ordering
    /// invariant with a stable sort, and keeps the `capacity` lowest-cost
    /// entries.
    ///
    /// Candidates land after the incumbents before sorting, so equal-cost
    /// ordering is reproducible run for run.
    pub fn merge(&mut self, candidates: Vec<Individual>, capacity: usize) {
        self.individuals.extend(candidates);
        sort_worst_first(&mut self.individuals);
        if self.individuals.len() > capacity {
            let excess = self.individuals.len() - capacity;
            self.individuals.drain(..excess);
        }
    }
}
