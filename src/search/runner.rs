//! The oracle-guided control loop.
//!
//! [`SearchRunner`] wires the collaborators together: it seeds a population,
//! then per generation reports metrics, checks termination, asks the oracle
//! for candidates (with bounded retry), evaluates and de-duplicates them,
//! lets the adaptive schedule retune the exploration knobs, and folds the
//! survivors into the population under the elitist merge policy.

use super::config::SearchConfig;
use super::metrics;
use super::population::{sort_worst_first, Population};
use super::schedule::AdaptiveSchedule;
use crate::oracle::{Oracle, OracleError, OracleSettings};
use crate::problem::{Assignment, AssignmentProblem, Individual};
use crate::seed::PopulationSeeder;
use crate::telemetry::{GenerationRecord, SolutionReport, TelemetrySink};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::thread;
use thiserror::Error;

/// Fatal failure of a search run.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The configuration failed validation. Never retried.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The seeder broke its contract before the first generation.
    #[error("population seeder produced {actual} individuals, expected {expected}")]
    SeedMismatch { expected: usize, actual: usize },

    /// The oracle kept failing until the retry budget ran out. Carries the
    /// last underlying error and the run state at the moment of abort.
    #[error("oracle failed after {attempts} attempts")]
    OracleExhausted {
        attempts: usize,
        #[source]
        source: OracleError,
        state: Box<RunState>,
    },
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The known optimal cost was matched at this generation.
    Succeeded { generation: usize },

    /// The generation budget ran out first.
    Exhausted,
}

/// Snapshot of the mutable state of a run, surrendered to the caller when a
/// run aborts.
#[derive(Debug, Clone)]
pub struct RunState {
    pub generation: usize,
    pub best_cost: f64,
    pub temperature: f64,
    pub population_size: usize,
    pub worse_streak: usize,
    pub population: Vec<Individual>,
}

/// Result of a completed (successful or exhausted) run.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The best individual found during the entire run.
    pub best: Individual,

    /// How the run ended.
    pub outcome: RunOutcome,

    /// Number of generations entered.
    pub generations: usize,

    /// Final percentage deviation from the optimum.
    pub optimality_gap: f64,

    /// Best cost after seeding and after each completed generation.
    pub cost_history: Vec<f64>,
}

/// Executes the oracle-guided evolutionary search.
pub struct SearchRunner;

impl SearchRunner {
    /// Runs a search to completion.
    ///
    /// Seeds the population, then iterates generations until the optimal
    /// cost is matched or the generation budget runs out. Oracle failures
    /// are retried with backoff up to the configured limit; exhausting it
    /// aborts the run with the last error and the final [`RunState`].
    pub fn run<P, S, O, T>(
        problem: &P,
        seeder: &S,
        oracle: &mut O,
        sink: &mut T,
        config: &SearchConfig,
    ) -> Result<SearchResult, SearchError>
    where
        P: AssignmentProblem,
        S: PopulationSeeder,
        O: Oracle + ?Sized,
        T: TelemetrySink + ?Sized,
    {
        config.validate().map_err(SearchError::InvalidConfig)?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        let seeded = seeder.seed(problem, config.population_size, &mut rng);
        if seeded.len() != config.population_size {
            return Err(SearchError::SeedMismatch {
                expected: config.population_size,
                actual: seeded.len(),
            });
        }

        let mut population = Population::new(seeded);
        let mut schedule = AdaptiveSchedule::new(config);
        let mut best_cost = population.best().cost();
        let mut cost_history = Vec::with_capacity(config.max_generations + 1);
        cost_history.push(best_cost);

        oracle.configure(OracleSettings {
            temperature: schedule.temperature(),
            population_size: schedule.population_size(),
        });

        for generation in 1..=config.max_generations {
            let costs = population.costs();
            let record = GenerationRecord {
                generation,
                best_cost,
                temperature: schedule.temperature(),
                variance: metrics::variance(&costs),
                degeneracy: metrics::degeneracy(&costs),
                population_size: schedule.population_size(),
                optimality_gap: metrics::optimality_gap(best_cost, config.optimal_cost),
            };
            sink.on_generation(&record);
            log::debug!(
                "generation {generation}: best {best_cost}, temperature {}, population {}",
                schedule.temperature(),
                schedule.population_size(),
            );

            if best_cost == config.optimal_cost {
                return Ok(Self::succeed(
                    &population,
                    generation,
                    best_cost,
                    cost_history,
                    sink,
                    config,
                ));
            }

            // The size the merge below truncates to; a widening this
            // generation only shows up from the next one.
            let capacity = schedule.population_size();

            let proposals = {
                let mut attempts = 0;
                loop {
                    attempts += 1;
                    match oracle.propose(population.as_slice(), capacity) {
                        Ok(batch) => break batch,
                        Err(source) => {
                            log::warn!(
                                "oracle proposal failed on attempt {attempts}/{}: {source}",
                                config.retry_limit,
                            );
                            if attempts >= config.retry_limit {
                                return Err(SearchError::OracleExhausted {
                                    attempts,
                                    source,
                                    state: Box::new(RunState {
                                        generation,
                                        best_cost,
                                        temperature: schedule.temperature(),
                                        population_size: schedule.population_size(),
                                        worse_streak: schedule.worse_streak(),
                                        population: population.as_slice().to_vec(),
                                    }),
                                });
                            }
                            thread::sleep(config.retry_backoff);
                        }
                    }
                }
            };

            let batch = evaluate_batch(problem, proposals);
            let batch_best = batch
                .iter()
                .map(Individual::cost)
                .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

            let mut survivors = population.retain_novel(batch);
            sort_worst_first(&mut survivors);

            let widened = schedule.observe_batch(batch_best, best_cost);
            let decayed = schedule.decay(generation);
            if widened || decayed {
                oracle.configure(OracleSettings {
                    temperature: schedule.temperature(),
                    population_size: schedule.population_size(),
                });
            }

            population.merge(survivors, capacity);

            let generation_best = population.best().cost();
            if generation_best < best_cost {
                best_cost = generation_best;
            }
            cost_history.push(best_cost);

            sink.on_population(generation, population.as_slice());

            if best_cost == config.optimal_cost {
                return Ok(Self::succeed(
                    &population,
                    generation,
                    best_cost,
                    cost_history,
                    sink,
                    config,
                ));
            }
        }

        let optimality_gap = metrics::optimality_gap(best_cost, config.optimal_cost);
        sink.on_complete(&SolutionReport {
            assignment: population.best().assignment().to_vec(),
            cost: best_cost,
            optimal_cost: config.optimal_cost,
            optimality_gap,
            success_generation: None,
        });

        Ok(SearchResult {
            best: population.best().clone(),
            outcome: RunOutcome::Exhausted,
            generations: config.max_generations,
            optimality_gap,
            cost_history,
        })
    }

    fn succeed<T>(
        population: &Population,
        generation: usize,
        best_cost: f64,
        cost_history: Vec<f64>,
        sink: &mut T,
        config: &SearchConfig,
    ) -> SearchResult
    where
        T: TelemetrySink + ?Sized,
    {
        let optimality_gap = metrics::optimality_gap(best_cost, config.optimal_cost);
        sink.on_complete(&SolutionReport {
            assignment: population.best().assignment().to_vec(),
            cost: best_cost,
            optimal_cost: config.optimal_cost,
            optimality_gap,
            success_generation: Some(generation),
        });

        SearchResult {
            best: population.best().clone(),
            outcome: RunOutcome::Succeeded { generation },
            generations: generation,
            optimality_gap,
            cost_history,
        }
    }
}

#[cfg(feature = "parallel")]
fn evaluate_batch<P: AssignmentProblem>(problem: &P, proposals: Vec<Assignment>) -> Vec<Individual> {
    use rayon::prelude::*;

    proposals
        .into_par_iter()
        .map(|assignment| Individual::evaluate(problem, assignment))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn evaluate_batch<P: AssignmentProblem>(problem: &P, proposals: Vec<Assignment>) -> Vec<Individual> {
    proposals
        .into_iter()
        .map(|assignment| Individual::evaluate(problem, assignment))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
