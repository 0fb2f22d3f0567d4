//! Run telemetry.
//!
//! The search core reports through a [`TelemetrySink`] and never reads
//! anything back: one [`GenerationRecord`] per generation before the
//! population is acted on, one full population snapshot per generation after
//! replacement, and one [`SolutionReport`] when the run ends.
//!
//! All percentage values are rounded to two decimal places and raw metrics
//! to three before they reach a sink, so sinks can compare and export them
//! verbatim.

use crate::problem::{Assignment, Individual};

/// Per-generation metrics, captured before the generation acts.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationRecord {
    /// 1-based generation index.
    pub generation: usize,

    /// Best cost seen so far in the run.
    pub best_cost: f64,

    /// Oracle temperature in effect this generation.
    pub temperature: f64,

    /// Population cost variance.
    pub variance: f64,

    /// Fraction of the population tied with the best cost.
    pub degeneracy: f64,

    /// Working population size in effect this generation.
    pub population_size: usize,

    /// Percentage deviation of the best cost from the known optimum.
    pub optimality_gap: f64,
}

/// Final outcome of a run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolutionReport {
    /// The best assignment found.
    pub assignment: Assignment,

    /// Its cost.
    pub cost: f64,

    /// The known optimal cost the run was aiming for.
    pub optimal_cost: f64,

    /// Percentage deviation from the optimum.
    pub optimality_gap: f64,

    /// Generation at which the optimum was matched, if it was.
    pub success_generation: Option<usize>,
}

/// Receives run telemetry.
///
/// All methods default to no-ops so sinks only implement what they care
/// about.
pub trait TelemetrySink {
    /// Called once per generation with the pre-generation metrics.
    fn on_generation(&mut self, _record: &GenerationRecord) {}

    /// Called once per generation with the post-replacement population.
    fn on_population(&mut self, _generation: usize, _population: &[Individual]) {}

    /// Called once when the run ends, successful or not.
    fn on_complete(&mut self, _report: &SolutionReport) {}
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl TelemetrySink for NullSink {}

/// Keeps everything in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Vec<GenerationRecord>,
    snapshots: Vec<(usize, Vec<Individual>)>,
    report: Option<SolutionReport>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All generation records, in order.
    pub fn records(&self) -> &[GenerationRecord] {
        &self.records
    }

    /// All population snapshots with their generation index, in order.
    pub fn snapshots(&self) -> &[(usize, Vec<Individual>)] {
        &self.snapshots
    }

    /// The final report, if the run completed.
    pub fn report(&self) -> Option<&SolutionReport> {
        self.report.as_ref()
    }
}

impl TelemetrySink for MemorySink {
    fn on_generation(&mut self, record: &GenerationRecord) {
        self.records.push(record.clone());
    }

    fn on_population(&mut self, generation: usize, population: &[Individual]) {
        self.snapshots.push((generation, population.to_vec()));
    }

    fn on_complete(&mut self, report: &SolutionReport) {
        self.report = Some(report.clone());
    }
}

/// Forwards telemetry to the `log` facade.
///
/// Generation metrics and the final report go out at info level, population
/// snapshots at debug.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl TelemetrySink for LogSink {
    fn on_generation(&mut self, record: &GenerationRecord) {
        log::info!(
            "generation {}: best {}, gap {}%, temperature {}, population {}, variance {}, degeneracy {}",
            record.generation,
            record.best_cost,
            record.optimality_gap,
            record.temperature,
            record.population_size,
            record.variance,
            record.degeneracy,
        );
    }

    fn on_population(&mut self, generation: usize, population: &[Individual]) {
        log::debug!(
            "generation {generation} population: {:?}",
            population
                .iter()
                .map(|individual| (individual.assignment(), individual.cost()))
                .collect::<Vec<_>>(),
        );
    }

    fn on_complete(&mut self, report: &SolutionReport) {
        match report.success_generation {
            Some(generation) => log::info!(
                "matched the optimal cost {} at generation {generation}",
                report.optimal_cost
            ),
            None => log::info!(
                "stopped at cost {} ({}% above the optimum)",
                report.cost,
                report.optimality_gap
            ),
        }
    }
}
