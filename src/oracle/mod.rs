//! The generative-oracle boundary.
//!
//! The search core never constructs candidates itself; it asks an [`Oracle`]
//! for a batch of proposals each generation. The oracle contract:
//!
//! - proposals are structurally valid permutations of the problem size; an
//!   adapter wrapping a sloppy generator must run [`repair_assignment`]
//!   before returning, the core never re-validates;
//! - [`Oracle::configure`] may be called repeatedly mid-run as the search
//!   retunes its exploration parameters, without the oracle losing its
//!   identity or session;
//! - failures are transient by default and surface as [`OracleError`]; the
//!   core retries them with backoff.
//!
//! Two implementations ship with the crate: [`RecombinationOracle`], a
//! self-contained generator built on [`operators`], and [`ReplayOracle`],
//! a scripted oracle for tests and offline replay.

pub mod operators;

mod recombine;

pub use recombine::RecombinationOracle;

use crate::problem::{Assignment, Individual};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::VecDeque;
use thiserror::Error;

/// Failure of one oracle invocation.
#[derive(Debug, Error)]
pub enum OracleError {
    /// The oracle could not be reached or did not answer in time.
    #[error("oracle unavailable: {0}")]
    Unavailable(String),

    /// The oracle answered with something it could not repair into
    /// usable proposals.
    #[error("oracle response unusable: {0}")]
    Malformed(String),
}

/// Exploration parameters an oracle bakes into its session.
///
/// `temperature` steers how adventurous proposals should be;
/// `population_size` is the working population size, for oracles whose
/// session state (e.g. an instruction preamble) mentions it. The
/// authoritative batch size of a single call is the `count` argument of
/// [`Oracle::propose`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OracleSettings {
    pub temperature: f64,
    pub population_size: usize,
}

/// A generative source of candidate permutations.
///
/// Implementations own whatever session, model or randomness they need; the
/// search core only sees this interface.
pub trait Oracle {
    /// Applies new exploration settings. Called once before the first
    /// proposal and again whenever the adaptive schedule changes a knob.
    fn configure(&mut self, settings: OracleSettings);

    /// Proposes up to `count` candidate assignments derived from the given
    /// population (ordered worst-first). Every returned assignment must be a
    /// valid permutation of the problem size.
    fn propose(
        &mut self,
        population: &[Individual],
        count: usize,
    ) -> Result<Vec<Assignment>, OracleError>;
}

/// Checks that `assignment` is a permutation of `0..size`.
pub fn is_valid_assignment(assignment: &[usize], size: usize) -> bool {
    if assignment.len() != size {
        return false;
    }
    let mut seen = vec![false; size];
    for &value in assignment {
        if value >= size || seen[value] {
            return false;
        }
        seen[value] = true;
    }
    true
}

/// Repairs a raw proposal into a valid permutation of `0..size`.
///
/// Keeps the first occurrence of every in-range value in proposal order,
/// then appends the missing values in randomized order. Adapters run this on
/// anything that fails [`is_valid_assignment`] before handing proposals to
/// the core.
pub fn repair_assignment<R: Rng>(proposal: &[usize], size: usize, rng: &mut R) -> Assignment {
    let mut seen = vec![false; size];
    let mut repaired = Vec::with_capacity(size);
    for &value in proposal {
        if value < size && !seen[value] {
            seen[value] = true;
            repaired.push(value);
        }
    }

    let mut missing: Vec<usize> = (0..size).filter(|&value| !seen[value]).collect();
    missing.shuffle(rng);
    repaired.extend(missing);
    repaired
}

/// A scripted oracle.
///
/// Returns its batches in order, one per [`Oracle::propose`] call, then empty
/// batches once exhausted. Optionally fails a fixed number of times before
/// the first successful call, and records every [`OracleSettings`] it is
/// configured with. This is the shape the retry and reconfiguration
/// policies are tested against.
#[derive(Debug, Default)]
pub struct ReplayOracle {
    batches: VecDeque<Vec<Assignment>>,
    failures_remaining: usize,
    settings_log: Vec<OracleSettings>,
    propose_calls: usize,
}

impl ReplayOracle {
    /// Creates a replay oracle from scripted batches.
    pub fn new<I>(batches: I) -> Self
    where
        I: IntoIterator<Item = Vec<Assignment>>,
    {
        Self {
            batches: batches.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Makes the first `times` proposal calls fail before any batch is
    /// served.
    pub fn with_failures(mut self, times: usize) -> Self {
        self.failures_remaining = times;
        self
    }

    /// Every settings value passed to [`Oracle::configure`], in order.
    pub fn settings_log(&self) -> &[OracleSettings] {
        &self.settings_log
    }

    /// Number of proposal calls received, including failed ones.
    pub fn propose_calls(&self) -> usize {
        self.propose_calls
    }
}

impl Oracle for ReplayOracle {
    fn configure(&mut self, settings: OracleSettings) {
        self.settings_log.push(settings);
    }

    fn propose(
        &mut self,
        _population: &[Individual],
        _count: usize,
    ) -> Result<Vec<Assignment>, OracleError> {
        self.propose_calls += 1;
        if self.failures_remaining > 0 {
            self.failures_remaining -= 1;
            return Err(OracleError::Unavailable("scripted failure".into()));
        }
        Ok(self.batches.pop_front().unwrap_or_default())
    }
}

// ============================================================================
// Tests
// ============================================================================
