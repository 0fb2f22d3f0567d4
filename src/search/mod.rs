//! The adaptive evolutionary control loop.
//!
//! The core of the crate: a synchronous state machine
//! (`SEEDING → RUNNING → SUCCEEDED | EXHAUSTED`) that owns a bounded,
//! worst-first [`Population`] of scored permutations and advances it one
//! generation at a time with candidates from an oracle.
//!
//! # Key Types
//!
//! - [`SearchConfig`]: run parameters (budget, schedule, retry policy)
//! - [`SearchRunner`]: executes the loop against the collaborator traits
//! - [`SearchResult`] / [`RunOutcome`]: what a completed run returns
//! - [`SearchError`] / [`RunState`]: how a run fails, and what it leaves
//!   behind
//! - [`AdaptiveSchedule`]: the temperature / population-size retuning policy
//!
//! # Submodules
//!
//! - [`metrics`]: variance, degeneracy and optimality-gap helpers with the
//!   crate's fixed rounding contract

mod config;
pub mod metrics;
mod population;
mod runner;
mod schedule;

pub use config::SearchConfig;
pub use population::Population;
pub use runner::{RunOutcome, RunState, SearchError, SearchResult, SearchRunner};
pub use schedule::AdaptiveSchedule;

pub(crate) use population::sort_worst_first;
