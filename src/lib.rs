//! Oracle-guided evolutionary optimization for permutation assignment
//! problems.
//!
//! An adaptive control loop for QAP/TSP-style search where new candidate
//! solutions come from an external generative oracle (a large language
//! model, a recombination engine, a scripted replay) rather than a
//! hard-wired genetic operator. The loop keeps a bounded, ordered population
//! of scored permutations, merges oracle proposals under de-duplication,
//! detects stagnation, and retunes two exploration knobs (oracle temperature
//! and working population size) as the run progresses, while tolerating an
//! unreliable oracle through bounded retry.
//!
//! # Modules
//!
//! - [`problem`]: cost models, the [`AssignmentProblem`](problem::AssignmentProblem)
//!   trait plus QAP and TSP implementations.
//! - [`seed`]: initial-population construction (uniform random, simulated
//!   annealing).
//! - [`oracle`]: the generative-oracle boundary with its capability trait,
//!   repair helpers, evolutionary operators, and two built-in oracles.
//! - [`telemetry`]: per-generation metrics and final-report sinks.
//! - [`search`]: the control loop itself: runner, population policy,
//!   adaptive schedule, configuration.
//!
//! # Example
//!
//! ```
//! use evoracle::oracle::RecombinationOracle;
//! use evoracle::problem::QapProblem;
//! use evoracle::search::{SearchConfig, SearchRunner};
//! use evoracle::seed::RandomSeeder;
//! use evoracle::telemetry::MemorySink;
//!
//! let distance = vec![
//!     vec![0.0, 1.0, 2.0],
//!     vec![1.0, 0.0, 1.0],
//!     vec![2.0, 1.0, 0.0],
//! ];
//! let flow = vec![
//!     vec![0.0, 4.0, 1.0],
//!     vec![4.0, 0.0, 2.0],
//!     vec![1.0, 2.0, 0.0],
//! ];
//! let problem = QapProblem::new(distance, flow).unwrap();
//!
//! let mut oracle = RecombinationOracle::with_seed(3, 7);
//! let mut sink = MemorySink::new();
//! let config = SearchConfig::new(16.0)
//!     .with_population_size(4)
//!     .with_max_generations(20)
//!     .with_phases(4)
//!     .with_seed(42);
//!
//! let result = SearchRunner::run(&problem, &RandomSeeder, &mut oracle, &mut sink, &config)
//!     .unwrap();
//! assert!(result.best.cost() >= 16.0);
//! ```

pub mod oracle;
pub mod problem;
pub mod search;
pub mod seed;
pub mod telemetry;
