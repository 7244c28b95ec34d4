//! Evolutionary algorithm for the N-Queens problem.
//!
//! Candidate placements are permutations of `1..=n` (queen row per column),
//! so rows and columns never clash and fitness only counts diagonal
//! conflicts. The engine is a steady-state EA:
//!
//! | Component            | Choice                                |
//! |----------------------|---------------------------------------|
//! | Representation       | Permutation                           |
//! | Recombination        | Cut-and-crossfill, p = 1.0            |
//! | Mutation             | Swap, p = 0.8                         |
//! | Parent selection     | Best 2 out of random 5                |
//! | Survival selection   | Replace worst                         |
//! | Population size      | 100                                   |
//! | Offspring            | 2 per generation                      |
//! | Initialization       | Random permutations                   |
//! | Termination          | Solution found or evaluation budget   |
//!
//! # Key Types
//!
//! - [`EaConfig`]: Algorithm parameters with builder and validation
//! - [`EaRunner`]: Owns population, random source and evaluation budget; drives the loop
//! - [`Reporter`]: Per-generation callback receiving a [`GenerationSnapshot`]
//! - [`RunResult`] / [`RunOutcome`]: `Solved` or `Exhausted`
//!
//! # References
//!
//! - Eiben & Smith (2003), *Introduction to Evolutionary Computing*, §2.4.1

mod config;
mod fitness;
pub mod operators;
mod population;
mod runner;
pub mod selection;
mod types;

pub use config::EaConfig;
pub use fitness::{conflicts, EvaluationBudget, Evaluator};
pub use operators::{crossover, cut_and_crossfill, swap_mutation};
pub use population::{Population, PopulationStats};
pub use runner::{
    solve, solve_with_reporter, EaRunner, GenerationSnapshot, NoopReporter, Reporter, RunOutcome,
    RunResult, RunState, TracingReporter,
};
pub use types::{is_permutation, Genotype, Individual, NotAPermutation};
