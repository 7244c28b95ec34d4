//! Evolutionary search for N-Queens placements.
//!
//! Finds a permutation of `1..=n` (queen row per column) with no two queens
//! on a shared diagonal, using the steady-state evolutionary algorithm of
//! Eiben & Smith:
//!
//! - **Fitness**: number of queen pairs sharing a diagonal (lower is better,
//!   zero is a solution), with every evaluation charged to an explicit budget.
//! - **Parent selection**: best two out of a random tournament of five.
//! - **Variation**: cut-and-crossfill crossover followed by swap mutation.
//! - **Survival selection**: replace worst; the best individual is never lost.
//! - **Termination**: a solution is found or the evaluation budget is spent.
//!
//! # Architecture
//!
//! The engine in [`ea`] is headless: it performs no I/O and reports progress
//! only through the [`ea::Reporter`] callback. Board rendering lives in
//! [`render`] and the `nqueens` binary wires both to a terminal.
//!
//! ```
//! use u_nqueens::ea::{solve, EaConfig};
//!
//! let result = solve(&EaConfig::new(8).with_seed(42)).unwrap();
//! println!("{:?} after {} evaluations", result.outcome, result.evaluations);
//! ```

pub mod ea;
pub mod error;
pub mod random;
pub mod render;

pub use error::ConfigError;
