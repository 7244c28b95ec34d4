//! Error types.

use thiserror::Error;

/// Rejected engine configuration.
///
/// Raised before any run starts; none of these are recoverable by the engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("board size must be at least 1, got {0}")]
    BoardTooSmall(usize),

    #[error("tournament size must be at least 2, got {0}")]
    TournamentTooSmall(usize),

    #[error("population size {population_size} is smaller than tournament size {tournament_size}")]
    PopulationTooSmall {
        population_size: usize,
        tournament_size: usize,
    },

    #[error("offspring count must be a positive even number, got {0}")]
    InvalidOffspringCount(usize),

    #[error("{name} must lie in [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },

    #[error("seed genotype {index} is not a permutation of 1..={n}")]
    InvalidSeedGenotype { index: usize, n: usize },

    #[error("{given} seed genotypes exceed population size {population_size}")]
    TooManySeedGenotypes {
        given: usize,
        population_size: usize,
    },
}
