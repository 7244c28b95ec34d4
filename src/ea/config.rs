//! EA configuration.
//!
//! [`EaConfig`] holds every parameter of the N-Queens evolutionary loop.
//! It is built once before the run and read-only thereafter.

use crate::error::ConfigError;

/// Configuration for the N-Queens evolutionary algorithm.
///
/// # Defaults
///
/// The defaults reproduce the textbook setup of Eiben & Smith:
///
/// ```
/// use u_nqueens::ea::EaConfig;
///
/// let config = EaConfig::default();
/// assert_eq!(config.n, 8);
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.tournament_size, 5);
/// assert_eq!(config.offspring_count, 2);
/// assert_eq!(config.max_evaluations, 10_000);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_nqueens::ea::EaConfig;
///
/// let config = EaConfig::new(12)
///     .with_population_size(200)
///     .with_mutation_probability(0.5)
///     .with_max_evaluations(50_000)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EaConfig {
    /// Board size: number of queens, columns and rows.
    pub n: usize,

    /// Number of individuals kept after every survival selection.
    pub population_size: usize,

    /// Individuals drawn (without replacement) per parent tournament.
    ///
    /// The best two of the sample become parents.
    pub tournament_size: usize,

    /// Offspring produced per generation. Must be a positive even number,
    /// since offspring are produced in crossover pairs.
    pub offspring_count: usize,

    /// Probability of applying cut-and-crossfill to a pair of parents (0.0–1.0).
    ///
    /// When crossover is not applied, the children are copies of the parents.
    pub p_recombination: f64,

    /// Probability of applying swap mutation to each offspring (0.0–1.0).
    pub p_mutation: f64,

    /// Fitness evaluations allowed before the run stops as exhausted.
    ///
    /// Initialization is charged too: the population alone costs
    /// `population_size` evaluations.
    pub max_evaluations: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` draws a seed from the thread-local generator.
    pub seed: Option<u64>,
}

impl Default for EaConfig {
    fn default() -> Self {
        Self {
            n: 8,
            population_size: 100,
            tournament_size: 5,
            offspring_count: 2,
            p_recombination: 1.0,
            p_mutation: 0.8,
            max_evaluations: 10_000,
            seed: None,
        }
    }
}

impl EaConfig {
    /// Default parameters for an `n`-queens board.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            ..Self::default()
        }
    }

    /// The classic 8-queens setup: population 100, best 2 of random 5,
    /// 100% recombination, 80% mutation, 10 000 evaluations.
    pub fn classic() -> Self {
        Self::default()
    }

    /// Sets the board size.
    pub fn with_n(mut self, n: usize) -> Self {
        self.n = n;
        self
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the number of offspring per generation.
    pub fn with_offspring_count(mut self, count: usize) -> Self {
        self.offspring_count = count;
        self
    }

    /// Sets the recombination probability.
    ///
    /// Not clamped: out-of-range values are reported by [`validate`](Self::validate).
    pub fn with_recombination_probability(mut self, p: f64) -> Self {
        self.p_recombination = p;
        self
    }

    /// Sets the mutation probability.
    ///
    /// Not clamped: out-of-range values are reported by [`validate`](Self::validate).
    pub fn with_mutation_probability(mut self, p: f64) -> Self {
        self.p_mutation = p;
        self
    }

    /// Sets the evaluation budget.
    pub fn with_max_evaluations(mut self, max: usize) -> Self {
        self.max_evaluations = max;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Board sizes 2 and 3 are accepted even though they have no solution:
    /// such runs end exhausted with the best achievable fitness.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n < 1 {
            return Err(ConfigError::BoardTooSmall(self.n));
        }
        if self.tournament_size < 2 {
            return Err(ConfigError::TournamentTooSmall(self.tournament_size));
        }
        if self.population_size < self.tournament_size {
            return Err(ConfigError::PopulationTooSmall {
                population_size: self.population_size,
                tournament_size: self.tournament_size,
            });
        }
        if self.offspring_count == 0 || self.offspring_count % 2 != 0 {
            return Err(ConfigError::InvalidOffspringCount(self.offspring_count));
        }
        check_probability("p_recombination", self.p_recombination)?;
        check_probability("p_mutation", self.p_mutation)?;
        Ok(())
    }
}

fn check_probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ProbabilityOutOfRange { name, value })
    }
}
