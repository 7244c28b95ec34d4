//! Generational loop.
//!
//! [`EaRunner`] owns the configuration, population, random source and
//! evaluation budget for the duration of one run, and drives the steady-state
//! loop: tournament → crossover → mutation → evaluation → replace-worst.
//!
//! Termination is checked before every generation: the run is
//! [`Solved`](RunState::Solved) as soon as any individual has zero conflicts,
//! and [`Exhausted`](RunState::Exhausted) once the budget is spent.

use super::config::EaConfig;
use super::fitness::{EvaluationBudget, Evaluator};
use super::operators::{crossover, swap_mutation};
use super::population::{Population, PopulationStats};
use super::types::{Genotype, Individual};
use crate::error::ConfigError;
use crate::random::create_rng;
use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, info, trace};

/// Lifecycle of a run. `Solved` and `Exhausted` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Solved,
    Exhausted,
}

/// Read-only view of the engine after a completed generation.
#[derive(Debug, Clone, Copy)]
pub struct GenerationSnapshot<'a> {
    /// Generations completed so far.
    pub generation: usize,
    /// Fitness evaluations performed so far, initialization included.
    pub evaluations: usize,
    /// Current best individual (earliest on ties).
    pub best: &'a Individual,
    pub best_fitness: usize,
    pub mean_fitness: f64,
    pub variance_fitness: f64,
}

/// Receives one snapshot per completed generation.
///
/// Runs inline with the loop, so implementations should return promptly.
/// Closures taking `&GenerationSnapshot` implement this trait.
pub trait Reporter {
    fn on_generation(&mut self, snapshot: &GenerationSnapshot<'_>);
}

impl<F> Reporter for F
where
    F: FnMut(&GenerationSnapshot<'_>),
{
    fn on_generation(&mut self, snapshot: &GenerationSnapshot<'_>) {
        self(snapshot)
    }
}

/// Discards every snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl Reporter for NoopReporter {
    fn on_generation(&mut self, _snapshot: &GenerationSnapshot<'_>) {}
}

/// Logs every snapshot as a `debug` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn on_generation(&mut self, s: &GenerationSnapshot<'_>) {
        debug!(
            generation = s.generation,
            evaluations = s.evaluations,
            best_fitness = s.best_fitness,
            mean_fitness = s.mean_fitness,
            variance_fitness = s.variance_fitness,
            best = ?s.best.genotype().genes(),
            "generation complete"
        );
    }
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunOutcome {
    /// A zero-conflict placement was found.
    Solved { genotype: Genotype, generation: usize },

    /// The evaluation budget ran out first.
    Exhausted {
        best_genotype: Genotype,
        best_fitness: usize,
        generation: usize,
    },
}

/// Result of a complete run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunResult {
    pub outcome: RunOutcome,

    /// Total fitness evaluations, initialization included.
    pub evaluations: usize,

    /// Best fitness after initialization and after every generation.
    pub best_fitness_history: Vec<usize>,
}

impl RunResult {
    pub fn is_solved(&self) -> bool {
        matches!(self.outcome, RunOutcome::Solved { .. })
    }

    /// Generations completed when the run stopped.
    pub fn generation(&self) -> usize {
        match self.outcome {
            RunOutcome::Solved { generation, .. } | RunOutcome::Exhausted { generation, .. } => {
                generation
            }
        }
    }

    /// The solution, or the best placement found.
    pub fn best_genotype(&self) -> &Genotype {
        match &self.outcome {
            RunOutcome::Solved { genotype, .. } => genotype,
            RunOutcome::Exhausted { best_genotype, .. } => best_genotype,
        }
    }

    pub fn best_fitness(&self) -> usize {
        match self.outcome {
            RunOutcome::Solved { .. } => 0,
            RunOutcome::Exhausted { best_fitness, .. } => best_fitness,
        }
    }
}

/// Runs a configuration to completion without reporting.
///
/// ```
/// use u_nqueens::ea::{solve, EaConfig};
///
/// let result = solve(&EaConfig::new(6).with_seed(42)).unwrap();
/// assert!(result.evaluations <= 10_000);
/// ```
pub fn solve(config: &EaConfig) -> Result<RunResult, ConfigError> {
    solve_with_reporter(config, &mut NoopReporter)
}

/// Runs a configuration to completion, reporting every generation.
pub fn solve_with_reporter<Rep: Reporter + ?Sized>(
    config: &EaConfig,
    reporter: &mut Rep,
) -> Result<RunResult, ConfigError> {
    Ok(EaRunner::new(config.clone())?.run(reporter))
}

/// The evolutionary engine for one run.
///
/// Construction validates the configuration and evaluates the initial
/// population; [`run`](Self::run) or repeated [`step`](Self::step) calls
/// then evolve it.
///
/// # Usage
///
/// ```
/// use u_nqueens::ea::{EaConfig, EaRunner, GenerationSnapshot};
///
/// let config = EaConfig::new(8).with_seed(7);
/// let mut generations = 0;
/// let result = EaRunner::new(config)
///     .unwrap()
///     .run(&mut |_: &GenerationSnapshot<'_>| generations += 1);
/// assert_eq!(result.generation(), generations);
/// ```
#[derive(Debug)]
pub struct EaRunner<R: Rng = StdRng> {
    config: EaConfig,
    rng: R,
    evaluator: Evaluator,
    budget: EvaluationBudget,
    population: Population,
    generation: usize,
    best_fitness_history: Vec<usize>,
}

impl EaRunner<StdRng> {
    /// Creates a runner seeded from `config.seed` (or a random seed).
    pub fn new(config: EaConfig) -> Result<Self, ConfigError> {
        let rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> EaRunner<R> {
    /// Creates a runner drawing all randomness from `rng`.
    ///
    /// `config.seed` is ignored.
    pub fn with_rng(config: EaConfig, rng: R) -> Result<Self, ConfigError> {
        Self::with_initial_genotypes(config, rng, Vec::new())
    }

    /// Creates a runner whose initial population starts with `genotypes`.
    ///
    /// Each seed must be a permutation of `1..=n`; the remaining slots are
    /// filled with random permutations. Seeds are evaluated and charged to the
    /// budget like any other initial individual.
    pub fn with_initial_genotypes(
        config: EaConfig,
        mut rng: R,
        genotypes: Vec<Vec<usize>>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        if genotypes.len() > config.population_size {
            return Err(ConfigError::TooManySeedGenotypes {
                given: genotypes.len(),
                population_size: config.population_size,
            });
        }
        let seeds = genotypes
            .into_iter()
            .enumerate()
            .map(|(index, genes)| {
                if genes.len() != config.n {
                    return Err(ConfigError::InvalidSeedGenotype { index, n: config.n });
                }
                Genotype::from_genes(genes)
                    .ok_or(ConfigError::InvalidSeedGenotype { index, n: config.n })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let evaluator = Evaluator;
        let mut budget = EvaluationBudget::new();
        let population = Population::seeded(
            config.n,
            config.population_size,
            seeds,
            &mut rng,
            &evaluator,
            &mut budget,
        );

        let initial_best = population.best().fitness();
        debug!(
            n = config.n,
            population_size = config.population_size,
            evaluations = budget.count(),
            best_fitness = initial_best,
            "population initialized"
        );

        Ok(Self {
            config,
            rng,
            evaluator,
            budget,
            population,
            generation: 0,
            best_fitness_history: vec![initial_best],
        })
    }

    pub fn config(&self) -> &EaConfig {
        &self.config
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Generations completed so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Fitness evaluations performed so far.
    pub fn evaluations(&self) -> usize {
        self.budget.count()
    }

    /// Current state; a solution takes precedence over an exhausted budget.
    pub fn state(&self) -> RunState {
        if self.population.has_solution() {
            RunState::Solved
        } else if self.budget.is_exhausted(self.config.max_evaluations) {
            RunState::Exhausted
        } else {
            RunState::Running
        }
    }

    /// Statistics-bearing view of the current population.
    pub fn snapshot(&self) -> GenerationSnapshot<'_> {
        let PopulationStats {
            best_fitness,
            mean_fitness,
            variance_fitness,
        } = self.population.stats();
        GenerationSnapshot {
            generation: self.generation,
            evaluations: self.budget.count(),
            best: self.population.best(),
            best_fitness,
            mean_fitness,
            variance_fitness,
        }
    }

    /// Runs one generation regardless of state.
    ///
    /// Produces `offspring_count` children in pairs (fresh tournament per
    /// pair), evaluates each once after mutation, then applies replace-worst.
    pub fn step(&mut self) {
        let cfg = &self.config;
        let mut offspring = Vec::with_capacity(cfg.offspring_count);

        for _ in 0..cfg.offspring_count / 2 {
            let (p1, p2) = self.population.select_parents(cfg.tournament_size, &mut self.rng);
            let (mut a, mut b) =
                crossover(p1.genotype(), p2.genotype(), cfg.p_recombination, &mut self.rng);
            swap_mutation(&mut a, cfg.p_mutation, &mut self.rng);
            swap_mutation(&mut b, cfg.p_mutation, &mut self.rng);
            offspring.push(Individual::evaluate(a, &self.evaluator, &mut self.budget));
            offspring.push(Individual::evaluate(b, &self.evaluator, &mut self.budget));
        }

        self.population.replace_worst(offspring);
        self.generation += 1;
        self.best_fitness_history.push(self.population.best().fitness());

        trace!(
            generation = self.generation,
            evaluations = self.budget.count(),
            best_fitness = self.population.best().fitness(),
            "step"
        );
    }

    /// Evolves until solved or exhausted, then returns the outcome.
    pub fn run<Rep: Reporter + ?Sized>(mut self, reporter: &mut Rep) -> RunResult {
        while self.state() == RunState::Running {
            self.step();
            reporter.on_generation(&self.snapshot());
        }
        self.into_result()
    }

    /// Packages the current population as a result.
    ///
    /// A run still in progress is reported as exhausted with its current best.
    pub fn into_result(self) -> RunResult {
        let outcome = match self.population.solution() {
            Some(solution) => RunOutcome::Solved {
                genotype: solution.genotype().clone(),
                generation: self.generation,
            },
            None => {
                let best = self.population.best();
                RunOutcome::Exhausted {
                    best_genotype: best.genotype().clone(),
                    best_fitness: best.fitness(),
                    generation: self.generation,
                }
            }
        };

        info!(
            solved = matches!(outcome, RunOutcome::Solved { .. }),
            generation = self.generation,
            evaluations = self.budget.count(),
            max_evaluations = self.config.max_evaluations,
            "run finished"
        );

        RunResult {
            outcome,
            evaluations: self.budget.count(),
            best_fitness_history: self.best_fitness_history,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
