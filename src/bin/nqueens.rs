//! Command-line front end for the N-Queens evolutionary algorithm.
//!
//! ```text
//! nqueens -n 8 --seed 42 --watch
//! RUST_LOG=u_nqueens=debug nqueens -n 20 --max-evaluations 200000
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::time::{Duration, Instant};
use tracing::warn;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use u_nqueens::ea::{EaConfig, EaRunner, GenerationSnapshot, Reporter, RunOutcome, TracingReporter};
use u_nqueens::render;

/// Solve the N-Queens problem with a steady-state evolutionary algorithm.
#[derive(Debug, Parser)]
#[command(name = "nqueens", version, about)]
struct Cli {
    /// Board size (number of queens).
    #[arg(short = 'n', long = "queens", default_value_t = 8)]
    n: usize,

    /// Individuals kept after each survival selection.
    #[arg(long, default_value_t = 100)]
    population_size: usize,

    /// Individuals drawn per parent tournament.
    #[arg(long, default_value_t = 5)]
    tournament_size: usize,

    /// Offspring per generation (positive, even).
    #[arg(long = "offspring", default_value_t = 2)]
    offspring_count: usize,

    /// Probability of cut-and-crossfill recombination.
    #[arg(long, default_value_t = 1.0)]
    p_recombination: f64,

    /// Probability of swap mutation per offspring.
    #[arg(long, default_value_t = 0.8)]
    p_mutation: f64,

    /// Fitness evaluations allowed before giving up.
    #[arg(long, default_value_t = 10_000)]
    max_evaluations: usize,

    /// Random seed; omitted means a fresh seed per run.
    #[arg(long)]
    seed: Option<u64>,

    /// Redraw the status block and board after every generation.
    #[arg(long)]
    watch: bool,

    /// Pause after each redraw in watch mode, in milliseconds.
    #[arg(long, default_value_t = 0, requires = "watch")]
    delay_ms: u64,

    /// Log generation progress at debug level.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> EaConfig {
        let config = EaConfig::new(self.n)
            .with_population_size(self.population_size)
            .with_tournament_size(self.tournament_size)
            .with_offspring_count(self.offspring_count)
            .with_recombination_probability(self.p_recombination)
            .with_mutation_probability(self.p_mutation)
            .with_max_evaluations(self.max_evaluations);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

/// Clears the terminal and prints the status block every generation.
///
/// Redrawing stops after the first write error; the run itself continues.
struct BoardReporter<W: Write> {
    out: W,
    max_evaluations: usize,
    delay: Duration,
    broken: bool,
}

impl<W: Write> BoardReporter<W> {
    fn new(out: W, max_evaluations: usize, delay: Duration) -> Self {
        Self {
            out,
            max_evaluations,
            delay,
            broken: false,
        }
    }

    fn redraw(&mut self, snapshot: &GenerationSnapshot<'_>) -> std::io::Result<()> {
        let status = render::status(snapshot, self.max_evaluations);
        write!(self.out, "\x1B[2J\x1B[H{status}")?;
        self.out.flush()
    }
}

impl<W: Write> Reporter for BoardReporter<W> {
    fn on_generation(&mut self, snapshot: &GenerationSnapshot<'_>) {
        if self.broken {
            return;
        }
        if let Err(error) = self.redraw(snapshot) {
            warn!(%error, generation = snapshot.generation, "stdout unavailable, watch output stopped");
            self.broken = true;
            return;
        }
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
    }
}

fn setup_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = cli.config();
    let runner = EaRunner::new(config.clone()).context("invalid configuration")?;
    let started = Instant::now();

    let result = if cli.watch {
        let mut reporter = BoardReporter::new(
            std::io::stdout(),
            config.max_evaluations,
            Duration::from_millis(cli.delay_ms),
        );
        runner.run(&mut reporter)
    } else {
        runner.run(&mut TracingReporter)
    };
    let elapsed = started.elapsed();

    println!(
        "Generation: {}\tEvals: {}/{}",
        result.generation(),
        result.evaluations,
        config.max_evaluations
    );
    match &result.outcome {
        RunOutcome::Solved { genotype, .. } => {
            println!("Solution found (fitness = 0):");
            print!("{}", render::board(genotype));
            println!("Permutation representation: {:?}", genotype.genes());
        }
        RunOutcome::Exhausted {
            best_genotype,
            best_fitness,
            ..
        } => {
            println!("Maximum number of fitness evaluations reached");
            println!("Best solution found (fitness = {best_fitness}):");
            print!("{}", render::board(best_genotype));
            println!("Permutation representation: {:?}", best_genotype.genes());
        }
    }
    println!("Total running time: {:.4} seconds", elapsed.as_secs_f64());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use u_nqueens::random::create_rng;

    /// Accepts a fixed number of writes, then fails every call.
    struct FlakyWriter {
        remaining: usize,
        attempts: usize,
    }

    impl Write for FlakyWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.attempts += 1;
            if self.remaining == 0 {
                return Err(std::io::ErrorKind::BrokenPipe.into());
            }
            self.remaining -= 1;
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_board_reporter_draws_status() {
        let runner = EaRunner::with_rng(EaConfig::new(6), create_rng(1)).unwrap();
        let mut reporter = BoardReporter::new(Vec::new(), 10_000, Duration::ZERO);
        reporter.on_generation(&runner.snapshot());

        let text = String::from_utf8(reporter.out).unwrap();
        assert!(text.starts_with("\x1B[2J\x1B[H"));
        assert!(text.ends_with(&render::status(&runner.snapshot(), 10_000)));
    }

    #[test]
    fn test_board_reporter_stops_after_write_error() {
        let runner = EaRunner::with_rng(EaConfig::new(6), create_rng(1)).unwrap();
        let writer = FlakyWriter {
            remaining: 0,
            attempts: 0,
        };
        let mut reporter = BoardReporter::new(writer, 10_000, Duration::ZERO);

        reporter.on_generation(&runner.snapshot());
        assert!(reporter.broken);
        let attempts = reporter.out.attempts;

        for _ in 0..5 {
            reporter.on_generation(&runner.snapshot());
        }
        assert_eq!(reporter.out.attempts, attempts, "no writes after the first failure");
    }
}
