//! Fixed-size population of evaluated individuals.

use super::fitness::{EvaluationBudget, Evaluator};
use super::selection;
use super::types::{Genotype, Individual};
use rand::Rng;

/// Summary statistics over the population's fitness values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopulationStats {
    pub best_fitness: usize,
    pub mean_fitness: f64,
    /// Population variance, `E[f²] - E[f]²`.
    pub variance_fitness: f64,
}

/// An ordered collection of exactly `size` individuals.
///
/// Duplicate genotypes are allowed. The size never changes after
/// construction: survival selection trims the merged set back to it.
#[derive(Debug, Clone)]
pub struct Population {
    individuals: Vec<Individual>,
    size: usize,
}

impl Population {
    /// Creates `size` uniformly random permutations of `1..=n`, charging one
    /// evaluation per individual.
    pub fn random<R: Rng>(
        n: usize,
        size: usize,
        rng: &mut R,
        evaluator: &Evaluator,
        budget: &mut EvaluationBudget,
    ) -> Self {
        Self::seeded(n, size, Vec::new(), rng, evaluator, budget)
    }

    /// Places `seeds` first and fills the rest with random permutations.
    ///
    /// Seeds must already be valid permutations of `1..=n` and number at most
    /// `size`; the engine checks both before calling this.
    pub fn seeded<R: Rng>(
        n: usize,
        size: usize,
        seeds: Vec<Genotype>,
        rng: &mut R,
        evaluator: &Evaluator,
        budget: &mut EvaluationBudget,
    ) -> Self {
        debug_assert!(seeds.len() <= size);
        let fill = size.saturating_sub(seeds.len());
        let individuals = seeds
            .into_iter()
            .chain((0..fill).map(|_| Genotype::random(n, rng)))
            .map(|g| Individual::evaluate(g, evaluator, budget))
            .collect();
        Self { individuals, size }
    }

    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// The lowest-fitness individual; the earliest one on ties.
    ///
    /// # Panics
    /// Panics if the population is empty.
    pub fn best(&self) -> &Individual {
        self.individuals
            .iter()
            .min_by_key(|ind| ind.fitness())
            .expect("population must not be empty")
    }

    /// The first zero-conflict individual, if any.
    pub fn solution(&self) -> Option<&Individual> {
        self.individuals.iter().find(|ind| ind.is_solution())
    }

    pub fn has_solution(&self) -> bool {
        self.solution().is_some()
    }

    /// Mean and variance of the cached fitness values.
    ///
    /// Reads cached values only; no evaluations are performed.
    pub fn stats(&self) -> PopulationStats {
        let count = self.individuals.len().max(1) as f64;
        let (sum, sum_sq) = self.individuals.iter().fold((0.0, 0.0), |(s, sq), ind| {
            let f = ind.fitness() as f64;
            (s + f, sq + f * f)
        });
        let mean = sum / count;
        PopulationStats {
            best_fitness: self.best().fitness(),
            mean_fitness: mean,
            variance_fitness: (sum_sq / count - mean * mean).max(0.0),
        }
    }

    /// Picks two parents by tournament of size `k`.
    pub fn select_parents<R: Rng>(&self, k: usize, rng: &mut R) -> (&Individual, &Individual) {
        let (a, b) = selection::tournament_pair(&self.individuals, k, rng);
        (&self.individuals[a], &self.individuals[b])
    }

    /// Merges `offspring` in and keeps the best `size` individuals.
    pub fn replace_worst(&mut self, offspring: Vec<Individual>) {
        selection::replace_worst(&mut self.individuals, offspring, self.size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ea::types::is_permutation;
    use crate::random::create_rng;

    fn genotype(genes: &[usize]) -> Genotype {
        Genotype::from_genes(genes.to_vec()).expect("valid permutation")
    }

    #[test]
    fn test_random_population() {
        let mut rng = create_rng(42);
        let mut budget = EvaluationBudget::new();
        let pop = Population::random(8, 50, &mut rng, &Evaluator, &mut budget);

        assert_eq!(pop.len(), 50);
        assert_eq!(budget.count(), 50);
        for ind in pop.individuals() {
            assert_eq!(ind.genotype().len(), 8);
            assert!(is_permutation(ind.genotype().genes()));
        }
    }

    #[test]
    fn test_seeded_population_keeps_seeds_first() {
        let mut rng = create_rng(42);
        let mut budget = EvaluationBudget::new();
        let seeds = vec![genotype(&[2, 4, 1, 3]), genotype(&[1, 2, 3, 4])];
        let pop = Population::seeded(4, 10, seeds, &mut rng, &Evaluator, &mut budget);

        assert_eq!(pop.len(), 10);
        assert_eq!(budget.count(), 10);
        assert_eq!(pop.individuals()[0].genotype().genes(), &[2, 4, 1, 3]);
        assert_eq!(pop.individuals()[1].genotype().genes(), &[1, 2, 3, 4]);
        assert!(pop.has_solution());
        assert_eq!(pop.solution().map(Individual::fitness), Some(0));
    }

    #[test]
    fn test_best_prefers_earliest() {
        let mut rng = create_rng(42);
        let mut budget = EvaluationBudget::new();
        let seeds = vec![genotype(&[1, 2, 3, 4]), genotype(&[1, 3, 2, 4]), genotype(&[4, 2, 3, 1])];
        let pop = Population::seeded(4, 3, seeds, &mut rng, &Evaluator, &mut budget);
        // [1,3,2,4] and [4,2,3,1] both have two conflicts.
        assert_eq!(pop.best().genotype().genes(), &[1, 3, 2, 4]);
        assert!(!pop.has_solution());
    }

    #[test]
    fn test_stats() {
        let mut rng = create_rng(42);
        let mut budget = EvaluationBudget::new();
        // Fitness 6, 0, 2, 0.
        let seeds = vec![
            genotype(&[1, 2, 3, 4]),
            genotype(&[2, 4, 1, 3]),
            genotype(&[1, 3, 2, 4]),
            genotype(&[3, 1, 4, 2]),
        ];
        let pop = Population::seeded(4, 4, seeds, &mut rng, &Evaluator, &mut budget);
        let stats = pop.stats();
        let evaluations = budget.count();

        assert_eq!(stats.best_fitness, 0);
        assert!((stats.mean_fitness - 2.0).abs() < 1e-12);
        // E[f²] = (36 + 0 + 4 + 0) / 4 = 10, variance = 10 - 4 = 6
        assert!((stats.variance_fitness - 6.0).abs() < 1e-12);
        assert_eq!(budget.count(), evaluations, "stats must not evaluate");
    }

    #[test]
    fn test_replace_worst_preserves_size() {
        let mut rng = create_rng(42);
        let mut budget = EvaluationBudget::new();
        let mut pop = Population::random(6, 20, &mut rng, &Evaluator, &mut budget);
        let best_before = pop.best().fitness();

        for _ in 0..50 {
            let offspring = (0..2)
                .map(|_| Individual::evaluate(Genotype::random(6, &mut rng), &Evaluator, &mut budget))
                .collect();
            pop.replace_worst(offspring);
            assert_eq!(pop.len(), 20);
            assert!(pop.best().fitness() <= best_before);
        }
    }

    #[test]
    fn test_select_parents_ordered_by_fitness() {
        let mut rng = create_rng(42);
        let mut budget = EvaluationBudget::new();
        let pop = Population::random(8, 30, &mut rng, &Evaluator, &mut budget);
        for _ in 0..100 {
            let (p1, p2) = pop.select_parents(5, &mut rng);
            assert!(p1.fitness() <= p2.fitness());
        }
    }
}
