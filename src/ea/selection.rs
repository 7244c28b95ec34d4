//! Parent and survival selection.
//!
//! Both strategies minimize: lower conflict count is better.
//!
//! - [`tournament_pair`]: sample `k` distinct individuals, return the best two
//! - [`replace_worst`]: merge population and offspring, keep the best `size`
//!
//! Ties are always broken by position (sample order, or merge order), which
//! keeps both strategies deterministic for a given random draw.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Eiben & Smith (2003), *Introduction to Evolutionary Computing*, §2.4.8

use super::types::Individual;
use rand::seq::index;
use rand::Rng;

/// Tournament selection of two parents.
///
/// Draws `k` indices uniformly without replacement, ranks the sampled
/// individuals by fitness (stable, so draw order breaks ties) and returns the
/// population indices of the best and second best.
///
/// # Complexity
/// O(k log k) per call
///
/// # Panics
/// Panics if `k < 2` or `k > population.len()`.
pub fn tournament_pair<R: Rng>(
    population: &[Individual],
    k: usize,
    rng: &mut R,
) -> (usize, usize) {
    assert!(k >= 2, "tournament must hold at least two contestants");
    assert!(
        k <= population.len(),
        "tournament size {k} exceeds population size {}",
        population.len()
    );

    let mut contestants: Vec<usize> = index::sample(rng, population.len(), k).into_vec();
    contestants.sort_by_key(|&idx| population[idx].fitness());
    (contestants[0], contestants[1])
}

/// Replace-worst survival selection.
///
/// Appends `offspring` to `population`, sorts stably by fitness (so current
/// members precede offspring at equal fitness) and truncates to `size`.
/// The best individual of the merged set always survives.
pub fn replace_worst(population: &mut Vec<Individual>, offspring: Vec<Individual>, size: usize) {
    population.extend(offspring);
    population.sort_by_key(Individual::fitness);
    population.truncate(size);
}
