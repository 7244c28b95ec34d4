//! Genotype and individual representation.
//!
//! A [`Genotype`] is a permutation of `1..=n`: position `i` is the board
//! column, the value at `i` is the (1-based) row of the queen in that column.
//! Row and column clashes are impossible by construction, so only diagonal
//! conflicts remain to be minimized.

use super::fitness::{EvaluationBudget, Evaluator};
use rand::Rng;
use thiserror::Error;

/// Permutation encoding of one queen placement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<usize>", into = "Vec<usize>"))]
pub struct Genotype(Vec<usize>);

impl Genotype {
    /// The identity placement `[1, 2, ..., n]` (every queen on the main diagonal).
    pub fn identity(n: usize) -> Self {
        Self((1..=n).collect())
    }

    /// A uniformly random permutation of `1..=n`.
    pub fn random<R: Rng>(n: usize, rng: &mut R) -> Self {
        let mut genes: Vec<usize> = (1..=n).collect();
        crate::random::shuffle(&mut genes, rng);
        Self(genes)
    }

    /// Wraps raw genes, returning `None` unless they form a permutation of `1..=len`.
    pub fn from_genes(genes: Vec<usize>) -> Option<Self> {
        is_permutation(&genes).then_some(Self(genes))
    }

    /// Wraps raw genes without validation.
    ///
    /// Callers guarantee the permutation property; operators use this
    /// after building children from valid parents.
    pub(crate) fn from_genes_unchecked(genes: Vec<usize>) -> Self {
        debug_assert!(is_permutation(&genes), "not a permutation: {genes:?}");
        Self(genes)
    }

    /// Board size.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for the degenerate zero-column board.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Queen rows by column.
    pub fn genes(&self) -> &[usize] {
        &self.0
    }

    pub(crate) fn genes_mut(&mut self) -> &mut [usize] {
        &mut self.0
    }

    /// Consumes the genotype, returning the underlying rows.
    pub fn into_genes(self) -> Vec<usize> {
        self.0
    }
}

impl AsRef<[usize]> for Genotype {
    fn as_ref(&self) -> &[usize] {
        &self.0
    }
}

impl TryFrom<Vec<usize>> for Genotype {
    type Error = NotAPermutation;

    fn try_from(genes: Vec<usize>) -> Result<Self, Self::Error> {
        Self::from_genes(genes).ok_or(NotAPermutation)
    }
}

impl From<Genotype> for Vec<usize> {
    fn from(genotype: Genotype) -> Self {
        genotype.into_genes()
    }
}

/// Rejected conversion: the genes are not a permutation of `1..=len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("genes are not a permutation of 1..=n")]
pub struct NotAPermutation;

/// Checks that `genes` holds each of `1..=genes.len()` exactly once.
pub fn is_permutation(genes: &[usize]) -> bool {
    let n = genes.len();
    let mut seen = vec![false; n + 1];
    for &g in genes {
        if g == 0 || g > n || seen[g] {
            return false;
        }
        seen[g] = true;
    }
    true
}

/// A genotype together with its cached conflict count.
///
/// The only way to obtain an `Individual` is through evaluation, and the
/// genotype cannot be changed afterwards, so the cached fitness is never stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Individual {
    genotype: Genotype,
    fitness: usize,
}

impl Individual {
    /// Evaluates `genotype` and wraps it, charging one evaluation to `budget`.
    pub fn evaluate(
        genotype: Genotype,
        evaluator: &Evaluator,
        budget: &mut EvaluationBudget,
    ) -> Self {
        let fitness = evaluator.evaluate(&genotype, budget);
        Self { genotype, fitness }
    }

    /// Number of diagonal conflicts. Zero means the placement is a solution.
    pub fn fitness(&self) -> usize {
        self.fitness
    }

    pub fn genotype(&self) -> &Genotype {
        &self.genotype
    }

    /// True when no two queens attack each other.
    pub fn is_solution(&self) -> bool {
        self.fitness == 0
    }

    pub fn into_genotype(self) -> Genotype {
        self.genotype
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_identity() {
        assert_eq!(Genotype::identity(4).genes(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_random_is_permutation() {
        let mut rng = create_rng(42);
        for n in 1..=20 {
            let g = Genotype::random(n, &mut rng);
            assert_eq!(g.len(), n);
            assert!(is_permutation(g.genes()), "not a permutation: {g:?}");
        }
    }

    #[test]
    fn test_from_genes_rejects_invalid() {
        assert!(Genotype::from_genes(vec![2, 4, 1, 3]).is_some());
        assert!(Genotype::from_genes(vec![1, 1, 2]).is_none());
        assert!(Genotype::from_genes(vec![0, 1, 2]).is_none());
        assert!(Genotype::from_genes(vec![1, 2, 4]).is_none());
        assert!(Genotype::from_genes(vec![]).is_some());
    }

    #[test]
    fn test_individual_caches_fitness() {
        let evaluator = Evaluator;
        let mut budget = EvaluationBudget::new();
        let solved = Individual::evaluate(Genotype::identity(1), &evaluator, &mut budget);
        assert!(solved.is_solution());

        let diag = Individual::evaluate(Genotype::identity(4), &evaluator, &mut budget);
        assert_eq!(diag.fitness(), 6);
        assert!(!diag.is_solution());
        assert_eq!(budget.count(), 2);

        assert_eq!(diag.into_genotype(), Genotype::identity(4));
    }

    #[test]
    fn test_vec_conversions() {
        let g = Genotype::try_from(vec![3, 1, 4, 2]).unwrap();
        assert_eq!(g.as_ref(), &[3, 1, 4, 2]);
        assert_eq!(Vec::from(g.clone()), vec![3, 1, 4, 2]);
        assert_eq!(g.into_genes(), vec![3, 1, 4, 2]);

        assert_eq!(Genotype::try_from(vec![0, 9, 9]), Err(NotAPermutation));
        assert_eq!(Genotype::try_from(vec![2, 2]), Err(NotAPermutation));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_rejects_non_permutation() {
        let g: Genotype = serde_json::from_str("[2, 4, 1, 3]").unwrap();
        assert_eq!(g.genes(), &[2, 4, 1, 3]);
        assert_eq!(serde_json::to_string(&g).unwrap(), "[2,4,1,3]");

        assert!(serde_json::from_str::<Genotype>("[0, 9, 9]").is_err());
        assert!(serde_json::from_str::<Genotype>("[1, 1]").is_err());
    }
}
