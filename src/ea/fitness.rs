//! Conflict-count fitness and evaluation accounting.
//!
//! Fitness is the number of unordered queen pairs sharing a diagonal.
//! Lower is better and `0` is a solution. Every evaluation is charged to an
//! [`EvaluationBudget`] owned by the caller, so the count of fitness calls
//! is explicit state rather than a hidden global.

use super::types::Genotype;

/// Counts pairs `(i, j)`, `i < j`, with `|i - j| == |x[i] - x[j]|`.
///
/// Pure: no budget is charged. Use [`Evaluator::evaluate`] inside the engine.
///
/// # Complexity
/// O(n²)
///
/// ```
/// use u_nqueens::ea::conflicts;
///
/// assert_eq!(conflicts(&[2, 4, 1, 3]), 0);
/// assert_eq!(conflicts(&[1, 2, 3, 4]), 6);
/// ```
pub fn conflicts(genes: &[usize]) -> usize {
    let n = genes.len();
    let mut count = 0;
    for i in 0..n {
        for j in (i + 1)..n {
            if j - i == genes[i].abs_diff(genes[j]) {
                count += 1;
            }
        }
    }
    count
}

/// Monotone counter of fitness evaluations.
///
/// Only ever incremented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvaluationBudget {
    count: usize,
}

impl EvaluationBudget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluations performed so far.
    pub fn count(&self) -> usize {
        self.count
    }

    /// True once `count() >= max`.
    pub fn is_exhausted(&self, max: usize) -> bool {
        self.count >= max
    }

    fn charge(&mut self) {
        self.count += 1;
    }
}

/// Stateless N-Queens evaluator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator;

impl Evaluator {
    /// Scores `genotype`, charging exactly one evaluation to `budget`.
    pub fn evaluate(&self, genotype: &Genotype, budget: &mut EvaluationBudget) -> usize {
        budget.charge();
        conflicts(genotype.genes())
    }
}
