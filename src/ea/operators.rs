//! Permutation variation operators.
//!
//! # Crossover
//!
//! - [`cut_and_crossfill`]: prefix of one parent, remainder filled from the
//!   other parent in its own order, skipping values already used
//! - [`crossover`]: applies cut-and-crossfill with a given probability
//!
//! # Mutation
//!
//! - [`swap_mutation`]: exchange two distinct random positions with a given
//!   probability
//!
//! Both operators map permutations of `1..=n` to permutations of `1..=n`.
//!
//! # References
//!
//! - Eiben & Smith (2003), *Introduction to Evolutionary Computing*, §4.5.4, §6.4

use super::types::Genotype;
use rand::Rng;

// ============================================================================
// Crossover
// ============================================================================

/// Cut-and-crossfill crossover at a fixed cut point.
///
/// Child A takes `parent1[..cut]`, then walks `parent2` from the start and
/// appends every value not yet present. Child B swaps the parents' roles.
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Panics
/// Panics if the parents differ in length or `cut > n`.
///
/// ```
/// use u_nqueens::ea::cut_and_crossfill;
///
/// let (a, b) = cut_and_crossfill(&[1, 2, 3, 4, 5], &[5, 4, 3, 2, 1], 2);
/// assert_eq!(a, vec![1, 2, 5, 4, 3]);
/// assert_eq!(b, vec![5, 4, 1, 2, 3]);
/// ```
pub fn cut_and_crossfill(
    parent1: &[usize],
    parent2: &[usize],
    cut: usize,
) -> (Vec<usize>, Vec<usize>) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert!(cut <= n, "cut point {cut} beyond length {n}");

    (
        crossfill_child(parent1, parent2, cut),
        crossfill_child(parent2, parent1, cut),
    )
}

/// Build one child: prefix from `head`, fill from `tail`.
fn crossfill_child(head: &[usize], tail: &[usize], cut: usize) -> Vec<usize> {
    let n = head.len();
    let mut child = Vec::with_capacity(n);
    let mut used = vec![false; n + 1];

    for &v in &head[..cut] {
        child.push(v);
        used[v] = true;
    }

    for &v in tail {
        if child.len() == n {
            break;
        }
        if !used[v] {
            child.push(v);
            used[v] = true;
        }
    }

    child
}

/// Recombines two parents with probability `p_recombination`.
///
/// When recombination fires, the cut point is uniform in `[1, n-1]`.
/// Otherwise (or when `n < 2`, which admits no cut) the children are fresh
/// copies of the parents.
pub fn crossover<R: Rng>(
    parent1: &Genotype,
    parent2: &Genotype,
    p_recombination: f64,
    rng: &mut R,
) -> (Genotype, Genotype) {
    let n = parent1.len();
    if rng.random_range(0.0..1.0) >= p_recombination || n < 2 {
        return (parent1.clone(), parent2.clone());
    }

    let cut = rng.random_range(1..n);
    let (a, b) = cut_and_crossfill(parent1.genes(), parent2.genes(), cut);
    (Genotype::from_genes_unchecked(a), Genotype::from_genes_unchecked(b))
}

// ============================================================================
// Mutation
// ============================================================================

/// Swaps two distinct random positions with probability `p_mutation`.
///
/// Returns `true` if a swap happened. Boards with fewer than two columns are
/// left untouched.
///
/// # Complexity
/// O(1)
pub fn swap_mutation<R: Rng>(genotype: &mut Genotype, p_mutation: f64, rng: &mut R) -> bool {
    if rng.random_range(0.0..1.0) >= p_mutation {
        return false;
    }
    let genes = genotype.genes_mut();
    let n = genes.len();
    if n < 2 {
        return false;
    }
    let s = rng.random_range(0..n);
    let mut t = rng.random_range(0..n - 1);
    if t >= s {
        t += 1;
    }
    genes.swap(s, t);
    true
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ea::types::is_permutation;
    use crate::random::create_rng;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn perm_strategy() -> impl Strategy<Value = (Vec<usize>, Vec<usize>)> {
        (2usize..16).prop_flat_map(|n| {
            let base: Vec<usize> = (1..=n).collect();
            (Just(base.clone()).prop_shuffle(), Just(base).prop_shuffle())
        })
    }

    // ---- Cut-and-crossfill ----

    #[test]
    fn test_crossfill_example() {
        let p1 = [1, 2, 3, 4, 5, 6, 7, 8];
        let p2 = [8, 6, 4, 2, 7, 5, 3, 1];
        let (a, b) = cut_and_crossfill(&p1, &p2, 3);
        assert_eq!(a, vec![1, 2, 3, 8, 6, 4, 7, 5]);
        assert_eq!(b, vec![8, 6, 4, 1, 2, 3, 5, 7]);
    }

    #[test]
    fn test_crossfill_identical_parents() {
        let p = [3, 1, 4, 2];
        for cut in 0..=4 {
            let (a, b) = cut_and_crossfill(&p, &p, cut);
            assert_eq!(a, p.to_vec());
            assert_eq!(b, p.to_vec());
        }
    }

    #[test]
    fn test_crossfill_extreme_cuts() {
        let p1 = [1, 2, 3, 4];
        let p2 = [4, 3, 2, 1];
        assert_eq!(cut_and_crossfill(&p1, &p2, 0), (p2.to_vec(), p1.to_vec()));
        assert_eq!(cut_and_crossfill(&p1, &p2, 4), (p1.to_vec(), p2.to_vec()));
    }

    #[test]
    #[should_panic(expected = "parents must have equal length")]
    fn test_crossfill_length_mismatch_panics() {
        cut_and_crossfill(&[1, 2, 3], &[1, 2], 1);
    }

    #[test]
    fn test_crossover_probability_zero_copies() {
        let mut rng = create_rng(42);
        let p1 = Genotype::from_genes(vec![1, 2, 3, 4, 5]).unwrap();
        let p2 = Genotype::from_genes(vec![5, 4, 3, 2, 1]).unwrap();
        for _ in 0..50 {
            let (a, b) = crossover(&p1, &p2, 0.0, &mut rng);
            assert_eq!(a, p1);
            assert_eq!(b, p2);
        }
    }

    #[test]
    fn test_crossover_prefix_from_first_parent() {
        let mut rng = create_rng(7);
        let p1 = Genotype::from_genes(vec![1, 2, 3, 4, 5, 6]).unwrap();
        let p2 = Genotype::from_genes(vec![6, 5, 4, 3, 2, 1]).unwrap();
        for _ in 0..100 {
            let (a, b) = crossover(&p1, &p2, 1.0, &mut rng);
            assert_eq!(a.genes()[0], 1, "child A must start with parent 1's head");
            assert_eq!(b.genes()[0], 6, "child B must start with parent 2's head");
            assert!(is_permutation(a.genes()));
            assert!(is_permutation(b.genes()));
        }
    }

    #[test]
    fn test_crossover_cut_is_interior() {
        let mut rng = create_rng(11);
        let p1 = Genotype::identity(6);
        let p2 = Genotype::from_genes(vec![6, 5, 4, 3, 2, 1]).unwrap();
        let expected: HashSet<Vec<usize>> =
            (1..6).map(|cut| cut_and_crossfill(p1.genes(), p2.genes(), cut).0).collect();

        let mut seen = HashSet::new();
        for _ in 0..500 {
            let (a, b) = crossover(&p1, &p2, 1.0, &mut rng);
            assert_ne!(a, p2, "cut 0 would hand child A the second parent");
            assert_ne!(b, p1, "cut 0 would hand child B the first parent");
            seen.insert(a.into_genes());
        }
        // Every cut in 1..n is drawn and nothing outside it.
        assert_eq!(seen, expected);
        assert!(seen.iter().filter(|&a| a.as_slice() != p1.genes()).count() >= 4);
    }

    #[test]
    fn test_crossover_single_column() {
        let mut rng = create_rng(42);
        let p = Genotype::identity(1);
        let (a, b) = crossover(&p, &p, 1.0, &mut rng);
        assert_eq!(a, p);
        assert_eq!(b, p);
    }

    // ---- Swap mutation ----

    #[test]
    fn test_swap_always_changes_when_fired() {
        let mut rng = create_rng(42);
        for _ in 0..200 {
            let mut g = Genotype::identity(6);
            assert!(swap_mutation(&mut g, 1.0, &mut rng));
            let moved = g.genes().iter().enumerate().filter(|&(i, &v)| v != i + 1).count();
            assert_eq!(moved, 2, "exactly two genes must move: {g:?}");
        }
    }

    #[test]
    fn test_swap_probability_zero_is_noop() {
        let mut rng = create_rng(42);
        let mut g = Genotype::identity(6);
        for _ in 0..50 {
            assert!(!swap_mutation(&mut g, 0.0, &mut rng));
        }
        assert_eq!(g, Genotype::identity(6));
    }

    #[test]
    fn test_swap_single_column() {
        let mut rng = create_rng(42);
        let mut g = Genotype::identity(1);
        assert!(!swap_mutation(&mut g, 1.0, &mut rng));
        assert_eq!(g.genes(), &[1]);
    }

    #[test]
    fn test_swap_two_columns_always_flips() {
        let mut rng = create_rng(3);
        let mut g = Genotype::identity(2);
        swap_mutation(&mut g, 1.0, &mut rng);
        assert_eq!(g.genes(), &[2, 1]);
    }

    proptest! {
        #[test]
        fn prop_crossfill_yields_permutations((p1, p2) in perm_strategy(), cut_frac in 0.0f64..1.0) {
            let n = p1.len();
            let cut = 1 + ((n - 1) as f64 * cut_frac) as usize;
            let cut = cut.min(n - 1);
            let (a, b) = cut_and_crossfill(&p1, &p2, cut);
            prop_assert!(is_permutation(&a), "child A invalid: {:?}", a);
            prop_assert!(is_permutation(&b), "child B invalid: {:?}", b);
            prop_assert_eq!(&a[..cut], &p1[..cut]);
            prop_assert_eq!(&b[..cut], &p2[..cut]);
        }

        #[test]
        fn prop_pipeline_preserves_permutation((p1, p2) in perm_strategy(), seed in any::<u64>()) {
            let mut rng = create_rng(seed);
            let p1 = Genotype::from_genes(p1).unwrap();
            let p2 = Genotype::from_genes(p2).unwrap();
            let (mut a, mut b) = crossover(&p1, &p2, 1.0, &mut rng);
            swap_mutation(&mut a, 0.8, &mut rng);
            swap_mutation(&mut b, 0.8, &mut rng);
            prop_assert!(is_permutation(a.genes()));
            prop_assert!(is_permutation(b.genes()));
        }
    }
}
